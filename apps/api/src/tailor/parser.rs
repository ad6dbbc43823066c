//! Tolerant parsing of free-text model replies into a [`TailorRecord`].
//!
//! Strategies are tried in order and the first success wins:
//! 1. the whole reply as strict JSON,
//! 2. the first balanced `{...}` block as strict JSON,
//! 3. the same block as a permissive Python-style literal.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::tailor::literal::{parse_literal, LiteralError};
use crate::tailor::record::{CoercionError, TailorRecord};

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("no balanced brace block found")]
    NoBlock,

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid literal: {0}")]
    Literal(#[from] LiteralError),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Could not parse JSON from agent response.")]
    Unparseable {
        attempts: Vec<(&'static str, StrategyError)>,
    },

    #[error(transparent)]
    Coercion(#[from] CoercionError),
}

/// One way of turning reply text into a JSON value.
pub trait ParseStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn parse(&self, text: &str) -> Result<Value, StrategyError>;
}

/// The entire reply is a JSON document.
pub struct StrictJson;

impl ParseStrategy for StrictJson {
    fn name(&self) -> &'static str {
        "strict_json"
    }

    fn parse(&self, text: &str) -> Result<Value, StrategyError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// The first balanced brace block in the reply is a JSON document.
pub struct BraceBlockJson;

impl ParseStrategy for BraceBlockJson {
    fn name(&self) -> &'static str {
        "brace_block_json"
    }

    fn parse(&self, text: &str) -> Result<Value, StrategyError> {
        let block = extract_first_json_block(text).ok_or(StrategyError::NoBlock)?;
        Ok(serde_json::from_str(block)?)
    }
}

/// The first balanced brace block in the reply is a Python-style literal.
pub struct BraceBlockLiteral;

impl ParseStrategy for BraceBlockLiteral {
    fn name(&self) -> &'static str {
        "brace_block_literal"
    }

    fn parse(&self, text: &str) -> Result<Value, StrategyError> {
        let block = extract_first_json_block(text).ok_or(StrategyError::NoBlock)?;
        Ok(parse_literal(block)?)
    }
}

/// Returns the substring from the first `{` to the `}` that brings the nesting
/// depth back to zero. Braces inside string literals are counted too.
pub fn extract_first_json_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth: usize = 0;
    for (i, b) in text.bytes().enumerate().skip(start) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Ordered chain of [`ParseStrategy`] values.
pub struct ResponseParser {
    strategies: Vec<Box<dyn ParseStrategy>>,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::with_strategies(vec![
            Box::new(StrictJson),
            Box::new(BraceBlockJson),
            Box::new(BraceBlockLiteral),
        ])
    }
}

impl ResponseParser {
    pub fn with_strategies(strategies: Vec<Box<dyn ParseStrategy>>) -> Self {
        Self { strategies }
    }

    /// Runs the chain and returns the first successfully parsed value.
    pub fn parse_value(&self, text: &str) -> Result<Value, ParseError> {
        let mut attempts = Vec::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            match strategy.parse(text) {
                Ok(value) => {
                    debug!(strategy = strategy.name(), "Parsed model reply");
                    return Ok(value);
                }
                Err(e) => attempts.push((strategy.name(), e)),
            }
        }
        Err(ParseError::Unparseable { attempts })
    }

    /// Parses and normalizes a reply into a complete record.
    pub fn parse(&self, text: &str) -> Result<TailorRecord, ParseError> {
        let value = self.parse_value(text)?;
        Ok(TailorRecord::from_value(&value)?)
    }
}
