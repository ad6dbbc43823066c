//! Permissive parser for Python-literal style data.
//!
//! Models regularly answer with dict syntax instead of JSON: single quotes,
//! `True`/`None`, trailing commas, tuples, and `#` comments copied from the
//! schema in the prompt. This parser accepts that superset and produces a
//! `serde_json::Value`.

use serde_json::{Map, Number, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LiteralError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected character {found:?} at offset {offset}")]
    Unexpected { found: char, offset: usize },

    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    #[error("invalid escape sequence at offset {0}")]
    InvalidEscape(usize),

    #[error("unknown name {0:?}")]
    UnknownName(String),

    #[error("nesting too deep at offset {0}")]
    TooDeep(usize),
}

/// Matches serde_json's recursion limit.
pub const MAX_DEPTH: usize = 128;

/// Parses `input` as a single literal, allowing surrounding whitespace and comments.
pub fn parse_literal(input: &str) -> Result<Value, LiteralError> {
    let mut parser = Parser {
        src: input,
        pos: 0,
        depth: 0,
    };
    let value = parser.value()?;
    parser.skip_trivia();
    match parser.peek() {
        None => Ok(value),
        Some(found) => Err(LiteralError::Unexpected {
            found,
            offset: parser.pos,
        }),
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn unexpected(&self) -> LiteralError {
        match self.peek() {
            Some(found) => LiteralError::Unexpected {
                found,
                offset: self.pos,
            },
            None => LiteralError::UnexpectedEnd,
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('#') => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                // explicit line continuation
                Some('\\') if matches!(self.peek_second(), Some('\n' | '\r')) => {
                    self.bump();
                }
                _ => return,
            }
        }
    }

    fn value(&mut self) -> Result<Value, LiteralError> {
        self.skip_trivia();
        match self.peek() {
            None => Err(LiteralError::UnexpectedEnd),
            Some('{' | '[' | '(') => self.nested(),
            Some('\'' | '"') => self.strings(false),
            Some(c) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => self.number(),
            Some(c) if c.is_alphabetic() || c == '_' => self.name(),
            Some(_) => Err(self.unexpected()),
        }
    }

    fn nested(&mut self) -> Result<Value, LiteralError> {
        if self.depth >= MAX_DEPTH {
            return Err(LiteralError::TooDeep(self.pos));
        }
        self.depth += 1;
        let value = match self.peek() {
            Some('{') => self.dict_or_set(),
            Some('[') => self.sequence(']').map(Value::Array),
            _ => self.tuple(),
        };
        self.depth -= 1;
        value
    }

    fn dict_or_set(&mut self) -> Result<Value, LiteralError> {
        self.bump();
        self.skip_trivia();
        if self.peek() == Some('}') {
            self.bump();
            return Ok(Value::Object(Map::new()));
        }

        let first = self.value()?;
        self.skip_trivia();
        if self.peek() != Some(':') {
            // {a, b, ...} is a set literal
            let mut items = vec![first];
            items.extend(self.sequence_tail('}')?);
            return Ok(Value::Array(items));
        }

        let mut map = Map::new();
        let mut key = first;
        loop {
            self.skip_trivia();
            if self.peek() != Some(':') {
                return Err(self.unexpected());
            }
            self.bump();
            let value = self.value()?;
            map.insert(key_string(key), value);

            self.skip_trivia();
            match self.bump() {
                Some('}') => return Ok(Value::Object(map)),
                Some(',') => {
                    self.skip_trivia();
                    if self.peek() == Some('}') {
                        self.bump();
                        return Ok(Value::Object(map));
                    }
                    key = self.value()?;
                }
                Some(found) => {
                    return Err(LiteralError::Unexpected {
                        found,
                        offset: self.pos - found.len_utf8(),
                    })
                }
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    /// Parses `open item, item, ... close` with an optional trailing comma.
    fn sequence(&mut self, close: char) -> Result<Vec<Value>, LiteralError> {
        self.bump();
        self.skip_trivia();
        if self.peek() == Some(close) {
            self.bump();
            return Ok(Vec::new());
        }
        let mut items = vec![self.value()?];
        items.extend(self.sequence_tail(close)?);
        Ok(items)
    }

    /// Continues a sequence after its first item up to and including `close`.
    fn sequence_tail(&mut self, close: char) -> Result<Vec<Value>, LiteralError> {
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            match self.bump() {
                Some(c) if c == close => return Ok(items),
                Some(',') => {
                    self.skip_trivia();
                    if self.peek() == Some(close) {
                        self.bump();
                        return Ok(items);
                    }
                    items.push(self.value()?);
                }
                Some(found) => {
                    return Err(LiteralError::Unexpected {
                        found,
                        offset: self.pos - found.len_utf8(),
                    })
                }
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    /// `(x)` is just `x`; `(x,)` and `(x, y)` are tuples.
    fn tuple(&mut self) -> Result<Value, LiteralError> {
        self.bump();
        self.skip_trivia();
        if self.peek() == Some(')') {
            self.bump();
            return Ok(Value::Array(Vec::new()));
        }
        let first = self.value()?;
        self.skip_trivia();
        if self.peek() == Some(')') {
            self.bump();
            return Ok(first);
        }
        let mut items = vec![first];
        items.extend(self.sequence_tail(')')?);
        Ok(Value::Array(items))
    }

    fn name(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        let ident = &self.src[start..self.pos];

        // string prefixes: u'..', r'..', ur combinations
        if matches!(self.peek(), Some('\'' | '"')) {
            let lower = ident.to_ascii_lowercase();
            if lower == "u" || lower == "r" {
                return self.strings(lower == "r");
            }
        }

        match ident {
            "True" | "true" => Ok(Value::Bool(true)),
            "False" | "false" => Ok(Value::Bool(false)),
            "None" | "null" => Ok(Value::Null),
            other => Err(LiteralError::UnknownName(other.to_string())),
        }
    }

    /// One or more adjacent string literals, concatenated.
    fn strings(&mut self, raw: bool) -> Result<Value, LiteralError> {
        let mut out = self.string(raw)?;
        loop {
            self.skip_trivia();
            match self.peek() {
                Some('\'' | '"') => out.push_str(&self.string(false)?),
                Some('r' | 'R' | 'u' | 'U') if matches!(self.peek_second(), Some('\'' | '"')) => {
                    let prefix = self.bump();
                    out.push_str(&self.string(matches!(prefix, Some('r' | 'R')))?);
                }
                _ => return Ok(Value::String(out)),
            }
        }
    }

    fn string(&mut self, raw: bool) -> Result<String, LiteralError> {
        let quote = self.bump().ok_or(LiteralError::UnexpectedEnd)?;
        let triple: String = std::iter::repeat(quote).take(3).collect();
        let is_triple = self.rest().starts_with(&triple[..2]);
        if is_triple {
            self.bump();
            self.bump();
        }

        let mut out = String::new();
        loop {
            if is_triple && self.rest().starts_with(&triple) {
                self.pos += triple.len();
                return Ok(out);
            }
            let escape_at = self.pos;
            match self.bump() {
                None => return Err(LiteralError::UnexpectedEnd),
                Some(c) if c == quote && !is_triple => return Ok(out),
                Some('\n') if !is_triple => {
                    return Err(LiteralError::Unexpected {
                        found: '\n',
                        offset: escape_at,
                    })
                }
                Some('\\') if raw => {
                    out.push('\\');
                    if let Some(next) = self.bump() {
                        out.push(next);
                    }
                }
                Some('\\') => self.escape(escape_at, &mut out)?,
                Some(c) => out.push(c),
            }
        }
    }

    fn escape(&mut self, escape_at: usize, out: &mut String) -> Result<(), LiteralError> {
        let c = self.bump().ok_or(LiteralError::UnexpectedEnd)?;
        match c {
            '\n' => {}
            '\r' => {
                if self.peek() == Some('\n') {
                    self.bump();
                }
            }
            '\\' | '\'' | '"' => out.push(c),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'v' => out.push('\u{0B}'),
            'x' => out.push(self.hex_char(2, escape_at)?),
            'u' => out.push(self.hex_char(4, escape_at)?),
            'U' => out.push(self.hex_char(8, escape_at)?),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    fn hex_char(&mut self, digits: usize, escape_at: usize) -> Result<char, LiteralError> {
        let hex = self
            .rest()
            .get(..digits)
            .filter(|h| h.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or(LiteralError::InvalidEscape(escape_at))?;
        let code = u32::from_str_radix(hex, 16).map_err(|_| LiteralError::InvalidEscape(escape_at))?;
        self.pos += digits;
        char::from_u32(code).ok_or(LiteralError::InvalidEscape(escape_at))
    }

    fn number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.bump();
        }
        let mut prev = ' ';
        while let Some(c) = self.peek() {
            let accepted = c.is_ascii_digit()
                || matches!(c, '.' | '_' | 'e' | 'E')
                || (matches!(c, '+' | '-') && matches!(prev, 'e' | 'E'));
            if !accepted {
                break;
            }
            prev = c;
            self.bump();
        }

        let literal = &self.src[start..self.pos];
        let invalid = || LiteralError::InvalidNumber(literal.to_string());

        // `_` is only a separator between two digits.
        let bytes = literal.as_bytes();
        let stray_underscore = bytes.iter().enumerate().any(|(i, b)| {
            *b == b'_'
                && !(i > 0
                    && bytes[i - 1].is_ascii_digit()
                    && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
        });
        if stray_underscore {
            return Err(invalid());
        }
        let cleaned = literal.replace('_', "");

        if !cleaned.contains(['.', 'e', 'E']) {
            if let Ok(i) = cleaned.parse::<i64>() {
                return Ok(Value::Number(i.into()));
            }
        }
        // Floats, and integers too wide for i64.
        let f: f64 = cleaned.parse().map_err(|_| invalid())?;
        Number::from_f64(f).map(Value::Number).ok_or_else(invalid)
    }
}

fn key_string(key: Value) -> String {
    match key {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_python_dict_with_single_quotes() {
        let value = parse_literal(
            "{'matched_skills': ['Python', 'SQL'], 'missing_skills': [], \
             'cover_letter': 'Hi', 'match_score': 85}",
        )
        .unwrap();
        assert_eq!(
            value,
            json!({
                "matched_skills": ["Python", "SQL"],
                "missing_skills": [],
                "cover_letter": "Hi",
                "match_score": 85
            })
        );
    }

    #[test]
    fn test_python_constants() {
        assert_eq!(
            parse_literal("{'a': True, 'b': False, 'c': None}").unwrap(),
            json!({"a": true, "b": false, "c": null})
        );
    }

    #[test]
    fn test_trailing_commas_and_comments() {
        let value = parse_literal(
            "{\n  'matched_skills': ['Rust',],\n  'match_score': 0  # integer 0-100\n,}",
        )
        .unwrap();
        assert_eq!(value, json!({"matched_skills": ["Rust"], "match_score": 0}));
    }

    #[test]
    fn test_strict_json_is_accepted() {
        let value = parse_literal(r#"{"a": [1, 2.5, -3], "b": "x\"y", "c": null}"#).unwrap();
        assert_eq!(value, json!({"a": [1, 2.5, -3], "b": "x\"y", "c": null}));
    }

    #[test]
    fn test_escapes() {
        assert_eq!(
            parse_literal(r"'it\'s\n\ttab \x41\u00e9 \q'").unwrap(),
            json!("it's\n\ttab Aé \\q")
        );
    }

    #[test]
    fn test_raw_and_prefixed_strings() {
        assert_eq!(parse_literal(r"r'C:\new'").unwrap(), json!("C:\\new"));
        assert_eq!(parse_literal("u'hello'").unwrap(), json!("hello"));
    }

    #[test]
    fn test_adjacent_strings_concatenate() {
        assert_eq!(
            parse_literal("{'cover_letter': 'Dear hiring manager, '\n    'I am excited.'}").unwrap(),
            json!({"cover_letter": "Dear hiring manager, I am excited."})
        );
    }

    #[test]
    fn test_triple_quoted_string_spans_lines() {
        assert_eq!(
            parse_literal("'''line one\nline 'two' '''").unwrap(),
            json!("line one\nline 'two' ")
        );
    }

    #[test]
    fn test_tuples_sets_and_grouping() {
        assert_eq!(parse_literal("('a', 'b')").unwrap(), json!(["a", "b"]));
        assert_eq!(parse_literal("('a',)").unwrap(), json!(["a"]));
        assert_eq!(parse_literal("(7)").unwrap(), json!(7));
        assert_eq!(parse_literal("{'x', 'y'}").unwrap(), json!(["x", "y"]));
        assert_eq!(parse_literal("{}").unwrap(), json!({}));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(parse_literal("1_000").unwrap(), json!(1000));
        assert_eq!(parse_literal("+4").unwrap(), json!(4));
        assert_eq!(parse_literal("1e2").unwrap(), json!(100.0));
        assert!(matches!(
            parse_literal("1.2.3"),
            Err(LiteralError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_non_string_keys_are_stringified() {
        assert_eq!(
            parse_literal("{1: 'one', True: 'yes'}").unwrap(),
            json!({"1": "one", "true": "yes"})
        );
    }

    #[test]
    fn test_rejects_expressions_and_names() {
        assert_eq!(
            parse_literal("{'a': foo}"),
            Err(LiteralError::UnknownName("foo".to_string()))
        );
        assert!(parse_literal("{'a': 1 + 2}").is_err());
    }

    #[test]
    fn test_rejects_unterminated_input() {
        assert_eq!(parse_literal("{'a': [1, 2"), Err(LiteralError::UnexpectedEnd));
        assert_eq!(parse_literal("'open"), Err(LiteralError::UnexpectedEnd));
        assert!(parse_literal("'line\nbreak'").is_err());
    }

    #[test]
    fn test_rejects_trailing_content() {
        assert!(matches!(
            parse_literal("{'a': 1} extra"),
            Err(LiteralError::Unexpected { found: 'e', .. })
        ));
    }

    #[test]
    fn test_deep_nesting_is_rejected_not_overflowed() {
        let depth = 10_000;
        let text = format!("{{'a': {}{}}}", "[".repeat(depth), "]".repeat(depth));
        assert!(matches!(parse_literal(&text), Err(LiteralError::TooDeep(_))));

        let text = "(".repeat(depth);
        assert!(matches!(parse_literal(&text), Err(LiteralError::TooDeep(_))));
    }

    #[test]
    fn test_nesting_up_to_limit_is_accepted() {
        let inner = MAX_DEPTH - 1;
        let text = format!("{{'a': {}{}}}", "[".repeat(inner), "]".repeat(inner));
        assert!(parse_literal(&text).is_ok());

        let text = format!("{{'a': {}{}}}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(matches!(parse_literal(&text), Err(LiteralError::TooDeep(_))));
    }

    #[test]
    fn test_number_underscores_only_between_digits() {
        assert_eq!(parse_literal("[1_0.5]"), Ok(json!([10.5])));
        assert!(matches!(parse_literal("5__0"), Err(LiteralError::InvalidNumber(_))));
        assert!(matches!(parse_literal("5_"), Err(LiteralError::InvalidNumber(_))));
        assert!(matches!(parse_literal("-_5"), Err(LiteralError::InvalidNumber(_))));
    }

    #[test]
    fn test_wide_integer_becomes_float() {
        assert_eq!(parse_literal("99999999999999999999"), Ok(json!(1e20)));
        assert!(matches!(parse_literal("1e400"), Err(LiteralError::InvalidNumber(_))));
    }
}
