use anyhow::{bail, Context, Result};

const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Remote model settings. Fixed for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

/// Application configuration loaded from environment variables.
/// Startup fails if the provider credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Provider credentials live in api.env; a regular .env is honoured too.
        dotenvy::from_filename("api.env").ok();
        dotenvy::dotenv().ok();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GROQ_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .context("Required environment variable 'GROQ_API_KEY' is not set (expected in api.env)")?;

        let temperature = parse_or(&lookup, "LLM_TEMPERATURE", 0.2_f32)?;
        if !(0.0..=2.0).contains(&temperature) {
            bail!("LLM_TEMPERATURE must be between 0 and 2, got {temperature}");
        }

        let max_tokens = parse_or(&lookup, "LLM_MAX_TOKENS", 4096_u32)?;
        if max_tokens == 0 {
            bail!("LLM_MAX_TOKENS must be greater than zero");
        }

        let timeout_secs = parse_or(&lookup, "LLM_TIMEOUT_SECS", 120_u64)?;
        if timeout_secs == 0 {
            bail!("LLM_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Config {
            llm: LlmConfig {
                api_key,
                api_url: lookup("LLM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                model: lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                temperature,
                max_tokens,
                timeout_secs,
            },
            port: parse_or(&lookup, "PORT", 8080_u16)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = Config::from_vars(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("GROQ_API_KEY"));
    }

    #[test]
    fn test_blank_api_key_is_fatal() {
        assert!(Config::from_vars(lookup_from(&[("GROQ_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_vars(lookup_from(&[("GROQ_API_KEY", "gsk_test")])).unwrap();
        assert_eq!(config.llm.api_key, "gsk_test");
        assert_eq!(config.llm.model, DEFAULT_MODEL);
        assert_eq!(config.llm.api_url, DEFAULT_API_URL);
        assert!((config.llm.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.llm.max_tokens, 4096);
        assert_eq!(config.llm.timeout_secs, 120);
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_overrides_applied() {
        let config = Config::from_vars(lookup_from(&[
            ("GROQ_API_KEY", "k"),
            ("LLM_MODEL", "llama-3.3-70b-versatile"),
            ("LLM_TEMPERATURE", "0.5"),
            ("LLM_MAX_TOKENS", "1024"),
            ("PORT", "9000"),
        ]))
        .unwrap();
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert!((config.llm.temperature - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.llm.max_tokens, 1024);
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_invalid_port_rejected() {
        let err =
            Config::from_vars(lookup_from(&[("GROQ_API_KEY", "k"), ("PORT", "http")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_out_of_range_temperature_rejected() {
        assert!(
            Config::from_vars(lookup_from(&[("GROQ_API_KEY", "k"), ("LLM_TEMPERATURE", "3.5")]))
                .is_err()
        );
    }

    #[test]
    fn test_zero_max_tokens_rejected() {
        assert!(
            Config::from_vars(lookup_from(&[("GROQ_API_KEY", "k"), ("LLM_MAX_TOKENS", "0")]))
                .is_err()
        );
    }
}
