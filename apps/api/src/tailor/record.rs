//! The five-field analysis record and its normalization from loosely-typed model output.

use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Score at or above which a resume is presented as a good fit.
pub const GOOD_FIT_THRESHOLD: u8 = 70;

/// Result of one resume/job-description analysis.
///
/// Every field is always populated; missing or mistyped model output is
/// replaced by the field's zero value during [`TailorRecord::from_value`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TailorRecord {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub improved_bullets: Vec<String>,
    pub cover_letter: String,
    /// As reported by the model; may fall outside 0–100.
    pub match_score: i64,
}

#[derive(Debug, Error, PartialEq)]
pub enum CoercionError {
    #[error("match_score {0} cannot be converted to an integer")]
    MatchScore(String),
}

impl TailorRecord {
    /// Normalizes a parsed model reply into a record.
    ///
    /// A non-object value yields the all-default record; inside an object each
    /// field is defaulted on its own. Only a `match_score` that cannot be
    /// coerced to an integer is an error.
    pub fn from_value(value: &Value) -> Result<Self, CoercionError> {
        let Some(obj) = value.as_object() else {
            return Ok(Self::default());
        };

        Ok(Self {
            matched_skills: string_list(obj, "matched_skills"),
            missing_skills: string_list(obj, "missing_skills"),
            improved_bullets: string_list(obj, "improved_bullets"),
            cover_letter: text_field(obj, "cover_letter"),
            match_score: match obj.get("match_score") {
                Some(v) => coerce_score(v)?,
                None => 0,
            },
        })
    }

    /// `match_score` clamped into 0–100 for display and export.
    pub fn score_percent(&self) -> u8 {
        self.match_score.clamp(0, 100) as u8
    }

    pub fn is_good_fit(&self) -> bool {
        self.score_percent() >= GOOD_FIT_THRESHOLD
    }
}

fn string_list(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    match obj.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(item_text).collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn item_text(item: &Value) -> Option<String> {
    match item {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn text_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(item_text)
            .collect::<Vec<_>>()
            .join("\n"),
        Some(other) => other.to_string(),
    }
}

fn coerce_score(value: &Value) -> Result<i64, CoercionError> {
    let fail = || CoercionError::MatchScore(value.to_string());
    match value {
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            // Out-of-range values saturate; `as` truncates toward zero.
            match n.as_f64() {
                Some(f) if f.is_finite() => Ok(f as i64),
                _ => Err(fail()),
            }
        }
        Value::String(s) => parse_int_str(s).ok_or_else(fail),
        Value::Null | Value::Array(_) | Value::Object(_) => Err(fail()),
    }
}

/// Integer text as `int()` reads it: surrounding whitespace, an optional sign,
/// and digits with single underscores only between digits.
fn parse_int_str(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let bytes = digits.as_bytes();
    let well_formed = bytes.first().is_some_and(u8::is_ascii_digit)
        && bytes.last().is_some_and(u8::is_ascii_digit)
        && bytes.iter().all(|b| b.is_ascii_digit() || *b == b'_')
        && !digits.contains("__");
    if !well_formed {
        return None;
    }

    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    let magnitude = match cleaned.parse::<i64>() {
        Ok(n) => n,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => i64::MAX,
        Err(_) => return None,
    };
    Some(if negative { magnitude.saturating_neg() } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_object_preserved() {
        let record = TailorRecord::from_value(&json!({
            "matched_skills": ["Rust", "SQL"],
            "missing_skills": ["Kubernetes"],
            "improved_bullets": ["Cut p99 latency by 40%"],
            "cover_letter": "Dear team,",
            "match_score": 72
        }))
        .unwrap();

        assert_eq!(record.matched_skills, vec!["Rust", "SQL"]);
        assert_eq!(record.missing_skills, vec!["Kubernetes"]);
        assert_eq!(record.improved_bullets, vec!["Cut p99 latency by 40%"]);
        assert_eq!(record.cover_letter, "Dear team,");
        assert_eq!(record.match_score, 72);
    }

    #[test]
    fn test_non_object_yields_defaults() {
        for value in [json!([1, 2]), json!("text"), json!(42), json!(null)] {
            assert_eq!(TailorRecord::from_value(&value).unwrap(), TailorRecord::default());
        }
    }

    #[test]
    fn test_missing_fields_default_individually() {
        let record = TailorRecord::from_value(&json!({
            "matched_skills": ["Go"],
            "cover_letter": "Hello"
        }))
        .unwrap();
        assert_eq!(record.matched_skills, vec!["Go"]);
        assert!(record.missing_skills.is_empty());
        assert!(record.improved_bullets.is_empty());
        assert_eq!(record.match_score, 0);
    }

    #[test]
    fn test_bare_string_becomes_single_item() {
        let record = TailorRecord::from_value(&json!({"matched_skills": "Python"})).unwrap();
        assert_eq!(record.matched_skills, vec!["Python"]);
    }

    #[test]
    fn test_list_items_are_stringified() {
        let record =
            TailorRecord::from_value(&json!({"improved_bullets": ["a", 3, null, true]})).unwrap();
        assert_eq!(record.improved_bullets, vec!["a", "3", "true"]);
    }

    #[test]
    fn test_cover_letter_null_is_empty() {
        let record = TailorRecord::from_value(&json!({"cover_letter": null})).unwrap();
        assert_eq!(record.cover_letter, "");
    }

    #[test]
    fn test_score_coercions() {
        let score = |v: Value| coerce_score(&v);
        assert_eq!(score(json!(85)), Ok(85));
        assert_eq!(score(json!(85.9)), Ok(85));
        assert_eq!(score(json!(-3.7)), Ok(-3));
        assert_eq!(score(json!(" 64 ")), Ok(64));
        assert_eq!(score(json!(true)), Ok(1));
        assert!(score(json!("85%")).is_err());
        assert!(score(json!(null)).is_err());
        assert!(score(json!([85])).is_err());
    }

    #[test]
    fn test_out_of_range_scores_saturate() {
        let score = |v: Value| coerce_score(&v);
        assert_eq!(score(json!(1e300)), Ok(i64::MAX));
        assert_eq!(score(json!(-1e300)), Ok(i64::MIN));
        assert_eq!(score(json!(u64::MAX)), Ok(i64::MAX));
        assert_eq!(score(json!("99999999999999999999")), Ok(i64::MAX));
        assert_eq!(score(json!("-99999999999999999999")), Ok(-i64::MAX));

        let record: TailorRecord = crate::tailor::parser::ResponseParser::default()
            .parse(r#"{"match_score": 99999999999999999999}"#)
            .unwrap();
        assert_eq!(record.score_percent(), 100);
    }

    #[test]
    fn test_score_string_underscores_follow_int_rules() {
        assert_eq!(parse_int_str("1_000"), Some(1000));
        assert_eq!(parse_int_str(" -7_5 "), Some(-75));
        assert_eq!(parse_int_str("+42"), Some(42));
        assert_eq!(parse_int_str("007"), Some(7));
        assert_eq!(parse_int_str("_5"), None);
        assert_eq!(parse_int_str("5_"), None);
        assert_eq!(parse_int_str("5__0"), None);
        assert_eq!(parse_int_str("-"), None);
        assert_eq!(parse_int_str("+-5"), None);
        assert_eq!(parse_int_str(""), None);
        assert_eq!(parse_int_str("8.5"), None);
    }

    #[test]
    fn test_bad_score_fails_whole_record() {
        let err = TailorRecord::from_value(&json!({"match_score": "high"})).unwrap_err();
        assert_eq!(err, CoercionError::MatchScore("\"high\"".to_string()));
    }

    #[test]
    fn test_score_percent_clamps() {
        let mut record = TailorRecord {
            match_score: 150,
            ..Default::default()
        };
        assert_eq!(record.score_percent(), 100);
        record.match_score = -5;
        assert_eq!(record.score_percent(), 0);
        record.match_score = 42;
        assert_eq!(record.score_percent(), 42);
    }

    #[test]
    fn test_good_fit_threshold() {
        let mut record = TailorRecord {
            match_score: 70,
            ..Default::default()
        };
        assert!(record.is_good_fit());
        record.match_score = 69;
        assert!(!record.is_good_fit());
        record.match_score = 500;
        assert!(record.is_good_fit());
    }
}
