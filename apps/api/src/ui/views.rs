//! Askama page models. Templates live in `templates/`.

use askama::Template;

use crate::tailor::analyzer::TailorError;
use crate::tailor::record::TailorRecord;
use crate::tailor::submission::{
    ResumeSourceError, MISSING_INPUT_MESSAGE, NO_TEXT_MESSAGE, NO_TEXT_REMEDIATION,
};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub model: String,
}

#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsPage {
    pub model: String,
    pub record: TailorRecord,
    /// Clamped to 0–100.
    pub score: u8,
    pub status: &'static str,
    /// Posted back to the export endpoint.
    pub record_json: String,
}

impl ResultsPage {
    pub fn new(model: String, record: TailorRecord) -> Result<Self, serde_json::Error> {
        let status = if record.is_good_fit() {
            "Good Fit"
        } else {
            "Needs Improvement"
        };
        Ok(Self {
            model,
            score: record.score_percent(),
            status,
            record_json: serde_json::to_string(&record)?,
            record,
        })
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub model: String,
    pub message: String,
    pub remediation: Vec<&'static str>,
    /// Unparsed model reply, shown for manual recovery.
    pub raw: Option<String>,
    pub exception: Option<String>,
}

impl ErrorPage {
    fn message(model: String, message: String) -> Self {
        Self {
            model,
            message,
            remediation: Vec::new(),
            raw: None,
            exception: None,
        }
    }

    pub fn from_source_error(model: String, err: ResumeSourceError) -> Self {
        match err {
            ResumeSourceError::MissingInput => Self::message(model, MISSING_INPUT_MESSAGE.into()),
            ResumeSourceError::NoExtractableText => Self {
                remediation: NO_TEXT_REMEDIATION.to_vec(),
                ..Self::message(model, NO_TEXT_MESSAGE.into())
            },
        }
    }

    pub fn from_tailor_error(model: String, err: TailorError) -> Self {
        match err {
            TailorError::EmptyInput(_) => Self::message(model, format!("Error: {err}")),
            TailorError::Llm(_) => Self::message(
                model,
                "Error: the AI service could not be reached. Please try again.".into(),
            ),
            TailorError::Parse { raw, source } => Self {
                raw: Some(raw),
                exception: Some(source.to_string()),
                ..Self::message(
                    model,
                    "Agent response could not be parsed. Showing raw output for debugging.".into(),
                )
            },
        }
    }
}
