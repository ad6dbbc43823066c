//! Resume tailoring: validate inputs, prompt the model once, parse the reply.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::llm_client::{ChatModel, LlmError};
use crate::tailor::parser::{ParseError, ResponseParser};
use crate::tailor::prompts::{tailor_prompt, tailor_system};
use crate::tailor::record::TailorRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    JobDescription,
    ResumeText,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputField::JobDescription => f.write_str("Job description"),
            InputField::ResumeText => f.write_str("Resume text"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TailorError {
    #[error("{0} is empty.")]
    EmptyInput(InputField),

    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    /// The reply could not be coerced into a record; `raw` is kept for diagnosis.
    #[error("Agent response could not be parsed: {source}")]
    Parse {
        raw: String,
        #[source]
        source: ParseError,
    },
}

/// Compares a resume against a job description using the model.
///
/// Blank inputs are rejected before any remote call is made.
pub async fn tailor_resume(
    job_description: &str,
    resume_text: &str,
    llm: &dyn ChatModel,
) -> Result<TailorRecord, TailorError> {
    if job_description.trim().is_empty() {
        return Err(TailorError::EmptyInput(InputField::JobDescription));
    }
    if resume_text.trim().is_empty() {
        return Err(TailorError::EmptyInput(InputField::ResumeText));
    }

    let span = info_span!("tailor", analysis_id = %Uuid::new_v4(), model = llm.model_name());
    async move {
        info!(
            "Tailoring resume ({} chars) against job description ({} chars)",
            resume_text.len(),
            job_description.len()
        );

        let prompt = tailor_prompt(job_description, resume_text);
        let raw = llm.complete(&tailor_system(), &prompt).await.map_err(|e| {
            warn!("Model call failed: {e}");
            e
        })?;

        match ResponseParser::default().parse(&raw) {
            Ok(record) => {
                info!(match_score = record.match_score, "Analysis complete");
                Ok(record)
            }
            Err(source) => {
                warn!("Model reply could not be parsed ({} chars): {source}", raw.len());
                if let ParseError::Unparseable { attempts } = &source {
                    for (strategy, e) in attempts {
                        debug!(strategy, error = %e, "Parse strategy failed");
                    }
                }
                Err(TailorError::Parse { raw, source })
            }
        }
    }
    .instrument(span)
    .await
}
