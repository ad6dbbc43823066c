//! Reading the analysis form and deciding which resume text to analyze.

use axum::extract::Multipart;
use bytes::Bytes;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extraction::extract_pdf_text_blocking;

pub const MISSING_INPUT_MESSAGE: &str =
    "Please provide both a job description and upload your resume to proceed.";

pub const NO_TEXT_MESSAGE: &str =
    "Could not extract text from your PDF. It may be a scanned document or image-based PDF.";

/// Shown alongside [`NO_TEXT_MESSAGE`].
pub const NO_TEXT_REMEDIATION: [&str; 3] = [
    "Upload a text-based PDF (not scanned)",
    "Use OCR software to convert your scanned PDF to text first",
    "Paste your resume text directly into the resume text field",
];

/// Fields of one analysis form post.
#[derive(Debug, Default)]
pub struct Submission {
    pub resume_pdf: Option<Bytes>,
    pub resume_text: Option<String>,
    pub job_description: Option<String>,
}

/// Why a submission could not produce resume text.
#[derive(Debug, PartialEq, Eq)]
pub enum ResumeSourceError {
    MissingInput,
    NoExtractableText,
}

impl Submission {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut submission = Submission::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed form data: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "resume" => {
                    let file_name = field.file_name().map(str::to_string);
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                    info!(
                        "Received resume upload {:?} ({} bytes)",
                        file_name.as_deref().unwrap_or("unnamed"),
                        data.len()
                    );
                    // Browsers send an empty part when no file was chosen.
                    if !data.is_empty() {
                        submission.resume_pdf = Some(data);
                    }
                }
                "resume_text" | "job_description" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Failed to read {name}: {e}")))?;
                    if name == "resume_text" {
                        submission.resume_text = Some(text);
                    } else {
                        submission.job_description = Some(text);
                    }
                }
                other => debug!("Ignoring unexpected form field {other:?}"),
            }
        }

        Ok(submission)
    }

    /// The job description, or [`ResumeSourceError::MissingInput`] if none was sent.
    pub fn job_description(&self) -> Result<&str, ResumeSourceError> {
        self.job_description
            .as_deref()
            .filter(|jd| !jd.is_empty())
            .ok_or(ResumeSourceError::MissingInput)
    }

    /// Resume text to analyze: the PDF's text when it has any, else pasted text.
    pub async fn resume_text(&self) -> Result<String, ResumeSourceError> {
        let pasted = self
            .resume_text
            .as_deref()
            .filter(|t| !t.trim().is_empty());

        let Some(pdf) = self.resume_pdf.clone() else {
            return pasted
                .map(str::to_string)
                .ok_or(ResumeSourceError::MissingInput);
        };

        let extracted = extract_pdf_text_blocking(pdf).await;
        if !extracted.trim().is_empty() {
            return Ok(extracted);
        }
        pasted
            .map(str::to_string)
            .ok_or(ResumeSourceError::NoExtractableText)
    }
}
