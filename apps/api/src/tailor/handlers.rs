//! Axum route handlers for the JSON tailoring API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::tailor::analyzer::tailor_resume;
use crate::tailor::record::TailorRecord;
use crate::tailor::submission::{
    ResumeSourceError, Submission, MISSING_INPUT_MESSAGE, NO_TEXT_MESSAGE,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TailorTextRequest {
    pub job_description: String,
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct TailorResponse {
    pub result: TailorRecord,
}

impl From<ResumeSourceError> for AppError {
    fn from(err: ResumeSourceError) -> Self {
        match err {
            ResumeSourceError::MissingInput => AppError::Validation(MISSING_INPUT_MESSAGE.into()),
            ResumeSourceError::NoExtractableText => AppError::Extraction(NO_TEXT_MESSAGE.into()),
        }
    }
}

/// POST /api/v1/tailor
///
/// Multipart form: `resume` (PDF), optional `resume_text`, `job_description`.
pub async fn handle_tailor_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<TailorResponse>, AppError> {
    let submission = Submission::from_multipart(multipart).await?;
    let job_description = submission.job_description()?;
    let resume_text = submission.resume_text().await?;

    let result = tailor_resume(job_description, &resume_text, state.llm.as_ref()).await?;
    Ok(Json(TailorResponse { result }))
}

/// POST /api/v1/tailor/text
///
/// Same analysis for resume text that has already been extracted or pasted.
pub async fn handle_tailor_text(
    State(state): State<AppState>,
    Json(request): Json<TailorTextRequest>,
) -> Result<Json<TailorResponse>, AppError> {
    let result = tailor_resume(
        &request.job_description,
        &request.resume_text,
        state.llm.as_ref(),
    )
    .await?;
    Ok(Json(TailorResponse { result }))
}
