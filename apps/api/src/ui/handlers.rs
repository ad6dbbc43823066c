//! Browser-facing handlers: the form page, analysis results, and downloads.

use askama::Template;
use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::{Html, IntoResponse},
    Form,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::tailor::analyzer::tailor_resume;
use crate::tailor::record::TailorRecord;
use crate::tailor::submission::Submission;
use crate::ui::export::ExportKind;
use crate::ui::views::{ErrorPage, IndexPage, ResultsPage};

#[derive(Debug, Deserialize)]
pub struct ExportForm {
    /// JSON of the record rendered on the results page.
    pub record: String,
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let page = IndexPage {
        model: state.llm.model_name().to_string(),
    };
    Ok(Html(page.render()?))
}

/// POST /analyze
///
/// Every outcome renders a page; failures show a diagnostic instead of an error status.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let model = state.llm.model_name().to_string();
    let submission = Submission::from_multipart(multipart).await?;

    let job_description = match submission.job_description() {
        Ok(jd) => jd,
        Err(e) => return Ok(Html(ErrorPage::from_source_error(model, e).render()?)),
    };
    let resume_text = match submission.resume_text().await {
        Ok(text) => text,
        Err(e) => return Ok(Html(ErrorPage::from_source_error(model, e).render()?)),
    };

    let html = match tailor_resume(job_description, &resume_text, state.llm.as_ref()).await {
        Ok(record) => ResultsPage::new(model, record)
            .map_err(|e| AppError::Internal(e.into()))?
            .render()?,
        Err(e) => ErrorPage::from_tailor_error(model, e).render()?,
    };
    Ok(Html(html))
}

/// POST /export/:kind
pub async fn handle_export(
    Path(kind): Path<ExportKind>,
    Form(form): Form<ExportForm>,
) -> Result<impl IntoResponse, AppError> {
    let record: TailorRecord = serde_json::from_str(&form.record)
        .map_err(|e| AppError::Validation(format!("Invalid record: {e}")))?;

    let disposition = format!("attachment; filename=\"{}\"", kind.file_name());
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        kind.render(&record),
    ))
}
