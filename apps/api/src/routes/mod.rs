pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::tailor::handlers;
use crate::ui::handlers as ui;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Browser UI
        .route("/", get(ui::handle_index))
        .route("/analyze", post(ui::handle_analyze))
        .route("/export/:kind", post(ui::handle_export))
        // JSON API
        .route("/api/v1/tailor", post(handlers::handle_tailor_upload))
        .route("/api/v1/tailor/text", post(handlers::handle_tailor_text))
        // Uploads are not size-limited locally.
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}
