//! Axum route handlers for the Generation Endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;
use crate::generation::pipeline::{generate_resume, GeneratedResume};
use crate::state::AppState;
use crate::templates::TemplateKey;

/// GET /resume, GET /resume/
///
/// Generates the default (`modern`) variant; an empty key lands here too.
pub async fn handle_default_resume(State(state): State<AppState>) -> Result<Response, AppError> {
    generate(&state, TemplateKey::default()).await
}

/// GET /resume/:template
///
/// Unknown template keys fall back to `modern`; the key is never an error.
pub async fn handle_resume(
    State(state): State<AppState>,
    Path(template): Path<String>,
) -> Result<Response, AppError> {
    generate(&state, TemplateKey::resolve(Some(&template))).await
}

async fn generate(state: &AppState, template: TemplateKey) -> Result<Response, AppError> {
    let generated = generate_resume(Arc::clone(&state.resume), &state.assets, template).await?;
    Ok(pdf_response(generated))
}

fn pdf_response(generated: GeneratedResume) -> Response {
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", generated.filename),
        ),
        (header::CACHE_CONTROL, "no-store".to_string()),
    ];
    (headers, generated.bytes).into_response()
}
