pub mod health;

use axum::{routing::get, Router};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/resume", get(handlers::handle_default_resume))
        .route("/resume/", get(handlers::handle_default_resume))
        .route("/resume/:template", get(handlers::handle_resume))
        .with_state(state)
}
