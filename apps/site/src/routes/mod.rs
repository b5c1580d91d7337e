pub mod health;
pub mod pages;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Page routes come from the content manifest, so everything except the
/// health check goes through the page fallback.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .fallback(pages::serve)
        .with_state(state)
}
