use std::convert::Infallible;

use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Local;
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tracing::debug;

use crate::errors::AppError;
use crate::state::AppState;

/// Fallback handler for every path other than `/health`.
///
/// Resolution order: page route, legacy alias (permanent redirect), static
/// asset, then the not-found page with status 404. Only page routes and
/// aliases answer other methods with 405; unknown paths stay 404.
pub async fn serve(State(state): State<AppState>, request: Request) -> Result<Response, AppError> {
    let readable = matches!(*request.method(), Method::GET | Method::HEAD);
    let path = request.uri().path().to_string();

    if let Some(page) = state.site.page_for_route(&path) {
        if !readable {
            return Ok(StatusCode::METHOD_NOT_ALLOWED.into_response());
        }
        let html = state.site.render(&page.id, &state.bindings)?;
        return Ok(Html(html).into_response());
    }

    if let Some(page) = state.site.page_for_alias(&path) {
        if !readable {
            return Ok(StatusCode::METHOD_NOT_ALLOWED.into_response());
        }
        debug!("Redirecting legacy path {path} to {}", page.route);
        return Ok(Redirect::permanent(&page.route).into_response());
    }

    // ServeDir answers 405 for any non-GET request, even when no file exists.
    if let Some(dir) = state.site.static_dir().filter(|_| readable) {
        let response = ServeDir::new(dir)
            .oneshot(request)
            .await
            .unwrap_or_else(|never: Infallible| match never {});
        if response.status() != StatusCode::NOT_FOUND {
            return Ok(response.into_response());
        }
    }

    not_found(&state, &path)
}

fn not_found(state: &AppState, path: &str) -> Result<Response, AppError> {
    debug!("No page or asset for {path}");
    let bindings = state.not_found_bindings(&Local::now());
    let html = state.site.render_not_found(&bindings)?;
    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}
