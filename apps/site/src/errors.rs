use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::site::ComposeError;

const NOT_FOUND_DOCUMENT: &str = "<!DOCTYPE html>\n<html><head><title>404 Not Found</title></head>\
<body><h1>404 Not Found</h1></body></html>\n";

const INTERNAL_ERROR_DOCUMENT: &str = "<!DOCTYPE html>\n<html><head><title>500 Internal Server Error</title></head>\
<body><h1>500 Internal Server Error</h1></body></html>\n";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Responses carry a fixed document, never a partially composed page.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Render error: {0}")]
    Render(#[source] ComposeError),
}

impl From<ComposeError> for AppError {
    fn from(err: ComposeError) -> Self {
        match err {
            ComposeError::PageNotFound(id) => AppError::NotFound(id),
            other => AppError::Render(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NotFound(what) => {
                tracing::debug!("Not found: {what}");
                (StatusCode::NOT_FOUND, NOT_FOUND_DOCUMENT)
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_DOCUMENT)
            }
        };

        (status, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::template::TemplateError;

    #[test]
    fn test_page_not_found_maps_to_404() {
        let err = AppError::from(ComposeError::PageNotFound("bogus".to_string()));
        assert!(matches!(err, AppError::NotFound(ref id) if id == "bogus"));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_render_error_maps_to_500() {
        let err = AppError::from(ComposeError::Render {
            page: "download".to_string(),
            source: TemplateError::MissingBinding {
                name: "version".to_string(),
            },
        });
        assert!(matches!(err, AppError::Render(_)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
