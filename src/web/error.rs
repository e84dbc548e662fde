//! Page-level errors rendered as HTML responses.

use axum::extract::rejection::{FormRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::backend::BackendError;
use crate::pages;

/// Failures that abort a page render.
///
/// Missing records are not errors: handlers turn `None` into a fallback
/// page themselves. What remains is surfaced to the user as a generic
/// failure page; the detail only goes to the log.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("Page not found")]
    NotFound,
    #[error("Bad request: {0}")]
    BadRequest(String),
}

// Extractor rejections would otherwise answer with axum's plain-text body.
impl From<PathRejection> for PageError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for PageError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<FormRejection> for PageError {
    fn from(rejection: FormRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match &self {
            PageError::Backend(err) => {
                tracing::error!(error = %err, "Page render failed");
                (StatusCode::BAD_GATEWAY, Html(pages::render_error_page())).into_response()
            }
            PageError::NotFound => {
                (StatusCode::NOT_FOUND, Html(pages::render_page_not_found())).into_response()
            }
            PageError::BadRequest(reason) => {
                tracing::info!(%reason, "Request rejected");
                (StatusCode::BAD_REQUEST, Html(pages::render_bad_request_page())).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[tokio::test]
    async fn backend_error_returns_502_without_details() {
        let err = PageError::from(BackendError::Status {
            status: 401,
            body: "invalid api key abc123".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let html = body_text(response).await;
        assert!(html.contains("Something went wrong"));
        assert!(!html.contains("abc123"));
    }

    #[tokio::test]
    async fn not_found_returns_404_page() {
        let response = PageError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("Page not found"));
    }

    #[tokio::test]
    async fn bad_request_returns_400_page_without_reason() {
        let response = PageError::BadRequest("duplicate field `appointmentId`".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = body_text(response).await;
        assert!(html.contains("Bad request"));
        assert!(!html.contains("appointmentId"));
    }
}
