//! Error responses for the web UI.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::auth::SessionError;
use crate::BoardError;

use super::views::NotFoundTemplate;

/// A request that ends without its normal page.
#[derive(Debug)]
pub enum WebError {
    /// No logged-in user; sends the browser to the login page.
    LoginRequired,
    /// The requested post or page does not exist.
    NotFound(String),
    /// Anything else. The detail is logged, never shown.
    Internal(String),
}

impl WebError {
    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        WebError::Internal(message.into())
    }

    /// Status code this error is sent with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::LoginRequired => StatusCode::SEE_OTHER,
            WebError::NotFound(_) => StatusCode::NOT_FOUND,
            WebError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::LoginRequired => Redirect::to("/").into_response(),
            WebError::NotFound(message) => {
                let page = NotFoundTemplate {
                    flash: None,
                    message,
                };
                match page.render() {
                    Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
                    Err(e) => {
                        tracing::error!("Failed to render not-found page: {}", e);
                        (StatusCode::NOT_FOUND, "Not Found").into_response()
                    }
                }
            }
            WebError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "일시적인 오류가 발생했습니다. 잠시 후 다시 시도해 주세요.",
                )
                    .into_response()
            }
        }
    }
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebError::LoginRequired => write!(f, "login required"),
            WebError::NotFound(msg) => write!(f, "not found: {msg}"),
            WebError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for WebError {}

impl From<BoardError> for WebError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::NotFound(_) => WebError::NotFound("게시글을 찾을 수 없습니다.".to_string()),
            other => WebError::Internal(other.to_string()),
        }
    }
}

impl From<SessionError> for WebError {
    fn from(err: SessionError) -> Self {
        WebError::Internal(err.to_string())
    }
}

impl From<askama::Error> for WebError {
    fn from(err: askama::Error) -> Self {
        WebError::Internal(format!("template error: {err}"))
    }
}
