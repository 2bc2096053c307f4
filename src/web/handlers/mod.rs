//! Page handlers for the web UI.

pub mod auth;
pub mod board;

pub use auth::*;
pub use board::*;

use askama::Template;
use axum::http::{header::REFERER, HeaderMap};
use axum::response::{Html, Redirect};
use tower_sessions::Session;
use tracing::warn;
use url::Url;

use crate::auth::{session::set_flash, PermissionError};
use crate::db::Database;

use super::error::WebError;

/// Shared application state.
pub struct AppState {
    /// Database handle.
    pub db: Database,
    /// Timezone used to display timestamps.
    pub timezone: String,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, timezone: impl Into<String>) -> Self {
        Self {
            db,
            timezone: timezone.into(),
        }
    }
}

/// Render a template into an HTML response.
pub(crate) fn render<T: Template>(template: &T) -> Result<Html<String>, WebError> {
    Ok(Html(template.render()?))
}

/// Where to send the browser back to after a denied request: the path and
/// query of the `Referer`, or `fallback`.
///
/// Only the path is kept, so a foreign referer cannot turn this into an open
/// redirect. A referer naming the denied request itself, or any edit or
/// delete page, is ignored: browsers keep the original `Referer` across a
/// 303, and sending them back there would be denied again.
pub(crate) fn back_target(headers: &HeaderMap, request_path: &str, fallback: &str) -> String {
    headers
        .get(REFERER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Url::parse(value).ok())
        .filter(|url| is_safe_return(url.path(), request_path))
        .map(|url| match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        })
        .unwrap_or_else(|| fallback.to_string())
}

fn is_safe_return(path: &str, request_path: &str) -> bool {
    path != request_path
        && !path.starts_with("/posts/edit/")
        && !path.starts_with("/posts/delete/")
}

/// Show a denial on the page at `target`.
pub(crate) async fn deny(
    session: &Session,
    target: String,
    denied: PermissionError,
) -> Result<Redirect, WebError> {
    warn!(reason = %denied, target = %target, "Request denied");
    set_flash(session, denied.to_string()).await?;
    Ok(Redirect::to(&target))
}
