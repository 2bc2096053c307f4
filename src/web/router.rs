//! Router configuration for the web UI.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::SameSite, MemoryStore, SessionManagerLayer};

use crate::config::SessionConfig;

use super::error::WebError;
use super::handlers::{
    create_post, delete_post, edit_form, list_posts, login, login_page, logout, register,
    register_page, update_post, view_post, write_form, AppState,
};
use super::middleware::page_headers;

/// Create the main router.
///
/// Board pages live under `/posts`; the site root is the login page.
pub fn create_router(app_state: Arc<AppState>, session_config: &SessionConfig) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(session_config.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_name(session_config.cookie_name.clone())
        .with_http_only(true);

    let board_routes = Router::new()
        .route("/", get(list_posts))
        .route("/write", get(write_form).post(create_post))
        .route("/view/:id", get(view_post))
        .route("/edit/:id", get(edit_form).post(update_post))
        .route("/delete/:id", get(delete_post));

    Router::new()
        .route("/", get(login_page))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/register", get(register_page).post(register))
        .nest("/posts", board_routes)
        .route("/health", get(health_check))
        .fallback(not_found)
        .layer(session_layer)
        .layer(middleware::from_fn(page_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

async fn not_found() -> WebError {
    WebError::NotFound("페이지를 찾을 수 없습니다.".to_string())
}
