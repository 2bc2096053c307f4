//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::{header::REFERER, HeaderValue};
use axum_test::{TestResponse, TestServer};

use postboard::config::SessionConfig;
use postboard::web::handlers::AppState;
use postboard::{create_router, Database};

/// Password used by every test account.
pub const PASSWORD: &str = "password123";

/// Open a fresh in-memory board.
pub async fn test_db() -> Database {
    Database::open_in_memory()
        .await
        .expect("failed to open in-memory database")
}

/// A browser-like client against `db`: it keeps its own session cookie.
///
/// Several clients may share one database to act as different users.
pub fn client(db: &Database) -> TestServer {
    let state = Arc::new(AppState::new(db.clone(), "UTC"));
    let router = create_router(state, &SessionConfig::default());
    let mut server = TestServer::new(router).expect("failed to start test server");
    server.save_cookies();
    server
}

/// Register `user_name` with a derived email and stay logged in.
pub async fn register(server: &TestServer, user_name: &str) -> TestResponse {
    let email = email_for(user_name);
    server
        .post("/register")
        .form(&[
            ("user_name", user_name),
            ("email", email.as_str()),
            ("password", PASSWORD),
        ])
        .await
}

/// Log in as a user created by [`register`].
pub async fn login(server: &TestServer, user_name: &str) -> TestResponse {
    let email = email_for(user_name);
    server
        .post("/login")
        .form(&[("email", email.as_str()), ("password", PASSWORD)])
        .await
}

pub fn email_for(user_name: &str) -> String {
    format!("{user_name}@example.com")
}

/// Submit the write form.
pub async fn write_post(
    server: &TestServer,
    post_type: &str,
    title: &str,
    content: &str,
) -> TestResponse {
    server
        .post("/posts/write")
        .form(&[("type", post_type), ("title", title), ("content", content)])
        .await
}

/// Header value for a same-site referer on `path`.
pub fn referer(path: &str) -> (axum::http::HeaderName, HeaderValue) {
    let value = HeaderValue::from_str(&format!("http://localhost{path}"))
        .expect("invalid referer path");
    (REFERER, value)
}

/// The `Location` of a redirect response.
pub fn location(response: &TestResponse) -> String {
    response
        .header("location")
        .to_str()
        .expect("non-ASCII location")
        .to_string()
}

/// An admin (the first account) and a member, each with their own session.
pub async fn admin_and_member(db: &Database) -> (TestServer, TestServer) {
    let admin = client(db);
    register(&admin, "admin").await;
    let member = client(db);
    register(&member, "member").await;
    (admin, member)
}
