//! Request extractors.

use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::auth::session::session_user_id;
use crate::db::{User, UserRepository};

use super::error::WebError;
use super::handlers::AppState;

/// The logged-in user making the request.
///
/// Rejects with [`WebError::LoginRequired`] when the session holds no user
/// id or the user no longer exists. The user row is loaded on every request,
/// so a role change takes effect immediately.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = WebError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| WebError::internal(msg))?;

        let Some(user_id) = session_user_id(&session).await? else {
            return Err(WebError::LoginRequired);
        };

        let user = UserRepository::new(state.db.pool())
            .get_by_id(user_id)
            .await?
            .ok_or(WebError::LoginRequired)?;

        Ok(CurrentUser(user))
    }
}
