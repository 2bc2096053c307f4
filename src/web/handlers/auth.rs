//! Login, logout and registration handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::warn;

use crate::auth::session::{self as login_state, authenticate, session_user_id, take_flash};
use crate::auth::{RegistrationRequest, SessionError};
use crate::db::UserRepository;
use crate::web::error::WebError;
use crate::web::views::{LoginTemplate, RegisterTemplate};

use super::{render, AppState};

/// Login form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration form.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Whether the session already belongs to an existing user.
async fn is_logged_in(state: &AppState, session: &Session) -> Result<bool, WebError> {
    let Some(user_id) = session_user_id(session).await? else {
        return Ok(false);
    };
    let user = UserRepository::new(state.db.pool()).get_by_id(user_id).await?;
    Ok(user.is_some())
}

/// GET /
pub async fn login_page(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response, WebError> {
    if is_logged_in(&state, &session).await? {
        return Ok(Redirect::to("/posts").into_response());
    }

    let page = LoginTemplate {
        flash: take_flash(&session).await?,
        error: None,
        email: String::new(),
    };
    Ok(render(&page)?.into_response())
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    let repo = UserRepository::new(state.db.pool());

    match authenticate(&repo, &form.email, &form.password).await {
        Ok(user) => {
            login_state::login(&session, &user).await?;
            Ok(Redirect::to("/posts").into_response())
        }
        Err(SessionError::InvalidCredentials) => {
            let page = LoginTemplate {
                flash: None,
                error: Some(SessionError::InvalidCredentials.to_string()),
                email: form.email,
            };
            Ok(render(&page)?.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /logout
pub async fn logout(session: Session) -> Result<Redirect, WebError> {
    login_state::logout(&session).await?;
    Ok(Redirect::to("/"))
}

/// GET /register
pub async fn register_page(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response, WebError> {
    if is_logged_in(&state, &session).await? {
        return Ok(Redirect::to("/posts").into_response());
    }

    let page = RegisterTemplate {
        flash: None,
        error: None,
        user_name: String::new(),
        email: String::new(),
    };
    Ok(render(&page)?.into_response())
}

/// POST /register
///
/// A successful registration logs the new user in.
pub async fn register(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response, WebError> {
    let repo = UserRepository::new(state.db.pool());
    let request = RegistrationRequest::new(&form.user_name, &form.email, &form.password);

    match crate::auth::register(&repo, request).await {
        Ok(user) => {
            login_state::login(&session, &user).await?;
            Ok(Redirect::to("/posts").into_response())
        }
        Err(e) if e.is_user_error() => {
            warn!(email = %form.email, reason = %e, "Registration rejected");
            let page = RegisterTemplate {
                flash: None,
                error: Some(e.to_string()),
                user_name: form.user_name,
                email: form.email,
            };
            Ok(render(&page)?.into_response())
        }
        Err(e) => Err(WebError::internal(e.to_string())),
    }
}
