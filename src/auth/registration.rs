//! User registration for postboard.

use thiserror::Error;
use tracing::info;

use crate::auth::validation::{validate_registration, ValidationError};
use crate::auth::{hash_password, PasswordError};
use crate::db::{User, UserRepository};
use crate::BoardError;

/// Registration-specific errors.
#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("이미 가입된 이메일입니다.")]
    EmailExists,

    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    #[error("database error: {0}")]
    Database(String),
}

impl RegistrationError {
    /// Whether the error is caused by the submitted form rather than the
    /// server, so the message can be shown back to the user.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            RegistrationError::Validation(_) | RegistrationError::EmailExists
        )
    }
}

/// Registration request data.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Display name (1-50 characters).
    pub user_name: String,
    /// Login email.
    pub email: String,
    /// Plain password (8-128 characters).
    pub password: String,
}

impl RegistrationRequest {
    /// Create a new registration request.
    pub fn new(
        user_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            user_name: user_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Register a new user.
///
/// Validates the input, rejects an already registered email, hashes the
/// password and stores the user. The first account ever registered becomes
/// the administrator; later accounts are members.
pub async fn register(
    repo: &UserRepository<'_>,
    request: RegistrationRequest,
) -> Result<User, RegistrationError> {
    let user_name = request.user_name.trim();
    let email = request.email.trim();

    validate_registration(user_name, email, &request.password)?;

    if repo
        .email_exists(email)
        .await
        .map_err(|e| RegistrationError::Database(e.to_string()))?
    {
        return Err(RegistrationError::EmailExists);
    }

    let password_hash = hash_password(&request.password)?;

    let user = repo
        .create_account(user_name, email, &password_hash)
        .await
        .map_err(|e| match e {
            BoardError::Conflict(_) => RegistrationError::EmailExists,
            e => RegistrationError::Database(e.to_string()),
        })?;

    info!(
        user_id = user.user_id,
        email = %user.email,
        role = %user.role,
        "New user registered"
    );

    Ok(user)
}
