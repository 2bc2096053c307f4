//! Login sessions for postboard.
//!
//! Sessions are held by `tower-sessions`; this module only defines what is
//! stored in them: the authenticated user's id and a one-shot flash message.

use thiserror::Error;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::auth::verify_password;
use crate::db::{User, UserRepository};

/// Session key holding the authenticated user's id.
pub const USER_ID_KEY: &str = "user_id";

/// Session key holding a message for the next rendered page.
pub const FLASH_KEY: &str = "flash";

/// Session-related errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Unknown email or wrong password. Both read the same to the user.
    #[error("이메일 또는 비밀번호가 올바르지 않습니다.")]
    InvalidCredentials,

    #[error("session store error: {0}")]
    Store(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<tower_sessions::session::Error> for SessionError {
    fn from(e: tower_sessions::session::Error) -> Self {
        SessionError::Store(e.to_string())
    }
}

/// Look up a user by email and check their password.
pub async fn authenticate(
    repo: &UserRepository<'_>,
    email: &str,
    password: &str,
) -> Result<User, SessionError> {
    let email = email.trim();
    let user = repo
        .get_by_email(email)
        .await
        .map_err(|e| SessionError::Database(e.to_string()))?;

    let Some(user) = user else {
        warn!(email = %email, "Login failed: user not found");
        return Err(SessionError::InvalidCredentials);
    };

    if verify_password(password, &user.password).is_err() {
        warn!(email = %email, user_id = user.user_id, "Login failed: wrong password");
        return Err(SessionError::InvalidCredentials);
    }

    Ok(user)
}

/// Bind the session to `user`, issuing a fresh session id.
pub async fn login(session: &Session, user: &User) -> Result<(), SessionError> {
    session.cycle_id().await?;
    session.insert(USER_ID_KEY, user.user_id).await?;
    info!(user_id = user.user_id, "Login successful");
    Ok(())
}

/// Destroy the session and everything stored in it.
pub async fn logout(session: &Session) -> Result<(), SessionError> {
    if let Ok(Some(user_id)) = session.get::<i64>(USER_ID_KEY).await {
        info!(user_id, "Logout");
    }
    session.flush().await?;
    Ok(())
}

/// Id of the user bound to the session, if any.
pub async fn session_user_id(session: &Session) -> Result<Option<i64>, SessionError> {
    Ok(session.get::<i64>(USER_ID_KEY).await?)
}

/// Store a message to show on the next rendered page.
pub async fn set_flash(session: &Session, message: impl Into<String>) -> Result<(), SessionError> {
    session.insert(FLASH_KEY, message.into()).await?;
    Ok(())
}

/// Remove and return the pending flash message.
pub async fn take_flash(session: &Session) -> Result<Option<String>, SessionError> {
    Ok(session.remove::<String>(FLASH_KEY).await?)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;
    use crate::auth::{register, RegistrationRequest};
    use crate::db::Database;

    fn new_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    async fn setup_user(db: &Database) -> User {
        let repo = UserRepository::new(db.pool());
        register(
            &repo,
            RegistrationRequest::new("kim", "kim@example.com", "password123"),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let db = Database::open_in_memory().await.unwrap();
        let created = setup_user(&db).await;
        let repo = UserRepository::new(db.pool());

        let user = authenticate(&repo, "KIM@example.com", "password123")
            .await
            .unwrap();
        assert_eq!(user.user_id, created.user_id);
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let db = Database::open_in_memory().await.unwrap();
        setup_user(&db).await;
        let repo = UserRepository::new(db.pool());

        let result = authenticate(&repo, "kim@example.com", "wrong_password").await;
        assert!(matches!(result, Err(SessionError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        let err = authenticate(&repo, "nobody@example.com", "password123")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "이메일 또는 비밀번호가 올바르지 않습니다.");
    }

    #[tokio::test]
    async fn test_login_and_logout() {
        let db = Database::open_in_memory().await.unwrap();
        let user = setup_user(&db).await;
        let session = new_session();

        assert_eq!(session_user_id(&session).await.unwrap(), None);

        login(&session, &user).await.unwrap();
        assert_eq!(session_user_id(&session).await.unwrap(), Some(user.user_id));

        logout(&session).await.unwrap();
        assert_eq!(session_user_id(&session).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_flash_is_one_shot() {
        let session = new_session();

        assert_eq!(take_flash(&session).await.unwrap(), None);

        set_flash(&session, "권한이 없습니다.").await.unwrap();
        assert_eq!(
            take_flash(&session).await.unwrap().as_deref(),
            Some("권한이 없습니다.")
        );
        assert_eq!(take_flash(&session).await.unwrap(), None);
    }
}
