//! User repository for postboard.

use sqlx::SqlitePool;

use super::user::{NewUser, Role, User};
use crate::{BoardError, Result};

/// Repository for user operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query(
            "INSERT INTO users (user_name, email, password, role) VALUES (?, ?, ?, ?)",
        )
        .bind(&new_user.user_name)
        .bind(&new_user.email)
        .bind(&new_user.password)
        .bind(new_user.role.as_str())
        .execute(self.pool)
        .await
        .map_err(insert_error)?;

        self.get_inserted(result.last_insert_rowid()).await
    }

    /// Create a self-registered account.
    ///
    /// The account is an admin if the table was empty and a member otherwise.
    /// The role is decided by the insert itself, so concurrent first sign-ups
    /// cannot both become admin. A taken email gives [`BoardError::Conflict`].
    pub async fn create_account(
        &self,
        user_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User> {
        let result = sqlx::query(
            "INSERT INTO users (user_name, email, password, role)
             SELECT ?, ?, ?, CASE WHEN EXISTS (SELECT 1 FROM users) THEN 'member' ELSE 'admin' END",
        )
        .bind(user_name)
        .bind(email)
        .bind(password_hash)
        .execute(self.pool)
        .await
        .map_err(insert_error)?;

        self.get_inserted(result.last_insert_rowid()).await
    }

    async fn get_inserted(&self, user_id: i64) -> Result<User> {
        self.get_by_id(user_id)
            .await?
            .ok_or_else(|| BoardError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, user_id: i64) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT user_id, user_name, email, password, role, created_at
             FROM users WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(row.map(UserRow::into_user))
    }

    /// Get a user by email (case-insensitive).
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT user_id, user_name, email, password, role, created_at
             FROM users WHERE email = ? COLLATE NOCASE",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(row.map(UserRow::into_user))
    }

    /// Check if an email is already registered.
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = ? COLLATE NOCASE)")
                .bind(email)
                .fetch_one(self.pool)
                .await
                .map_err(|e| BoardError::Database(e.to_string()))?;
        Ok(exists.0)
    }

    /// Count all registered users.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await
            .map_err(|e| BoardError::Database(e.to_string()))?;
        Ok(count.0)
    }

    /// Delete a user by ID. Their posts are removed by the cascade.
    ///
    /// Returns true if a user was deleted, false if not found.
    pub async fn delete(&self, user_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
            .bind(user_id)
            .execute(self.pool)
            .await
            .map_err(|e| BoardError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }
}

fn insert_error(e: sqlx::Error) -> BoardError {
    match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => BoardError::Conflict("email".to_string()),
        _ => BoardError::Database(e.to_string()),
    }
}

/// Internal struct for mapping database rows to User.
#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    user_name: String,
    email: String,
    password: String,
    role: String,
    created_at: String,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: self.user_id,
            user_name: self.user_name,
            email: self.email,
            password: self.password,
            role: self.role.parse().unwrap_or(Role::Member),
            created_at: self.created_at,
        }
    }
}
