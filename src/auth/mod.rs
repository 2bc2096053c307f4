//! Authentication module for postboard.
//!
//! Password hashing, registration, session login state and the post
//! permission rules.

mod password;
pub mod permission;
mod registration;
pub mod session;
pub mod validation;

pub use password::{hash_password, validate_password, verify_password, PasswordError};
pub use permission::{check_post_edit, effective_post_type, PermissionError};
pub use registration::{register, RegistrationError, RegistrationRequest};
pub use session::SessionError;
pub use validation::ValidationError;
