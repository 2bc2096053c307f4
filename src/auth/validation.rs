//! Input validation for registration.

use thiserror::Error;

use super::password::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

/// Maximum display name length in characters.
pub const MAX_USER_NAME_LENGTH: usize = 50;

/// Maximum email length.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Validation errors. The messages are shown on the registration form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("이름을 입력해 주세요.")]
    NameEmpty,

    #[error("이름은 {MAX_USER_NAME_LENGTH}자 이하로 입력해 주세요.")]
    NameTooLong,

    #[error("이름에 사용할 수 없는 문자가 포함되어 있습니다.")]
    NameInvalidChars,

    #[error("이메일은 {MAX_EMAIL_LENGTH}자 이하로 입력해 주세요.")]
    EmailTooLong,

    #[error("이메일 형식이 올바르지 않습니다.")]
    EmailInvalidFormat,

    #[error("비밀번호는 {MIN_PASSWORD_LENGTH}자 이상이어야 합니다.")]
    PasswordTooShort,

    #[error("비밀번호는 {MAX_PASSWORD_LENGTH}자 이하여야 합니다.")]
    PasswordTooLong,
}

/// Validate a display name: 1..=50 characters after trimming, no control
/// characters.
pub fn validate_user_name(user_name: &str) -> Result<(), ValidationError> {
    let trimmed = user_name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::NameEmpty);
    }
    if trimmed.chars().count() > MAX_USER_NAME_LENGTH {
        return Err(ValidationError::NameTooLong);
    }
    if trimmed.chars().any(char::is_control) {
        return Err(ValidationError::NameInvalidChars);
    }
    Ok(())
}

/// Validate an email address.
///
/// Only the shape `local@domain` is checked; deliverability is not.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::EmailTooLong);
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::EmailInvalidFormat);
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ValidationError::EmailInvalidFormat);
    }
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::EmailInvalidFormat);
    }
    Ok(())
}

/// Validate a new password's length.
pub fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    if len > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooLong);
    }
    Ok(())
}

/// Validate every registration field, reporting the first failure.
pub fn validate_registration(
    user_name: &str,
    email: &str,
    password: &str,
) -> Result<(), ValidationError> {
    validate_user_name(user_name)?;
    validate_email(email)?;
    validate_new_password(password)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name() {
        assert!(validate_user_name("김철수").is_ok());
        assert!(validate_user_name("a").is_ok());
        assert_eq!(validate_user_name("   "), Err(ValidationError::NameEmpty));
        assert_eq!(
            validate_user_name(&"가".repeat(51)),
            Err(ValidationError::NameTooLong)
        );
        assert!(validate_user_name(&"가".repeat(50)).is_ok());
        assert_eq!(
            validate_user_name("bad\u{7}name"),
            Err(ValidationError::NameInvalidChars)
        );
    }

    #[test]
    fn test_email() {
        assert!(validate_email("kim@example.com").is_ok());
        assert_eq!(
            validate_email("kim.example.com"),
            Err(ValidationError::EmailInvalidFormat)
        );
        assert_eq!(
            validate_email("@example.com"),
            Err(ValidationError::EmailInvalidFormat)
        );
        assert_eq!(validate_email("kim@"), Err(ValidationError::EmailInvalidFormat));
        assert_eq!(
            validate_email("kim@a@b"),
            Err(ValidationError::EmailInvalidFormat)
        );
        assert_eq!(
            validate_email("kim @example.com"),
            Err(ValidationError::EmailInvalidFormat)
        );

        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(validate_email(&long), Err(ValidationError::EmailTooLong));
    }

    #[test]
    fn test_password() {
        assert_eq!(
            validate_new_password("short"),
            Err(ValidationError::PasswordTooShort)
        );
        assert!(validate_new_password("long_enough").is_ok());
        assert_eq!(
            validate_new_password(&"x".repeat(129)),
            Err(ValidationError::PasswordTooLong)
        );
    }

    #[test]
    fn test_registration_reports_first_failure() {
        assert_eq!(
            validate_registration("", "bad", "short"),
            Err(ValidationError::NameEmpty)
        );
        assert_eq!(
            validate_registration("kim", "bad", "short"),
            Err(ValidationError::EmailInvalidFormat)
        );
        assert!(validate_registration("kim", "kim@example.com", "password1").is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::NameTooLong.to_string(),
            "이름은 50자 이하로 입력해 주세요."
        );
        assert_eq!(
            ValidationError::PasswordTooShort.to_string(),
            "비밀번호는 8자 이상이어야 합니다."
        );
    }
}
