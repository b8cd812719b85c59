//! Registration and login input validation.
//!
//! # Responsibility
//! - Enforce the name, email-shape and password rules before any account
//!   is created or looked up.
//!
//! # Invariants
//! - Password checks run in a fixed order (length, letter, digit); the
//!   first failing check wins.
//! - Validation never touches the store; it is purely input-level.

use std::error::Error;
use std::fmt::{Display, Formatter};

use once_cell::sync::Lazy;
use regex::Regex;

/// `user@domain.tld` shape; intentionally loose beyond that.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[A-Za-z]{2,}$").expect("valid email regex"));

const MIN_NAME_CHARS: usize = 3;
const MIN_PASSWORD_CHARS: usize = 8;

/// Recoverable input validation failure; surfaced to the user for re-prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    NameTooShort,
    InvalidEmail,
    PasswordTooShort,
    PasswordMissingLetter,
    PasswordMissingDigit,
    EmptyPassword,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameTooShort => {
                write!(f, "name must be at least {MIN_NAME_CHARS} characters long")
            }
            Self::InvalidEmail => write!(f, "email must look like user@domain.tld"),
            Self::PasswordTooShort => write!(
                f,
                "password must be at least {MIN_PASSWORD_CHARS} characters long"
            ),
            Self::PasswordMissingLetter => write!(f, "password must contain a letter"),
            Self::PasswordMissingDigit => write!(f, "password must contain a digit"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl Error for ValidationError {}

/// Validates a display name (trimmed length).
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < MIN_NAME_CHARS {
        return Err(ValidationError::NameTooShort);
    }
    Ok(())
}

/// Validates the email shape.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Validates a registration password: three independent checks in order.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ValidationError::PasswordTooShort);
    }
    if !password.chars().any(|c| c.is_alphabetic()) {
        return Err(ValidationError::PasswordMissingLetter);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PasswordMissingDigit);
    }
    Ok(())
}

/// Validates login input: email shape plus non-empty password.
pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    validate_email(email)?;
    if password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    Ok(())
}
