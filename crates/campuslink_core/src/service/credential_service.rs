//! Credential use-cases: registration, login, roster read.
//!
//! # Responsibility
//! - Validate registration/login input and map it onto store mutations.
//! - Keep password hashing behind the `password` helpers.
//!
//! # Invariants
//! - Emails are stored lowercase; duplicate checks ignore case.
//! - Validation and the duplicate check run before any mutation, so a
//!   failed register leaves no persisted side effect.
//! - Login never reveals whether the email or the password was wrong beyond
//!   the `NotFound` / `InvalidCredentials` split.

use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::model::account::Account;
use crate::repo::portal_repo::PortalRepository;
use crate::service::password::{hash_password, verify_password, PasswordError};
use crate::service::validation::{
    validate_email, validate_login, validate_name, validate_password, ValidationError,
};
use crate::store::{DomainStore, StoreError};

/// Credential operation error; every variant is recoverable by re-prompting.
#[derive(Debug)]
pub enum CredentialError {
    Validation(ValidationError),
    /// A case-insensitive match for this email already exists.
    DuplicateEmail(String),
    /// No account matches this email.
    NotFound(String),
    InvalidCredentials,
    Password(PasswordError),
    Store(StoreError),
}

impl Display for CredentialError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateEmail(email) => write!(f, "email already registered: {email}"),
            Self::NotFound(email) => write!(f, "email not registered: {email}"),
            Self::InvalidCredentials => write!(f, "wrong password"),
            Self::Password(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CredentialError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Password(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for CredentialError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PasswordError> for CredentialError {
    fn from(value: PasswordError) -> Self {
        Self::Password(value)
    }
}

impl From<StoreError> for CredentialError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Registers a new account and persists it.
///
/// # Contract
/// - Name, email shape and password rules are checked first; the first
///   failing password rule wins.
/// - The stored email is trimmed and lowercased.
/// - Returns the created account (identity not yet attached).
pub fn register<R: PortalRepository>(
    store: &mut DomainStore<R>,
    name: &str,
    email: &str,
    password: &str,
    now: DateTime<Utc>,
) -> Result<Account, CredentialError> {
    validate_name(name)?;
    validate_email(email)?;
    validate_password(password)?;

    let normalized_email = email.trim().to_lowercase();
    if store.find_account_by_email(&normalized_email).is_some() {
        warn!("event=register module=credential status=rejected reason=duplicate_email");
        return Err(CredentialError::DuplicateEmail(normalized_email));
    }

    let account = Account::new(
        name.trim(),
        normalized_email,
        hash_password(password)?,
        now,
    );
    let created = account.clone();
    store.push_account(account)?;

    info!(
        "event=register module=credential status=ok account={}",
        created.id
    );
    Ok(created)
}

/// Authenticates an email/password pair against stored accounts.
///
/// # Contract
/// - Email matching ignores case; the password check runs against the
///   stored Argon2 hash.
pub fn login<R: PortalRepository>(
    store: &DomainStore<R>,
    email: &str,
    password: &str,
) -> Result<Account, CredentialError> {
    validate_login(email, password)?;

    let account = store
        .find_account_by_email(email)
        .ok_or_else(|| CredentialError::NotFound(email.trim().to_lowercase()))?;

    if !verify_password(password, &account.password_hash)? {
        warn!(
            "event=login module=credential status=rejected reason=bad_password account={}",
            account.id
        );
        return Err(CredentialError::InvalidCredentials);
    }

    info!(
        "event=login module=credential status=ok account={}",
        account.id
    );
    Ok(account.clone())
}

/// Read-only account roster, used for the member list view.
pub fn list_accounts<R: PortalRepository>(store: &DomainStore<R>) -> &[Account] {
    store.accounts()
}
