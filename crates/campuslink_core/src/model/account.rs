//! Account and identity-profile domain model.
//!
//! # Responsibility
//! - Define the registered account record and its optional identity profile.
//!
//! # Invariants
//! - `id` is stable and never reused for another account.
//! - `email` is stored lowercase; uniqueness is case-insensitive.
//! - `password_hash` is a PHC-format Argon2 hash, never a reversible encoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a registered account.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type AccountId = Uuid;

/// Extended student profile attached to an account after registration.
///
/// All fields are free-form strings captured from the identity form; the
/// profile is optional until the member completes the follow-up step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityProfile {
    pub student_id: String,
    pub program: String,
    pub semester: String,
    pub birthplace: String,
    /// ISO 8601 date string (`YYYY-MM-DD`).
    pub birthdate: String,
    pub phone: String,
}

/// Registered member account.
///
/// Accounts are created on registration and never deleted. The identity
/// profile is attached later via the two-step registration flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    /// Normalized lowercase; unique across the aggregate case-insensitively.
    pub email: String,
    /// PHC string produced by the password hashing helpers.
    pub password_hash: String,
    pub identity: Option<IdentityProfile>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new account with a generated stable ID.
    ///
    /// # Invariants
    /// - `email` must already be validated and lowercased by the caller.
    /// - `identity` starts as `None` until the follow-up step completes.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            identity: None,
            created_at,
        }
    }

    /// Returns whether `candidate` matches this account's email,
    /// ignoring ASCII case.
    pub fn email_matches(&self, candidate: &str) -> bool {
        self.email.eq_ignore_ascii_case(candidate.trim())
    }
}
