//! Session snapshot and pending-registration marker.
//!
//! # Responsibility
//! - Define the volatile session record kept in tab-scoped storage.
//! - Define the marker carried between registration and identity completion.
//!
//! # Invariants
//! - A session is a snapshot of account fields, never the account itself,
//!   and never includes the password hash.
//! - Exactly one session is active per process at a time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::account::{Account, AccountId, IdentityProfile};

/// The currently-authenticated identity for this process ("tab").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub account_id: AccountId,
    pub name: String,
    pub email: String,
    pub identity: Option<IdentityProfile>,
    pub login_at: DateTime<Utc>,
}

impl Session {
    /// Builds a session snapshot from an account.
    ///
    /// # Invariants
    /// - The password hash is deliberately not copied.
    pub fn from_account(account: &Account, login_at: DateTime<Utc>) -> Self {
        Self {
            account_id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            identity: account.identity.clone(),
            login_at,
        }
    }
}

/// Marker for the two-step registration flow: the account exists but the
/// member has not yet completed the identity form. Lives in tab-scoped
/// storage and is cleared once identity completion auto-logs the member in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRegistration {
    pub account_id: AccountId,
    pub email: String,
}

impl PendingRegistration {
    pub fn for_account(account: &Account) -> Self {
        Self {
            account_id: account.id,
            email: account.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::model::account::Account;
    use chrono::Utc;

    #[test]
    fn session_snapshot_copies_identity_but_not_password() {
        let account = Account::new("Alya Putri", "alya@example.com", "phc-secret", Utc::now());
        let session = Session::from_account(&account, Utc::now());

        assert_eq!(session.account_id, account.id);
        assert_eq!(session.name, "Alya Putri");
        assert_eq!(session.email, "alya@example.com");
        assert!(session.identity.is_none());

        let encoded = serde_json::to_string(&session).unwrap();
        assert!(!encoded.contains("phc-secret"));
    }
}
