//! Repository layer: blob persistence contracts and key/value implementations.
//!
//! # Responsibility
//! - Define load/save contracts for the portal aggregate and the session.
//! - Keep JSON encoding and storage keys inside the persistence boundary.
//!
//! # Invariants
//! - Repositories read and write whole blobs under fixed keys.
//! - Corrupt persisted blobs surface as `RepoError::InvalidData` instead of
//!   being silently replaced.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::storage::StorageError;

pub mod portal_repo;
pub mod session_repo;

/// Fixed key for the durable portal aggregate blob.
pub const AGGREGATE_KEY: &str = "campuslink_db_v1";
/// Fixed key for the tab-scoped session blob.
pub const SESSION_KEY: &str = "campuslink_session";
/// Fixed key for the tab-scoped pending-registration marker.
pub const PENDING_REGISTRATION_KEY: &str = "campuslink_pending_registration";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error shared by the portal and session repositories.
#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

fn decode<T: serde::de::DeserializeOwned>(key: &str, raw: &str) -> RepoResult<T> {
    serde_json::from_str(raw)
        .map_err(|err| RepoError::InvalidData(format!("key `{key}`: {err}")))
}

fn encode<T: serde::Serialize>(key: &str, value: &T) -> RepoResult<String> {
    serde_json::to_string(value)
        .map_err(|err| RepoError::InvalidData(format!("key `{key}`: {err}")))
}
