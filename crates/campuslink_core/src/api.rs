//! Placeholder boundary for a future server API.
//!
//! # Responsibility
//! - Fix the transport contract (`GET`/`POST` under `/api/*`, JSON in/out)
//!   before any backend exists.
//!
//! # Invariants
//! - Transport failures surface as the `Network` error marker, never as a
//!   panic.
//! - No real HTTP client lives in this crate; `OfflineTransport` is the only
//!   implementation until a backend ships.

use std::error::Error;
use std::fmt::{Display, Formatter};

use serde_json::Value;

#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    /// Transport-level failure; the caller should treat the backend as
    /// unreachable.
    Network,
    /// The response body was not valid JSON.
    Decode(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network => write!(f, "network error"),
            Self::Decode(message) => write!(f, "failed to decode response: {message}"),
        }
    }
}

impl Error for ApiError {}

/// Transport seam for the future backend.
pub trait ApiTransport {
    fn get(&self, path: &str) -> Result<Value, ApiError>;
    fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError>;
}

/// Stand-in transport while no backend exists: every call reports the
/// network-error marker.
#[derive(Debug, Default)]
pub struct OfflineTransport;

impl ApiTransport for OfflineTransport {
    fn get(&self, _path: &str) -> Result<Value, ApiError> {
        Err(ApiError::Network)
    }

    fn post(&self, _path: &str, _body: &Value) -> Result<Value, ApiError> {
        Err(ApiError::Network)
    }
}
