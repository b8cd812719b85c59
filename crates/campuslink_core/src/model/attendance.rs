//! Attendance record domain model.
//!
//! # Responsibility
//! - Define the append-only check-in record and its fixed status.
//!
//! # Invariants
//! - `date` is a fixed-width ISO 8601 date string, so plain string
//!   comparison orders records chronologically.
//! - Records are append-only; the same account may check in multiple
//!   times on the same day.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::account::AccountId;

/// Check-in status. The portal only records presence; the enum exists so
/// storage stays forward-compatible with richer statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
        }
    }
}

/// One attendance check-in, appended per action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub account_id: AccountId,
    /// ISO 8601 date (`YYYY-MM-DD`) derived from the check-in timestamp.
    pub date: String,
    /// Human-readable meeting label derived from the check-in timestamp.
    pub meeting: String,
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// Builds a check-in record for `account_id` at the given instant.
    pub fn check_in(account_id: AccountId, at: DateTime<Utc>) -> Self {
        Self {
            account_id,
            date: at.format("%Y-%m-%d").to_string(),
            meeting: format!("Meeting - {}", at.format("%Y-%m-%d %H:%M")),
            status: AttendanceStatus::Present,
        }
    }
}
