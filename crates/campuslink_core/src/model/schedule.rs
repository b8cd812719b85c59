//! Schedule and org-structure domain model.
//!
//! # Responsibility
//! - Define the seeded schedule entries and org roster entries.
//!
//! # Invariants
//! - `ScheduleEntry.date` is a fixed-width ISO 8601 date string.
//! - Stored schedule order is assumed chronological; callers editing the
//!   store directly are responsible for keeping it that way.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One meeting/activity entry. Seed data; no portal operation creates these,
/// they change only through direct store edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: Uuid,
    pub title: String,
    /// ISO 8601 date (`YYYY-MM-DD`).
    pub date: String,
    /// Display time (`HH:MM`).
    pub time: String,
    pub location: String,
}

/// One row of the org structure (role title + person name). Seed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgRoleEntry {
    pub role: String,
    pub name: String,
}
