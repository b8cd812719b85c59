//! Persisted portal aggregate.
//!
//! # Responsibility
//! - Define the single durable blob holding all portal collections.
//! - Provide the fixed default dataset seeded on first run.
//!
//! # Invariants
//! - The JSON shape is `{users, attendance, schedule, org}`; readers seeing
//!   an absent storage key seed it with `Aggregate::seed()`.
//! - The whole aggregate is written atomically after every mutation;
//!   last writer wins, there is no merge or transaction log.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::account::{Account, AccountId};
use crate::model::attendance::AttendanceRecord;
use crate::model::schedule::{OrgRoleEntry, ScheduleEntry};

/// Everything the portal persists durably, as one serializable unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub users: Vec<Account>,
    pub attendance: Vec<AttendanceRecord>,
    pub schedule: Vec<ScheduleEntry>,
    pub org: Vec<OrgRoleEntry>,
}

impl Aggregate {
    /// Returns the fixed dataset used when durable storage has no aggregate
    /// yet: two sample schedule entries, three org roles, no users and no
    /// attendance.
    pub fn seed() -> Self {
        Self {
            users: Vec::new(),
            attendance: Vec::new(),
            schedule: vec![
                ScheduleEntry {
                    id: Uuid::from_u128(1),
                    title: "Workshop Git".to_string(),
                    date: "2025-11-15".to_string(),
                    time: "15:00".to_string(),
                    location: "Lab Komputer".to_string(),
                },
                ScheduleEntry {
                    id: Uuid::from_u128(2),
                    title: "Coding Night".to_string(),
                    date: "2025-11-20".to_string(),
                    time: "19:00".to_string(),
                    location: "Ruang Kegiatan".to_string(),
                },
            ],
            org: vec![
                OrgRoleEntry {
                    role: "Ketua".to_string(),
                    name: "Alya Putri".to_string(),
                },
                OrgRoleEntry {
                    role: "Wakil Ketua".to_string(),
                    name: "Rizal".to_string(),
                },
                OrgRoleEntry {
                    role: "Sekretaris".to_string(),
                    name: "Budi".to_string(),
                },
            ],
        }
    }

    /// Finds an account by stable ID.
    pub fn find_account(&self, id: AccountId) -> Option<&Account> {
        self.users.iter().find(|account| account.id == id)
    }

    /// Finds an account by email, ignoring ASCII case.
    pub fn find_account_by_email(&self, email: &str) -> Option<&Account> {
        self.users.iter().find(|account| account.email_matches(email))
    }
}

#[cfg(test)]
mod tests {
    use super::Aggregate;

    #[test]
    fn seed_matches_fixed_default_dataset() {
        let seed = Aggregate::seed();
        assert!(seed.users.is_empty());
        assert!(seed.attendance.is_empty());
        assert_eq!(seed.schedule.len(), 2);
        assert_eq!(seed.schedule[0].date, "2025-11-15");
        assert_eq!(seed.schedule[1].date, "2025-11-20");
        assert_eq!(seed.org.len(), 3);
        assert_eq!(seed.org[0].role, "Ketua");
    }

    #[test]
    fn serde_round_trip_preserves_every_field() {
        let seed = Aggregate::seed();
        let encoded = serde_json::to_string(&seed).unwrap();
        let decoded: Aggregate = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, seed);
    }
}
