//! Domain store: the in-memory aggregate plus its persistence discipline.
//!
//! # Responsibility
//! - Own the loaded aggregate for the lifetime of the process.
//! - Apply mutations in memory and persist the whole aggregate afterwards.
//! - Answer the read queries the renderer and services need.
//!
//! # Invariants
//! - Constructed once at process start via `DomainStore::open`; never torn
//!   down while the process lives.
//! - A mutation either persists fully or leaves neither memory nor storage
//!   changed; a failed save rolls the in-memory change back.
//! - Schedule entries are kept in stored order, assumed chronological by
//!   direct editors of the store. `next_upcoming_meeting` relies on that
//!   order and does not sort.

use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use log::info;

use crate::model::account::{Account, AccountId, IdentityProfile};
use crate::model::aggregate::Aggregate;
use crate::model::attendance::AttendanceRecord;
use crate::model::schedule::{OrgRoleEntry, ScheduleEntry};
use crate::model::session::Session;
use crate::repo::portal_repo::PortalRepository;
use crate::repo::RepoError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Domain-level store error.
#[derive(Debug)]
pub enum StoreError {
    /// A mutating operation was attempted without an active session.
    Unauthenticated,
    /// The referenced account does not exist in the aggregate.
    AccountNotFound(AccountId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "no active session"),
            Self::AccountNotFound(id) => write!(f, "account not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Single owner of the portal aggregate.
///
/// Passed by reference into every operation instead of living as an ambient
/// global; repositories stay swappable behind the `PortalRepository` seam.
pub struct DomainStore<R: PortalRepository> {
    repo: R,
    data: Aggregate,
}

impl<R: PortalRepository> DomainStore<R> {
    /// Loads the aggregate (seeding durable storage on first run).
    pub fn open(mut repo: R) -> StoreResult<Self> {
        let data = repo.load()?;
        info!(
            "event=aggregate_loaded module=store status=ok users={} attendance={}",
            data.users.len(),
            data.attendance.len()
        );
        Ok(Self { repo, data })
    }

    pub fn aggregate(&self) -> &Aggregate {
        &self.data
    }

    pub fn accounts(&self) -> &[Account] {
        &self.data.users
    }

    pub fn schedule(&self) -> &[ScheduleEntry] {
        &self.data.schedule
    }

    pub fn org_roles(&self) -> &[OrgRoleEntry] {
        &self.data.org
    }

    pub fn find_account(&self, id: AccountId) -> Option<&Account> {
        self.data.find_account(id)
    }

    pub fn find_account_by_email(&self, email: &str) -> Option<&Account> {
        self.data.find_account_by_email(email)
    }

    /// Appends a new account and persists the aggregate.
    ///
    /// Email validation and uniqueness checks belong to the credential
    /// service; this is the raw mutation hook.
    pub fn push_account(&mut self, account: Account) -> StoreResult<()> {
        self.data.users.push(account);
        if let Err(err) = self.repo.save(&self.data) {
            self.data.users.pop();
            return Err(err.into());
        }
        Ok(())
    }

    /// Overwrites the identity profile of an existing account and persists.
    ///
    /// # Errors
    /// - `AccountNotFound` when `id` is unknown; nothing is written.
    pub fn attach_identity(
        &mut self,
        id: AccountId,
        profile: IdentityProfile,
    ) -> StoreResult<Account> {
        let position = self
            .data
            .users
            .iter()
            .position(|account| account.id == id)
            .ok_or(StoreError::AccountNotFound(id))?;

        let previous = self.data.users[position].identity.replace(profile);
        if let Err(err) = self.repo.save(&self.data) {
            self.data.users[position].identity = previous;
            return Err(err.into());
        }

        info!("event=identity_attached module=store status=ok account={id}");
        Ok(self.data.users[position].clone())
    }

    /// Appends one attendance check-in for the active session and persists.
    ///
    /// # Errors
    /// - `Unauthenticated` when `session` is `None`; nothing is written.
    pub fn record_attendance(
        &mut self,
        session: Option<&Session>,
        now: DateTime<Utc>,
    ) -> StoreResult<AttendanceRecord> {
        let session = session.ok_or(StoreError::Unauthenticated)?;

        let record = AttendanceRecord::check_in(session.account_id, now);
        self.data.attendance.push(record.clone());
        if let Err(err) = self.repo.save(&self.data) {
            self.data.attendance.pop();
            return Err(err.into());
        }

        info!(
            "event=attendance_recorded module=store status=ok account={} date={}",
            session.account_id, record.date
        );
        Ok(record)
    }

    /// Returns the account's attendance history, newest date first.
    ///
    /// Dates are fixed-width ISO strings, so plain string comparison gives
    /// chronological order.
    pub fn list_attendance(&self, account_id: AccountId) -> Vec<AttendanceRecord> {
        let mut records: Vec<AttendanceRecord> = self
            .data
            .attendance
            .iter()
            .filter(|record| record.account_id == account_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records
    }

    /// Returns the first schedule entry, in stored order, whose date is
    /// lexicographically on or after `today` (`YYYY-MM-DD`).
    ///
    /// Stored order is assumed chronological; an out-of-order store can make
    /// this skip a nearer meeting. That is the documented caller contract for
    /// direct schedule edits, not something this query corrects.
    pub fn next_upcoming_meeting(&self, today: &str) -> Option<&ScheduleEntry> {
        self.data
            .schedule
            .iter()
            .find(|entry| entry.date.as_str() >= today)
    }
}

#[cfg(test)]
mod tests {
    use super::{DomainStore, StoreError};
    use crate::model::account::{Account, IdentityProfile};
    use crate::model::session::Session;
    use crate::repo::portal_repo::KvPortalRepository;
    use crate::storage::MemoryKvStorage;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn open_store() -> DomainStore<KvPortalRepository<MemoryKvStorage>> {
        DomainStore::open(KvPortalRepository::new(MemoryKvStorage::new())).unwrap()
    }

    fn sample_profile() -> IdentityProfile {
        IdentityProfile {
            student_id: "2313010001".to_string(),
            program: "Informatika".to_string(),
            semester: "3".to_string(),
            birthplace: "Padang".to_string(),
            birthdate: "2005-04-12".to_string(),
            phone: "0812000111".to_string(),
        }
    }

    #[test]
    fn attach_identity_overwrites_profile() {
        let mut store = open_store();
        let account = Account::new("Alya Putri", "alya@example.com", "phc", Utc::now());
        let id = account.id;
        store.push_account(account).unwrap();

        let updated = store.attach_identity(id, sample_profile()).unwrap();
        assert_eq!(updated.identity.unwrap().program, "Informatika");
    }

    #[test]
    fn attach_identity_unknown_account_is_not_found() {
        let mut store = open_store();
        let missing = Uuid::new_v4();
        let err = store.attach_identity(missing, sample_profile()).unwrap_err();
        assert!(matches!(err, StoreError::AccountNotFound(id) if id == missing));
    }

    #[test]
    fn record_attendance_requires_session() {
        let mut store = open_store();
        let err = store.record_attendance(None, Utc::now()).unwrap_err();
        assert!(matches!(err, StoreError::Unauthenticated));
        assert!(store.aggregate().attendance.is_empty());
    }

    #[test]
    fn attendance_history_sorts_newest_first() {
        let mut store = open_store();
        let account = Account::new("Budi", "budi@example.com", "phc", Utc::now());
        let id = account.id;
        store.push_account(account).unwrap();
        let session = Session::from_account(store.find_account(id).unwrap(), Utc::now());

        let first = Utc.with_ymd_and_hms(2025, 11, 10, 9, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2025, 11, 16, 9, 0, 0).unwrap();
        store.record_attendance(Some(&session), first).unwrap();
        store.record_attendance(Some(&session), second).unwrap();

        let history = store.list_attendance(id);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].date, "2025-11-16");
        assert_eq!(history[1].date, "2025-11-10");
    }

    #[test]
    fn next_upcoming_meeting_uses_stored_order() {
        let store = open_store();
        // Seed dates are 2025-11-15 and 2025-11-20.
        let next = store.next_upcoming_meeting("2025-11-16").unwrap();
        assert_eq!(next.title, "Coding Night");
        assert_eq!(next.date, "2025-11-20");

        assert_eq!(
            store.next_upcoming_meeting("2025-11-01").unwrap().title,
            "Workshop Git"
        );
        assert!(store.next_upcoming_meeting("2025-12-01").is_none());
    }
}
