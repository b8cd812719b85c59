//! Core data/session layer for the campuslink member portal.
//! This crate is the single source of truth for portal business invariants.

pub mod api;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod store;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::account::{Account, AccountId, IdentityProfile};
pub use model::aggregate::Aggregate;
pub use model::attendance::{AttendanceRecord, AttendanceStatus};
pub use model::schedule::{OrgRoleEntry, ScheduleEntry};
pub use model::session::{PendingRegistration, Session};
pub use repo::portal_repo::{KvPortalRepository, PortalRepository};
pub use repo::session_repo::{KvSessionRepository, SessionRepository};
pub use repo::{RepoError, RepoResult};
pub use service::credential_service::CredentialError;
pub use service::session_service::{RegistrationFlowError, SessionManager};
pub use service::validation::ValidationError;
pub use storage::{
    open_store, open_store_in_memory, KvStorage, MemoryKvStorage, SqliteKvStorage, StorageError,
};
pub use store::{DomainStore, StoreError};
pub use view::renderer::{render, AppView, Page};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
