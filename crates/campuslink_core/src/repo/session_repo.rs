//! Session repository over tab-scoped storage.
//!
//! # Responsibility
//! - Persist, read back and clear the single session snapshot.
//! - Persist the pending-registration marker for the two-step flow.
//!
//! # Invariants
//! - At most one session blob exists at a time; `save` replaces it.
//! - Clearing a key that is already absent is a no-op.

use crate::model::session::{PendingRegistration, Session};
use crate::repo::{decode, encode, RepoResult, PENDING_REGISTRATION_KEY, SESSION_KEY};
use crate::storage::KvStorage;

/// Load/save/clear contract for tab-scoped session state.
pub trait SessionRepository {
    fn load_session(&self) -> RepoResult<Option<Session>>;
    fn save_session(&mut self, session: &Session) -> RepoResult<()>;
    fn clear_session(&mut self) -> RepoResult<()>;

    fn load_pending(&self) -> RepoResult<Option<PendingRegistration>>;
    fn save_pending(&mut self, pending: &PendingRegistration) -> RepoResult<()>;
    fn clear_pending(&mut self) -> RepoResult<()>;
}

/// Key/value-backed session repository.
pub struct KvSessionRepository<S: KvStorage> {
    storage: S,
}

impl<S: KvStorage> KvSessionRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Releases the underlying storage; used to model a reload that keeps
    /// tab-scoped storage alive.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

impl<S: KvStorage> SessionRepository for KvSessionRepository<S> {
    fn load_session(&self) -> RepoResult<Option<Session>> {
        match self.storage.get(SESSION_KEY)? {
            Some(raw) => Ok(Some(decode(SESSION_KEY, &raw)?)),
            None => Ok(None),
        }
    }

    fn save_session(&mut self, session: &Session) -> RepoResult<()> {
        self.storage
            .put(SESSION_KEY, &encode(SESSION_KEY, session)?)?;
        Ok(())
    }

    fn clear_session(&mut self) -> RepoResult<()> {
        self.storage.remove(SESSION_KEY)?;
        Ok(())
    }

    fn load_pending(&self) -> RepoResult<Option<PendingRegistration>> {
        match self.storage.get(PENDING_REGISTRATION_KEY)? {
            Some(raw) => Ok(Some(decode(PENDING_REGISTRATION_KEY, &raw)?)),
            None => Ok(None),
        }
    }

    fn save_pending(&mut self, pending: &PendingRegistration) -> RepoResult<()> {
        self.storage.put(
            PENDING_REGISTRATION_KEY,
            &encode(PENDING_REGISTRATION_KEY, pending)?,
        )?;
        Ok(())
    }

    fn clear_pending(&mut self) -> RepoResult<()> {
        self.storage.remove(PENDING_REGISTRATION_KEY)?;
        Ok(())
    }
}
