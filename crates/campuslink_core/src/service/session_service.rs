//! Session lifecycle and the two-step registration flow.
//!
//! # Responsibility
//! - Track the single authenticated identity for this process ("tab").
//! - Persist the session snapshot so it survives a reload of the same tab.
//! - Carry the pending-registration marker between account creation and
//!   identity completion.
//!
//! # Invariants
//! - State machine: Anonymous --login--> Authenticated --logout/clear-->
//!   Anonymous. Registration reaches Authenticated only after identity
//!   completion.
//! - At most one session exists at a time; starting a new one replaces it.

use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use log::info;

use crate::model::account::{Account, IdentityProfile};
use crate::model::session::{PendingRegistration, Session};
use crate::repo::portal_repo::PortalRepository;
use crate::repo::session_repo::SessionRepository;
use crate::repo::{RepoError, RepoResult};
use crate::store::{DomainStore, StoreError};

/// Failure of the identity-completion step.
#[derive(Debug)]
pub enum RegistrationFlowError {
    /// No registration is in progress; the caller should go to login.
    NoPendingRegistration,
    Store(StoreError),
    Repo(RepoError),
}

impl Display for RegistrationFlowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPendingRegistration => write!(f, "no registration in progress"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RegistrationFlowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::NoPendingRegistration => None,
        }
    }
}

impl From<StoreError> for RegistrationFlowError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<RepoError> for RegistrationFlowError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Per-process session singleton over tab-scoped storage.
pub struct SessionManager<R: SessionRepository> {
    repo: R,
    current: Option<Session>,
}

impl<R: SessionRepository> SessionManager<R> {
    /// Reconstructs session state from tab-scoped storage.
    ///
    /// The in-memory current session does not survive a reload; the storage
    /// blob does, for the lifetime of the tab.
    pub fn open(repo: R) -> RepoResult<Self> {
        let current = repo.load_session()?;
        if let Some(session) = &current {
            info!(
                "event=session_restored module=session status=ok account={}",
                session.account_id
            );
        }
        Ok(Self { repo, current })
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Builds a session snapshot from `account`, persists it and makes it
    /// current. Replaces any previous session.
    pub fn start_session(
        &mut self,
        account: &Account,
        login_at: DateTime<Utc>,
    ) -> RepoResult<Session> {
        let session = Session::from_account(account, login_at);
        self.repo.save_session(&session)?;
        self.current = Some(session.clone());
        info!(
            "event=session_started module=session status=ok account={}",
            account.id
        );
        Ok(session)
    }

    /// Clears tab-scoped storage and the in-memory session.
    pub fn end_session(&mut self) -> RepoResult<()> {
        self.repo.clear_session()?;
        if let Some(session) = self.current.take() {
            info!(
                "event=session_ended module=session status=ok account={}",
                session.account_id
            );
        }
        Ok(())
    }

    /// Records that `account` was just registered and still owes the
    /// identity step. Does not authenticate.
    pub fn begin_registration(&mut self, account: &Account) -> RepoResult<()> {
        self.repo
            .save_pending(&PendingRegistration::for_account(account))
    }

    pub fn pending_registration(&self) -> RepoResult<Option<PendingRegistration>> {
        self.repo.load_pending()
    }

    /// Completes the two-step registration: attaches the identity profile to
    /// the pending account, auto-logs it in and clears the marker.
    pub fn complete_registration<P: PortalRepository>(
        &mut self,
        store: &mut DomainStore<P>,
        profile: IdentityProfile,
        login_at: DateTime<Utc>,
    ) -> Result<Session, RegistrationFlowError> {
        let pending = self
            .repo
            .load_pending()?
            .ok_or(RegistrationFlowError::NoPendingRegistration)?;

        let account = store.attach_identity(pending.account_id, profile)?;
        let session = self.start_session(&account, login_at)?;
        self.repo.clear_pending()?;
        Ok(session)
    }

    /// Releases the underlying repository; used to model a reload that keeps
    /// tab-scoped storage alive.
    pub fn into_repo(self) -> R {
        self.repo
    }
}
