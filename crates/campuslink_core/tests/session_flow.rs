use campuslink_core::model::account::IdentityProfile;
use campuslink_core::repo::portal_repo::KvPortalRepository;
use campuslink_core::repo::session_repo::KvSessionRepository;
use campuslink_core::service::credential_service;
use campuslink_core::service::session_service::{RegistrationFlowError, SessionManager};
use campuslink_core::storage::MemoryKvStorage;
use campuslink_core::store::DomainStore;
use chrono::Utc;

fn open_store() -> DomainStore<KvPortalRepository<MemoryKvStorage>> {
    DomainStore::open(KvPortalRepository::new(MemoryKvStorage::new())).unwrap()
}

fn open_sessions() -> SessionManager<KvSessionRepository<MemoryKvStorage>> {
    SessionManager::open(KvSessionRepository::new(MemoryKvStorage::new())).unwrap()
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
fn login_starts_and_logout_ends_a_session() {
    let mut store = open_store();
    let mut sessions = open_sessions();
    assert!(!sessions.is_authenticated());

    let account = credential_service::register(
        &mut store,
        "Alya Putri",
        "alya@example.com",
        "pass1234",
        Utc::now(),
    )
    .unwrap();

    let session = sessions.start_session(&account, Utc::now()).unwrap();
    assert!(sessions.is_authenticated());
    assert_eq!(session.account_id, account.id);
    assert_eq!(sessions.current().unwrap().email, "alya@example.com");

    sessions.end_session().unwrap();
    assert!(!sessions.is_authenticated());
    assert!(sessions.current().is_none());
}

#[test]
fn session_survives_a_reload_of_the_same_tab() {
    let mut store = open_store();
    let mut sessions = open_sessions();

    let account = credential_service::register(
        &mut store,
        "Alya Putri",
        "alya@example.com",
        "pass1234",
        Utc::now(),
    )
    .unwrap();
    sessions.start_session(&account, Utc::now()).unwrap();

    // A reload drops the in-memory singleton but keeps tab-scoped storage.
    let reopened = SessionManager::open(sessions.into_repo()).unwrap();
    assert!(reopened.is_authenticated());
    assert_eq!(reopened.current().unwrap().account_id, account.id);
}

#[test]
fn two_step_registration_authenticates_only_after_identity() {
    let mut store = open_store();
    let mut sessions = open_sessions();

    let account = credential_service::register(
        &mut store,
        "Alya Putri",
        "alya@example.com",
        "pass1234",
        Utc::now(),
    )
    .unwrap();
    sessions.begin_registration(&account).unwrap();

    // Account exists, but registration is not finished: still anonymous.
    assert!(!sessions.is_authenticated());
    assert_eq!(
        sessions.pending_registration().unwrap().unwrap().account_id,
        account.id
    );

    let session = sessions
        .complete_registration(&mut store, sample_profile(), Utc::now())
        .unwrap();
    assert!(sessions.is_authenticated());
    assert_eq!(session.identity.as_ref().unwrap().program, "Informatika");
    assert!(sessions.pending_registration().unwrap().is_none());

    // The profile landed on the stored account as well.
    let stored = store.find_account(account.id).unwrap();
    assert_eq!(stored.identity.as_ref().unwrap().student_id, "2313010001");
}

#[test]
fn completing_without_pending_registration_fails() {
    let mut store = open_store();
    let mut sessions = open_sessions();

    let err = sessions
        .complete_registration(&mut store, sample_profile(), Utc::now())
        .unwrap_err();
    assert!(matches!(err, RegistrationFlowError::NoPendingRegistration));
    assert!(!sessions.is_authenticated());
}

#[test]
fn session_snapshot_never_stores_password_material() {
    let mut store = open_store();
    let mut sessions = open_sessions();

    let account = credential_service::register(
        &mut store,
        "Alya Putri",
        "alya@example.com",
        "pass1234",
        Utc::now(),
    )
    .unwrap();
    let session = sessions.start_session(&account, Utc::now()).unwrap();

    let encoded = serde_json::to_string(&session).unwrap();
    assert!(!encoded.contains("pass1234"));
    assert!(!encoded.contains("argon2"));
}
