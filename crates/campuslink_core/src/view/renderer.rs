//! Pure view-model renderer.
//!
//! # Responsibility
//! - Derive display content for every page from (session, aggregate, today).
//! - Decide which single page region is visible.
//!
//! # Invariants
//! - Rendering never mutates the store; same inputs produce the same view.
//! - Exactly one page is visible per render.
//! - Anonymous renders expose no member, attendance or roster data.

use crate::model::session::Session;
use crate::repo::portal_repo::PortalRepository;
use crate::store::DomainStore;

/// Page identifiers shared with the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Auth,
    Identitas,
    Attendance,
    Schedule,
    Structure,
    Members,
    About,
}

impl Page {
    /// Parses a presentation-layer page identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "home" => Some(Self::Home),
            "auth" => Some(Self::Auth),
            "identitas" => Some(Self::Identitas),
            "attendance" => Some(Self::Attendance),
            "schedule" => Some(Self::Schedule),
            "structure" => Some(Self::Structure),
            "members" => Some(Self::Members),
            "about" => Some(Self::About),
            _ => None,
        }
    }

    /// Identifier handed back to the presentation layer.
    pub fn id(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Auth => "auth",
            Self::Identitas => "identitas",
            Self::Attendance => "attendance",
            Self::Schedule => "schedule",
            Self::Structure => "structure",
            Self::Members => "members",
            Self::About => "about",
        }
    }

    /// Pages reachable without a session: landing, about, the auth forms and
    /// the identity form (reached mid-registration, before auto-login).
    fn allows_anonymous(self) -> bool {
        matches!(self, Self::Home | Self::About | Self::Auth | Self::Identitas)
    }
}

/// One attendance history row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRow {
    pub date: String,
    pub meeting: String,
    pub status: &'static str,
}

/// One schedule/meeting display item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingSummary {
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
}

/// One org-structure card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgCard {
    pub role: String,
    pub name: String,
}

/// One member roster row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRow {
    pub name: String,
    pub program: String,
    pub semester: String,
    /// "birthplace, birthdate" when known, otherwise "-".
    pub birth_info: String,
}

/// Everything the presentation layer needs to paint one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppView {
    /// The single visible page region.
    pub visible_page: Page,
    pub sidebar_visible: bool,
    /// Greeting line for the signed-in member.
    pub greeting: Option<String>,
    pub profile_name: Option<String>,
    /// "<program> • Sem <n>" or the incomplete-identity placeholder.
    pub profile_summary: Option<String>,
    /// Newest-first attendance history of the signed-in member.
    pub attendance_rows: Vec<AttendanceRow>,
    pub next_meeting: Option<MeetingSummary>,
    pub schedule_items: Vec<MeetingSummary>,
    pub org_cards: Vec<OrgCard>,
    pub member_rows: Vec<MemberRow>,
}

const IDENTITY_INCOMPLETE: &str = "Identity not completed";

/// Projects store + session state into an `AppView`.
///
/// Re-run by the caller after every mutation and navigation. `today` is an
/// ISO `YYYY-MM-DD` date used for the upcoming-meeting lookup.
pub fn render<R: PortalRepository>(
    requested_page: Page,
    session: Option<&Session>,
    store: &DomainStore<R>,
    today: &str,
) -> AppView {
    let Some(session) = session else {
        return anonymous_view(requested_page);
    };

    let profile_summary = match &session.identity {
        Some(identity) => format!("{} • Sem {}", identity.program, identity.semester),
        None => IDENTITY_INCOMPLETE.to_string(),
    };

    let attendance_rows = store
        .list_attendance(session.account_id)
        .into_iter()
        .map(|record| AttendanceRow {
            date: record.date,
            meeting: record.meeting,
            status: record.status.as_str(),
        })
        .collect();

    let schedule_items: Vec<MeetingSummary> = store
        .schedule()
        .iter()
        .map(|entry| MeetingSummary {
            title: entry.title.clone(),
            date: entry.date.clone(),
            time: entry.time.clone(),
            location: entry.location.clone(),
        })
        .collect();

    let next_meeting = store.next_upcoming_meeting(today).map(|entry| MeetingSummary {
        title: entry.title.clone(),
        date: entry.date.clone(),
        time: entry.time.clone(),
        location: entry.location.clone(),
    });

    let org_cards = store
        .org_roles()
        .iter()
        .map(|entry| OrgCard {
            role: entry.role.clone(),
            name: entry.name.clone(),
        })
        .collect();

    let member_rows = store
        .accounts()
        .iter()
        .map(|account| {
            let (program, semester, birth_info) = match &account.identity {
                Some(identity) => (
                    identity.program.clone(),
                    identity.semester.clone(),
                    if identity.birthplace.is_empty() {
                        "-".to_string()
                    } else {
                        format!("{}, {}", identity.birthplace, identity.birthdate)
                    },
                ),
                None => ("-".to_string(), "-".to_string(), "-".to_string()),
            };
            MemberRow {
                name: account.name.clone(),
                program,
                semester,
                birth_info,
            }
        })
        .collect();

    AppView {
        visible_page: requested_page,
        sidebar_visible: true,
        greeting: Some(format!("Hello, {}", session.name)),
        profile_name: Some(session.name.clone()),
        profile_summary: Some(profile_summary),
        attendance_rows,
        next_meeting,
        schedule_items,
        org_cards,
        member_rows,
    }
}

fn anonymous_view(requested_page: Page) -> AppView {
    let visible_page = if requested_page.allows_anonymous() {
        requested_page
    } else {
        Page::Home
    };

    AppView {
        visible_page,
        sidebar_visible: false,
        greeting: None,
        profile_name: None,
        profile_summary: None,
        attendance_rows: Vec::new(),
        next_meeting: None,
        schedule_items: Vec::new(),
        org_cards: Vec::new(),
        member_rows: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{render, Page};
    use crate::model::account::{Account, IdentityProfile};
    use crate::model::session::Session;
    use crate::repo::portal_repo::KvPortalRepository;
    use crate::storage::MemoryKvStorage;
    use crate::store::DomainStore;
    use chrono::Utc;

    fn open_store() -> DomainStore<KvPortalRepository<MemoryKvStorage>> {
        DomainStore::open(KvPortalRepository::new(MemoryKvStorage::new())).unwrap()
    }

    #[test]
    fn page_identifiers_round_trip() {
        for id in [
            "home",
            "auth",
            "identitas",
            "attendance",
            "schedule",
            "structure",
            "members",
            "about",
        ] {
            assert_eq!(Page::from_id(id).unwrap().id(), id);
        }
        assert!(Page::from_id("nope").is_none());
    }

    #[test]
    fn anonymous_render_hides_data_and_falls_back_to_home() {
        let store = open_store();
        let view = render(Page::Members, None, &store, "2025-11-16");
        assert_eq!(view.visible_page, Page::Home);
        assert!(!view.sidebar_visible);
        assert!(view.greeting.is_none());
        assert!(view.member_rows.is_empty());
        assert!(view.schedule_items.is_empty());

        let about = render(Page::About, None, &store, "2025-11-16");
        assert_eq!(about.visible_page, Page::About);
    }

    #[test]
    fn authenticated_render_projects_profile_and_seeded_data() {
        let mut store = open_store();
        let mut account = Account::new("Alya Putri", "alya@example.com", "phc", Utc::now());
        account.identity = Some(IdentityProfile {
            student_id: "2313010001".to_string(),
            program: "Informatika".to_string(),
            semester: "3".to_string(),
            birthplace: "Padang".to_string(),
            birthdate: "2005-04-12".to_string(),
            phone: "0812000111".to_string(),
        });
        let session = Session::from_account(&account, Utc::now());
        store.push_account(account).unwrap();

        let view = render(Page::Home, Some(&session), &store, "2025-11-16");
        assert!(view.sidebar_visible);
        assert_eq!(view.greeting.as_deref(), Some("Hello, Alya Putri"));
        assert_eq!(view.profile_summary.as_deref(), Some("Informatika • Sem 3"));
        assert_eq!(view.schedule_items.len(), 2);
        assert_eq!(view.org_cards.len(), 3);
        assert_eq!(view.next_meeting.unwrap().title, "Coding Night");
        assert_eq!(view.member_rows[0].birth_info, "Padang, 2005-04-12");
    }

    #[test]
    fn incomplete_identity_uses_placeholder_summary() {
        let mut store = open_store();
        let account = Account::new("Budi", "budi@example.com", "phc", Utc::now());
        let session = Session::from_account(&account, Utc::now());
        store.push_account(account).unwrap();

        let view = render(Page::Home, Some(&session), &store, "2025-11-16");
        assert_eq!(view.profile_summary.as_deref(), Some("Identity not completed"));
        assert_eq!(view.member_rows[0].program, "-");
    }

    #[test]
    fn render_is_pure_for_identical_inputs() {
        let store = open_store();
        let first = render(Page::Home, None, &store, "2025-11-16");
        let second = render(Page::Home, None, &store, "2025-11-16");
        assert_eq!(first, second);
    }
}
