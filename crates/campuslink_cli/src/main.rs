//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `campuslink_core` linkage.
//! - Keep output deterministic enough for quick local sanity checks.

use campuslink_core::{open_store_in_memory, DomainStore, KvPortalRepository};
use chrono::Utc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("campuslink_core version={}", campuslink_core::core_version());

    let storage = open_store_in_memory()?;
    let store = DomainStore::open(KvPortalRepository::new(storage))?;
    println!(
        "seeded schedule_entries={} org_roles={}",
        store.schedule().len(),
        store.org_roles().len()
    );

    let today = Utc::now().format("%Y-%m-%d").to_string();
    match store.next_upcoming_meeting(&today) {
        Some(entry) => println!(
            "next_meeting=\"{}\" date={} time={} location=\"{}\"",
            entry.title, entry.date, entry.time, entry.location
        ),
        None => println!("next_meeting=none"),
    }

    Ok(())
}
