//! Domain model for the campuslink portal core.
//!
//! # Responsibility
//! - Define the canonical records persisted in the portal aggregate.
//! - Define the volatile session snapshot derived from an account.
//!
//! # Invariants
//! - Every account is identified by a stable `AccountId`.
//! - Session snapshots never carry password material.

pub mod account;
pub mod aggregate;
pub mod attendance;
pub mod schedule;
pub mod session;
