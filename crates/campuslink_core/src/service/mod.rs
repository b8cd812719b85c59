//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and repository calls into portal-level operations.
//! - Keep UI layers decoupled from storage and hashing details.

pub mod credential_service;
pub mod password;
pub mod session_service;
pub mod validation;
