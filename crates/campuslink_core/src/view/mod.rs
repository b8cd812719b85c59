//! View-model layer.
//!
//! # Responsibility
//! - Project session + aggregate state into a renderable view model.
//! - Keep the presentation contract (page identifiers, display rows) in one
//!   place so UI layers stay dumb.

pub mod renderer;
