//! Domain model for idea records.
//!
//! # Invariants
//! - Every idea is identified by a system-assigned `IdeaId` that is never reused.

pub mod idea;
