//! Note input layer: ordered store, catalog loading, link audit.
//!
//! # Responsibility
//! - Own the authoritative ordered set of notes for one run.
//! - Decode declarative catalogs into validated stores.
//!
//! # Invariants
//! - Title uniqueness is checked when a store is built, before rendering.

pub mod catalog;
pub mod link_audit;
pub mod note_store;
