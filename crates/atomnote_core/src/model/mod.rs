//! Domain model for atomic concept notes and batch configuration.
//!
//! # Responsibility
//! - Define the canonical `NoteRecord` consumed by every renderer.
//! - Define the batch-wide `GenerationConfig` passed into the engine.
//!
//! # Invariants
//! - A note is identified by its title; titles are unique within a store.
//! - Rendering reads only `NoteRecord` + `GenerationConfig`, never ambient state.

pub mod config;
pub mod note;
