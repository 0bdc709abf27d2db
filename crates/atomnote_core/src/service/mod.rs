//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store, renderers and sinks into a generation run.
//! - Keep CLI layers decoupled from rendering and persistence details.

pub mod generator;
