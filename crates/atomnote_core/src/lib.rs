//! Core engine for generating interlinked atomic concept notes.
//! This crate is the single source of truth for rendering invariants.

pub mod logging;
pub mod model;
pub mod render;
pub mod service;
pub mod sink;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::config::{ConfigError, GenerationConfig};
pub use model::note::{NoteRecord, NoteValidationError};
pub use render::document::{render_note, RenderedNote};
pub use render::front_matter::{render_front_matter, FRONT_MATTER_KEYS};
pub use render::link::{extract_links, join_links, wiki_link};
pub use render::properties::{render_property_tables, PropertyTables};
pub use render::template::{Slots, Template, TemplateError};
pub use render::RenderError;
pub use service::generator::{
    GenerateError, GenerationPolicy, GenerationReport, NoteFailure, NoteFailureReason,
    NoteGenerator,
};
pub use sink::{DirectorySink, EmissionSink, MemorySink, SinkError};
pub use store::catalog::{load_catalog, parse_catalog, Catalog, CatalogError};
pub use store::link_audit::{audit_links, DanglingLink, LinkOrigin};
pub use store::note_store::{NoteStore, StoreError};

