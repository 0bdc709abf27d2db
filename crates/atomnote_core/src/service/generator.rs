//! Batch generation driver.
//!
//! # Responsibility
//! - Walk a `NoteStore` in order, render each note and hand it to a sink.
//! - Collect per-note failures into a `GenerationReport`.
//!
//! # Invariants
//! - Each note is checked, then rendered, then emitted; a failed note
//!   never reaches the sink.
//! - Render and sink failures are isolated per note unless
//!   `all_or_nothing` is set.
//! - Duplicate titles and invalid config abort the run before any emission.

use crate::model::config::{ConfigError, GenerationConfig};
use crate::model::note::NoteRecord;
use crate::render::document::{render_note, RenderedNote};
use crate::render::RenderError;
use crate::sink::EmissionSink;
use crate::store::link_audit::{dangling_links_for, DanglingLink};
use crate::store::note_store::{NoteStore, StoreError};
use log::{info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Run-level switches that change failure handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationPolicy {
    /// Emit nothing if any note fails to render.
    pub all_or_nothing: bool,
    /// Treat references to titles missing from the store as note failures.
    pub deny_dangling_links: bool,
}

/// Why one note was not emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum NoteFailureReason {
    /// Field validation or template rendering failed.
    Render(String),
    /// Note references titles missing from the store.
    DanglingLinks(Vec<String>),
    /// Sink rejected the document.
    Sink(String),
}

impl Display for NoteFailureReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(message) => write!(f, "render failed: {message}"),
            Self::DanglingLinks(targets) => {
                write!(f, "dangling links: {}", targets.join(", "))
            }
            Self::Sink(message) => write!(f, "emission failed: {message}"),
        }
    }
}

/// One note that was not emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteFailure {
    pub title: String,
    pub file_name: String,
    pub reason: NoteFailureReason,
}

/// Outcome of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Emitted filenames in emission order.
    pub emitted: Vec<String>,
    pub failures: Vec<NoteFailure>,
    /// Every dangling reference seen, whether or not it was fatal.
    pub dangling_links: Vec<DanglingLink>,
}

impl GenerationReport {
    pub fn emitted_count(&self) -> usize {
        self.emitted.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// `true` when every note was emitted.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run-level fatal errors; no note is emitted when one of these occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    Config(ConfigError),
    DuplicateTitle(StoreError),
    /// `all_or_nothing` run with at least one failing note.
    Aborted { failures: Vec<NoteFailure> },
}

impl Display for GenerateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid generation config: {err}"),
            Self::DuplicateTitle(err) => write!(f, "{err}"),
            Self::Aborted { failures } => write!(
                f,
                "generation aborted: {} note(s) failed and nothing was emitted",
                failures.len()
            ),
        }
    }
}

impl Error for GenerateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::DuplicateTitle(err) => Some(err),
            Self::Aborted { .. } => None,
        }
    }
}

impl From<ConfigError> for GenerateError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<StoreError> for GenerateError {
    fn from(value: StoreError) -> Self {
        Self::DuplicateTitle(value)
    }
}

/// Renders notes with one fixed config and policy.
#[derive(Debug, Clone)]
pub struct NoteGenerator {
    config: GenerationConfig,
    policy: GenerationPolicy,
}

impl NoteGenerator {
    pub fn new(config: GenerationConfig, policy: GenerationPolicy) -> Self {
        Self { config, policy }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn policy(&self) -> GenerationPolicy {
        self.policy
    }

    /// Renders one note without emitting it.
    pub fn render(&self, note: &NoteRecord) -> Result<RenderedNote, RenderError> {
        render_note(note, &self.config)
    }

    /// Builds a store from raw records, then runs `generate`.
    ///
    /// A duplicate title fails the run before anything is emitted.
    pub fn generate_records(
        &self,
        records: Vec<NoteRecord>,
        sink: &mut dyn EmissionSink,
    ) -> Result<GenerationReport, GenerateError> {
        let store = NoteStore::from_records(records).map_err(|err| {
            warn!("event=generate_abort module=service status=error reason=duplicate_title error={err}");
            GenerateError::from(err)
        })?;
        self.generate(&store, sink)
    }

    /// Renders every note in store order and emits the successful ones.
    pub fn generate(
        &self,
        store: &NoteStore,
        sink: &mut dyn EmissionSink,
    ) -> Result<GenerationReport, GenerateError> {
        self.config.validate()?;

        let total = store.len();
        let mut report = GenerationReport::default();
        let mut rendered = Vec::with_capacity(total);

        for (position, note) in store.iter().enumerate() {
            let dangling = dangling_links_for(note, store);
            for link in &dangling {
                warn!(
                    "event=dangling_link module=service status=warn source={:?} target={:?} origin={:?}",
                    link.source, link.target, link.origin
                );
            }

            let outcome = self.check_and_render(note, &dangling);
            report.dangling_links.extend(dangling);
            match outcome {
                Ok(document) => rendered.push((position, document)),
                Err(reason) => {
                    warn!(
                        "event=note_failed module=service status=error title={:?} reason={}",
                        note.title, reason
                    );
                    report.failures.push(NoteFailure {
                        title: note.title.clone(),
                        file_name: note.file_name(),
                        reason,
                    });
                }
            }
        }

        if self.policy.all_or_nothing && !report.failures.is_empty() {
            warn!(
                "event=generate_abort module=service status=error reason=all_or_nothing failed={}",
                report.failures.len()
            );
            return Err(GenerateError::Aborted {
                failures: report.failures,
            });
        }

        for (position, document) in rendered {
            match sink.emit(&document.file_name, &document.content) {
                Ok(()) => {
                    info!("{}", emitted_event(position, total, &document.file_name));
                    report.emitted.push(document.file_name);
                }
                Err(err) => {
                    warn!(
                        "event=note_failed module=service status=error title={:?} file={:?} error={}",
                        document.title, document.file_name, err
                    );
                    report.failures.push(NoteFailure {
                        title: document.title,
                        file_name: document.file_name,
                        reason: NoteFailureReason::Sink(err.to_string()),
                    });
                }
            }
        }

        info!(
            "event=generate_done module=service status={} emitted={} failed={} dangling={}",
            if report.is_clean() { "ok" } else { "partial" },
            report.emitted_count(),
            report.failed_count(),
            report.dangling_links.len()
        );
        Ok(report)
    }

    fn check_and_render(
        &self,
        note: &NoteRecord,
        dangling: &[DanglingLink],
    ) -> Result<RenderedNote, NoteFailureReason> {
        if self.policy.deny_dangling_links && !dangling.is_empty() {
            let mut targets: Vec<String> = Vec::new();
            for link in dangling {
                if !targets.contains(&link.target) {
                    targets.push(link.target.clone());
                }
            }
            return Err(NoteFailureReason::DanglingLinks(targets));
        }
        self.render(note)
            .map_err(|err| NoteFailureReason::Render(err.to_string()))
    }
}

/// `position` is the note's zero-based index in the store.
fn emitted_event(position: usize, total: usize, file_name: &str) -> String {
    format!(
        "event=note_emitted module=service status=ok position={} total={} file={:?}",
        position + 1,
        total,
        file_name
    )
}
