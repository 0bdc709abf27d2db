//! Note record model.
//!
//! # Responsibility
//! - Define the structured representation of one concept note before rendering.
//! - Provide field-level validation used before any rendering or emission.
//!
//! # Invariants
//! - `related` and `tags` keep authored order; nothing here sorts or dedups them.
//! - `title`, `collection`, and every `related`/`tags` entry must be non-blank.
//! - Output filename is always `title + ".md"`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// File extension appended to every note title.
pub const NOTE_FILE_EXTENSION: &str = ".md";

/// One concept note as authored in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Unique display name; also the basis of the output filename.
    pub title: String,
    /// Categorical grouping, e.g. `ia` or `tecnologia`.
    pub collection: String,
    /// Titles of related notes, in authored order. Targets may not exist yet.
    #[serde(default)]
    pub related: Vec<String>,
    /// Free-form topic tags, in authored order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Opaque markdown body; may embed `[[Title]]` cross-references.
    #[serde(default)]
    pub body: String,
}

impl NoteRecord {
    /// Creates a note with empty relations, tags and body.
    pub fn new(title: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            collection: collection.into(),
            related: Vec::new(),
            tags: Vec::new(),
            body: String::new(),
        }
    }

    /// Replaces the related-title list.
    pub fn with_related<I, S>(mut self, related: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related = related.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the tag list.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the body text.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the relative output filename for this note.
    pub fn file_name(&self) -> String {
        format!("{}{NOTE_FILE_EXTENSION}", self.title)
    }

    /// Validates field-level invariants.
    ///
    /// Reports the first violation found, scanning `title`, `collection`,
    /// `related`, then `tags`.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if self.collection.trim().is_empty() {
            return Err(NoteValidationError::EmptyCollection);
        }
        if let Some(index) = self.related.iter().position(|r| r.trim().is_empty()) {
            return Err(NoteValidationError::EmptyRelated { index });
        }
        if let Some(index) = self.tags.iter().position(|t| t.trim().is_empty()) {
            return Err(NoteValidationError::EmptyTag { index });
        }
        Ok(())
    }
}

/// Field-level validation errors for `NoteRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyTitle,
    EmptyCollection,
    EmptyRelated { index: usize },
    EmptyTag { index: usize },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title must not be empty"),
            Self::EmptyCollection => write!(f, "note collection must not be empty"),
            Self::EmptyRelated { index } => {
                write!(f, "related entry at index {index} must not be empty")
            }
            Self::EmptyTag { index } => write!(f, "tag at index {index} must not be empty"),
        }
    }
}

impl Error for NoteValidationError {}
