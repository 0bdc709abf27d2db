//! Pure rendering of `NoteRecord` into markdown documents.
//!
//! # Responsibility
//! - Format cross-reference tokens.
//! - Render front matter, property tables, and the assembled document.
//!
//! # Invariants
//! - Rendering is a pure function of `NoteRecord` + `GenerationConfig`;
//!   identical inputs give byte-identical output.
//! - All views go through the named-slot `Template` contract.

use crate::model::note::NoteValidationError;
use crate::render::template::TemplateError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod document;
pub mod front_matter;
pub mod link;
pub mod properties;
pub mod template;

/// Failure while rendering one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Note failed field validation before rendering started.
    Invalid(NoteValidationError),
    /// A view template could not be filled.
    Template(TemplateError),
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Template(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Template(err) => Some(err),
        }
    }
}

impl From<NoteValidationError> for RenderError {
    fn from(value: NoteValidationError) -> Self {
        Self::Invalid(value)
    }
}

impl From<TemplateError> for RenderError {
    fn from(value: TemplateError) -> Self {
        Self::Template(value)
    }
}
