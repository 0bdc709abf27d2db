//! Full document assembly for one note.
//!
//! # Invariants
//! - Validation runs before any view is rendered.
//! - Either every view renders and a full document is returned, or an error
//!   is returned and no text escapes.
//! - The body is inserted verbatim; an empty body still keeps the blank
//!   lines around it.

use crate::model::config::GenerationConfig;
use crate::model::note::NoteRecord;
use crate::render::front_matter::render_front_matter;
use crate::render::properties::render_property_tables;
use crate::render::template::{Slots, Template};
use crate::render::RenderError;
use once_cell::sync::Lazy;

static DOCUMENT: Lazy<Template> = Lazy::new(|| {
    Template::inline(
        "{front_matter}\n\n{body}\n\n---\n## Propriedades da nota\n\n{general_properties}\n\n{saas_properties}\n",
    )
});

/// Rendered `(filename, content)` pair ready for a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNote {
    pub title: String,
    pub file_name: String,
    pub content: String,
}

/// Validates and renders one note into its complete document text.
pub fn render_note(
    note: &NoteRecord,
    config: &GenerationConfig,
) -> Result<RenderedNote, RenderError> {
    note.validate()?;

    let front_matter = render_front_matter(note, config)?;
    let tables = render_property_tables(note, config)?;

    let mut slots = Slots::new();
    slots
        .set("front_matter", front_matter)
        .set("body", note.body.as_str())
        .set("general_properties", tables.general)
        .set("saas_properties", tables.saas);
    let content = DOCUMENT.render(&slots)?;

    Ok(RenderedNote {
        title: note.title.clone(),
        file_name: note.file_name(),
        content,
    })
}
