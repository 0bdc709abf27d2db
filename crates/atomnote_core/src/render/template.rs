//! Named-slot text templates shared by every rendered view.
//!
//! # Responsibility
//! - Parse `{slot_name}` placeholders out of a static template once.
//! - Fill slots from a `Slots` map, failing on any missing slot.
//!
//! # Invariants
//! - Slot values are inserted verbatim and never re-scanned for placeholders.
//! - In templates built with `Template::new`, a line holding only one
//!   placeholder is a block slot: it renders as `value + "\n"`, and
//!   disappears entirely when the value is empty.
//! - Templates built with `Template::inline` have no block slots; an empty
//!   value leaves its line in place.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").expect("valid placeholder regex"));
static BLOCK_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{([a-z_]+)\}$").expect("valid block line regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(&'static str),
    Inline(&'static str),
    Block { name: &'static str, newline: bool },
}

/// Pre-parsed template with named slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn new(source: &'static str) -> Self {
        Self::parse(source, true)
    }

    /// Template whose placeholders are all inline, even alone on a line.
    pub fn inline(source: &'static str) -> Self {
        Self::parse(source, false)
    }

    fn parse(source: &'static str, block_lines: bool) -> Self {
        let mut segments = Vec::new();
        for line in source.split_inclusive('\n') {
            let (content, newline) = match line.strip_suffix('\n') {
                Some(content) => (content, true),
                None => (line, false),
            };

            let block = block_lines
                .then(|| BLOCK_LINE_RE.captures(content))
                .flatten()
                .and_then(|caps| caps.get(1));
            if let Some(name) = block {
                segments.push(Segment::Block {
                    name: name.as_str(),
                    newline,
                });
                continue;
            }

            let mut cursor = 0;
            for caps in PLACEHOLDER_RE.captures_iter(line) {
                let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                if whole.start() > cursor {
                    segments.push(Segment::Literal(&line[cursor..whole.start()]));
                }
                segments.push(Segment::Inline(name.as_str()));
                cursor = whole.end();
            }
            if cursor < line.len() {
                segments.push(Segment::Literal(&line[cursor..]));
            }
        }
        Self { segments }
    }

    /// Distinct slot names in first-use order.
    pub fn slot_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for segment in &self.segments {
            let name = match segment {
                Segment::Literal(_) => continue,
                Segment::Inline(name) | Segment::Block { name, .. } => *name,
            };
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    pub fn render(&self, slots: &Slots) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Inline(name) => out.push_str(slots.value(*name)?),
                Segment::Block { name, newline } => {
                    let value = slots.value(*name)?;
                    if !value.is_empty() {
                        out.push_str(value);
                        if *newline {
                            out.push('\n');
                        }
                    }
                }
            }
        }
        Ok(out)
    }
}

/// Slot name to value bindings for one render call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slots {
    values: BTreeMap<&'static str, String>,
}

impl Slots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
        self.values.insert(name, value.into());
        self
    }

    fn value(&self, name: &'static str) -> Result<&str, TemplateError> {
        self.values
            .get(name)
            .map(String::as_str)
            .ok_or(TemplateError::MissingSlot(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateError {
    MissingSlot(&'static str),
}

impl Display for TemplateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSlot(name) => write!(f, "template slot `{name}` has no value"),
        }
    }
}

impl Error for TemplateError {}
