//! Ordered, title-unique note collection.
//!
//! # Invariants
//! - Iteration order equals declaration order.
//! - No two records share a title (exact, case-sensitive comparison).

use crate::model::note::NoteRecord;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from building a `NoteStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Two records share a title; their output filenames would collide.
    DuplicateTitle {
        title: String,
        first_index: usize,
        duplicate_index: usize,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateTitle {
                title,
                first_index,
                duplicate_index,
            } => write!(
                f,
                "duplicate note title `{title}` at positions {first_index} and {duplicate_index}"
            ),
        }
    }
}

impl Error for StoreError {}

/// Authoritative title -> record mapping for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteStore {
    records: Vec<NoteRecord>,
    index: HashMap<String, usize>,
}

impl NoteStore {
    /// Builds a store, rejecting the first duplicate title encountered.
    pub fn from_records(records: Vec<NoteRecord>) -> Result<Self, StoreError> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if let Some(first_index) = index.insert(record.title.clone(), position) {
                return Err(StoreError::DuplicateTitle {
                    title: record.title.clone(),
                    first_index,
                    duplicate_index: position,
                });
            }
        }
        Ok(Self { records, index })
    }

    pub fn get(&self, title: &str) -> Option<&NoteRecord> {
        self.index.get(title).map(|position| &self.records[*position])
    }

    pub fn contains(&self, title: &str) -> bool {
        self.index.contains_key(title)
    }

    /// Records in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &NoteRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
