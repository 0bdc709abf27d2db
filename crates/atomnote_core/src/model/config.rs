//! Generation-wide constants shared by every note in one run.
//!
//! # Responsibility
//! - Carry the parent note title, batch dates and SaaS flag values.
//!
//! # Invariants
//! - `parent_title` must not be blank.
//! - `updated_at` must not be earlier than `created_at`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Date layout used for every rendered date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Batch-level configuration passed explicitly into the renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Title of the note every generated note links back to.
    pub parent_title: String,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
    /// Value of `mostrar_bloco_saas` in every note.
    #[serde(default)]
    pub show_saas_block: bool,
    /// Value of `status_saas` in every note.
    #[serde(default)]
    pub saas_status: bool,
}

impl GenerationConfig {
    /// Creates a config where creation and update share one batch date and
    /// both SaaS flags are `false`.
    pub fn new(parent_title: impl Into<String>, batch_date: NaiveDate) -> Self {
        Self {
            parent_title: parent_title.into(),
            created_at: batch_date,
            updated_at: batch_date,
            show_saas_block: false,
            saas_status: false,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parent_title.trim().is_empty() {
            return Err(ConfigError::EmptyParentTitle);
        }
        if self.updated_at < self.created_at {
            return Err(ConfigError::UpdatedBeforeCreated {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }

    /// `created_at` rendered as `YYYY-MM-DD`.
    pub fn created_at_text(&self) -> String {
        self.created_at.format(DATE_FORMAT).to_string()
    }

    /// `updated_at` rendered as `YYYY-MM-DD`.
    pub fn updated_at_text(&self) -> String {
        self.updated_at.format(DATE_FORMAT).to_string()
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyParentTitle,
    UpdatedBeforeCreated {
        created_at: NaiveDate,
        updated_at: NaiveDate,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyParentTitle => write!(f, "parent_title must not be empty"),
            Self::UpdatedBeforeCreated {
                created_at,
                updated_at,
            } => write!(
                f,
                "updated_at ({updated_at}) must be >= created_at ({created_at})"
            ),
        }
    }
}

impl Error for ConfigError {}
