//! Declarative TOML catalog loading.
//!
//! # Responsibility
//! - Decode a `[generation]` table and an ordered `[[notes]]` array.
//! - Run config validation and title-uniqueness checks at load time.
//!
//! # Invariants
//! - `[[notes]]` order becomes store order.
//! - Dates are quoted `YYYY-MM-DD` strings.
//! - A body closed on its own line loses that one line terminator, so both
//!   multi-line string layouts load the same text.
//! - Per-note field validation is deferred to rendering so that one bad
//!   note does not block the others.
//!
//! ```toml
//! [generation]
//! parent_title = "Parent Note"
//! created_at = "2025-01-03"
//! updated_at = "2025-01-03"
//!
//! [[notes]]
//! title = "Stop Hook"
//! collection = "ia"
//! related = ["Claude Code"]
//! tags = ["conceito"]
//! body = """
//! O **Stop Hook** ...
//! """
//! ```

use crate::model::config::{ConfigError, GenerationConfig};
use crate::model::note::NoteRecord;
use crate::store::note_store::{NoteStore, StoreError};
use log::info;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    generation: GenerationConfig,
    #[serde(default)]
    notes: Vec<NoteRecord>,
}

/// Validated batch input: configuration plus ordered notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub config: GenerationConfig,
    pub store: NoteStore,
}

/// Errors from reading or decoding a catalog.
#[derive(Debug)]
pub enum CatalogError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    Config(ConfigError),
    Store(StoreError),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read catalog `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid catalog: {err}"),
            Self::Config(err) => write!(f, "invalid generation config: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<ConfigError> for CatalogError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<StoreError> for CatalogError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Decodes and validates catalog text.
pub fn parse_catalog(text: &str) -> Result<Catalog, CatalogError> {
    let mut file: CatalogFile = toml::from_str(text)?;
    file.generation.validate()?;
    for note in &mut file.notes {
        strip_closing_newline(&mut note.body);
    }
    let store = NoteStore::from_records(file.notes)?;
    Ok(Catalog {
        config: file.generation,
        store,
    })
}

fn strip_closing_newline(body: &mut String) {
    if body.ends_with('\n') {
        body.pop();
        if body.ends_with('\r') {
            body.pop();
        }
    }
}

/// Reads, decodes and validates a catalog file.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&text)?;
    info!(
        "event=catalog_load module=store status=ok notes={} path={}",
        catalog.store.len(),
        path.display()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::{parse_catalog, CatalogError};
    use crate::model::config::ConfigError;
    use crate::store::note_store::StoreError;

    const HEADER: &str = r#"
[generation]
parent_title = "Parent Note"
created_at = "2025-01-03"
updated_at = "2025-01-04"
"#;

    #[test]
    fn parses_generation_table_and_defaults_flags() {
        let catalog = parse_catalog(HEADER).unwrap();
        assert_eq!(catalog.config.parent_title, "Parent Note");
        assert_eq!(catalog.config.updated_at_text(), "2025-01-04");
        assert!(!catalog.config.show_saas_block);
        assert!(catalog.store.is_empty());
    }

    #[test]
    fn notes_keep_file_order_and_optional_fields_default() {
        let text = format!(
            "{HEADER}
[[notes]]
title = \"B\"
collection = \"ia\"
related = [\"A\"]
tags = [\"x\", \"y\"]
body = \"\"\"
Line one.
\"\"\"

[[notes]]
title = \"A\"
collection = \"ia\"
"
        );
        let catalog = parse_catalog(&text).unwrap();
        let titles: Vec<&str> = catalog.store.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);

        let first = catalog.store.get("B").unwrap();
        assert_eq!(first.tags, vec!["x".to_string(), "y".to_string()]);
        assert_eq!(first.body, "Line one.");
        assert!(catalog.store.get("A").unwrap().related.is_empty());
    }

    #[test]
    fn only_the_closing_line_terminator_is_dropped_from_bodies() {
        let text = format!(
            "{HEADER}
[[notes]]
title = \"Spaced\"
collection = \"ia\"
body = '''
Line one.

'''

[[notes]]
title = \"Inline\"
collection = \"ia\"
body = '''Line one.'''

[[notes]]
title = \"Windows\"
collection = \"ia\"
body = \"Line one.\\r\\n\"
"
        );
        let catalog = parse_catalog(&text).unwrap();
        assert_eq!(catalog.store.get("Spaced").unwrap().body, "Line one.\n");
        assert_eq!(catalog.store.get("Inline").unwrap().body, "Line one.");
        assert_eq!(catalog.store.get("Windows").unwrap().body, "Line one.");
    }

    #[test]
    fn duplicate_titles_fail_the_whole_catalog() {
        let text = format!(
            "{HEADER}
[[notes]]
title = \"A\"
collection = \"ia\"

[[notes]]
title = \"A\"
collection = \"tecnologia\"
"
        );
        let err = parse_catalog(&text).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Store(StoreError::DuplicateTitle { .. })
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let text = r#"
[generation]
parent_title = ""
created_at = "2025-01-03"
updated_at = "2025-01-03"
"#;
        let err = parse_catalog(text).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Config(ConfigError::EmptyParentTitle)
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = parse_catalog("[generation\n").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
