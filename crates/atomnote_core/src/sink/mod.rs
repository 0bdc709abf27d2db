//! Emission sinks that persist rendered `(filename, content)` pairs.
//!
//! # Responsibility
//! - Define the `EmissionSink` seam used by the generator.
//! - Provide a directory-backed sink and an in-memory sink.
//!
//! # Invariants
//! - A sink call handles exactly one note; failures never affect other calls.
//! - `DirectorySink` never writes outside its root directory.
//! - A deferred `DirectorySink` touches the filesystem only when the first
//!   document is emitted.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Destination for rendered documents.
pub trait EmissionSink {
    fn emit(&mut self, file_name: &str, content: &str) -> Result<(), SinkError>;
}

/// Errors from persisting one document.
#[derive(Debug)]
pub enum SinkError {
    /// Name is empty, `.`/`..`, or contains a path separator or NUL.
    InvalidFileName(String),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for SinkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFileName(name) => write!(f, "invalid output file name `{name}`"),
            Self::Io { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for SinkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidFileName(_) => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Writes each document to `<root>/<file_name>`, replacing existing files.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
    create_root: bool,
}

impl DirectorySink {
    /// Uses an existing directory as-is.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            create_root: false,
        }
    }

    /// Creates `root` (and parents) when missing.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let mut sink = Self::deferred(root);
        sink.ensure_root()?;
        Ok(sink)
    }

    /// Creates `root` (and parents) on the first emitted document, so a run
    /// that emits nothing leaves no directory behind.
    pub fn deferred(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            create_root: true,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_root(&mut self) -> Result<(), SinkError> {
        if self.create_root {
            std::fs::create_dir_all(&self.root).map_err(|source| SinkError::Io {
                path: self.root.clone(),
                source,
            })?;
            self.create_root = false;
        }
        Ok(())
    }
}

impl EmissionSink for DirectorySink {
    fn emit(&mut self, file_name: &str, content: &str) -> Result<(), SinkError> {
        validate_file_name(file_name)?;
        self.ensure_root()?;
        let path = self.root.join(file_name);
        let io_error = |source| SinkError::Io {
            path: path.clone(),
            source,
        };

        // File is closed on drop, including on the error paths below.
        let mut file = File::create(&path).map_err(io_error)?;
        file.write_all(content.as_bytes()).map_err(io_error)?;
        file.flush().map_err(io_error)?;
        Ok(())
    }
}

/// Collects documents in memory, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    pub documents: Vec<(String, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.documents.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.documents
            .iter()
            .find(|(name, _)| name == file_name)
            .map(|(_, content)| content.as_str())
    }
}

impl EmissionSink for MemorySink {
    fn emit(&mut self, file_name: &str, content: &str) -> Result<(), SinkError> {
        validate_file_name(file_name)?;
        self.documents
            .push((file_name.to_string(), content.to_string()));
        Ok(())
    }
}

fn validate_file_name(file_name: &str) -> Result<(), SinkError> {
    let invalid = file_name.is_empty()
        || file_name == "."
        || file_name == ".."
        || file_name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(SinkError::InvalidFileName(file_name.to_string()));
    }
    Ok(())
}
