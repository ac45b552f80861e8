//! Persistence error types.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading or writing cinema data files.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error when accessing `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed cinema data in `{0}`")]
    Format(PathBuf, #[source] serde_json::Error),

    #[error("failed to write XML export: {0}")]
    Xml(String),
}

impl PersistenceError {
    pub(crate) fn xml(err: impl std::fmt::Display) -> Self {
        Self::Xml(err.to_string())
    }
}
