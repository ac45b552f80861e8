//! `[storage]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [storage]
//! data_file = "cinema_data.json"   # JSON snapshot, read at startup
//! xml_export = "cinema_data.xml"   # write-only export, "" to disable
//! ```
//!
//! Relative paths are resolved against the directory of `cinema.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Data file locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON snapshot of the whole catalog.
    pub data_file: PathBuf,

    /// XML export of users, halls and films. Empty disables the export.
    pub xml_export: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("cinema_data.json"),
            xml_export: PathBuf::from("cinema_data.xml"),
        }
    }
}

impl StorageConfig {
    /// The export path, unless the export is disabled.
    pub fn xml_export(&self) -> Option<&Path> {
        (!self.xml_export.as_os_str().is_empty()).then_some(self.xml_export.as_path())
    }
}
