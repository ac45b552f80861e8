//! Service configuration management for `cinema.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── seed       # [seed]
//! │   └── storage    # [storage]
//! ├── error          # ConfigError
//! └── mod.rs         # CinemaConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section     | Purpose                                      |
//! |-------------|----------------------------------------------|
//! | `[storage]` | JSON data file and XML export locations      |
//! | `[seed]`    | Sample data on first run                     |
//!
//! A missing config file is not an error: every field has a default.

mod error;
pub mod section;

pub use error::ConfigError;
pub use section::{SeedConfig, StorageConfig};

use crate::{cli::Cli, debug, log};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing cinema.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CinemaConfig {
    /// Data file locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// First-run sample data
    #[serde(default)]
    pub seed: SeedConfig,
}

impl CinemaConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Falls back to defaults when the config file does not exist.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let config_path = cwd.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            debug!("config"; "{} not found, using defaults", config_path.display());
            Self::default()
        };

        // Relative paths are resolved against the config file's directory
        let root = config_path.parent().map(Path::to_path_buf).unwrap_or(cwd);
        config.apply_cli(cli);
        config.normalize_paths(&root);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Apply command-line overrides.
    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(data) = &cli.data {
            self.storage.data_file = data.clone();
        }
    }

    /// Expand `~` and make storage paths absolute.
    fn normalize_paths(&mut self, root: &Path) {
        self.storage.data_file = resolve_path(&self.storage.data_file, root);
        if self.storage.xml_export().is_some() {
            self.storage.xml_export = resolve_path(&self.storage.xml_export, root);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.data_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "[storage] data_file cannot be empty".into(),
            ));
        }
        if self.storage.xml_export() == Some(self.storage.data_file.as_path()) {
            return Err(ConfigError::Validation(format!(
                "[storage] xml_export would overwrite the data file `{}`",
                self.storage.data_file.display()
            )));
        }
        Ok(())
    }

    pub fn data_file(&self) -> &Path {
        &self.storage.data_file
    }

    pub fn xml_export(&self) -> Option<&Path> {
        self.storage.xml_export()
    }
}

/// Expand `~` and join relative paths onto `root`. Empty paths stay empty.
fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    if path.as_os_str().is_empty() {
        return PathBuf::new();
    }
    let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
    if expanded.is_absolute() {
        expanded
    } else {
        root.join(expanded)
    }
}

#[cfg(test)]
pub fn test_parse_config(extra: &str) -> CinemaConfig {
    let (parsed, ignored) = CinemaConfig::parse_with_ignored(extra).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
