//! `[seed]` section configuration.
//!
//! ```toml
//! [seed]
//! sample_data = true   # create sample halls, films and sessions on first run
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Seed sample data when no data file exists yet.
    pub sample_data: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { sample_data: true }
    }
}
