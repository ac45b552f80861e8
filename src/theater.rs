//! The cinema service object.
//!
//! A [`Theater`] is built once at startup with [`Theater::open`], handed to
//! whoever needs it by reference, and written back with [`Theater::save`].
//! Nothing about it is global.

use std::path::Path;

use crate::booking::BookingLedger;
use crate::catalog::Catalog;
use crate::config::{CinemaConfig, StorageConfig};
use crate::error::Result;
use crate::persist::{export_xml, load_json, save_json};
use crate::{debug, log, seed};

#[derive(Debug)]
pub struct Theater {
    catalog: Catalog,
    storage: StorageConfig,
}

impl Theater {
    pub fn new(catalog: Catalog, storage: StorageConfig) -> Self {
        Self { catalog, storage }
    }

    /// Load the data file, or start a new one when it doesn't exist yet.
    ///
    /// A data file that exists but cannot be read is an error; it is never
    /// replaced by sample data.
    pub fn open(config: &CinemaConfig) -> Result<Self> {
        let path = config.data_file();

        if path.exists() {
            let (catalog, report) = load_json(path)?;
            if report.is_clean() {
                log!("load"; "{}", catalog);
            } else {
                log!("load"; "{} ({} record(s) skipped)", catalog, report.skipped().len());
            }
            return Ok(Self::new(catalog, config.storage.clone()));
        }

        log!("load"; "{} not found, creating a new one", path.display());
        let catalog = if config.seed.sample_data {
            seed::sample_catalog()?
        } else {
            Catalog::new()
        };
        let theater = Self::new(catalog, config.storage.clone());
        theater.save()?;
        Ok(theater)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// Booking operations.
    pub fn ledger(&mut self) -> BookingLedger<'_> {
        self.catalog.ledger()
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    /// Write the data file and, if configured, the XML export.
    pub fn save(&self) -> Result<()> {
        save_json(&self.catalog, &self.storage.data_file)?;
        if let Some(xml) = self.storage.xml_export() {
            export_xml(&self.catalog, xml)?;
        }
        debug!("save"; "saved {}", self.catalog);
        Ok(())
    }

    /// Write the XML export to an explicit path.
    pub fn export(&self, path: &Path) -> Result<()> {
        export_xml(&self.catalog, path)?;
        log!("save"; "exported {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SessionId, UserId};
    use std::fs;
    use tempfile::TempDir;

    fn config_in(dir: &Path) -> CinemaConfig {
        let mut config = CinemaConfig::default();
        config.storage.data_file = dir.join("cinema_data.json");
        config.storage.xml_export = dir.join("cinema_data.xml");
        config
    }

    #[test]
    fn test_open_seeds_and_saves_on_first_run() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());

        let theater = Theater::open(&config).unwrap();

        assert_eq!(theater.catalog().sessions().len(), 3);
        assert!(config.data_file().exists());
        assert!(dir.path().join("cinema_data.xml").exists());
    }

    #[test]
    fn test_open_without_seed_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(dir.path());
        config.seed.sample_data = false;

        let theater = Theater::open(&config).unwrap();
        assert!(theater.catalog().films().is_empty());
    }

    #[test]
    fn test_bookings_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());

        let mut theater = Theater::open(&config).unwrap();
        let user = theater.catalog_mut().register_user("Анна").unwrap().id();
        let booking = theater
            .ledger()
            .create_booking(user, SessionId::new(1), 3, 4)
            .unwrap();
        theater.save().unwrap();

        let reopened = Theater::open(&config).unwrap();
        assert_eq!(reopened.catalog(), theater.catalog());
        assert_eq!(
            reopened.catalog().get_user(UserId::new(1)).unwrap().bookings(),
            &[booking.id()]
        );
    }

    #[test]
    fn test_open_corrupt_file_is_error() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        fs::write(config.data_file(), "not json").unwrap();

        assert!(Theater::open(&config).is_err());
        // The broken file is left alone.
        assert_eq!(fs::read_to_string(config.data_file()).unwrap(), "not json");
    }
}
