//! JSON data file: the durable copy of the catalog.

use std::fs;
use std::path::Path;

use super::PersistenceError;
use super::snapshot::{LoadReport, RawSnapshot, Snapshot};
use crate::catalog::Catalog;
use crate::debug;

/// Check if file content is the same as new content
fn file_content_matches(path: &Path, content: &str) -> bool {
    path.exists() && fs::read_to_string(path).is_ok_and(|existing| existing == content)
}

/// Write the catalog to `path` as pretty-printed JSON.
pub fn save_json(catalog: &Catalog, path: &Path) -> Result<(), PersistenceError> {
    let json = serde_json::to_string_pretty(&Snapshot::capture(catalog))
        .map_err(|e| PersistenceError::Format(path.to_path_buf(), e))?;

    if file_content_matches(path, &json) {
        debug!("save"; "{} unchanged, skipping write", path.display());
        return Ok(());
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::Io(parent.to_path_buf(), e))?;
    }
    fs::write(path, &json).map_err(|e| PersistenceError::Io(path.to_path_buf(), e))?;

    debug!("save"; "wrote {} ({})", path.display(), catalog);
    Ok(())
}

/// Read a catalog from `path`.
///
/// Only unreadable files and malformed JSON documents are errors; individual
/// records that don't fit are skipped and listed in the report.
pub fn load_json(path: &Path) -> Result<(Catalog, LoadReport), PersistenceError> {
    let json =
        fs::read_to_string(path).map_err(|e| PersistenceError::Io(path.to_path_buf(), e))?;
    let raw: RawSnapshot = serde_json::from_str(&json)
        .map_err(|e| PersistenceError::Format(path.to_path_buf(), e))?;

    let (catalog, report) = raw.restore();
    debug!("load"; "restored {} from {}", catalog, path.display());
    Ok((catalog, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Film, FilmId, Hall, HallId, Session, SessionId, UserId};
    use tempfile::TempDir;

    fn sample() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_hall(Hall::new(HallId::new(1), "Red Hall", 5, 8)).unwrap();
        catalog.add_film(Film::new(FilmId::new(1), "Spider-Man", 124, "sci-fi")).unwrap();
        catalog
            .add_session(Session::new(SessionId::new(1), FilmId::new(1), HallId::new(1), "18:00", 350))
            .unwrap();
        catalog.register_user("Анна").unwrap();
        catalog
            .ledger()
            .create_booking(UserId::new(1), SessionId::new(1), 2, 3)
            .unwrap();
        catalog
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("cinema_data.json");
        let catalog = sample();

        save_json(&catalog, &path).unwrap();
        let (loaded, report) = load_json(&path).unwrap();

        assert!(report.is_clean());
        assert_eq!(loaded, catalog);
    }

    #[test]
    fn test_saved_file_keeps_field_names() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cinema_data.json");
        save_json(&sample(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        for field in ["\"movie_id\"", "\"seats_per_row\"", "\"next_booking_id\"", "Анна"] {
            assert!(content.contains(field), "missing {field}");
        }
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_json(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, PersistenceError::Io(..)));
    }

    #[test]
    fn test_load_malformed_document_is_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ \"halls\": [").unwrap();

        let err = load_json(&path).unwrap_err();
        assert!(matches!(err, PersistenceError::Format(..)));
    }
}
