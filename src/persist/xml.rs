//! Human-readable XML export.
//!
//! Covers users, halls and films only. The export is never read back.
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <cinema_theater>
//!   <users>
//!     <user>
//!       <id>1</id>
//!       <name>Анна</name>
//!     </user>
//!   </users>
//!   <halls>...</halls>
//!   <films>...</films>
//! </cinema_theater>
//! ```

use std::fs;
use std::io::Write;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::PersistenceError;
use crate::catalog::Catalog;

const ROOT: &str = "cinema_theater";

type XmlResult = Result<(), PersistenceError>;

fn start<W: Write>(writer: &mut Writer<W>, name: &str) -> XmlResult {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(PersistenceError::xml)
}

fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> XmlResult {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(PersistenceError::xml)
}

/// Write `<name>text</name>`, escaping the text.
fn field<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> XmlResult {
    start(writer, name)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(PersistenceError::xml)?;
    end(writer, name)
}

/// Render the export document.
pub fn render_xml(catalog: &Catalog) -> Result<String, PersistenceError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(PersistenceError::xml)?;

    start(&mut writer, ROOT)?;

    start(&mut writer, "users")?;
    for user in catalog.users() {
        start(&mut writer, "user")?;
        field(&mut writer, "id", &user.id().to_string())?;
        field(&mut writer, "name", user.name())?;
        end(&mut writer, "user")?;
    }
    end(&mut writer, "users")?;

    start(&mut writer, "halls")?;
    for hall in catalog.halls() {
        start(&mut writer, "hall")?;
        field(&mut writer, "id", &hall.id().to_string())?;
        field(&mut writer, "name", hall.name())?;
        field(&mut writer, "rows", &hall.rows().to_string())?;
        field(&mut writer, "seats_per_row", &hall.seats_per_row().to_string())?;
        end(&mut writer, "hall")?;
    }
    end(&mut writer, "halls")?;

    start(&mut writer, "films")?;
    for film in catalog.films() {
        start(&mut writer, "film")?;
        field(&mut writer, "id", &film.id().to_string())?;
        field(&mut writer, "title", film.title())?;
        field(&mut writer, "duration", &film.duration().to_string())?;
        field(&mut writer, "genre", film.genre())?;
        field(&mut writer, "rating", &film.rating().to_string())?;
        end(&mut writer, "film")?;
    }
    end(&mut writer, "films")?;

    end(&mut writer, ROOT)?;

    String::from_utf8(writer.into_inner()).map_err(PersistenceError::xml)
}

/// Write the export document to `path`.
pub fn export_xml(catalog: &Catalog, path: &Path) -> Result<(), PersistenceError> {
    let xml = render_xml(catalog)?;
    fs::write(path, xml).map_err(|e| PersistenceError::Io(path.to_path_buf(), e))
}
