//! Persistence gateway.
//!
//! | File                | Format | Direction    | Content                    |
//! |---------------------|--------|--------------|----------------------------|
//! | `cinema_data.json`  | JSON   | read + write | full catalog snapshot      |
//! | `cinema_data.xml`   | XML    | write only   | users, halls and films     |

mod error;
mod json;
mod record;
mod snapshot;
mod xml;

pub use error::PersistenceError;
pub use json::{load_json, save_json};
pub use record::{BookingRecord, FilmRecord, HallRecord, SessionRecord, UserRecord};
pub use snapshot::{LoadReport, RawSnapshot, Snapshot};
pub use xml::{export_xml, render_xml};
