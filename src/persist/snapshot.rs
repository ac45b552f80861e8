//! Whole-catalog snapshots and their reconstruction.
//!
//! Reconstruction follows the reference order
//! halls & films → sessions → users → bookings. Each record is decoded and
//! added on its own; a record that cannot be decoded, or that points at an
//! entity which did not survive, is skipped with a warning instead of
//! failing the whole load.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::record::{BookingRecord, FilmRecord, HallRecord, SessionRecord, UserRecord};
use crate::catalog::{Catalog, FIRST_ID};
use crate::log;
use crate::model::{Hall, HallId, Seat};
use std::collections::BTreeSet;

/// Serialized form of a complete catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub users: Vec<UserRecord>,
    pub halls: Vec<HallRecord>,
    pub films: Vec<FilmRecord>,
    pub sessions: Vec<SessionRecord>,
    pub bookings: Vec<BookingRecord>,
    pub next_user_id: u32,
    pub next_booking_id: u32,
}

impl Snapshot {
    pub fn capture(catalog: &Catalog) -> Self {
        Self {
            users: catalog.users().iter().map(UserRecord::from).collect(),
            halls: catalog.halls().iter().map(HallRecord::from).collect(),
            films: catalog.films().iter().map(FilmRecord::from).collect(),
            sessions: catalog.sessions().iter().map(SessionRecord::from).collect(),
            bookings: catalog.bookings().iter().map(BookingRecord::from).collect(),
            next_user_id: catalog.next_user_id(),
            next_booking_id: catalog.next_booking_id(),
        }
    }
}

/// A snapshot as read from disk, with records still undecoded.
#[derive(Debug, Default, Deserialize)]
pub struct RawSnapshot {
    #[serde(default)]
    users: Vec<JsonValue>,
    #[serde(default)]
    halls: Vec<JsonValue>,
    #[serde(default)]
    films: Vec<JsonValue>,
    #[serde(default)]
    sessions: Vec<JsonValue>,
    #[serde(default)]
    bookings: Vec<JsonValue>,
    #[serde(default)]
    next_user_id: Option<JsonValue>,
    #[serde(default)]
    next_booking_id: Option<JsonValue>,
}

/// Records dropped while restoring a snapshot.
#[derive(Debug, Default, Clone)]
pub struct LoadReport {
    skipped: Vec<String>,
}

impl LoadReport {
    fn skip(&mut self, message: String) {
        log!("warning"; "skipping {}", message);
        self.skipped.push(message);
    }

    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Decode each value on its own, skipping the ones that don't fit `T`.
fn decode_all<T: DeserializeOwned>(
    kind: &str,
    values: Vec<JsonValue>,
    report: &mut LoadReport,
) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                report.skip(format!("{kind} record #{}: {e}", index + 1));
                None
            }
        })
        .collect()
}

/// Decode an id counter; a missing or unusable value starts at [`FIRST_ID`].
fn decode_counter(name: &str, value: Option<JsonValue>, report: &mut LoadReport) -> u32 {
    match value.map(serde_json::from_value::<u32>) {
        None => FIRST_ID,
        Some(Ok(counter)) => counter,
        Some(Err(e)) => {
            report.skip(format!("{name}: {e}, starting at {FIRST_ID}"));
            FIRST_ID
        }
    }
}

/// Free every reserved seat that no restored booking holds.
fn release_unclaimed_seats(catalog: &mut Catalog, report: &mut LoadReport) {
    let claimed: BTreeSet<(HallId, Seat)> = catalog
        .bookings()
        .iter()
        .filter_map(|booking| {
            let session = catalog.get_session(booking.session_id())?;
            Some((session.hall_id(), booking.seat()))
        })
        .collect();

    for hall in &mut catalog.halls {
        let unclaimed: Vec<Seat> = hall
            .reserved_seats()
            .filter(|seat| !claimed.contains(&(hall.id(), *seat)))
            .collect();
        for seat in unclaimed {
            if hall.free_seat(seat.row, seat.number).is_ok() {
                report.skip(format!("reserved {} of hall {}: no booking holds it", seat, hall.id()));
            }
        }
    }
}

impl RawSnapshot {
    /// Rebuild a catalog, reporting every record that was dropped.
    pub fn restore(self) -> (Catalog, LoadReport) {
        let mut report = LoadReport::default();
        let mut catalog = Catalog::new();

        for record in decode_all::<HallRecord>("hall", self.halls, &mut report) {
            let id = record.id;
            let mut hall = Hall::new(id, record.name, record.rows, record.seats_per_row);
            for (row, seat) in record.reserved_seats {
                if let Err(e) = hall.reserve_seat(row, seat) {
                    report.skip(format!("reserved seat of hall {id}: {e}"));
                }
            }
            if let Err(e) = catalog.add_hall(hall) {
                report.skip(format!("hall {id}: {e}"));
            }
        }

        for record in decode_all::<FilmRecord>("film", self.films, &mut report) {
            let id = record.film_id;
            if let Err(e) = catalog.add_film(record.into()) {
                report.skip(format!("film {id}: {e}"));
            }
        }

        for record in decode_all::<SessionRecord>("session", self.sessions, &mut report) {
            let id = record.session_id;
            if let Err(e) = catalog.add_session(record.into()) {
                report.skip(format!("session {id}: {e}"));
            }
        }

        for record in decode_all::<UserRecord>("user", self.users, &mut report) {
            let id = record.user_id;
            if let Err(e) = catalog.add_user(record.into()) {
                report.skip(format!("user {id}: {e}"));
            }
        }

        for record in decode_all::<BookingRecord>("booking", self.bookings, &mut report) {
            let id = record.booking_id;
            if let Err(e) = catalog.ledger().restore_booking(record.into()) {
                report.skip(format!("booking {id}: {e}"));
            }
        }

        release_unclaimed_seats(&mut catalog, &mut report);

        let next_user_id = decode_counter("next_user_id", self.next_user_id, &mut report);
        let next_booking_id = decode_counter("next_booking_id", self.next_booking_id, &mut report);
        catalog.raise_counters(next_user_id, next_booking_id);
        (catalog, report)
    }
}
