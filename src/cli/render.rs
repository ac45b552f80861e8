//! Text rendering of catalog entities for the terminal.

use crate::catalog::Catalog;
use crate::error::CinemaError;
use crate::model::{Booking, Hall, Session};

/// Format count with noun, handling pluralization
///
/// - `count_noun(1, "seat")` -> `"1 seat"`
/// - `count_noun(5, "seat")` -> `"5 seats"`
pub fn count_noun(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" })
}

/// Film title of a session, or a placeholder for a dangling reference.
fn film_title<'a>(catalog: &'a Catalog, session: &Session) -> &'a str {
    catalog
        .session_film(session)
        .map_or("<unknown film>", |film| film.title())
}

fn hall_name<'a>(catalog: &'a Catalog, session: &Session) -> &'a str {
    catalog
        .session_hall(session)
        .map_or("<unknown hall>", |hall| hall.name())
}

/// Multi-line session summary used in search results.
pub fn session_details(catalog: &Catalog, session: &Session) -> String {
    let free = catalog
        .session_hall(session)
        .map_or(0, Hall::available_count);
    format!(
        "{}\n   Hall: {}, Time: {}\n   Free seats: {}, Price: {}",
        film_title(catalog, session),
        hall_name(catalog, session),
        session.time(),
        free,
        session.price()
    )
}

/// One-line session entry used when picking a session to book.
pub fn session_choice(catalog: &Catalog, session: &Session) -> String {
    let free = catalog
        .session_hall(session)
        .map_or(0, Hall::available_count);
    format!(
        "{} - Hall: {} - {}",
        session.time(),
        hall_name(catalog, session),
        count_noun(free, "seat")
    )
}

/// Free seats as one line per row, rows ascending.
pub fn seat_map(hall: &Hall) -> Vec<String> {
    hall.seats_by_row()
        .into_iter()
        .map(|(row, seats)| {
            let seats: Vec<String> = seats.iter().map(u32::to_string).collect();
            format!("Row {}: {}", row, seats.join(", "))
        })
        .collect()
}

pub fn booking_line(catalog: &Catalog, booking: &Booking) -> String {
    match catalog.get_session(booking.session_id()) {
        Some(session) => format!(
            "Booking #{}: {}, {}, {}, row {}, seat {}",
            booking.id(),
            film_title(catalog, session),
            session.time(),
            hall_name(catalog, session),
            booking.row(),
            booking.seat_number()
        ),
        None => format!(
            "Booking #{}: session {}, row {}, seat {}",
            booking.id(),
            booking.session_id(),
            booking.row(),
            booking.seat_number()
        ),
    }
}

/// User-facing explanation of a failed booking.
pub fn booking_error(err: &CinemaError) -> String {
    match err.cause() {
        CinemaError::UserNotFound(id) => format!("user {id} does not exist"),
        CinemaError::SessionNotFound(id) => format!("session {id} does not exist"),
        CinemaError::InvalidSeat {
            row,
            seat,
            rows,
            seats_per_row,
        } => format!(
            "there is no row {row}, seat {seat} in this hall ({rows} rows, {seats_per_row} seats per row)"
        ),
        CinemaError::SeatAlreadyBooked { row, seat } => {
            format!("row {row}, seat {seat} is already taken")
        }
        other => other.to_string(),
    }
}
