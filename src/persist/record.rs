//! Field-complete records for every entity.
//!
//! Records reference other entities by id only. Field names match the data
//! files written by earlier releases (`movie_id`, `film_id`, `user_id`...).

use serde::{Deserialize, Serialize};

use crate::model::{
    Booking, BookingId, Film, FilmId, Hall, HallId, Seat, Session, SessionId, User, UserId,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HallRecord {
    pub id: HallId,
    pub name: String,
    pub rows: u32,
    pub seats_per_row: u32,
    /// Reserved `[row, seat]` pairs.
    #[serde(default)]
    pub reserved_seats: Vec<(u32, u32)>,
}

impl From<&Hall> for HallRecord {
    fn from(hall: &Hall) -> Self {
        Self {
            id: hall.id(),
            name: hall.name().to_owned(),
            rows: hall.rows(),
            seats_per_row: hall.seats_per_row(),
            reserved_seats: hall.reserved_seats().map(|s| (s.row, s.number)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmRecord {
    pub film_id: FilmId,
    pub title: String,
    /// Minutes.
    pub duration: u32,
    pub genre: String,
    #[serde(default)]
    pub rating: f64,
}

impl From<&Film> for FilmRecord {
    fn from(film: &Film) -> Self {
        Self {
            film_id: film.id(),
            title: film.title().to_owned(),
            duration: film.duration(),
            genre: film.genre().to_owned(),
            rating: film.rating(),
        }
    }
}

impl From<FilmRecord> for Film {
    fn from(record: FilmRecord) -> Self {
        Film::new(record.film_id, record.title, record.duration, record.genre)
            .with_rating(record.rating)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: SessionId,
    pub movie_id: FilmId,
    pub hall_id: HallId,
    pub time: String,
    pub price: u32,
}

impl From<&Session> for SessionRecord {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id(),
            movie_id: session.film_id(),
            hall_id: session.hall_id(),
            time: session.time().to_owned(),
            price: session.price(),
        }
    }
}

impl From<SessionRecord> for Session {
    fn from(record: SessionRecord) -> Self {
        Session::new(
            record.session_id,
            record.movie_id,
            record.hall_id,
            record.time,
            record.price,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: UserId,
    pub name: String,
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id(),
            name: user.name().to_owned(),
        }
    }
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User::new(record.user_id, record.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub session_id: SessionId,
    pub row: u32,
    pub seat: u32,
}

impl From<&Booking> for BookingRecord {
    fn from(booking: &Booking) -> Self {
        Self {
            booking_id: booking.id(),
            user_id: booking.user_id(),
            session_id: booking.session_id(),
            row: booking.row(),
            seat: booking.seat_number(),
        }
    }
}

impl From<BookingRecord> for Booking {
    fn from(record: BookingRecord) -> Self {
        Booking::new(
            record.booking_id,
            record.user_id,
            record.session_id,
            Seat::new(record.row, record.seat),
        )
    }
}
