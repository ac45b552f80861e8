//! Domain entities: halls, films, sessions, users and bookings.

mod booking;
mod film;
mod hall;
mod id;
mod session;
mod user;

pub use booking::Booking;
pub use film::Film;
pub use hall::{Hall, Seat};
pub use id::{BookingId, FilmId, HallId, SessionId, UserId};
pub use session::Session;
pub use user::User;
