//! Catalog registry: canonical store of every entity.
//!
//! The catalog owns halls, films, sessions, users and bookings, hands out
//! user and booking identifiers, and answers lookups. Lookups by id return
//! `Option`; only malformed input is an error.
//!
//! Bookings are created and removed exclusively through
//! [`BookingLedger`](crate::booking::BookingLedger), obtained with
//! [`Catalog::ledger`].

mod query;

use std::fmt;

use crate::booking::BookingLedger;
use crate::error::{CinemaError, Result};
use crate::model::{
    Booking, BookingId, Film, FilmId, Hall, HallId, Session, SessionId, User, UserId,
};

/// First identifier handed out for users and bookings.
pub const FIRST_ID: u32 = 1;

/// Largest seat grid a hall may have.
pub const MAX_HALL_CAPACITY: usize = 100_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub(crate) halls: Vec<Hall>,
    pub(crate) films: Vec<Film>,
    pub(crate) sessions: Vec<Session>,
    pub(crate) users: Vec<User>,
    pub(crate) bookings: Vec<Booking>,
    pub(crate) next_user_id: u32,
    pub(crate) next_booking_id: u32,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            halls: Vec::new(),
            films: Vec::new(),
            sessions: Vec::new(),
            users: Vec::new(),
            bookings: Vec::new(),
            next_user_id: FIRST_ID,
            next_booking_id: FIRST_ID,
        }
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Booking operations over this catalog.
    pub fn ledger(&mut self) -> BookingLedger<'_> {
        BookingLedger::new(self)
    }

    // ========================================================================
    // Registration
    // ========================================================================

    pub fn add_hall(&mut self, hall: Hall) -> Result<()> {
        if hall.name().trim().is_empty() {
            return Err(CinemaError::invalid("hall name cannot be empty"));
        }
        if hall.rows() == 0 || hall.seats_per_row() == 0 {
            return Err(CinemaError::invalid(format!(
                "hall {} must have at least one row and one seat per row",
                hall.id()
            )));
        }
        if hall.capacity() > MAX_HALL_CAPACITY {
            return Err(CinemaError::invalid(format!(
                "hall {} has {} seats, at most {} are allowed",
                hall.id(),
                hall.capacity(),
                MAX_HALL_CAPACITY
            )));
        }
        if self.get_hall(hall.id()).is_some() {
            return Err(CinemaError::invalid(format!("hall {} already exists", hall.id())));
        }
        self.halls.push(hall);
        Ok(())
    }

    pub fn add_film(&mut self, film: Film) -> Result<()> {
        if film.title().trim().is_empty() {
            return Err(CinemaError::invalid("film title cannot be empty"));
        }
        if !film.rating().is_finite() {
            return Err(CinemaError::invalid(format!(
                "film {} has a non-finite rating",
                film.id()
            )));
        }
        if self.get_film(film.id()).is_some() {
            return Err(CinemaError::invalid(format!("film {} already exists", film.id())));
        }
        self.films.push(film);
        Ok(())
    }

    pub fn add_session(&mut self, session: Session) -> Result<()> {
        if self.get_session(session.id()).is_some() {
            return Err(CinemaError::invalid(format!(
                "session {} already exists",
                session.id()
            )));
        }
        if self.get_film(session.film_id()).is_none() {
            return Err(CinemaError::invalid(format!(
                "session {} references unknown film {}",
                session.id(),
                session.film_id()
            )));
        }
        if self.get_hall(session.hall_id()).is_none() {
            return Err(CinemaError::invalid(format!(
                "session {} references unknown hall {}",
                session.id(),
                session.hall_id()
            )));
        }
        self.sessions.push(session);
        Ok(())
    }

    /// Add an existing user. The user id counter moves past its id.
    pub fn add_user(&mut self, user: User) -> Result<()> {
        if user.name().trim().is_empty() {
            return Err(CinemaError::invalid("user name cannot be empty"));
        }
        if !user.bookings().is_empty() {
            return Err(CinemaError::invalid(format!(
                "user {} must be added without bookings",
                user.id()
            )));
        }
        if self.get_user(user.id()).is_some() {
            return Err(CinemaError::invalid(format!("user {} already exists", user.id())));
        }
        self.next_user_id = self.next_user_id.max(user.id().get().saturating_add(1));
        self.users.push(user);
        Ok(())
    }

    /// Register a new user under the next free identifier. The name is
    /// stored as given.
    pub fn register_user(&mut self, name: &str) -> Result<&User> {
        if name.trim().is_empty() {
            return Err(CinemaError::invalid("user name cannot be empty"));
        }

        let id = UserId::new(allocate(&mut self.next_user_id, "user")?);
        self.users.push(User::new(id, name));
        Ok(&self.users[self.users.len() - 1])
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn get_hall(&self, id: HallId) -> Option<&Hall> {
        self.halls.iter().find(|hall| hall.id() == id)
    }

    pub fn get_film(&self, id: FilmId) -> Option<&Film> {
        self.films.iter().find(|film| film.id() == id)
    }

    pub fn get_session(&self, id: SessionId) -> Option<&Session> {
        self.sessions.iter().find(|session| session.id() == id)
    }

    pub fn get_user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id() == id)
    }

    pub fn get_booking(&self, id: BookingId) -> Option<&Booking> {
        self.bookings.iter().find(|booking| booking.id() == id)
    }

    /// The hall a session is scheduled in.
    pub fn session_hall(&self, session: &Session) -> Option<&Hall> {
        self.get_hall(session.hall_id())
    }

    /// The film a session shows.
    pub fn session_film(&self, session: &Session) -> Option<&Film> {
        self.get_film(session.film_id())
    }

    /// A user's bookings in booking order, or `None` for an unknown user.
    pub fn user_bookings(&self, id: UserId) -> Option<Vec<&Booking>> {
        let user = self.get_user(id)?;
        Some(
            user.bookings()
                .iter()
                .filter_map(|booking| self.get_booking(*booking))
                .collect(),
        )
    }

    pub fn halls(&self) -> &[Hall] {
        &self.halls
    }

    pub fn films(&self) -> &[Film] {
        &self.films
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn next_user_id(&self) -> u32 {
        self.next_user_id
    }

    pub fn next_booking_id(&self) -> u32 {
        self.next_booking_id
    }

    /// Raise the id counters to at least the given values.
    pub(crate) fn raise_counters(&mut self, next_user_id: u32, next_booking_id: u32) {
        self.next_user_id = self.next_user_id.max(next_user_id);
        self.next_booking_id = self.next_booking_id.max(next_booking_id);
    }

    pub(crate) fn hall_index(&self, id: HallId) -> Option<usize> {
        self.halls.iter().position(|hall| hall.id() == id)
    }

    pub(crate) fn user_index(&self, id: UserId) -> Option<usize> {
        self.users.iter().position(|user| user.id() == id)
    }
}

/// Take the next id from a counter. `u32::MAX` is never handed out, so a
/// counter that reaches it is exhausted.
pub(crate) fn allocate(counter: &mut u32, kind: &'static str) -> Result<u32> {
    if *counter == u32::MAX {
        return Err(CinemaError::IdExhausted(kind));
    }
    let id = *counter;
    *counter += 1;
    Ok(id)
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} halls, {} films, {} sessions, {} users, {} bookings",
            self.halls.len(),
            self.films.len(),
            self.sessions.len(),
            self.users.len(),
            self.bookings.len()
        )
    }
}
