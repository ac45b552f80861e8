//! Scheduled showing of a film in a hall.

use super::{FilmId, HallId, SessionId};

/// A session references its film and hall by id; the catalog resolves them.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    id: SessionId,
    film_id: FilmId,
    hall_id: HallId,
    /// Free-form time label, e.g. `2024-01-20 18:00`.
    time: String,
    price: u32,
}

impl Session {
    pub fn new(
        id: SessionId,
        film_id: FilmId,
        hall_id: HallId,
        time: impl Into<String>,
        price: u32,
    ) -> Self {
        Self {
            id,
            film_id,
            hall_id,
            time: time.into(),
            price,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn film_id(&self) -> FilmId {
        self.film_id
    }

    pub fn hall_id(&self) -> HallId {
        self.hall_id
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn price(&self) -> u32 {
        self.price
    }
}
