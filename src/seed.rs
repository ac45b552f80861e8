//! Sample halls, films and sessions for a first run.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::model::{Film, FilmId, Hall, HallId, Session, SessionId};

/// Build a catalog with two halls, three films and three sessions.
pub fn sample_catalog() -> Result<Catalog> {
    let mut catalog = Catalog::new();

    catalog.add_hall(Hall::new(HallId::new(1), "Red Hall", 5, 8))?;
    catalog.add_hall(Hall::new(HallId::new(2), "Blue Hall", 6, 10))?;

    let films = [
        (1, "Spider-Man", 124, "sci-fi", 7.9),
        (2, "The Avengers", 187, "sci-fi", 8.1),
        (3, "Masha and the Bear", 78, "animation", 9.3),
    ];
    for (id, title, duration, genre, rating) in films {
        catalog.add_film(Film::new(FilmId::new(id), title, duration, genre).with_rating(rating))?;
    }

    let sessions = [
        (1, 1, 1, "2024-01-20 18:00", 350),
        (2, 2, 2, "2024-01-21 20:00", 400),
        (3, 3, 1, "2024-01-22 16:00", 300),
    ];
    for (id, film, hall, time, price) in sessions {
        catalog.add_session(Session::new(
            SessionId::new(id),
            FilmId::new(film),
            HallId::new(hall),
            time,
            price,
        ))?;
    }

    Ok(catalog)
}
