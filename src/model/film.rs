//! Film entity.

use std::fmt;

use super::FilmId;

/// A film that can be scheduled into sessions. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Film {
    id: FilmId,
    title: String,
    /// Running time in minutes.
    duration: u32,
    genre: String,
    rating: f64,
}

impl Film {
    pub fn new(id: FilmId, title: impl Into<String>, duration: u32, genre: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            duration,
            genre: genre.into(),
            rating: 0.0,
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn id(&self) -> FilmId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    /// Running time as `2h 4m`.
    pub fn formatted_duration(&self) -> String {
        format!("{}h {}m", self.duration / 60, self.duration % 60)
    }
}

impl fmt::Display for Film {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {} - ★{}",
            self.title,
            self.genre,
            self.formatted_duration(),
            self.rating
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rating_is_zero() {
        let film = Film::new(FilmId::new(1), "Untitled", 90, "drama");
        assert_eq!(film.rating(), 0.0);
    }

    #[test]
    fn test_formatted_duration() {
        let film = Film::new(FilmId::new(1), "Spider-Man", 124, "sci-fi");
        assert_eq!(film.formatted_duration(), "2h 4m");

        let short = Film::new(FilmId::new(2), "Short", 45, "animation");
        assert_eq!(short.formatted_duration(), "0h 45m");
    }

    #[test]
    fn test_display() {
        let film = Film::new(FilmId::new(3), "Masha and the Bear", 78, "animation").with_rating(9.3);
        assert_eq!(film.to_string(), "Masha and the Bear (animation) - 1h 18m - ★9.3");
    }
}
