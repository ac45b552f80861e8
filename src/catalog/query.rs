//! Case-insensitive text search over the catalog.

use super::Catalog;
use crate::error::{CinemaError, Result};
use crate::model::{Film, Session, User};

/// Lowercase a search query, rejecting blank input. Surrounding spaces are
/// part of the query.
fn normalize_query(query: &str, what: &str) -> Result<String> {
    if query.trim().is_empty() {
        return Err(CinemaError::invalid(format!("{what} cannot be empty")));
    }
    Ok(query.to_lowercase())
}

#[inline]
fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

impl Catalog {
    /// Films whose title contains `title`, ignoring case.
    pub fn find_films_by_title(&self, title: &str) -> Result<Vec<&Film>> {
        let needle = normalize_query(title, "film title")?;
        Ok(self
            .films
            .iter()
            .filter(|film| contains_ignore_case(film.title(), &needle))
            .collect())
    }

    /// Sessions showing a film whose title contains `title`, ignoring case.
    pub fn find_sessions_by_title(&self, title: &str) -> Result<Vec<&Session>> {
        let needle = normalize_query(title, "film title")?;
        Ok(self
            .sessions
            .iter()
            .filter(|session| {
                self.session_film(session)
                    .is_some_and(|film| contains_ignore_case(film.title(), &needle))
            })
            .collect())
    }

    /// Users whose name contains `name`, ignoring case.
    pub fn find_users_by_name(&self, name: &str) -> Result<Vec<&User>> {
        let needle = normalize_query(name, "user name")?;
        Ok(self
            .users
            .iter()
            .filter(|user| contains_ignore_case(user.name(), &needle))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FilmId, Hall, HallId, SessionId};

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_hall(Hall::new(HallId::new(1), "Red Hall", 5, 8)).unwrap();
        catalog.add_film(Film::new(FilmId::new(1), "Spider-Man", 124, "sci-fi")).unwrap();
        catalog.add_film(Film::new(FilmId::new(2), "The Avengers", 187, "sci-fi")).unwrap();
        for (id, film) in [(1, 1), (2, 2), (3, 1)] {
            catalog
                .add_session(Session::new(
                    SessionId::new(id),
                    FilmId::new(film),
                    HallId::new(1),
                    "evening",
                    300,
                ))
                .unwrap();
        }
        catalog
    }

    #[test]
    fn test_find_sessions_case_insensitive_substring() {
        let catalog = catalog();
        let ids: Vec<_> = catalog
            .find_sessions_by_title("spider")
            .unwrap()
            .iter()
            .map(|s| s.id().get())
            .collect();
        assert_eq!(ids, vec![1, 3]);

        assert!(catalog.find_sessions_by_title("matrix").unwrap().is_empty());
    }

    #[test]
    fn test_find_films() {
        let catalog = catalog();
        let films = catalog.find_films_by_title("AVENG").unwrap();
        assert_eq!(films.len(), 1);
        assert_eq!(films[0].title(), "The Avengers");
    }

    #[test]
    fn test_find_users_cyrillic() {
        let mut catalog = catalog();
        catalog.register_user("Анна").unwrap();
        catalog.register_user("Борис").unwrap();

        let users = catalog.find_users_by_name("анн").unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name(), "Анна");
    }

    #[test]
    fn test_query_keeps_surrounding_spaces() {
        let catalog = catalog();
        let films = catalog.find_films_by_title("the ").unwrap();
        assert_eq!(films.len(), 1);
        assert_eq!(films[0].title(), "The Avengers");

        assert!(catalog.find_films_by_title(" man").unwrap().is_empty());
        assert_eq!(catalog.find_films_by_title("-man").unwrap().len(), 1);
    }

    #[test]
    fn test_empty_query_is_invalid() {
        let catalog = catalog();
        assert!(matches!(
            catalog.find_films_by_title(""),
            Err(CinemaError::InvalidArgument(_))
        ));
        assert!(matches!(
            catalog.find_sessions_by_title("  "),
            Err(CinemaError::InvalidArgument(_))
        ));
        assert!(matches!(
            catalog.find_users_by_name(""),
            Err(CinemaError::InvalidArgument(_))
        ));
    }
}
