//! Cinema booking service: halls, films, sessions, users and seat bookings,
//! kept in a JSON data file with an XML export.

pub mod booking;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod model;
pub mod persist;
pub mod seed;
pub mod theater;

pub use error::{CinemaError, Result};
pub use theater::Theater;
