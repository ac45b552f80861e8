//! Error taxonomy of the booking core.

use thiserror::Error;

use crate::model::{SessionId, UserId};
use crate::persist::PersistenceError;

pub type Result<T, E = CinemaError> = std::result::Result<T, E>;

/// Errors raised by the seat map, the catalog and the booking ledger.
#[derive(Debug, Error)]
pub enum CinemaError {
    #[error("invalid seat: row {row}, seat {seat} (hall has {rows} rows of {seats_per_row} seats)")]
    InvalidSeat {
        row: u32,
        seat: u32,
        rows: u32,
        seats_per_row: u32,
    },

    #[error("row {row}, seat {seat} is already booked")]
    SeatAlreadyBooked { row: u32, seat: u32 },

    #[error("row {row}, seat {seat} is not booked")]
    SeatNotBooked { row: u32, seat: u32 },

    #[error("user {0} not found")]
    UserNotFound(UserId),

    #[error("session {0} not found")]
    SessionNotFound(SessionId),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no {0} identifiers left")]
    IdExhausted(&'static str),

    // NOTE: Display stays short; the cause is reachable through source()
    #[error("booking failed")]
    BookingFailed(#[source] Box<CinemaError>),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl CinemaError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Wrap a failure raised while creating a booking.
    pub(crate) fn booking_failed(cause: CinemaError) -> Self {
        Self::BookingFailed(Box::new(cause))
    }

    /// The underlying cause of a `BookingFailed`, or the error itself.
    pub fn cause(&self) -> &CinemaError {
        match self {
            Self::BookingFailed(cause) => &**cause,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_booking_failed_keeps_cause() {
        let err = CinemaError::booking_failed(CinemaError::SeatAlreadyBooked { row: 1, seat: 2 });

        assert_eq!(err.to_string(), "booking failed");
        assert!(matches!(
            err.cause(),
            CinemaError::SeatAlreadyBooked { row: 1, seat: 2 }
        ));
        let source = err.source().expect("cause should be chained");
        assert_eq!(source.to_string(), "row 1, seat 2 is already booked");
    }

    #[test]
    fn test_cause_of_plain_error_is_itself() {
        let err = CinemaError::UserNotFound(UserId::new(9));
        assert!(matches!(err.cause(), CinemaError::UserNotFound(id) if id.get() == 9));
    }
}
