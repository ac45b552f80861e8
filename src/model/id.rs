//! Entity identifiers.
//!
//! Every entity kind gets its own newtype so a `UserId` can never be passed
//! where a `SessionId` is expected. All of them serialize as bare integers.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            #[must_use]
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            #[must_use]
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a cinema hall.
    HallId
);
define_id!(
    /// Identifier of a film.
    FilmId
);
define_id!(
    /// Identifier of a scheduled session.
    SessionId
);
define_id!(
    /// Identifier of a registered user.
    UserId
);
define_id!(
    /// Identifier of a booking.
    BookingId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_as_integer() {
        let json = serde_json::to_string(&UserId::new(7)).unwrap();
        assert_eq!(json, "7");

        let id: BookingId = serde_json::from_str("42").unwrap();
        assert_eq!(id.get(), 42);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(SessionId::from(3).to_string(), "3");
    }
}
