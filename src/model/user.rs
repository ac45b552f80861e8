//! Registered user.

use super::{BookingId, UserId};

/// A user and the ids of the bookings they own, in booking order.
///
/// The bookings themselves live in the catalog; this list only indexes them.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    name: String,
    bookings: Vec<BookingId>,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            bookings: Vec::new(),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bookings(&self) -> &[BookingId] {
        &self.bookings
    }

    pub fn owns(&self, booking: BookingId) -> bool {
        self.bookings.contains(&booking)
    }

    pub(crate) fn push_booking(&mut self, booking: BookingId) {
        self.bookings.push(booking);
    }

    /// Drop a booking id, returning whether it was present.
    pub(crate) fn remove_booking(&mut self, booking: BookingId) -> bool {
        let before = self.bookings.len();
        self.bookings.retain(|id| *id != booking);
        self.bookings.len() < before
    }
}
