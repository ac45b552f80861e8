//! A user's claim on one seat for one session.

use super::{BookingId, Seat, SessionId, UserId};

/// Created by the booking ledger only, removed only by cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Booking {
    id: BookingId,
    user_id: UserId,
    session_id: SessionId,
    seat: Seat,
}

impl Booking {
    pub(crate) fn new(id: BookingId, user_id: UserId, session_id: SessionId, seat: Seat) -> Self {
        Self {
            id,
            user_id,
            session_id,
            seat,
        }
    }

    pub fn id(&self) -> BookingId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn row(&self) -> u32 {
        self.seat.row
    }

    pub fn seat_number(&self) -> u32 {
        self.seat.number
    }
}
