//! Scoped seat reservation.

use crate::error::Result;
use crate::log;
use crate::model::{Hall, Seat};

/// A seat reserved on behalf of a booking that is not recorded yet.
///
/// Dropping the hold without calling [`SeatHold::commit`] frees the seat
/// again, so every early return between reservation and commit rolls back.
pub(super) struct SeatHold<'a> {
    hall: &'a mut Hall,
    seat: Seat,
    committed: bool,
}

impl<'a> SeatHold<'a> {
    /// Reserve `seat` in `hall`.
    pub(super) fn acquire(hall: &'a mut Hall, seat: Seat) -> Result<Self> {
        hall.reserve_seat(seat.row, seat.number)?;
        Ok(Self {
            hall,
            seat,
            committed: false,
        })
    }

    /// Keep the reservation.
    pub(super) fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for SeatHold<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        match self.hall.free_seat(self.seat.row, self.seat.number) {
            Ok(()) => crate::debug!("booking"; "rolled back {} in {}", self.seat, self.hall.name()),
            Err(e) => log!("error"; "rollback of {} in {} failed: {}", self.seat, self.hall.name(), e),
        }
    }
}
