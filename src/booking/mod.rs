//! Booking ledger: creation and cancellation of bookings.
//!
//! A booking touches three collections that must agree at all times:
//!
//! | Collection            | Owner                       |
//! |-----------------------|-----------------------------|
//! | reserved seats        | the session's [`Hall`]      |
//! | user's booking ids    | the [`User`](crate::model::User) |
//! | global booking list   | the [`Catalog`]             |
//!
//! The ledger is the only place that changes all three. Creation is
//! all-or-nothing: the seat is held by a [`SeatHold`] and released again if
//! anything after the reservation fails.

mod hold;

use hold::SeatHold;

use crate::catalog::{Catalog, allocate};
use crate::error::{CinemaError, Result};
use crate::model::{Booking, BookingId, Hall, Seat, SessionId, UserId};
use crate::{debug, log};

/// Mutable booking view over a [`Catalog`].
pub struct BookingLedger<'a> {
    catalog: &'a mut Catalog,
}

impl<'a> BookingLedger<'a> {
    pub(crate) fn new(catalog: &'a mut Catalog) -> Self {
        Self { catalog }
    }

    /// Book `(row, seat)` of a session for a user.
    ///
    /// Every failure comes back as [`CinemaError::BookingFailed`] carrying
    /// the underlying error; no seat stays reserved when it does.
    pub fn create_booking(
        &mut self,
        user_id: UserId,
        session_id: SessionId,
        row: u32,
        seat: u32,
    ) -> Result<Booking> {
        self.try_create(user_id, session_id, Seat::new(row, seat))
            .map_err(CinemaError::booking_failed)
    }

    fn try_create(&mut self, user_id: UserId, session_id: SessionId, seat: Seat) -> Result<Booking> {
        let catalog = &mut *self.catalog;

        let user_index = catalog
            .user_index(user_id)
            .ok_or(CinemaError::UserNotFound(user_id))?;
        let hall_index = session_hall_index(catalog, session_id)?;

        let hall = &mut catalog.halls[hall_index];
        hall.is_valid_seat(seat.row, seat.number)?;
        let hold = SeatHold::acquire(hall, seat)?;

        let id = BookingId::new(allocate(&mut catalog.next_booking_id, "booking")?);
        let booking = Booking::new(id, user_id, session_id, seat);
        catalog.bookings.push(booking);
        catalog.users[user_index].push_booking(id);
        hold.commit();

        debug!("booking"; "booking {} created: user {}, session {}, {}", id, user_id, session_id, seat);
        Ok(booking)
    }

    /// Cancel one of the user's bookings and free its seat.
    ///
    /// Returns `false` when the user does not exist or does not own the
    /// booking; nothing is changed in that case.
    pub fn cancel_booking(&mut self, user_id: UserId, booking_id: BookingId) -> bool {
        let catalog = &mut *self.catalog;

        let Some(user_index) = catalog.user_index(user_id) else {
            return false;
        };
        if !catalog.users[user_index].owns(booking_id) {
            return false;
        }
        let Some(position) = catalog.bookings.iter().position(|b| b.id() == booking_id) else {
            // The user's list pointed at a booking the catalog no longer has.
            log!("warning"; "user {} referenced missing booking {}", user_id, booking_id);
            catalog.users[user_index].remove_booking(booking_id);
            return false;
        };

        let booking = catalog.bookings[position];
        match session_hall_index(catalog, booking.session_id()) {
            Ok(hall_index) => {
                let hall = &mut catalog.halls[hall_index];
                if let Err(e) = hall.free_seat(booking.row(), booking.seat_number()) {
                    log!("warning"; "booking {}: {}", booking_id, e);
                }
            }
            Err(e) => log!("warning"; "booking {}: {}", booking_id, e),
        }

        catalog.bookings.remove(position);
        catalog.users[user_index].remove_booking(booking_id);

        debug!("booking"; "booking {} cancelled by user {}", booking_id, user_id);
        true
    }

    /// Re-attach a persisted booking: link it to its user and claim its seat.
    ///
    /// The seat may already be marked in the hall (restored hall records
    /// carry their reserved seats); it is claimed if not. Two bookings for
    /// the same seat of one hall are rejected.
    pub(crate) fn restore_booking(&mut self, booking: Booking) -> Result<()> {
        let catalog = &mut *self.catalog;

        let user_index = catalog
            .user_index(booking.user_id())
            .ok_or(CinemaError::UserNotFound(booking.user_id()))?;
        let hall_index = session_hall_index(catalog, booking.session_id())?;
        if catalog.get_booking(booking.id()).is_some() {
            return Err(CinemaError::invalid(format!(
                "booking {} already exists",
                booking.id()
            )));
        }

        let hall_id = catalog.halls[hall_index].id();
        let claimed_by = catalog.bookings.iter().find(|other| {
            other.seat() == booking.seat()
                && catalog
                    .get_session(other.session_id())
                    .is_some_and(|session| session.hall_id() == hall_id)
        });
        if let Some(other) = claimed_by {
            return Err(CinemaError::invalid(format!(
                "{} of hall {} is already held by booking {}",
                booking.seat(),
                hall_id,
                other.id()
            )));
        }

        let hall: &mut Hall = &mut catalog.halls[hall_index];
        hall.is_valid_seat(booking.row(), booking.seat_number())?;
        if !hall.is_reserved(booking.row(), booking.seat_number()) {
            hall.reserve_seat(booking.row(), booking.seat_number())?;
            debug!("load"; "booking {} re-claimed {} in {}", booking.id(), booking.seat(), hall.name());
        }

        catalog.bookings.push(booking);
        catalog.users[user_index].push_booking(booking.id());
        let next = booking.id().get().saturating_add(1);
        catalog.next_booking_id = catalog.next_booking_id.max(next);
        Ok(())
    }
}

/// Index of the hall a session is scheduled in.
fn session_hall_index(catalog: &Catalog, session_id: SessionId) -> Result<usize> {
    let session = catalog
        .get_session(session_id)
        .ok_or(CinemaError::SessionNotFound(session_id))?;
    catalog.hall_index(session.hall_id()).ok_or_else(|| {
        CinemaError::invalid(format!(
            "session {} references unknown hall {}",
            session_id,
            session.hall_id()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Film, FilmId, HallId, Session};

    const SESSION: SessionId = SessionId::new(1);
    const SAME_HALL_SESSION: SessionId = SessionId::new(2);

    /// One 2x2 hall with two sessions, and users 1 and 2.
    fn setup() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_hall(Hall::new(HallId::new(1), "Small", 2, 2)).unwrap();
        catalog.add_film(Film::new(FilmId::new(1), "Spider-Man", 124, "sci-fi")).unwrap();
        for id in [SESSION, SAME_HALL_SESSION] {
            catalog
                .add_session(Session::new(id, FilmId::new(1), HallId::new(1), "18:00", 350))
                .unwrap();
        }
        catalog.register_user("Анна").unwrap();
        catalog.register_user("Борис").unwrap();
        catalog
    }

    fn hall(catalog: &Catalog) -> &Hall {
        &catalog.halls()[0]
    }

    #[test]
    fn test_create_booking_updates_all_collections() {
        let mut catalog = setup();
        let booking = catalog
            .ledger()
            .create_booking(UserId::new(1), SESSION, 1, 2)
            .unwrap();

        assert_eq!(booking.id(), BookingId::new(1));
        assert_eq!(catalog.bookings(), &[booking]);
        assert_eq!(catalog.get_user(UserId::new(1)).unwrap().bookings(), &[booking.id()]);
        assert!(hall(&catalog).is_reserved(1, 2));
        assert_eq!(catalog.next_booking_id(), 2);
    }

    #[test]
    fn test_booking_ids_increase() {
        let mut catalog = setup();
        let mut ledger = catalog.ledger();
        let first = ledger.create_booking(UserId::new(1), SESSION, 1, 1).unwrap();
        let second = ledger.create_booking(UserId::new(2), SESSION, 1, 2).unwrap();
        let third = ledger.create_booking(UserId::new(1), SESSION, 2, 1).unwrap();

        assert_eq!(
            [first.id().get(), second.id().get(), third.id().get()],
            [1, 2, 3]
        );
        let anna: Vec<_> = catalog
            .user_bookings(UserId::new(1))
            .unwrap()
            .iter()
            .map(|b| b.id().get())
            .collect();
        assert_eq!(anna, vec![1, 3]);
    }

    #[test]
    fn test_create_booking_failures_are_wrapped() {
        let mut catalog = setup();
        catalog.ledger().create_booking(UserId::new(1), SESSION, 1, 1).unwrap();

        let mut ledger = catalog.ledger();
        let unknown_user = ledger.create_booking(UserId::new(9), SESSION, 2, 2).unwrap_err();
        assert!(matches!(unknown_user, CinemaError::BookingFailed(_)));
        assert!(matches!(unknown_user.cause(), CinemaError::UserNotFound(_)));

        let unknown_session = ledger
            .create_booking(UserId::new(1), SessionId::new(9), 2, 2)
            .unwrap_err();
        assert!(matches!(unknown_session.cause(), CinemaError::SessionNotFound(_)));

        let bad_seat = ledger.create_booking(UserId::new(1), SESSION, 3, 1).unwrap_err();
        assert!(matches!(bad_seat.cause(), CinemaError::InvalidSeat { row: 3, .. }));

        let taken = ledger.create_booking(UserId::new(2), SESSION, 1, 1).unwrap_err();
        assert!(matches!(taken.cause(), CinemaError::SeatAlreadyBooked { row: 1, seat: 1 }));

        assert_eq!(catalog.bookings().len(), 1);
        assert!(catalog.get_user(UserId::new(2)).unwrap().bookings().is_empty());
        assert_eq!(hall(&catalog).reserved_count(), 1);
    }

    #[test]
    fn test_failure_after_reservation_rolls_back() {
        let mut catalog = setup();
        catalog.next_booking_id = u32::MAX;

        let err = catalog
            .ledger()
            .create_booking(UserId::new(1), SESSION, 2, 2)
            .unwrap_err();

        assert!(matches!(err, CinemaError::BookingFailed(_)));
        assert!(matches!(err.cause(), CinemaError::IdExhausted("booking")));
        assert!(hall(&catalog).available_seats().contains(&Seat::new(2, 2)));
        assert!(catalog.bookings().is_empty());
        assert!(catalog.get_user(UserId::new(1)).unwrap().bookings().is_empty());
    }

    #[test]
    fn test_cancel_then_rebook_same_seat() {
        let mut catalog = setup();
        let booking = catalog
            .ledger()
            .create_booking(UserId::new(1), SESSION, 1, 1)
            .unwrap();

        assert!(catalog.ledger().cancel_booking(UserId::new(1), booking.id()));
        assert!(catalog.bookings().is_empty());
        assert!(catalog.get_user(UserId::new(1)).unwrap().bookings().is_empty());
        assert!(!hall(&catalog).is_reserved(1, 1));

        let again = catalog
            .ledger()
            .create_booking(UserId::new(1), SESSION, 1, 1)
            .unwrap();
        assert_eq!(again.id(), BookingId::new(2));
    }

    #[test]
    fn test_cancel_returns_false_without_changes() {
        let mut catalog = setup();
        let booking = catalog
            .ledger()
            .create_booking(UserId::new(1), SESSION, 2, 1)
            .unwrap();

        let mut ledger = catalog.ledger();
        assert!(!ledger.cancel_booking(UserId::new(9), booking.id()));
        // Booking belongs to user 1, not user 2.
        assert!(!ledger.cancel_booking(UserId::new(2), booking.id()));
        assert!(!ledger.cancel_booking(UserId::new(1), BookingId::new(42)));

        assert_eq!(catalog.bookings().len(), 1);
        assert!(hall(&catalog).is_reserved(2, 1));
    }

    #[test]
    fn test_sessions_in_same_hall_share_seats() {
        let mut catalog = setup();
        catalog.ledger().create_booking(UserId::new(1), SESSION, 1, 1).unwrap();

        let err = catalog
            .ledger()
            .create_booking(UserId::new(2), SAME_HALL_SESSION, 1, 1)
            .unwrap_err();
        assert!(matches!(err.cause(), CinemaError::SeatAlreadyBooked { .. }));
    }

    #[test]
    fn test_restore_booking_claims_seat() {
        let mut catalog = setup();
        let booking = Booking::new(BookingId::new(7), UserId::new(2), SESSION, Seat::new(2, 2));

        catalog.ledger().restore_booking(booking).unwrap();

        assert!(hall(&catalog).is_reserved(2, 2));
        assert_eq!(catalog.get_user(UserId::new(2)).unwrap().bookings(), &[booking.id()]);
        assert_eq!(catalog.next_booking_id(), 8);
    }

    #[test]
    fn test_restore_booking_rejects_conflicts() {
        let mut catalog = setup();
        let mut ledger = catalog.ledger();
        ledger
            .restore_booking(Booking::new(BookingId::new(1), UserId::new(1), SESSION, Seat::new(1, 1)))
            .unwrap();

        let same_seat = Booking::new(
            BookingId::new(2),
            UserId::new(2),
            SAME_HALL_SESSION,
            Seat::new(1, 1),
        );
        assert!(matches!(
            ledger.restore_booking(same_seat),
            Err(CinemaError::InvalidArgument(_))
        ));

        let dangling = Booking::new(BookingId::new(3), UserId::new(5), SESSION, Seat::new(2, 1));
        assert!(matches!(
            ledger.restore_booking(dangling),
            Err(CinemaError::UserNotFound(_))
        ));

        let outside = Booking::new(BookingId::new(4), UserId::new(1), SESSION, Seat::new(9, 9));
        assert!(matches!(
            ledger.restore_booking(outside),
            Err(CinemaError::InvalidSeat { .. })
        ));

        assert_eq!(catalog.bookings().len(), 1);
    }
}
