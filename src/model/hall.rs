//! Cinema hall and its seat map.
//!
//! A hall owns the set of reserved seats for its whole grid. Sessions
//! scheduled in the same hall share this set, so a seat booked for one
//! showing is taken for every showing in that hall.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::HallId;
use crate::error::{CinemaError, Result};

/// A single seat position, 1-based.
///
/// Ordering is row-major, so sorted collections of seats read like a seat map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Seat {
    pub row: u32,
    pub number: u32,
}

impl Seat {
    #[must_use]
    pub const fn new(row: u32, number: u32) -> Self {
        Self { row, number }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, seat {}", self.row, self.number)
    }
}

impl From<(u32, u32)> for Seat {
    fn from((row, number): (u32, u32)) -> Self {
        Self { row, number }
    }
}

/// Physical auditorium with a fixed `rows` x `seats_per_row` grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Hall {
    id: HallId,
    name: String,
    rows: u32,
    seats_per_row: u32,
    reserved: BTreeSet<Seat>,
}

impl Hall {
    pub fn new(id: HallId, name: impl Into<String>, rows: u32, seats_per_row: u32) -> Self {
        Self {
            id,
            name: name.into(),
            rows,
            seats_per_row,
            reserved: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> HallId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn seats_per_row(&self) -> u32 {
        self.seats_per_row
    }

    /// Total number of seats in the grid.
    pub fn capacity(&self) -> usize {
        self.rows as usize * self.seats_per_row as usize
    }

    /// Check that `(row, seat)` lies inside the grid.
    ///
    /// Never returns `Ok(false)`: an out-of-range position is always an
    /// `InvalidSeat` error.
    pub fn is_valid_seat(&self, row: u32, seat: u32) -> Result<bool> {
        if (1..=self.rows).contains(&row) && (1..=self.seats_per_row).contains(&seat) {
            Ok(true)
        } else {
            Err(CinemaError::InvalidSeat {
                row,
                seat,
                rows: self.rows,
                seats_per_row: self.seats_per_row,
            })
        }
    }

    /// Mark a seat as occupied.
    pub fn reserve_seat(&mut self, row: u32, seat: u32) -> Result<()> {
        self.is_valid_seat(row, seat)?;
        if !self.reserved.insert(Seat::new(row, seat)) {
            return Err(CinemaError::SeatAlreadyBooked { row, seat });
        }
        Ok(())
    }

    /// Release an occupied seat.
    pub fn free_seat(&mut self, row: u32, seat: u32) -> Result<()> {
        self.is_valid_seat(row, seat)?;
        if !self.reserved.remove(&Seat::new(row, seat)) {
            return Err(CinemaError::SeatNotBooked { row, seat });
        }
        Ok(())
    }

    pub fn is_reserved(&self, row: u32, seat: u32) -> bool {
        self.reserved.contains(&Seat::new(row, seat))
    }

    pub fn reserved_seats(&self) -> impl Iterator<Item = Seat> + '_ {
        self.reserved.iter().copied()
    }

    pub fn reserved_count(&self) -> usize {
        self.reserved.len()
    }

    /// Every free seat of the grid, row-major.
    pub fn available_seats(&self) -> Vec<Seat> {
        (1..=self.rows)
            .flat_map(|row| (1..=self.seats_per_row).map(move |number| Seat::new(row, number)))
            .filter(|seat| !self.reserved.contains(seat))
            .collect()
    }

    pub fn available_count(&self) -> usize {
        self.capacity() - self.reserved.len()
    }

    /// Free seats grouped by row, both ascending. Rows without a free seat
    /// are left out.
    pub fn seats_by_row(&self) -> Vec<(u32, Vec<u32>)> {
        let mut grouped: Vec<(u32, Vec<u32>)> = Vec::new();
        for seat in self.available_seats() {
            match grouped.last_mut() {
                Some((row, numbers)) if *row == seat.row => numbers.push(seat.number),
                _ => grouped.push((seat.row, vec![seat.number])),
            }
        }
        grouped
    }
}
