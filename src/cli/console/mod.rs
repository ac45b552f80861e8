//! Interactive menu.
//!
//! The console reads commands from any [`BufRead`] and writes to any
//! [`Write`], so it runs the same over a terminal and over scripted input.
//! The theater lock is taken per operation and never held while waiting
//! for input.

use std::io::{BufRead, Write};

use anyhow::Result;
use parking_lot::Mutex;

use super::render;
use crate::debug;
use crate::model::{BookingId, SessionId, UserId};
use crate::theater::Theater;

const RULE: &str = "========================================";

/// What the menu loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct Console<'a, R, W> {
    theater: &'a Mutex<Theater>,
    input: R,
    output: W,
    current_user: Option<UserId>,
    /// Set once the input reaches end of file.
    closed: bool,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(theater: &'a Mutex<Theater>, input: R, output: W) -> Self {
        Self {
            theater,
            input,
            output,
            current_user: None,
            closed: false,
        }
    }

    /// Run menus until the user exits or the input ends, then save.
    pub fn run(mut self) -> Result<()> {
        writeln!(self.output, "Welcome to the cinema!")?;

        loop {
            let flow = match self.current_user {
                None => self.guest_menu()?,
                Some(user) => self.user_menu(user)?,
            };
            if flow == Flow::Exit || self.closed {
                break;
            }
        }

        self.save()?;
        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    // =========================================================================
    // Menus
    // =========================================================================

    fn guest_menu(&mut self) -> Result<Flow> {
        writeln!(self.output, "\n{RULE}\nCinema\n{RULE}")?;
        writeln!(
            self.output,
            "1. Register\n2. Log in\n3. Films\n4. Find sessions\n5. Save\n6. Exit"
        )?;

        let Some(choice) = self.read_line("Choose an action: ")? else {
            return Ok(Flow::Exit);
        };
        match choice.as_str() {
            "1" => self.register()?,
            "2" => self.login()?,
            "3" => self.show_films()?,
            "4" => self.find_sessions()?,
            "5" => self.save()?,
            "6" => return Ok(Flow::Exit),
            _ => writeln!(self.output, "Invalid choice!")?,
        }
        Ok(Flow::Continue)
    }

    fn user_menu(&mut self, user: UserId) -> Result<Flow> {
        let name = self
            .theater
            .lock()
            .catalog()
            .get_user(user)
            .map(|u| u.name().to_string());
        let Some(name) = name else {
            // The account is gone; fall back to the guest menu.
            self.current_user = None;
            return Ok(Flow::Continue);
        };

        writeln!(self.output, "\nWelcome, {name}!\n{RULE}")?;
        writeln!(
            self.output,
            "1. Films\n2. Find sessions\n3. Book a ticket\n4. My bookings\n5. Cancel a booking\n6. Save\n7. Log out"
        )?;

        let Some(choice) = self.read_line("Choose an action: ")? else {
            return Ok(Flow::Exit);
        };
        match choice.as_str() {
            "1" => self.show_films()?,
            "2" => self.find_sessions()?,
            "3" => self.book_ticket(user)?,
            "4" => self.show_bookings(user)?,
            "5" => self.cancel_booking(user)?,
            "6" => self.save()?,
            "7" => self.current_user = None,
            _ => writeln!(self.output, "Invalid choice!")?,
        }
        Ok(Flow::Continue)
    }

    // =========================================================================
    // Guest actions
    // =========================================================================

    fn register(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Registration ---")?;
        let Some(name) = self.read_line("Enter your name: ")? else {
            return Ok(());
        };
        if name.is_empty() {
            writeln!(self.output, "Name cannot be empty!")?;
            return Ok(());
        }

        let mut theater = self.theater.lock();
        let registered = theater
            .catalog_mut()
            .register_user(&name)
            .map(|user| user.id());
        match registered {
            Ok(id) => {
                self.current_user = Some(id);
                save_locked(&theater, &mut self.output)?;
                writeln!(self.output, "Registered! Your user id is {id}. Welcome, {name}!")?;
            }
            Err(e) => writeln!(self.output, "Registration failed: {e}")?,
        }
        Ok(())
    }

    fn login(&mut self) -> Result<()> {
        let Some(id) = self.read_number("Enter your user id: ")? else {
            return Ok(());
        };
        let id = UserId::new(id);

        let name = self
            .theater
            .lock()
            .catalog()
            .get_user(id)
            .map(|u| u.name().to_string());
        match name {
            Some(name) => {
                self.current_user = Some(id);
                writeln!(self.output, "Logged in as {name}")?;
            }
            None => writeln!(self.output, "User {id} not found")?,
        }
        Ok(())
    }

    fn show_films(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- All films ---")?;
        let lines: Vec<String> = self
            .theater
            .lock()
            .catalog()
            .films()
            .iter()
            .enumerate()
            .map(|(i, film)| format!("{}. {}", i + 1, film))
            .collect();

        if lines.is_empty() {
            writeln!(self.output, "No films found")?;
        }
        for line in lines {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    fn find_sessions(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Find sessions ---")?;
        let Some(title) = self.read_line("Enter a film title: ")? else {
            return Ok(());
        };
        if title.is_empty() {
            writeln!(self.output, "Film title cannot be empty!")?;
            return Ok(());
        }

        let found = {
            let theater = self.theater.lock();
            let catalog = theater.catalog();
            catalog.find_sessions_by_title(&title).map(|sessions| {
                sessions
                    .into_iter()
                    .map(|session| render::session_details(catalog, session))
                    .collect::<Vec<_>>()
            })
        };

        match found {
            Ok(sessions) if sessions.is_empty() => {
                writeln!(self.output, "No sessions found for '{title}'")?;
            }
            Ok(sessions) => {
                writeln!(self.output, "\nFound {}", render::count_noun(sessions.len(), "session"))?;
                for (i, details) in sessions.iter().enumerate() {
                    writeln!(self.output, "{}. {}", i + 1, details)?;
                }
            }
            Err(e) => writeln!(self.output, "Search failed: {e}")?,
        }
        Ok(())
    }

    // =========================================================================
    // User actions
    // =========================================================================

    fn book_ticket(&mut self, user: UserId) -> Result<()> {
        writeln!(self.output, "\n--- Book a ticket ---")?;
        let Some(title) = self.read_line("Enter a film title: ")? else {
            return Ok(());
        };

        let found: Result<Vec<(SessionId, String)>, _> = {
            let theater = self.theater.lock();
            let catalog = theater.catalog();
            catalog.find_sessions_by_title(&title).map(|sessions| {
                sessions
                    .into_iter()
                    .map(|session| (session.id(), render::session_choice(catalog, session)))
                    .collect()
            })
        };
        let sessions = match found {
            Ok(sessions) if sessions.is_empty() => {
                writeln!(self.output, "No sessions found for '{title}'")?;
                return Ok(());
            }
            Ok(sessions) => sessions,
            Err(e) => {
                writeln!(self.output, "Search failed: {e}")?;
                return Ok(());
            }
        };

        writeln!(self.output, "\nAvailable sessions:")?;
        for (i, (_, choice)) in sessions.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, choice)?;
        }
        let Some(session_id) = self.pick("Choose a session: ", &sessions)?.map(|(id, _)| *id) else {
            return Ok(());
        };

        let seat_map = {
            let theater = self.theater.lock();
            let catalog = theater.catalog();
            catalog
                .get_session(session_id)
                .and_then(|session| catalog.session_hall(session))
                .map(render::seat_map)
                .unwrap_or_default()
        };
        if seat_map.is_empty() {
            writeln!(self.output, "No seats left for this session!")?;
            return Ok(());
        }
        writeln!(self.output, "\nAvailable seats:")?;
        for line in seat_map {
            writeln!(self.output, "{line}")?;
        }

        let Some(row) = self.read_number("Row: ")? else {
            return Ok(());
        };
        let Some(seat) = self.read_number("Seat: ")? else {
            return Ok(());
        };

        let mut theater = self.theater.lock();
        let created = theater.ledger().create_booking(user, session_id, row, seat);
        match created {
            Ok(booking) => {
                save_locked(&theater, &mut self.output)?;
                writeln!(
                    self.output,
                    "Ticket booked! {}",
                    render::booking_line(theater.catalog(), &booking)
                )?;
            }
            Err(e) => writeln!(self.output, "Booking failed: {}", render::booking_error(&e))?,
        }
        Ok(())
    }

    fn show_bookings(&mut self, user: UserId) -> Result<()> {
        writeln!(self.output, "\n--- My bookings ---")?;
        let bookings = self.booking_lines(user);
        if bookings.is_empty() {
            writeln!(self.output, "You have no active bookings")?;
        }
        for (i, (_, line)) in bookings.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, line)?;
        }
        Ok(())
    }

    fn cancel_booking(&mut self, user: UserId) -> Result<()> {
        writeln!(self.output, "\n--- Cancel a booking ---")?;
        let bookings = self.booking_lines(user);
        if bookings.is_empty() {
            writeln!(self.output, "You have no active bookings")?;
            return Ok(());
        }
        for (i, (_, line)) in bookings.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, line)?;
        }

        let Some(booking_id) = self
            .pick("Choose a booking to cancel: ", &bookings)?
            .map(|(id, _)| *id)
        else {
            return Ok(());
        };

        let mut theater = self.theater.lock();
        if theater.ledger().cancel_booking(user, booking_id) {
            save_locked(&theater, &mut self.output)?;
            writeln!(self.output, "Booking #{booking_id} cancelled")?;
        } else {
            writeln!(self.output, "Could not cancel booking #{booking_id}")?;
        }
        Ok(())
    }

    /// The user's bookings with their rendered lines, oldest first.
    fn booking_lines(&self, user: UserId) -> Vec<(BookingId, String)> {
        let theater = self.theater.lock();
        let catalog = theater.catalog();
        catalog
            .user_bookings(user)
            .unwrap_or_default()
            .into_iter()
            .map(|booking| (booking.id(), render::booking_line(catalog, booking)))
            .collect()
    }

    fn save(&mut self) -> Result<()> {
        let theater = self.theater.lock();
        save_locked(&theater, &mut self.output)
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Prompt and read one trimmed line; `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.closed = true;
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt for a non-negative integer; `None` at end of input or when
    /// the answer is not a number.
    fn read_number(&mut self, prompt: &str) -> Result<Option<u32>> {
        let Some(line) = self.read_line(prompt)? else {
            return Ok(None);
        };
        match line.parse() {
            Ok(n) => Ok(Some(n)),
            Err(_) => {
                writeln!(self.output, "Invalid input: '{line}' is not a number")?;
                Ok(None)
            }
        }
    }

    /// Let the user choose one entry of a 1-based list.
    fn pick<'b, T>(&mut self, prompt: &str, items: &'b [T]) -> Result<Option<&'b T>> {
        let Some(n) = self.read_number(prompt)? else {
            return Ok(None);
        };
        let item = (n as usize).checked_sub(1).and_then(|i| items.get(i));
        if item.is_none() {
            writeln!(self.output, "Invalid choice!")?;
        }
        Ok(item)
    }
}

/// Save with the lock already held, reporting the outcome to the user.
fn save_locked(theater: &Theater, output: &mut impl Write) -> Result<()> {
    match theater.save() {
        Ok(()) => {
            debug!("save"; "{}", theater.storage().data_file.display());
            writeln!(output, "Data saved")?;
        }
        Err(e) => writeln!(output, "Could not save data: {e}")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use crate::model::Seat;
    use crate::seed::sample_catalog;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn theater(dir: &TempDir) -> Mutex<Theater> {
        let storage = StorageConfig {
            data_file: dir.path().join("cinema_data.json"),
            xml_export: PathBuf::new(),
        };
        Mutex::new(Theater::new(sample_catalog().unwrap(), storage))
    }

    fn run_script(theater: &Mutex<Theater>, script: &str) -> String {
        let mut out = Vec::new();
        Console::new(theater, script.as_bytes(), &mut out)
            .run()
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_register_and_book() {
        let dir = TempDir::new().unwrap();
        let theater = theater(&dir);

        // register, book Masha row 1 seat 1, list bookings, log out, exit
        let output = run_script(&theater, "1\nАнна\n3\nmasha\n1\n1\n1\n4\n7\n6\n");

        assert!(output.contains("Your user id is 1"));
        assert!(output.contains("Welcome, Анна!"));
        assert!(output.contains("1. 2024-01-22 16:00 - Hall: Red Hall - 40 seats"));
        assert!(output.contains("Ticket booked! Booking #1: Masha and the Bear"));
        assert!(output.contains("1. Booking #1: Masha and the Bear, 2024-01-22 16:00"));
        assert!(output.ends_with("Goodbye!\n"));

        let theater = theater.lock();
        assert_eq!(theater.catalog().bookings().len(), 1);
        let hall = theater.catalog().get_hall(crate::model::HallId::new(1)).unwrap();
        assert!(hall.is_reserved(1, 1));
        assert!(dir.path().join("cinema_data.json").exists());
    }

    #[test]
    fn test_taken_seat_is_reported() {
        let dir = TempDir::new().unwrap();
        let theater = theater(&dir);
        {
            let mut guard = theater.lock();
            let user = guard.catalog_mut().register_user("Борис").unwrap().id();
            guard
                .ledger()
                .create_booking(user, SessionId::new(1), 2, 2)
                .unwrap();
        }

        // log in as 1, try the same seat in session 3 (same hall)
        let output = run_script(&theater, "2\n1\n3\nMasha\n1\n2\n2\n");

        assert!(output.contains("Logged in as Борис"));
        assert!(output.contains("Row 2: 1, 3, 4"));
        assert!(output.contains("Booking failed: row 2, seat 2 is already taken"));
        assert_eq!(theater.lock().catalog().bookings().len(), 1);
    }

    #[test]
    fn test_cancel_frees_seat() {
        let dir = TempDir::new().unwrap();
        let theater = theater(&dir);

        let output = run_script(&theater, "1\nАнна\n3\nspider\n1\n5\n8\n5\n1\n4\n");

        assert!(output.contains("Booking #1 cancelled"));
        assert!(output.contains("You have no active bookings"));

        let theater = theater.lock();
        assert!(theater.catalog().bookings().is_empty());
        let hall = theater.catalog().get_hall(crate::model::HallId::new(1)).unwrap();
        assert!(!hall.is_reserved(5, 8));
        assert!(hall.available_seats().contains(&Seat::new(5, 8)));
    }

    #[test]
    fn test_invalid_input_keeps_running() {
        let dir = TempDir::new().unwrap();
        let theater = theater(&dir);

        let output = run_script(&theater, "9\n2\nabc\n2\n42\n4\n\n6\n");

        assert!(output.contains("Invalid choice!"));
        assert!(output.contains("'abc' is not a number"));
        assert!(output.contains("User 42 not found"));
        assert!(output.contains("Film title cannot be empty!"));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_end_of_input_saves() {
        let dir = TempDir::new().unwrap();
        let theater = theater(&dir);

        let output = run_script(&theater, "3\n");

        assert!(output.contains("1. Spider-Man (sci-fi) - 2h 4m - ★7.9"));
        assert!(output.contains("Data saved"));
        assert!(dir.path().join("cinema_data.json").exists());
    }

    #[test]
    fn test_out_of_range_session_choice() {
        let dir = TempDir::new().unwrap();
        let theater = theater(&dir);

        let output = run_script(&theater, "1\nАнна\n3\nthe\n0\n3\nthe\n7\n7\n6\n");

        assert_eq!(output.matches("Invalid choice!").count(), 2);
        assert!(theater.lock().catalog().bookings().is_empty());
    }
}
