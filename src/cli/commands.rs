//! One-shot subcommands.
//!
//! Each command runs against an opened [`Theater`], prints to `out`, and
//! saves afterwards if it changed anything.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use super::{Commands, render};
use crate::log;
use crate::model::{BookingId, SessionId, UserId};
use crate::theater::Theater;

/// Run a non-interactive command.
pub fn execute(command: &Commands, theater: &mut Theater, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Console => bail!("the console is interactive, run it without a subcommand"),
        Commands::Films => list_films(theater, out),
        Commands::Sessions { title } => list_sessions(theater, title, out),
        Commands::Seats { session } => show_seats(theater, SessionId::new(*session), out),
        Commands::Register { name } => register(theater, name, out),
        Commands::Book {
            user,
            session,
            row,
            seat,
        } => book(
            theater,
            UserId::new(*user),
            SessionId::new(*session),
            (*row, *seat),
            out,
        ),
        Commands::Cancel { user, booking } => {
            cancel(theater, UserId::new(*user), BookingId::new(*booking), out)
        }
        Commands::Bookings { user } => list_bookings(theater, UserId::new(*user), out),
        Commands::Export { output } => export(theater, output.clone()),
    }
}

fn list_films(theater: &Theater, out: &mut impl Write) -> Result<()> {
    let films = theater.catalog().films();
    if films.is_empty() {
        writeln!(out, "No films found")?;
    }
    for (i, film) in films.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, film)?;
    }
    Ok(())
}

fn list_sessions(theater: &Theater, title: &str, out: &mut impl Write) -> Result<()> {
    let catalog = theater.catalog();
    let sessions = catalog.find_sessions_by_title(title)?;
    if sessions.is_empty() {
        writeln!(out, "No sessions found for '{}'", title)?;
        return Ok(());
    }

    writeln!(out, "Found {}", render::count_noun(sessions.len(), "session"))?;
    for session in sessions {
        writeln!(
            out,
            "[{}] {}",
            session.id(),
            render::session_details(catalog, session)
        )?;
    }
    Ok(())
}

fn show_seats(theater: &Theater, session_id: SessionId, out: &mut impl Write) -> Result<()> {
    let catalog = theater.catalog();
    let session = catalog
        .get_session(session_id)
        .with_context(|| format!("session {session_id} does not exist"))?;
    let hall = catalog
        .session_hall(session)
        .with_context(|| format!("hall of session {session_id} does not exist"))?;

    let rows = render::seat_map(hall);
    if rows.is_empty() {
        writeln!(out, "No seats left for this session")?;
    }
    for line in rows {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn register(theater: &mut Theater, name: &str, out: &mut impl Write) -> Result<()> {
    let user = theater.catalog_mut().register_user(name)?;
    writeln!(out, "Registered user {}: {}", user.id(), user.name())?;
    theater.save()?;
    Ok(())
}

fn book(
    theater: &mut Theater,
    user: UserId,
    session: SessionId,
    (row, seat): (u32, u32),
    out: &mut impl Write,
) -> Result<()> {
    let booking = match theater.ledger().create_booking(user, session, row, seat) {
        Ok(booking) => booking,
        Err(e) => bail!("booking failed: {}", render::booking_error(&e)),
    };
    writeln!(
        out,
        "Ticket booked! {}",
        render::booking_line(theater.catalog(), &booking)
    )?;
    log!("booking"; "booking {} saved for user {}", booking.id(), user);
    theater.save()?;
    Ok(())
}

fn cancel(
    theater: &mut Theater,
    user: UserId,
    booking: BookingId,
    out: &mut impl Write,
) -> Result<()> {
    if !theater.ledger().cancel_booking(user, booking) {
        bail!("user {user} has no booking {booking}");
    }
    writeln!(out, "Booking #{booking} cancelled")?;
    theater.save()?;
    Ok(())
}

fn list_bookings(theater: &Theater, user: UserId, out: &mut impl Write) -> Result<()> {
    let catalog = theater.catalog();
    let bookings = catalog
        .user_bookings(user)
        .with_context(|| format!("user {user} does not exist"))?;
    if bookings.is_empty() {
        writeln!(out, "No active bookings")?;
    }
    for (i, booking) in bookings.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, render::booking_line(catalog, booking))?;
    }
    Ok(())
}

fn export(theater: &Theater, output: Option<PathBuf>) -> Result<()> {
    let path = output
        .or_else(|| theater.storage().xml_export().map(PathBuf::from))
        .context("no export path given and `[storage] xml_export` is disabled")?;
    theater.export(&path)?;
    Ok(())
}
