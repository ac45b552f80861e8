//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Cinema booking service CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: cinema.toml)
    #[arg(short = 'C', long, global = true, default_value = "cinema.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Data file path, overrides `[storage] data_file`
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub data: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands (interactive console when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The command to run; the console when none was given.
    pub fn effective_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Console)
    }
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the interactive menu
    #[command(visible_alias = "c")]
    Console,

    /// List all films
    #[command(visible_alias = "f")]
    Films,

    /// Find sessions by film title (case-insensitive substring)
    #[command(visible_alias = "s")]
    Sessions {
        /// Part of the film title
        title: String,
    },

    /// Show the free seats of a session
    Seats {
        /// Session id
        session: u32,
    },

    /// Register a new user
    #[command(visible_alias = "r")]
    Register {
        /// Display name
        name: String,
    },

    /// Book a seat
    #[command(visible_alias = "b")]
    Book {
        /// User id
        user: u32,
        /// Session id
        session: u32,
        /// Row number, starting at 1
        row: u32,
        /// Seat number within the row, starting at 1
        seat: u32,
    },

    /// Cancel a booking
    Cancel {
        /// User id
        user: u32,
        /// Booking id
        booking: u32,
    },

    /// List a user's bookings
    Bookings {
        /// User id
        user: u32,
    },

    /// Write the XML export of users, halls and films
    #[command(visible_alias = "x")]
    Export {
        /// Output path (default: `[storage] xml_export`)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_console() {
        let cli = Cli::parse_from(["cinema"]);
        assert_eq!(cli.effective_command(), Commands::Console);
        assert_eq!(cli.config, PathBuf::from("cinema.toml"));
    }

    #[test]
    fn test_book_arguments() {
        let cli = Cli::parse_from(["cinema", "b", "1", "2", "3", "4", "--verbose"]);
        assert_eq!(
            cli.effective_command(),
            Commands::Book {
                user: 1,
                session: 2,
                row: 3,
                seat: 4
            }
        );
        assert!(cli.verbose);
    }
}
