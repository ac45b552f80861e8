//! cinema - console booking service for a small movie theater.

use std::io;
use std::sync::Arc;

use anyhow::Result;
use cinema::cli::{Cli, Commands, Console, execute, install_shutdown_handler};
use cinema::config::CinemaConfig;
use cinema::{Theater, logger};
use clap::{ColorChoice, Parser};
use parking_lot::Mutex;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = CinemaConfig::load(&cli)?;
    let mut theater = Theater::open(&config)?;

    match cli.effective_command() {
        Commands::Console => run_console(theater),
        command => execute(&command, &mut theater, &mut io::stdout().lock()),
    }
}

fn run_console(theater: Theater) -> Result<()> {
    let theater = Arc::new(Mutex::new(theater));
    install_shutdown_handler(Arc::clone(&theater))?;

    // stdout stays unlocked so the Ctrl+C handler can still log
    Console::new(&theater, io::stdin().lock(), io::stdout()).run()
}
