//! Command-line interface module.

mod args;
pub mod commands;
pub mod console;
pub mod render;
mod shutdown;

pub use args::{Cli, Commands};
pub use commands::execute;
pub use console::Console;
pub use shutdown::install_shutdown_handler;
