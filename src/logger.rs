//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for messages that only show up with `--verbose`
//!
//! # Example
//!
//! ```ignore
//! log!("load"; "restored {} bookings", count);
//! debug!("booking"; "seat {} released", seat);
//! ```

use owo_colors::{OwoColorize, Stream};
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    let styled = |paint: fn(&String) -> String| {
        prefix
            .if_supports_color(Stream::Stdout, paint)
            .to_string()
    };
    match module_lower {
        "load" | "save" => styled(|p| p.bright_blue().bold().to_string()),
        "booking" => styled(|p| p.bright_green().bold().to_string()),
        "error" => styled(|p| p.bright_red().bold().to_string()),
        "warning" => styled(|p| p.bright_magenta().bold().to_string()),
        _ => styled(|p| p.bright_yellow().bold().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_override() {
        owo_colors::set_override(false);
        assert_eq!(colorize_prefix("load", "load"), "[load]");
        assert_eq!(colorize_prefix("Warning", "warning"), "[Warning]");

        owo_colors::set_override(true);
        let colored = colorize_prefix("booking", "booking");
        assert!(colored.contains("\u{1b}["));
        assert!(colored.contains("[booking]"));
        owo_colors::unset_override();
    }

    #[test]
    fn test_verbose_toggle() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }
}
