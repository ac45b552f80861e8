//! Ctrl+C handling for the interactive console.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::log;
use crate::theater::Theater;

/// Exit status of a process stopped by SIGINT.
const INTERRUPTED: i32 = 130;

/// Save the theater and exit when the user presses Ctrl+C.
///
/// The console only holds the lock while an operation runs, so the handler
/// waits for that operation to finish before saving.
pub fn install_shutdown_handler(theater: Arc<Mutex<Theater>>) -> anyhow::Result<()> {
    ctrlc::set_handler(move || {
        log!("save"; "interrupted, saving...");
        if let Err(e) = theater.lock().save() {
            log!("error"; "{}", e);
        }
        std::process::exit(INTERRUPTED);
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}
