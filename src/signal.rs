// src/signal.rs

//! Provides signal handling for graceful shutdown.

use crate::cancellation::CancellationToken;
use crate::errors::Result;
use anyhow::Context;

/// Sets up a handler for Ctrl+C (SIGINT/SIGTERM).
///
/// The returned token is cancelled when the signal arrives. Pipelines poll it
/// between files, so an interrupted report keeps everything written so far.
///
/// # Errors
/// Returns `Error::Other` if the signal handler cannot be set.
pub fn setup_signal_handler() -> Result<CancellationToken> {
    let token = CancellationToken::new();
    let handler_token = token.clone();

    ctrlc::set_handler(move || {
        log::info!("Ctrl+C signal received, attempting graceful shutdown.");
        handler_token.cancel();
    })
    .context("Failed to set Ctrl+C signal handler")?;

    Ok(token)
}
