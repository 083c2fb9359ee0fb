// src/output/writer.rs

//! Manages the output destination (stdout or a file).

use crate::config::OutputDestination;
use crate::errors::{io_error_with_path, Result};
use log::debug;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};

/// Opens the writer for a report destination.
///
/// Missing parent directories of a file destination are created.
///
/// # Errors
/// Returns `Error::Io` with the path if the file cannot be created.
pub fn setup_output_writer(destination: &OutputDestination) -> Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = match destination {
        OutputDestination::Stdout => Box::new(io::stdout().lock()),
        OutputDestination::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| io_error_with_path(e, parent))?;
            }
            let file = File::create(path).map_err(|e| io_error_with_path(e, path))?;
            debug!("Writing report to '{}'", path.display());
            Box::new(BufWriter::new(file))
        }
    };
    Ok(writer)
}

/// Flushes the writer before it is dropped.
///
/// # Errors
/// Returns `Error::Io` if buffered output cannot be written.
pub fn finalize_output(mut writer: Box<dyn Write>, destination: &OutputDestination) -> Result<()> {
    writer.flush().map_err(|e| match destination {
        OutputDestination::File(path) => io_error_with_path(e, path),
        OutputDestination::Stdout => io_error_with_path(e, "<stdout>"),
    })
}
