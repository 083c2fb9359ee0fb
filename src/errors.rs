//! Defines application-specific error types.
//!
//! Most per-file problems (unreadable files, undecodable bytes, failed stats)
//! are soft failures and never surface as an `Error`; they turn into
//! placeholders or log lines. The variants here are the ones that abort a run
//! or that a caller needs to tell apart.

use thiserror::Error;

/// Errors produced by the `dirscribe` library.
#[derive(Error, Debug)]
pub enum Error {
    /// Error occurring during file or directory access (read, write, metadata).
    #[error("I/O error accessing path '{path}': {source}")]
    Io {
        /// The path that caused the I/O error.
        path: String,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration settings or combinations.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Text could not be re-encoded with the codec it was decoded with.
    #[error("Cannot encode text for '{path}' as {encoding}")]
    Encoding {
        /// The file the text was destined for.
        path: String,
        /// The name of the codec that rejected the text.
        encoding: &'static str,
    },

    /// The operation was cancelled by the user (e.g., Ctrl+C).
    #[error("Operation cancelled by user (Ctrl+C)")]
    Interrupted,

    /// Errors bubbled up from helpers that use `anyhow` for context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A `Result` alias using the crate's [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            path: "<unknown>".to_string(),
            source,
        }
    }
}

/// Helper function to create an `Error::Io` with path context.
pub fn io_error_with_path<P: AsRef<std::path::Path>>(source: std::io::Error, path: P) -> Error {
    Error::Io {
        path: path.as_ref().display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{io, path::PathBuf};

    #[test]
    fn test_io_error_with_path_helper() {
        let path = PathBuf::from("some/test/path.txt");
        let source_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err = io_error_with_path(source_error, &path);

        match err {
            Error::Io {
                path: error_path,
                source,
            } => {
                assert!(error_path.contains("some/test/path.txt"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            _ => panic!("Expected Error::Io"),
        }
    }

    #[test]
    fn test_display_messages() {
        let err = Error::Encoding {
            path: "index.html".to_string(),
            encoding: "windows-1252",
        };
        assert_eq!(
            err.to_string(),
            "Cannot encode text for 'index.html' as windows-1252"
        );
        assert_eq!(
            Error::Config("bad".to_string()).to_string(),
            "Invalid configuration: bad"
        );
        assert_eq!(
            Error::Interrupted.to_string(),
            "Operation cancelled by user (Ctrl+C)"
        );
    }

    #[test]
    fn test_anyhow_context_converts() {
        let err: Error = anyhow::anyhow!("handler already installed")
            .context("Failed to set Ctrl+C signal handler")
            .into();
        assert!(matches!(err, Error::Other(_)));
        assert_eq!(err.to_string(), "Failed to set Ctrl+C signal handler");
    }

    #[test]
    fn test_plain_io_error_converts() {
        let err: Error = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("denied"));
    }
}
