// src/processing/content_reader.rs

use super::encoding::{decode_bytes, DecodedText, TextEncoding};
use log::{debug, warn};
use std::io;
use std::{fs, path::Path};

/// Source of file bytes for the pipelines.
///
/// Production code reads from disk through [`DiskReader`]; tests substitute a
/// reader that records which paths were opened.
pub trait FileReader {
    /// Reads the entire file at `path`.
    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Reads straight from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskReader;

impl FileReader for DiskReader {
    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}

/// Result of reading a file as text.
#[derive(Debug)]
pub enum ReadOutcome {
    /// A candidate codec decoded the bytes.
    Decoded(DecodedText),
    /// The file was read, but no candidate codec accepted its bytes.
    Undecodable,
    /// The file could not be read at all.
    Failed(io::Error),
}

impl ReadOutcome {
    /// The decoded text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            ReadOutcome::Decoded(decoded) => Some(&decoded.text),
            _ => None,
        }
    }
}

/// Reads `path` and decodes it with the first codec in `candidates` that
/// accepts the bytes. Never returns an error; failures are tagged outcomes.
pub fn read_text(reader: &dyn FileReader, path: &Path, candidates: &[TextEncoding]) -> ReadOutcome {
    let bytes = match reader.read_bytes(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to read file content '{}': {}", path.display(), e);
            return ReadOutcome::Failed(e);
        }
    };
    match decode_bytes(&bytes, candidates) {
        Some(decoded) => {
            debug!("Decoded '{}' as {}", path.display(), decoded.encoding);
            ReadOutcome::Decoded(decoded)
        }
        None => {
            warn!(
                "No candidate encoding could decode '{}' (tried {})",
                path.display(),
                candidates
                    .iter()
                    .map(|e| e.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            ReadOutcome::Undecodable
        }
    }
}
