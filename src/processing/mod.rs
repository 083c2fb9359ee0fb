//! Reading file content as text.
//!
//! Files are decoded by trying an ordered list of codecs. The codec that
//! succeeded travels with the text so a rewrite can encode it back the same
//! way, including a leading byte-order mark.

mod content_reader;
mod encoding;

pub use content_reader::{read_text, DiskReader, FileReader, ReadOutcome};
pub use encoding::{decode_bytes, DecodedText, TextEncoding};
