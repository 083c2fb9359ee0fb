// src/processing/encoding.rs

use crate::errors::{Error, Result};
use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;
use std::fmt;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A text codec the reader can try, and later re-encode with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    /// UTF-8 with a leading byte-order mark. Only matches BOM-prefixed input.
    Utf8Bom,
    /// Strict UTF-8.
    Utf8,
    /// Windows code page 1252 (WHATWG table). Never fails to decode.
    Windows1252,
    /// ISO-8859-1: each byte is the code point of the same value.
    Latin1,
}

impl TextEncoding {
    /// The codec's conventional label.
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8Bom => "utf-8-sig",
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Windows1252 => "windows-1252",
            TextEncoding::Latin1 => "latin-1",
        }
    }

    /// Decodes `bytes`, or `None` if they are not valid in this codec.
    pub fn decode(self, bytes: &[u8]) -> Option<Cow<'_, str>> {
        match self {
            TextEncoding::Utf8Bom => bytes
                .strip_prefix(UTF8_BOM)
                .and_then(|rest| std::str::from_utf8(rest).ok())
                .map(Cow::Borrowed),
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(Cow::Borrowed),
            TextEncoding::Windows1252 => {
                WINDOWS_1252.decode_without_bom_handling_and_without_replacement(bytes)
            }
            TextEncoding::Latin1 => Some(Cow::Owned(bytes.iter().map(|&b| b as char).collect())),
        }
    }

    /// Encodes `text` back into this codec.
    ///
    /// `path` is only used for the error message when a character has no
    /// representation in the codec.
    pub fn encode(self, text: &str, path: &Path) -> Result<Vec<u8>> {
        let unencodable = || Error::Encoding {
            path: path.display().to_string(),
            encoding: self.name(),
        };
        match self {
            TextEncoding::Utf8Bom => {
                let mut out = Vec::with_capacity(UTF8_BOM.len() + text.len());
                out.extend_from_slice(UTF8_BOM);
                out.extend_from_slice(text.as_bytes());
                Ok(out)
            }
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::Windows1252 => {
                let (bytes, _, had_errors) = WINDOWS_1252.encode(text);
                if had_errors {
                    return Err(unencodable());
                }
                Ok(bytes.into_owned())
            }
            TextEncoding::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).map_err(|_| unencodable()))
                .collect(),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text together with the codec that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    /// The decoded text, without any byte-order mark.
    pub text: String,
    /// The codec that succeeded, needed to write the text back symmetrically.
    pub encoding: TextEncoding,
}

/// Tries each candidate codec in order and returns the first that succeeds.
///
/// # Examples
/// ```
/// use dirscribe::processing::{decode_bytes, TextEncoding};
///
/// let chain = [TextEncoding::Utf8Bom, TextEncoding::Utf8, TextEncoding::Windows1252];
/// let decoded = decode_bytes(b"caf\xE9", &chain).unwrap();
/// assert_eq!(decoded.text, "café");
/// assert_eq!(decoded.encoding, TextEncoding::Windows1252);
///
/// assert!(decode_bytes(b"\xFF", &[TextEncoding::Utf8]).is_none());
/// ```
pub fn decode_bytes(bytes: &[u8], candidates: &[TextEncoding]) -> Option<DecodedText> {
    candidates.iter().find_map(|&encoding| {
        encoding.decode(bytes).map(|text| DecodedText {
            text: text.into_owned(),
            encoding,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RETARGET_CHAIN: [TextEncoding; 4] = [
        TextEncoding::Utf8Bom,
        TextEncoding::Utf8,
        TextEncoding::Windows1252,
        TextEncoding::Latin1,
    ];

    #[test]
    fn test_bom_only_matches_prefixed_input() {
        assert!(TextEncoding::Utf8Bom.decode(b"plain").is_none());
        assert_eq!(
            TextEncoding::Utf8Bom.decode(b"\xEF\xBB\xBFhi").as_deref(),
            Some("hi")
        );
    }

    #[test]
    fn test_chain_picks_first_success() {
        let bom = decode_bytes(b"\xEF\xBB\xBFabc", &RETARGET_CHAIN).unwrap();
        assert_eq!(bom.encoding, TextEncoding::Utf8Bom);
        assert_eq!(bom.text, "abc");

        let utf8 = decode_bytes("naïve".as_bytes(), &RETARGET_CHAIN).unwrap();
        assert_eq!(utf8.encoding, TextEncoding::Utf8);

        let cp1252 = decode_bytes(b"\x93quoted\x94", &RETARGET_CHAIN).unwrap();
        assert_eq!(cp1252.encoding, TextEncoding::Windows1252);
        assert_eq!(cp1252.text, "\u{201C}quoted\u{201D}");
    }

    #[test]
    fn test_latin1_maps_bytes_directly() {
        let decoded =
            decode_bytes(b"\x93\xE9", &[TextEncoding::Utf8, TextEncoding::Latin1]).unwrap();
        assert_eq!(decoded.encoding, TextEncoding::Latin1);
        assert_eq!(decoded.text, "\u{93}\u{E9}");
    }

    #[test]
    fn test_every_codec_round_trips_its_own_output() {
        let path = Path::new("t.txt");
        let samples: [(&[u8], TextEncoding); 4] = [
            (b"\xEF\xBB\xBFhello \xC3\xA9", TextEncoding::Utf8Bom),
            (b"hello \xC3\xA9", TextEncoding::Utf8),
            (b"\x80 \x81 \x93 \xE9 \xFF", TextEncoding::Windows1252),
            (b"\x00\x7F\x80\xFF", TextEncoding::Latin1),
        ];
        for (bytes, encoding) in samples {
            let text = encoding.decode(bytes).unwrap();
            assert_eq!(encoding.encode(&text, path).unwrap(), bytes, "{}", encoding);
        }
    }

    #[test]
    fn test_unencodable_character_is_an_error() {
        let err = TextEncoding::Latin1
            .encode("snow \u{2603}", Path::new("x.css"))
            .unwrap_err();
        assert!(matches!(err, Error::Encoding { encoding: "latin-1", .. }));

        assert!(TextEncoding::Windows1252
            .encode("\u{2603}", Path::new("x.css"))
            .is_err());
    }

    #[test]
    fn test_empty_candidate_list_fails() {
        assert!(decode_bytes(b"anything", &[]).is_none());
    }
}
