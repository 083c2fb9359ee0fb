// src/output/formatter.rs

//! Provides helper functions for formatting parts of the output.

use crate::core_types::slash_path;
use std::path::Path;

/// Formats a path for display in manifests and headers.
///
/// Path separators are always `/`, even on Windows.
///
/// # Examples
/// ```
/// use dirscribe::output::formatter::format_path_for_display;
/// use std::path::Path;
///
/// assert_eq!(format_path_for_display(Path::new("src/main.rs")), "src/main.rs");
/// ```
pub fn format_path_for_display(path: &Path) -> String {
    slash_path(path)
}

/// Groups digits in threes with commas (`1234567` -> `1,234,567`).
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// The value of a `Size:` header line; `Unknown` when the file could not be statted.
pub fn format_size(size: Option<u64>) -> String {
    match size {
        Some(bytes) => format!("{} bytes", format_thousands(bytes)),
        None => "Unknown".to_string(),
    }
}
