// src/filtering/mod.rs

//! Exclusion rules and the matcher that applies them.
//!
//! Every walk in the crate asks an [`IgnoreMatcher`] before descending into a
//! directory and before accepting a file, so excluded entries are never read.

mod ignore_file;
mod matcher;
mod pattern;

pub use ignore_file::{load_ignore_file, parse_ignore_patterns};
pub use matcher::{IgnoreMatcher, IgnoreRule};
pub use pattern::GlobPattern;

use crate::core_types::extension_of;
use std::path::Path;

/// Lowercases extensions and strips any leading dots (`".PNG"` -> `"png"`).
///
/// # Examples
/// ```
/// use dirscribe::filtering::normalize_extensions;
///
/// assert_eq!(normalize_extensions([".HTML", "css"]), vec!["html", "css"]);
/// ```
pub fn normalize_extensions<I, S>(extensions: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    extensions
        .into_iter()
        .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Checks a path's final suffix against a set of lowercase extensions.
pub fn has_extension_in(path: &Path, extensions: &[String]) -> bool {
    extension_of(path).is_some_and(|ext| extensions.contains(&ext))
}
