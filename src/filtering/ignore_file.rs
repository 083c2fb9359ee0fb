// src/filtering/ignore_file.rs

use super::matcher::IgnoreRule;
use crate::errors::Result;
use log::{debug, info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Extracts patterns from ignore-file content.
///
/// Lines are trimmed; blank lines and `#` comments are dropped.
///
/// # Examples
/// ```
/// use dirscribe::filtering::parse_ignore_patterns;
///
/// let patterns = parse_ignore_patterns("# deps\nnode_modules/\n\n  *.log  \n");
/// assert_eq!(patterns, vec!["node_modules/", "*.log"]);
/// ```
pub fn parse_ignore_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Loads an ignore file into rules.
///
/// A missing file yields no rules. An unreadable file is a soft failure: it is
/// logged and yields no rules.
pub fn load_ignore_file(path: &Path) -> Result<Vec<IgnoreRule>> {
    let content = match fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(
                "No ignore file at '{}'; only built-in excludes apply.",
                path.display()
            );
            return Ok(Vec::new());
        }
        Err(e) => {
            warn!("Could not read ignore file '{}': {}", path.display(), e);
            return Ok(Vec::new());
        }
    };

    let patterns = parse_ignore_patterns(&content);
    for pattern in &patterns {
        debug!("Found ignore pattern: {}", pattern);
    }
    patterns
        .iter()
        .map(|p| IgnoreRule::from_ignore_line(p))
        .collect()
}
