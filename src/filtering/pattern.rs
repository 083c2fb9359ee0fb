// src/filtering/pattern.rs

use crate::errors::{Error, Result};
use glob::Pattern;
use log::warn;

/// A shell-style glob (`*`, `?`, `[seq]`, `[!seq]`) that keeps its source text.
///
/// `*` crosses `/`, so `*.log` matches `logs/app.log` when tested against a
/// full relative path. Patterns that `glob` rejects are repaired rather than
/// refused: a stray `**` inside a component is collapsed to `*`, and anything
/// still invalid is matched literally.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    raw: String,
    compiled: Pattern,
}

impl GlobPattern {
    /// Compiles `raw`, falling back to a repaired or literal pattern.
    ///
    /// # Examples
    /// ```
    /// use dirscribe::filtering::GlobPattern;
    ///
    /// let glob = GlobPattern::new("*.log").unwrap();
    /// assert!(glob.matches("logs/app.log"));
    ///
    /// // Unbalanced brackets are taken literally.
    /// let literal = GlobPattern::new("[draft").unwrap();
    /// assert!(literal.matches("[draft"));
    /// assert!(!literal.matches("d"));
    /// ```
    pub fn new(raw: &str) -> Result<Self> {
        let compiled = match Pattern::new(raw) {
            Ok(pattern) => pattern,
            Err(e) => {
                warn!("Invalid ignore glob pattern '{}': {}", raw, e);
                Pattern::new(&collapse_recursive_wildcards(raw))
                    .or_else(|_| Pattern::new(&Pattern::escape(raw)))
                    .map_err(|e| Error::Config(format!("Unusable glob '{}': {}", raw, e)))?
            }
        };
        Ok(Self {
            raw: raw.to_string(),
            compiled,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Tests the whole of `text` against the pattern.
    pub fn matches(&self, text: &str) -> bool {
        self.compiled.matches(text)
    }
}

/// `foo**` is not a valid `glob` pattern but means `foo*` in shell matching.
fn collapse_recursive_wildcards(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '*' && out.ends_with('*') {
            continue;
        }
        out.push(c);
    }
    out
}
