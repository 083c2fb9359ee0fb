// src/images/rewriter.rs

//! Regex-driven rewriting of raster image references to their WebP copies.

use crate::core_types::slash_path;
use crate::errors::{Error, Result};
use regex::{Captures, Regex, RegexBuilder};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// What a reference looks like and what it is rewritten to.
///
/// The default matches `[./ or /]assets/images/[photos/]<name>.<jpg|jpeg|png>[?query]`
/// and rewrites it to `<prefix>assets/images/web/<name>.webp<query>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    /// Directory that every matched reference starts with.
    pub asset_dir: String,
    /// A single optional subdirectory between `asset_dir` and the name.
    pub optional_subdir: Option<String>,
    /// Source extensions, matched case-insensitively.
    pub source_extensions: Vec<String>,
    /// Directory under `asset_dir` holding the converted images.
    pub target_dir: String,
    /// Extension of the converted images.
    pub target_extension: String,
}

impl Default for RewriteRule {
    fn default() -> Self {
        Self {
            asset_dir: "assets/images".to_string(),
            optional_subdir: Some("photos".to_string()),
            source_extensions: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
            target_dir: "web".to_string(),
            target_extension: "webp".to_string(),
        }
    }
}

impl RewriteRule {
    /// The root-relative path a reference to `name` is rewritten to.
    ///
    /// # Examples
    /// ```
    /// use dirscribe::images::RewriteRule;
    ///
    /// assert_eq!(RewriteRule::default().expected_path("cat"), "assets/images/web/cat.webp");
    /// ```
    pub fn expected_path(&self, name: &str) -> String {
        format!(
            "{}/{}/{}.{}",
            self.asset_dir, self.target_dir, name, self.target_extension
        )
    }

    fn pattern(&self) -> String {
        let mut extensions: Vec<String> = self
            .source_extensions
            .iter()
            .map(|e| regex::escape(e))
            .collect();
        // Longest alternative first.
        extensions.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let subdir = self
            .optional_subdir
            .as_deref()
            .map(|s| format!("(?:{}/)?", regex::escape(s)))
            .unwrap_or_default();

        format!(
            r#"(?P<prefix>(?:\./|/)?)(?P<path>{asset}/{subdir}(?P<name>[^/"'\)\s\?]+)\.(?:{exts}))(?P<query>\?[^"'\)\s<>]*)?"#,
            asset = regex::escape(self.asset_dir.trim_end_matches('/')),
            subdir = subdir,
            exts = extensions.join("|"),
        )
    }
}

/// A reference whose expected WebP file is absent under the root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchRecord {
    /// The file containing the reference, relative to the root.
    pub file: PathBuf,
    /// The reference as written, including prefix and query.
    pub original: String,
    /// The root-relative path the reference now points at.
    pub expected: String,
}

impl MatchRecord {
    /// Case-insensitive sort key used by the summary.
    pub fn sort_key(&self) -> (String, String) {
        (
            slash_path(&self.file).to_lowercase(),
            self.original.to_lowercase(),
        )
    }
}

/// The rewritten text and how many references were replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite<'a> {
    pub text: Cow<'a, str>,
    pub replacements: usize,
}

/// A compiled [`RewriteRule`].
#[derive(Debug, Clone)]
pub struct ReferenceRewriter {
    rule: RewriteRule,
    regex: Regex,
}

impl ReferenceRewriter {
    /// Compiles the rule's pattern (case-insensitive).
    ///
    /// # Errors
    /// Returns `Error::Config` if the rule yields an invalid regex.
    pub fn new(rule: RewriteRule) -> Result<Self> {
        let regex = RegexBuilder::new(&rule.pattern())
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::Config(format!("Invalid image reference pattern: {}", e)))?;
        Ok(Self { rule, regex })
    }

    /// The rule this rewriter was built from.
    pub fn rule(&self) -> &RewriteRule {
        &self.rule
    }

    /// Replaces every reference in `text`.
    ///
    /// For each match, `<root>/<expected path>` is checked; when it does not
    /// exist a [`MatchRecord`] for `source` is added to `missing`. The
    /// substitution happens either way.
    ///
    /// # Examples
    /// ```
    /// use dirscribe::images::{ReferenceRewriter, RewriteRule};
    /// use std::collections::BTreeSet;
    /// use std::path::Path;
    ///
    /// let rewriter = ReferenceRewriter::new(RewriteRule::default()).unwrap();
    /// let mut missing = BTreeSet::new();
    /// let out = rewriter.rewrite(
    ///     r#"<img src="./assets/images/Hero.PNG">"#,
    ///     Path::new("index.html"),
    ///     Path::new("/nonexistent-root"),
    ///     &mut missing,
    /// );
    /// assert_eq!(out.text, r#"<img src="./assets/images/web/Hero.webp">"#);
    /// assert_eq!(out.replacements, 1);
    /// assert_eq!(missing.len(), 1);
    /// ```
    pub fn rewrite<'a>(
        &self,
        text: &'a str,
        source: &Path,
        root: &Path,
        missing: &mut BTreeSet<MatchRecord>,
    ) -> Rewrite<'a> {
        let mut replacements = 0;
        let new_text = self.regex.replace_all(text, |caps: &Captures| {
            let prefix = caps.name("prefix").map_or("", |m| m.as_str());
            let path = caps.name("path").map_or("", |m| m.as_str());
            let name = caps.name("name").map_or("", |m| m.as_str());
            let query = caps.name("query").map_or("", |m| m.as_str());

            let expected = self.rule.expected_path(name);
            if !root.join(&expected).exists() {
                missing.insert(MatchRecord {
                    file: source.to_path_buf(),
                    original: format!("{}{}{}", prefix, path, query),
                    expected: expected.clone(),
                });
            }
            replacements += 1;
            format!("{}{}{}", prefix, expected, query)
        });
        Rewrite {
            text: new_text,
            replacements,
        }
    }
}
