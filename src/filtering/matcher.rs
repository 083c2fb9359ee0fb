// src/filtering/matcher.rs

use super::pattern::GlobPattern;
use crate::core_types::{extension_of, slash_path, EntryKind};
use crate::errors::Result;
use std::path::Path;
use tracing::instrument;

/// A single exclusion rule and the mode it matches in.
#[derive(Debug, Clone)]
pub enum IgnoreRule {
    /// Excludes anything below (or being) a directory with this exact name.
    DirName(String),
    /// Excludes files with this exact name.
    FileName(String),
    /// Excludes files whose final suffix equals this lowercase extension.
    Extension(String),
    /// Glob against the full relative path, or plain substring of it.
    Custom(GlobPattern),
    /// Trailing-slash pattern: glob against `path/`, or exact segment name.
    Directory {
        /// The pattern including its trailing slash.
        glob: GlobPattern,
        /// The pattern without its trailing slash, compared to segments.
        name: String,
    },
    /// Leading-slash pattern: glob against the full relative path only.
    Anchored {
        /// The pattern without its leading slash.
        glob: GlobPattern,
        /// Set for `/name/`; only directories can match.
        dir_only: bool,
    },
    /// General glob: against the name, the full path, or any segment.
    Glob(GlobPattern),
}

impl IgnoreRule {
    /// Interprets one ignore-file line according to its dialect.
    ///
    /// # Examples
    /// ```
    /// use dirscribe::filtering::IgnoreRule;
    ///
    /// assert!(matches!(IgnoreRule::from_ignore_line("build/").unwrap(), IgnoreRule::Directory { .. }));
    /// assert!(matches!(IgnoreRule::from_ignore_line("/dist").unwrap(), IgnoreRule::Anchored { .. }));
    /// assert!(matches!(IgnoreRule::from_ignore_line("*.log").unwrap(), IgnoreRule::Glob(_)));
    /// ```
    pub fn from_ignore_line(line: &str) -> Result<Self> {
        if let Some(anchored) = line.strip_prefix('/') {
            let dir_only = anchored.ends_with('/');
            let body = anchored.trim_end_matches('/');
            return Ok(IgnoreRule::Anchored {
                glob: GlobPattern::new(body)?,
                dir_only,
            });
        }
        if line.ends_with('/') {
            return Ok(IgnoreRule::Directory {
                glob: GlobPattern::new(line)?,
                name: line.trim_end_matches('/').to_string(),
            });
        }
        Ok(IgnoreRule::Glob(GlobPattern::new(line)?))
    }

    /// Builds a custom (glob-or-substring) rule.
    pub fn custom(pattern: &str) -> Result<Self> {
        Ok(IgnoreRule::Custom(GlobPattern::new(pattern)?))
    }

    fn matches(&self, candidate: &Candidate) -> bool {
        match self {
            IgnoreRule::DirName(name) => candidate.directories().any(|s| s == name),
            IgnoreRule::FileName(name) => {
                candidate.kind == EntryKind::File && candidate.name() == name
            }
            IgnoreRule::Extension(ext) => {
                candidate.kind == EntryKind::File
                    && candidate.extension.as_deref() == Some(ext.as_str())
            }
            IgnoreRule::Custom(glob) => {
                glob.matches(&candidate.path) || candidate.path.contains(glob.as_str())
            }
            IgnoreRule::Directory { glob, name } => {
                glob.matches(&format!("{}/", candidate.path))
                    || candidate.segments.iter().any(|s| s == name)
            }
            IgnoreRule::Anchored { glob, dir_only } => {
                (!dir_only || candidate.kind == EntryKind::Directory)
                    && glob.matches(&candidate.path)
            }
            IgnoreRule::Glob(glob) => {
                glob.matches(candidate.name())
                    || glob.matches(&candidate.path)
                    || candidate.segments.iter().any(|s| glob.matches(s))
            }
        }
    }
}

/// The pre-split view of a relative path that rules are tested against.
struct Candidate {
    path: String,
    segments: Vec<String>,
    extension: Option<String>,
    kind: EntryKind,
}

impl Candidate {
    fn new(relative_path: &Path, kind: EntryKind) -> Self {
        Self {
            path: slash_path(relative_path),
            segments: relative_path
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect(),
            extension: extension_of(relative_path),
            kind,
        }
    }

    fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// Segments naming directories: the parents, plus the entry itself when
    /// it is a directory.
    fn directories(&self) -> impl Iterator<Item = &String> {
        let take = match self.kind {
            EntryKind::Directory => self.segments.len(),
            EntryKind::File => self.segments.len().saturating_sub(1),
        };
        self.segments.iter().take(take)
    }
}

/// An immutable set of exclusion rules. Any matching rule excludes.
///
/// # Examples
/// ```
/// use dirscribe::core_types::EntryKind;
/// use dirscribe::filtering::IgnoreMatcher;
/// use std::path::Path;
///
/// let matcher = IgnoreMatcher::new()
///     .exclude_dir_names(["node_modules"])
///     .exclude_extensions(["png"]);
///
/// assert!(matcher.is_excluded(Path::new("web/node_modules/x.js"), EntryKind::File));
/// assert!(matcher.is_excluded(Path::new("logo.PNG"), EntryKind::File));
/// assert!(!matcher.is_excluded(Path::new("src/app.js"), EntryKind::File));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    rules: Vec<IgnoreRule>,
}

impl IgnoreMatcher {
    /// Creates a matcher with no rules; it excludes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds exact directory-name rules.
    pub fn exclude_dir_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules
            .extend(names.into_iter().map(|n| IgnoreRule::DirName(n.into())));
        self
    }

    /// Adds exact file-name rules.
    pub fn exclude_file_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules
            .extend(names.into_iter().map(|n| IgnoreRule::FileName(n.into())));
        self
    }

    /// Adds extension rules; input is normalised to lowercase without a dot.
    pub fn exclude_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.rules.extend(
            super::normalize_extensions(extensions)
                .into_iter()
                .map(IgnoreRule::Extension),
        );
        self
    }

    /// Adds arbitrary rules.
    pub fn with_rules<I: IntoIterator<Item = IgnoreRule>>(mut self, rules: I) -> Self {
        self.rules.extend(rules);
        self
    }

    /// The rules in insertion order.
    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    /// Returns the first rule that excludes `relative_path`, if any.
    pub fn matching_rule(&self, relative_path: &Path, kind: EntryKind) -> Option<&IgnoreRule> {
        if relative_path.as_os_str().is_empty() {
            return None;
        }
        let candidate = Candidate::new(relative_path, kind);
        self.rules.iter().find(|rule| rule.matches(&candidate))
    }

    /// Decides whether an entry at `relative_path` is excluded.
    #[instrument(level = "trace", skip(self), fields(path = %relative_path.display()))]
    pub fn is_excluded(&self, relative_path: &Path, kind: EntryKind) -> bool {
        match self.matching_rule(relative_path, kind) {
            Some(rule) => {
                log::trace!("Excluded by {:?}", rule);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ignore_lines(lines: &[&str]) -> IgnoreMatcher {
        IgnoreMatcher::new().with_rules(
            lines
                .iter()
                .map(|l| IgnoreRule::from_ignore_line(l).unwrap()),
        )
    }

    #[test]
    fn test_dir_name_at_any_depth() {
        let matcher = IgnoreMatcher::new().exclude_dir_names([".git", "build"]);
        assert!(matcher.is_excluded(Path::new(".git"), EntryKind::Directory));
        assert!(matcher.is_excluded(Path::new("a/b/build/c/d.txt"), EntryKind::File));
        assert!(matcher.is_excluded(Path::new("a/build"), EntryKind::Directory));
        // A file that happens to be called "build" is not a directory.
        assert!(!matcher.is_excluded(Path::new("a/build"), EntryKind::File));
        assert!(!matcher.is_excluded(Path::new("builds/x.txt"), EntryKind::File));
    }

    #[test]
    fn test_file_name_exact() {
        let matcher = IgnoreMatcher::new().exclude_file_names([".DS_Store"]);
        assert!(matcher.is_excluded(Path::new("deep/.DS_Store"), EntryKind::File));
        assert!(!matcher.is_excluded(Path::new("deep/.DS_Store.bak"), EntryKind::File));
        assert!(!matcher.is_excluded(Path::new(".DS_Store"), EntryKind::Directory));
    }

    #[test]
    fn test_extension_final_suffix_only() {
        let matcher = IgnoreMatcher::new().exclude_extensions([".GZ"]);
        assert!(matcher.is_excluded(Path::new("archive.tar.gz"), EntryKind::File));

        let tar_only = IgnoreMatcher::new().exclude_extensions(["tar"]);
        assert!(!tar_only.is_excluded(Path::new("archive.tar.gz"), EntryKind::File));
        assert!(tar_only.is_excluded(Path::new("archive.TAR"), EntryKind::File));
    }

    #[test]
    fn test_custom_rule_glob_or_substring() {
        let matcher = IgnoreMatcher::new().with_rules([
            IgnoreRule::custom("__pycache__").unwrap(),
            IgnoreRule::custom("*.tmp").unwrap(),
        ]);
        assert!(matcher.is_excluded(Path::new("pkg/__pycache__"), EntryKind::Directory));
        assert!(matcher.is_excluded(Path::new("a/b/scratch.tmp"), EntryKind::File));
        assert!(!matcher.is_excluded(Path::new("a/b/scratch.txt"), EntryKind::File));
    }

    #[test]
    fn test_directory_dialect() {
        let matcher = ignore_lines(&["build/", "*.egg-info/"]);
        assert!(matcher.is_excluded(Path::new("build"), EntryKind::Directory));
        assert!(matcher.is_excluded(Path::new("src/build/out.o"), EntryKind::File));
        assert!(matcher.is_excluded(Path::new("pkg.egg-info"), EntryKind::Directory));
        assert!(!matcher.is_excluded(Path::new("builder.rs"), EntryKind::File));
    }

    #[test]
    fn test_anchored_dialect() {
        let matcher = ignore_lines(&["/dist", "/out/"]);
        assert!(matcher.is_excluded(Path::new("dist"), EntryKind::Directory));
        assert!(matcher.is_excluded(Path::new("dist"), EntryKind::File));
        assert!(!matcher.is_excluded(Path::new("web/dist"), EntryKind::Directory));
        assert!(matcher.is_excluded(Path::new("out"), EntryKind::Directory));
        assert!(!matcher.is_excluded(Path::new("out"), EntryKind::File));
    }

    #[test]
    fn test_general_glob_dialect() {
        let matcher = ignore_lines(&["*.log", ".env", "secret?"]);
        assert!(matcher.is_excluded(Path::new("logs/app.log"), EntryKind::File));
        assert!(matcher.is_excluded(Path::new("config/.env"), EntryKind::File));
        assert!(matcher.is_excluded(Path::new("secret1/notes.md"), EntryKind::File));
        assert!(!matcher.is_excluded(Path::new("config/.envrc"), EntryKind::File));
    }

    #[test]
    fn test_overlapping_rules_any_match_excludes() {
        let matcher = ignore_lines(&["logs/", "*.log", "/logs"]);
        let rule = matcher.matching_rule(Path::new("logs"), EntryKind::Directory);
        assert!(matches!(rule, Some(IgnoreRule::Directory { .. })));
        assert!(matcher.is_excluded(Path::new("x.log"), EntryKind::File));
    }

    #[test]
    fn test_empty_matcher_excludes_nothing() {
        let matcher = IgnoreMatcher::new();
        assert!(!matcher.is_excluded(Path::new("anything/at/all"), EntryKind::File));
        assert!(matcher.rules().is_empty());
    }

    #[test]
    fn test_empty_path_never_excluded() {
        let matcher = ignore_lines(&["*"]);
        assert!(!matcher.is_excluded(Path::new(""), EntryKind::Directory));
    }
}
