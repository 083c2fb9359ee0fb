//! Defines core data structures used throughout the pipelines.
//!
//! `FileEntry` is what the walker produces and what every report and rewrite
//! consumes. `RunCounts` tallies soft failures for report footers.

use std::path::{Path, PathBuf};

/// Whether a walked entry is a directory or something else (file, symlink).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A directory, a candidate for pruning.
    Directory,
    /// A regular file or any other non-directory entry.
    File,
}

/// A file discovered during the walk.
///
/// Immutable once discovered. The derived attributes (`name`, `extension`)
/// are computed once from `relative_path` so the matcher and the report
/// writers never re-parse the path.
///
/// # Examples
///
/// ```
/// use dirscribe::core_types::FileEntry;
/// use std::path::Path;
///
/// let entry = FileEntry::new(Path::new("/proj"), Path::new("src/Archive.TAR.GZ"), Some(10));
/// assert_eq!(entry.name, "Archive.TAR.GZ");
/// assert_eq!(entry.extension.as_deref(), Some("gz"));
/// assert_eq!(entry.segments().collect::<Vec<_>>(), vec!["src", "Archive.TAR.GZ"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// The absolute path to the file on the filesystem.
    pub absolute_path: PathBuf,
    /// The path relative to the walk root; used for display and sorting.
    pub relative_path: PathBuf,
    /// The final path component.
    pub name: String,
    /// The lowercase final suffix without the dot, if any.
    pub extension: Option<String>,
    /// Size in bytes, or `None` when the file could not be statted.
    pub size: Option<u64>,
}

impl FileEntry {
    /// Builds an entry from a root and a path relative to it.
    pub fn new(root: &Path, relative_path: &Path, size: Option<u64>) -> Self {
        let name = relative_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            absolute_path: root.join(relative_path),
            relative_path: relative_path.to_path_buf(),
            extension: extension_of(relative_path),
            name,
            size,
        }
    }

    /// Iterates the components of the relative path as strings.
    pub fn segments(&self) -> impl Iterator<Item = String> + '_ {
        self.relative_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
    }

    /// The relative path with `/` separators on every platform.
    pub fn display_path(&self) -> String {
        slash_path(&self.relative_path)
    }
}

/// Returns the lowercase final suffix of a path (`a.tar.GZ` -> `gz`).
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Renders a path with forward slashes.
pub fn slash_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Processed/skipped tallies for the report footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounts {
    /// Files whose content was written verbatim.
    pub processed: usize,
    /// Files replaced by a placeholder.
    pub skipped: usize,
}

impl RunCounts {
    /// All files accounted for.
    pub fn total(&self) -> usize {
        self.processed + self.skipped
    }
}
