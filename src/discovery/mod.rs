//! Recursive, pruning file discovery.
use crate::cancellation::CancellationToken;
use crate::core_types::FileEntry;
use crate::errors::Result;
use crate::filtering::IgnoreMatcher;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

mod walker;

use walker::build_walker;

/// Files found by a walk, plus the directories that could not be listed.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Included files, sorted by relative path.
    pub files: Vec<FileEntry>,
    /// Directories (or other entries) the walker could not read.
    pub unreadable: Vec<PathBuf>,
}

/// Walks `root`, consulting `matcher` before descending into directories and
/// before accepting files.
///
/// Read errors on subdirectories do not abort the walk; the offending paths
/// are collected in [`Discovery::unreadable`] and logged. The result is sorted
/// by relative path regardless of filesystem iteration order.
///
/// # Errors
/// Returns `Error::Interrupted` if `token` is cancelled during the walk.
///
/// # Examples
///
/// ```
/// use dirscribe::cancellation::CancellationToken;
/// use dirscribe::discovery::discover_files;
/// use dirscribe::filtering::IgnoreMatcher;
/// use std::fs;
/// use tempfile::tempdir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let temp = tempdir()?;
/// fs::create_dir_all(temp.path().join("node_modules/pkg"))?;
/// fs::write(temp.path().join("node_modules/pkg/index.js"), "")?;
/// fs::write(temp.path().join("main.js"), "")?;
///
/// let matcher = IgnoreMatcher::new().exclude_dir_names(["node_modules"]);
/// let found = discover_files(temp.path(), &matcher, &CancellationToken::new())?;
/// assert_eq!(found.files.len(), 1);
/// assert_eq!(found.files[0].display_path(), "main.js");
/// # Ok(())
/// # }
/// ```
pub fn discover_files(
    root: &Path,
    matcher: &IgnoreMatcher,
    token: &CancellationToken,
) -> Result<Discovery> {
    token.check()?;

    let mut discovery = Discovery::default();
    for entry_result in build_walker(root, matcher) {
        token.check()?;

        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Walker error: {}", err);
                if let Some(path) = error_path(&err) {
                    discovery.unreadable.push(path);
                }
                continue;
            }
        };
        if entry.depth() == 0 || !is_regular_file(&entry) {
            continue;
        }

        let relative_path = match entry.path().strip_prefix(root) {
            Ok(rel) => rel,
            Err(_) => {
                warn!("Entry '{}' is outside the root", entry.path().display());
                continue;
            }
        };
        let metadata = if entry.path_is_symlink() {
            fs::metadata(entry.path()).map_err(|e| e.to_string())
        } else {
            entry.metadata().map_err(|e| e.to_string())
        };
        let size = match metadata {
            Ok(md) => Some(md.len()),
            Err(e) => {
                warn!("Could not stat '{}': {}", entry.path().display(), e);
                None
            }
        };
        discovery
            .files
            .push(FileEntry::new(root, relative_path, size));
    }

    discovery
        .files
        .sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    discovery.unreadable.sort();

    debug!(
        "Discovery complete. Files: {}, unreadable entries: {}",
        discovery.files.len(),
        discovery.unreadable.len()
    );
    Ok(discovery)
}

/// Regular files, and symlinks that resolve to regular files.
fn is_regular_file(entry: &ignore::DirEntry) -> bool {
    match entry.file_type() {
        Some(ft) if ft.is_file() => true,
        Some(ft) if ft.is_symlink() => fs::metadata(entry.path()).is_ok_and(|md| md.is_file()),
        _ => false,
    }
}

fn error_path(err: &ignore::Error) -> Option<PathBuf> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.clone()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Partial(errs) => errs.iter().find_map(error_path),
        _ => None,
    }
}
