// src/config/path_resolve.rs

use crate::errors::{Error, Result};
use log::debug;
use std::path::{Path, PathBuf};

/// Resolves a root argument to an absolute, canonical directory.
///
/// # Errors
/// Returns `Error::Config` if the path does not exist or is not a directory.
pub fn resolve_root(root_str: &str) -> Result<PathBuf> {
    let root = PathBuf::from(root_str)
        .canonicalize()
        .map_err(|e| Error::Config(format!("Failed to resolve root path '{}': {}", root_str, e)))?;
    if !root.is_dir() {
        return Err(Error::Config(format!(
            "Root path '{}' is not a directory",
            root_str
        )));
    }
    Ok(root)
}

/// Returns the nearest ancestor of `start` (inclusive) containing `.git`,
/// or `start` itself when there is none.
pub fn find_repo_root(start: &Path) -> PathBuf {
    for dir in start.ancestors() {
        if dir.join(".git").exists() {
            debug!("Repository root found at '{}'", dir.display());
            return dir.to_path_buf();
        }
    }
    debug!(
        "No .git above '{}'; using it as the root",
        start.display()
    );
    start.to_path_buf()
}
