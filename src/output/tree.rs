// src/output/tree.rs

//! The `## Project Structure` tree of the markdown snapshot.

use crate::constants::PERMISSION_DENIED_MARKER;
use crate::core_types::EntryKind;
use crate::filtering::IgnoreMatcher;
use log::warn;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

struct TreeNode {
    path: PathBuf,
    relative_path: PathBuf,
    name: String,
    is_dir: bool,
}

/// Renders the directory tree under `root`, omitting excluded entries.
///
/// The first line is `<root name>/`. Children are sorted by name. A
/// directory that cannot be listed gets an inline `[Permission Denied]` line
/// instead of children; the rest of the tree is still rendered.
///
/// # Examples
/// ```
/// use dirscribe::filtering::IgnoreMatcher;
/// use dirscribe::output::tree::build_tree;
/// use std::fs;
/// use tempfile::tempdir;
///
/// # fn main() -> std::io::Result<()> {
/// let temp = tempdir()?;
/// let root = temp.path().join("proj");
/// fs::create_dir_all(root.join("src"))?;
/// fs::write(root.join("src/app.py"), "")?;
/// fs::write(root.join("README.md"), "")?;
///
/// let lines = build_tree(&root, &IgnoreMatcher::new());
/// assert_eq!(lines, vec!["proj/", "├── README.md", "└── src", "    └── app.py"]);
/// # Ok(())
/// # }
/// ```
pub fn build_tree(root: &Path, matcher: &IgnoreMatcher) -> Vec<String> {
    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());
    let mut lines = vec![format!("{}/", root_name)];

    match list_children(root, Path::new(""), matcher) {
        Ok(children) => push_children(&children, "", matcher, &mut lines),
        Err(e) => {
            warn!("Cannot list '{}': {}", root.display(), e);
            lines.push(PERMISSION_DENIED_MARKER.to_string());
        }
    }
    lines
}

fn list_children(
    dir: &Path,
    relative_dir: &Path,
    matcher: &IgnoreMatcher,
) -> io::Result<Vec<TreeNode>> {
    let mut nodes = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let is_dir = entry.file_type().is_ok_and(|ft| ft.is_dir());
        let relative_path = relative_dir.join(entry.file_name());
        let kind = if is_dir {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        if matcher.is_excluded(&relative_path, kind) {
            continue;
        }
        nodes.push(TreeNode {
            path: entry.path(),
            name: entry.file_name().to_string_lossy().into_owned(),
            relative_path,
            is_dir,
        });
    }
    nodes.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(nodes)
}

fn push_children(
    nodes: &[TreeNode],
    prefix: &str,
    matcher: &IgnoreMatcher,
    lines: &mut Vec<String>,
) {
    for (i, node) in nodes.iter().enumerate() {
        let is_last = i + 1 == nodes.len();
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        lines.push(format!("{}{}{}", prefix, connector, node.name));

        if !node.is_dir {
            continue;
        }
        let child_prefix = format!("{}{}", prefix, if is_last { SPACE } else { PIPE });
        match list_children(&node.path, &node.relative_path, matcher) {
            Ok(children) => push_children(&children, &child_prefix, matcher, lines),
            Err(e) => {
                warn!("Cannot list '{}': {}", node.path.display(), e);
                lines.push(format!("{}{}{}", prefix, SPACE, PERMISSION_DENIED_MARKER));
            }
        }
    }
}
