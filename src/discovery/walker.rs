use crate::core_types::EntryKind;
use crate::filtering::IgnoreMatcher;
use ignore::{Walk, WalkBuilder};
use log::{debug, trace};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Configures the `ignore` walker for a plain, rule-driven walk.
///
/// VCS ignore files, hidden-file skipping and the other standard filters are
/// disabled: only `matcher` decides what is excluded. The matcher runs in
/// `filter_entry`, so an excluded directory is pruned and never opened.
pub(super) fn build_walker(root: &Path, matcher: &IgnoreMatcher) -> Walk {
    let mut walker_builder = WalkBuilder::new(root);
    walker_builder
        .standard_filters(false)
        .require_git(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b));
    debug!(
        "Configuring walker for '{}' with {} exclusion rules.",
        root.display(),
        matcher.rules().len()
    );

    let matcher = Arc::new(matcher.clone());
    let root_clone: PathBuf = root.to_path_buf();
    walker_builder.filter_entry(move |entry| {
        let Ok(relative_path) = entry.path().strip_prefix(&root_clone) else {
            return true;
        };
        let kind = if entry.file_type().is_some_and(|ft| ft.is_dir()) {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        if matcher.is_excluded(relative_path, kind) {
            trace!("Pruning {:?} ({:?})", relative_path, kind);
            return false;
        }
        true
    });

    walker_builder.build()
}
