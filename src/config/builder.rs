use super::{
    path_resolve::{find_repo_root, resolve_root},
    CheckImagesConfig, ConsolidateConfig, OutputDestination, RetargetConfig, SnapshotConfig,
    CHECK_IMAGES_ENCODINGS, CONSOLIDATE_ENCODINGS, RETARGET_ENCODINGS, SNAPSHOT_ENCODINGS,
};
use crate::cli::{CheckImagesArgs, ConsolidateArgs, RetargetArgs, SnapshotArgs};
use crate::constants::{
    BINARY_EXTENSIONS, CHECK_IMAGES_SKIP_DIRS, CONSOLIDATE_EXCLUDED_DIRS,
    CONSOLIDATE_EXCLUDED_FILES, DEFAULT_IGNORE_FILE, RETARGET_FILE_EXTENSIONS, RETARGET_SKIP_DIRS,
    SNAPSHOT_CUSTOM_EXCLUDES, SNAPSHOT_EXCLUDED_DIRS,
};
use crate::errors::{Error, Result};
use crate::filtering::{load_ignore_file, normalize_extensions, IgnoreMatcher, IgnoreRule};
use crate::images::RewriteRule;
use log::debug;
use std::env;
use std::path::{Path, PathBuf};

/// The file name of a report destination, so the walk never includes the
/// report it is writing.
fn output_file_name(destination: &OutputDestination) -> Option<String> {
    match destination {
        OutputDestination::File(path) => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()),
        OutputDestination::Stdout => None,
    }
}

fn current_dir() -> Result<PathBuf> {
    env::current_dir()
        .map_err(|e| Error::Config(format!("Cannot determine current directory: {}", e)))
}

impl TryFrom<ConsolidateArgs> for ConsolidateConfig {
    type Error = Error;

    fn try_from(args: ConsolidateArgs) -> Result<Self> {
        let root = resolve_root(&args.root)?;
        let output_destination = OutputDestination::from_arg(&args.output_file);

        let mut matcher = IgnoreMatcher::new()
            .exclude_dir_names(CONSOLIDATE_EXCLUDED_DIRS.iter().copied())
            .exclude_dir_names(args.exclude_dirs.unwrap_or_default())
            .exclude_file_names(CONSOLIDATE_EXCLUDED_FILES.iter().copied())
            .exclude_extensions(BINARY_EXTENSIONS)
            .exclude_extensions(args.exclude_extensions.unwrap_or_default());
        if let Some(name) = output_file_name(&output_destination) {
            matcher = matcher.exclude_file_names([name]);
        }
        debug!("Consolidate matcher has {} rules", matcher.rules().len());

        Ok(ConsolidateConfig {
            root,
            output_destination,
            matcher,
            encodings: CONSOLIDATE_ENCODINGS.to_vec(),
            dry_run: args.dry_run,
        })
    }
}

impl TryFrom<SnapshotArgs> for SnapshotConfig {
    type Error = Error;

    fn try_from(args: SnapshotArgs) -> Result<Self> {
        let root = resolve_root(&args.root)?;
        let output_destination = OutputDestination::from_arg(&args.output_file);

        let ignore_rules = if args.no_ignore_file {
            Vec::new()
        } else {
            let path = args
                .ignore_file
                .as_deref()
                .map(PathBuf::from)
                .unwrap_or_else(|| root.join(DEFAULT_IGNORE_FILE));
            load_ignore_file(&path)?
        };

        let custom_rules = SNAPSHOT_CUSTOM_EXCLUDES
            .iter()
            .map(|p| p.to_string())
            .chain(args.excludes.unwrap_or_default())
            .map(|p| IgnoreRule::custom(&p))
            .collect::<Result<Vec<_>>>()?;

        let mut matcher = IgnoreMatcher::new()
            .exclude_dir_names(SNAPSHOT_EXCLUDED_DIRS.iter().copied())
            .exclude_extensions(args.exclude_extensions.unwrap_or_default())
            .with_rules(custom_rules)
            .with_rules(ignore_rules);
        if let Some(name) = output_file_name(&output_destination) {
            matcher = matcher.exclude_file_names([name]);
        }
        debug!("Snapshot matcher has {} rules", matcher.rules().len());

        Ok(SnapshotConfig {
            root,
            output_destination,
            matcher,
            encodings: SNAPSHOT_ENCODINGS.to_vec(),
            dry_run: args.dry_run,
        })
    }
}

impl TryFrom<RetargetArgs> for RetargetConfig {
    type Error = Error;

    fn try_from(args: RetargetArgs) -> Result<Self> {
        let root = match args.root.as_deref() {
            Some(root) => resolve_root(root)?,
            None => find_repo_root(&current_dir()?),
        };
        Ok(RetargetConfig::for_root(&root, args.dry_run))
    }
}

impl TryFrom<CheckImagesArgs> for CheckImagesConfig {
    type Error = Error;

    fn try_from(args: CheckImagesArgs) -> Result<Self> {
        Ok(CheckImagesConfig::for_root(&resolve_root(&args.root)?))
    }
}

impl CheckImagesConfig {
    /// Default configuration rooted at an already-resolved directory.
    pub fn for_root(root: &Path) -> Self {
        CheckImagesConfig {
            root: root.to_path_buf(),
            matcher: IgnoreMatcher::new().exclude_dir_names(CHECK_IMAGES_SKIP_DIRS.iter().copied()),
            encodings: CHECK_IMAGES_ENCODINGS.to_vec(),
        }
    }
}

impl RetargetConfig {
    /// Default configuration rooted at an already-resolved directory.
    pub fn for_root(root: &Path, dry_run: bool) -> Self {
        RetargetConfig {
            root: root.to_path_buf(),
            rule: RewriteRule::default(),
            matcher: IgnoreMatcher::new().exclude_dir_names(RETARGET_SKIP_DIRS.iter().copied()),
            target_extensions: normalize_extensions(RETARGET_FILE_EXTENSIONS),
            encodings: RETARGET_ENCODINGS.to_vec(),
            dry_run,
        }
    }
}
