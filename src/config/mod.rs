//! Immutable per-tool configuration built from the command line.
//!
//! Each subcommand gets its own config struct. Exclusion sets, encoding
//! chains and the rewrite rule are resolved here once and passed down; the
//! pipelines never consult the CLI or the constants directly.

use crate::filtering::IgnoreMatcher;
use crate::images::RewriteRule;
use crate::processing::TextEncoding;
use std::path::PathBuf;

mod builder;
pub mod path_resolve;

pub use path_resolve::{find_repo_root, resolve_root};

/// Decoding chain of the consolidator.
pub const CONSOLIDATE_ENCODINGS: &[TextEncoding] = &[
    TextEncoding::Utf8,
    TextEncoding::Latin1,
    TextEncoding::Windows1252,
];

/// Decoding chain of the snapshot generator.
pub const SNAPSHOT_ENCODINGS: &[TextEncoding] = &[TextEncoding::Utf8, TextEncoding::Latin1];

/// Decoding chain of the retargeter. A leading BOM is detected first so it
/// can be written back.
pub const RETARGET_ENCODINGS: &[TextEncoding] = &[
    TextEncoding::Utf8Bom,
    TextEncoding::Utf8,
    TextEncoding::Windows1252,
    TextEncoding::Latin1,
];

/// Decoding chain of the image integrity check.
pub const CHECK_IMAGES_ENCODINGS: &[TextEncoding] = &[TextEncoding::Utf8, TextEncoding::Latin1];

/// Where a report is written.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum OutputDestination {
    /// Write to standard output.
    Stdout,
    /// Write to the specified file path.
    File(PathBuf),
}

impl OutputDestination {
    /// Interprets an `-o` argument; `-` means standard output.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            OutputDestination::Stdout
        } else {
            OutputDestination::File(PathBuf::from(arg))
        }
    }
}

/// Settings for `consolidate`.
#[derive(Debug, Clone)]
pub struct ConsolidateConfig {
    /// Canonical directory to walk.
    pub root: PathBuf,
    /// Report destination.
    pub output_destination: OutputDestination,
    /// Fixed dir/file/extension excludes plus user additions.
    pub matcher: IgnoreMatcher,
    /// Ordered decoding attempts.
    pub encodings: Vec<TextEncoding>,
    /// List files instead of writing the report.
    pub dry_run: bool,
}

/// Settings for `snapshot`.
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    pub root: PathBuf,
    pub output_destination: OutputDestination,
    /// Ignore-file rules, built-in custom excludes and user patterns.
    pub matcher: IgnoreMatcher,
    pub encodings: Vec<TextEncoding>,
    pub dry_run: bool,
}

/// Settings for `retarget`.
#[derive(Debug, Clone)]
pub struct RetargetConfig {
    /// Repository root; references resolve against it.
    pub root: PathBuf,
    /// The reference pattern and its replacement.
    pub rule: RewriteRule,
    /// Prunes the skip directories.
    pub matcher: IgnoreMatcher,
    /// Lowercase extensions of the files to rewrite.
    pub target_extensions: Vec<String>,
    pub encodings: Vec<TextEncoding>,
    /// Compute and report without writing.
    pub dry_run: bool,
}

/// Settings for `check-images`.
#[derive(Debug, Clone)]
pub struct CheckImagesConfig {
    pub root: PathBuf,
    pub matcher: IgnoreMatcher,
    pub encodings: Vec<TextEncoding>,
}
