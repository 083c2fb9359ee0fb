// src/cli.rs

use clap::{Args, Parser, Subcommand};

/// Directory tooling for small web and script projects.
///
/// dirscribe walks a project tree and either concatenates every included file
/// into one report (`consolidate`, `snapshot`) or rewrites image references in
/// HTML, CSS and JavaScript sources in place (`retarget`).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// The available tools.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Combine every project file into a single plain-text backup report.
    Consolidate(ConsolidateArgs),
    /// Write a Markdown snapshot of the codebase, honouring an ignore file.
    Snapshot(SnapshotArgs),
    /// Point assets/images[/photos]/<name>.(jpg|jpeg|png) references at web/<name>.webp.
    Retarget(RetargetArgs),
    /// Check that every <img src="assets/images/..."> in HTML files exists.
    CheckImages(CheckImagesArgs),
}

/// Arguments for `consolidate`.
#[derive(Args, Debug, Clone)]
pub struct ConsolidateArgs {
    /// Directory to scan.
    #[arg(default_value = ".")]
    pub root: String,

    /// Report file to write ("-" for stdout). Its name is never included in the report.
    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        default_value = crate::constants::DEFAULT_BACKUP_FILE
    )]
    pub output_file: String,

    /// Additional extensions to treat as binary and skip (case-insensitive, repeatable).
    #[arg(short = 'x', long = "exclude-ext", value_name = "EXT", num_args = 1..)]
    pub exclude_extensions: Option<Vec<String>>,

    /// Additional directory names to skip at any depth (repeatable).
    #[arg(long = "exclude-dir", value_name = "NAME", num_args = 1..)]
    pub exclude_dirs: Option<Vec<String>>,

    /// List the files that would be included, without writing the report.
    #[arg(short = 'D', long, action = clap::ArgAction::SetTrue)]
    pub dry_run: bool,
}

/// Arguments for `snapshot`.
#[derive(Args, Debug, Clone)]
pub struct SnapshotArgs {
    /// Directory to scan.
    #[arg(default_value = ".")]
    pub root: String,

    /// Markdown file to write ("-" for stdout). Its name is never included in the snapshot.
    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        default_value = crate::constants::DEFAULT_SNAPSHOT_FILE
    )]
    pub output_file: String,

    /// Ignore-pattern file (default: .gitignore in the root).
    #[arg(long, value_name = "PATH", conflicts_with = "no_ignore_file")]
    pub ignore_file: Option<String>,

    /// Do not read any ignore-pattern file.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub no_ignore_file: bool,

    /// Extra exclude patterns: glob against the relative path, or substring of it (repeatable).
    #[arg(short = 'e', long = "exclude", value_name = "PATTERN", num_args = 1..)]
    pub excludes: Option<Vec<String>>,

    /// Extensions to skip without reading (case-insensitive, repeatable).
    #[arg(short = 'x', long = "exclude-ext", value_name = "EXT", num_args = 1..)]
    pub exclude_extensions: Option<Vec<String>>,

    /// List the files that would be included, without writing the snapshot.
    #[arg(short = 'D', long, action = clap::ArgAction::SetTrue)]
    pub dry_run: bool,
}

/// Arguments for `retarget`.
#[derive(Args, Debug, Clone)]
pub struct RetargetArgs {
    /// Repository root (default: nearest ancestor of the current directory containing .git).
    #[arg(long, value_name = "DIR")]
    pub root: Option<String>,

    /// Print a summary but do not write any changes.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub dry_run: bool,
}

/// Arguments for `check-images`.
#[derive(Args, Debug, Clone)]
pub struct CheckImagesArgs {
    /// Site root that image paths are relative to.
    #[arg(default_value = ".")]
    pub root: String,
}
