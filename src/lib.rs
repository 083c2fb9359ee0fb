//! `dirscribe` is a library and command-line tool for working with the files
//! of small web and script projects as a whole.
//!
//! It bundles three independent tools that share one walking, filtering and
//! decoding core:
//!
//! 1.  **Consolidate**: concatenate every text file into a plain-text backup
//!     report with a table of contents.
//! 2.  **Snapshot**: write a Markdown snapshot (project tree plus fenced file
//!     contents), honouring a `.gitignore`-style pattern file.
//! 3.  **Retarget**: rewrite `assets/images/...(jpg|jpeg|png)` references in
//!     HTML, CSS and JavaScript to their `assets/images/web/*.webp` versions,
//!     re-encoding each file exactly as it was read.
//!
//! A fourth helper, [`images::check_images`], verifies that every local
//! `<img>` source referenced by the HTML pages exists.
//!
//! # Example: Library Usage
//!
//! ```
//! use dirscribe::prelude::*;
//! use std::fs;
//! use tempfile::tempdir;
//!
//! # fn main() -> Result<()> {
//! let temp = tempdir()?;
//! fs::write(temp.path().join("app.py"), "print('hi')\n")?;
//! fs::write(temp.path().join("logo.png"), [0x89, 0x50])?;
//!
//! let config = ConsolidateConfig::try_from(ConsolidateArgs {
//!     root: temp.path().to_string_lossy().into_owned(),
//!     output_file: "-".to_string(),
//!     exclude_extensions: None,
//!     exclude_dirs: None,
//!     dry_run: false,
//! })?;
//!
//! let mut report = Vec::new();
//! let counts = consolidate(
//!     &config,
//!     &DiskReader,
//!     &CancellationToken::new(),
//!     chrono::Local::now(),
//!     &mut report,
//! )?;
//! assert_eq!(counts.processed, 1);
//!
//! let report = String::from_utf8(report).unwrap();
//! assert!(report.contains("FILE: app.py"));
//! assert!(!report.contains("logo.png"));
//! # Ok(())
//! # }
//! ```

pub mod cancellation;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core_types;
pub mod discovery;
pub mod errors;
pub mod filtering;
pub mod images;
pub mod output;
pub mod prelude;
pub mod processing;
pub mod signal;

// Re-export key public types for easier use as a library
pub use config::{
    CheckImagesConfig, ConsolidateConfig, OutputDestination, RetargetConfig, SnapshotConfig,
};
pub use core_types::{FileEntry, RunCounts};

use crate::cancellation::CancellationToken;
use crate::discovery::{discover_files, Discovery};
use crate::errors::Result;
use crate::filtering::IgnoreMatcher;
use crate::output::dry_run::write_dry_run_output;
use crate::output::tree::build_tree;
use crate::output::writer::{finalize_output, setup_output_writer};
use crate::output::{generate_report, MarkdownFormatter, TextReportFormatter};
use crate::processing::{DiskReader, FileReader};
use chrono::{DateTime, Local};
use log::{info, warn};
use std::io::Write;
use std::path::Path;

fn discover(root: &Path, matcher: &IgnoreMatcher, token: &CancellationToken) -> Result<Discovery> {
    let discovery = discover_files(root, matcher, token)?;
    for path in &discovery.unreadable {
        warn!("Could not read '{}'; its contents are not included.", path.display());
    }
    info!("Found {} files to include.", discovery.files.len());
    Ok(discovery)
}

/// Writes the plain-text backup report for `config.root` to `writer`.
///
/// In dry-run mode only the list of files that would be included is written
/// and nothing is read.
///
/// # Errors
/// Returns `Error::Interrupted` on cancellation or an I/O error if `writer`
/// fails. Unreadable files are not errors.
pub fn consolidate(
    config: &ConsolidateConfig,
    reader: &dyn FileReader,
    token: &CancellationToken,
    created: DateTime<Local>,
    writer: &mut dyn Write,
) -> Result<RunCounts> {
    let discovery = discover(&config.root, &config.matcher, token)?;
    if config.dry_run {
        write_dry_run_output(writer, &discovery.files)?;
        return Ok(RunCounts::default());
    }
    let formatter = TextReportFormatter::new(&config.root, created);
    generate_report(
        &formatter,
        &discovery.files,
        reader,
        &config.encodings,
        token,
        writer,
    )
}

/// Writes the Markdown snapshot for `config.root` to `writer`.
///
/// # Errors
/// Same as [`consolidate`].
pub fn snapshot(
    config: &SnapshotConfig,
    reader: &dyn FileReader,
    token: &CancellationToken,
    writer: &mut dyn Write,
) -> Result<RunCounts> {
    let discovery = discover(&config.root, &config.matcher, token)?;
    if config.dry_run {
        write_dry_run_output(writer, &discovery.files)?;
        return Ok(RunCounts::default());
    }
    let tree = build_tree(&config.root, &config.matcher);
    let formatter = MarkdownFormatter::new(&config.root, tree);
    generate_report(
        &formatter,
        &discovery.files,
        reader,
        &config.encodings,
        token,
        writer,
    )
}

/// Runs `consolidate` against the disk, writing to the configured destination
/// (standard output for a dry run).
///
/// The destination is flushed even when the run is interrupted, so a partial
/// report keeps every section written so far.
pub fn run_consolidate(config: &ConsolidateConfig, token: &CancellationToken) -> Result<RunCounts> {
    let destination = report_destination(&config.output_destination, config.dry_run);
    let mut writer = setup_output_writer(&destination)?;
    let result = consolidate(config, &DiskReader, token, Local::now(), &mut *writer);
    let finalized = finalize_output(writer, &destination);
    let counts = result?;
    finalized?;
    Ok(counts)
}

/// Runs `snapshot` against the disk; see [`run_consolidate`].
pub fn run_snapshot(config: &SnapshotConfig, token: &CancellationToken) -> Result<RunCounts> {
    let destination = report_destination(&config.output_destination, config.dry_run);
    let mut writer = setup_output_writer(&destination)?;
    let result = snapshot(config, &DiskReader, token, &mut *writer);
    let finalized = finalize_output(writer, &destination);
    let counts = result?;
    finalized?;
    Ok(counts)
}

fn report_destination(configured: &OutputDestination, dry_run: bool) -> OutputDestination {
    if dry_run {
        OutputDestination::Stdout
    } else {
        configured.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ConsolidateArgs, SnapshotArgs};
    use crate::output::tests::RecordingReader;
    use chrono::TimeZone;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn consolidate_config(root: &Path, dry_run: bool) -> ConsolidateConfig {
        ConsolidateConfig::try_from(ConsolidateArgs {
            root: root.to_string_lossy().into_owned(),
            output_file: "project_backup.txt".to_string(),
            exclude_extensions: None,
            exclude_dirs: None,
            dry_run,
        })
        .unwrap()
    }

    fn manifest(report: &str) -> Vec<String> {
        report
            .lines()
            .skip_while(|l| *l != "TABLE OF CONTENTS")
            .skip(2)
            .take_while(|l| !l.is_empty())
            .map(|l| l.trim_start().splitn(2, ". ").nth(1).unwrap_or("").to_string())
            .collect()
    }

    #[test]
    fn test_excluded_extensions_are_never_read() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "a.txt", "a");
        touch(temp.path(), "img/photo.JPG", "not really a jpeg");
        touch(temp.path(), "dist.tar.gz", "zzz");
        let config = consolidate_config(temp.path(), false);

        let mut reader = RecordingReader::default();
        for file in ["a.txt", "img/photo.JPG", "dist.tar.gz"] {
            reader
                .contents
                .insert(config.root.join(file), file.as_bytes().to_vec());
        }
        let mut out = Vec::new();
        let counts = consolidate(
            &config,
            &reader,
            &CancellationToken::new(),
            Local::now(),
            &mut out,
        )
        .unwrap();

        assert_eq!(counts.total(), 1);
        assert_eq!(*reader.reads.borrow(), vec![config.root.join("a.txt")]);
    }

    #[test]
    fn test_manifest_is_sorted_and_pruned() {
        let temp = tempdir().unwrap();
        for rel in [
            "z.md",
            "src/b.py",
            "src/a.py",
            "node_modules/x/i.js",
            "deep/build/o.txt",
            "A.txt",
        ] {
            touch(temp.path(), rel, "x");
        }
        let config = consolidate_config(temp.path(), false);
        let created = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut out = Vec::new();
        consolidate(&config, &DiskReader, &CancellationToken::new(), created, &mut out).unwrap();

        let report = String::from_utf8(out).unwrap();
        assert_eq!(manifest(&report), vec!["A.txt", "src/a.py", "src/b.py", "z.md"]);
        assert!(report.contains("Created: 2024-01-01 00:00:00\n"));
        assert!(report.contains("Successfully processed: 4 files\n"));
    }

    #[test]
    fn test_consolidate_dry_run_lists_without_reading() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "one.txt", "1");
        let config = consolidate_config(temp.path(), true);
        let reader = RecordingReader::default();
        let mut out = Vec::new();
        consolidate(&config, &reader, &CancellationToken::new(), Local::now(), &mut out).unwrap();

        assert!(reader.reads.borrow().is_empty());
        assert!(String::from_utf8(out).unwrap().contains("- one.txt\n"));
    }

    #[test]
    fn test_snapshot_report_structure() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("proj");
        touch(&root, ".gitignore", "secret/\n");
        touch(&root, "secret/key.txt", "hunter2");
        touch(&root, "app.py", "print(1)");
        touch(&root, "debug.log", "noise");

        let config = SnapshotConfig::try_from(SnapshotArgs {
            root: root.to_string_lossy().into_owned(),
            output_file: "snapshot.md".to_string(),
            ignore_file: None,
            no_ignore_file: false,
            excludes: None,
            exclude_extensions: None,
            dry_run: false,
        })
        .unwrap();
        let mut out = Vec::new();
        let counts = snapshot(&config, &DiskReader, &CancellationToken::new(), &mut out).unwrap();
        let md = String::from_utf8(out).unwrap();

        assert_eq!(counts.processed, 2);
        assert!(md.contains("Total files: 2\n"));
        assert!(md.contains("```\nproj/\n├── .gitignore\n└── app.py\n```\n"));
        assert!(md.contains("### app.py\n\n```python\nprint(1)\n```\n"));
        assert!(!md.contains("hunter2"));
        assert!(!md.contains("debug.log"));
    }

    #[test]
    fn test_run_consolidate_writes_destination() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "keep.txt", "kept");
        let out_path: PathBuf = temp.path().join("out/backup.txt");
        let config = ConsolidateConfig::try_from(ConsolidateArgs {
            root: temp.path().to_string_lossy().into_owned(),
            output_file: out_path.to_string_lossy().into_owned(),
            exclude_extensions: None,
            exclude_dirs: None,
            dry_run: false,
        })
        .unwrap();

        let counts = run_consolidate(&config, &CancellationToken::new()).unwrap();
        assert_eq!(counts.processed, 1);
        let report = fs::read_to_string(out_path).unwrap();
        assert!(report.contains("FILE: keep.txt\n"));
    }
}
