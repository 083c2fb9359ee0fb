// src/images/retarget.rs

use super::rewriter::{MatchRecord, ReferenceRewriter};
use crate::cancellation::CancellationToken;
use crate::config::RetargetConfig;
use crate::core_types::{slash_path, FileEntry};
use crate::discovery::discover_files;
use crate::errors::{io_error_with_path, Result};
use crate::filtering::has_extension_in;
use crate::processing::{read_text, FileReader, ReadOutcome};
use log::{debug, info, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Outcome of a retarget run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RetargetReport {
    /// Replacement counts of files with at least one reference.
    pub per_file: BTreeMap<PathBuf, usize>,
    /// Files actually rewritten on disk.
    pub files_written: usize,
    /// Files that could not be read, encoded or written.
    pub failures: usize,
    /// References whose expected WebP file does not exist.
    pub missing: BTreeSet<MatchRecord>,
}

impl RetargetReport {
    /// Sum of all per-file replacements.
    pub fn total_replacements(&self) -> usize {
        self.per_file.values().sum()
    }
}

/// Rewrites image references in every target file under the configured root.
///
/// Files are only written when at least one reference was replaced and the
/// text changed, and never in dry-run mode. A rewritten file is encoded with
/// the codec it was decoded with. Per-file failures are logged and counted.
///
/// # Errors
/// Returns `Error::Interrupted` on cancellation, or `Error::Config` if the
/// rewrite rule does not compile.
pub fn retarget(
    config: &RetargetConfig,
    reader: &dyn FileReader,
    token: &CancellationToken,
) -> Result<RetargetReport> {
    let rewriter = ReferenceRewriter::new(config.rule.clone())?;
    let discovery = discover_files(&config.root, &config.matcher, token)?;
    let targets: Vec<&FileEntry> = discovery
        .files
        .iter()
        .filter(|f| has_extension_in(&f.relative_path, &config.target_extensions))
        .collect();
    info!(
        "Scanning {} files under '{}'{}",
        targets.len(),
        config.root.display(),
        if config.dry_run { " (dry run)" } else { "" }
    );

    let mut report = RetargetReport::default();
    for file in targets {
        token.check()?;

        let decoded = match read_text(reader, &file.absolute_path, &config.encodings) {
            ReadOutcome::Decoded(decoded) => decoded,
            ReadOutcome::Undecodable | ReadOutcome::Failed(_) => {
                report.failures += 1;
                continue;
            }
        };

        let rewrite = rewriter.rewrite(
            &decoded.text,
            &file.relative_path,
            &config.root,
            &mut report.missing,
        );
        if rewrite.replacements == 0 {
            continue;
        }
        debug!(
            "{}: {} replacement(s)",
            file.display_path(),
            rewrite.replacements
        );
        report
            .per_file
            .insert(file.relative_path.clone(), rewrite.replacements);

        if config.dry_run || rewrite.text == decoded.text {
            continue;
        }
        let written = decoded
            .encoding
            .encode(&rewrite.text, &file.absolute_path)
            .and_then(|bytes| {
                fs::write(&file.absolute_path, bytes)
                    .map_err(|e| io_error_with_path(e, &file.absolute_path))
            });
        match written {
            Ok(()) => report.files_written += 1,
            Err(e) => {
                warn!("Skipping '{}': {}", file.display_path(), e);
                report.failures += 1;
            }
        }
    }

    info!(
        "Retarget complete. Replacements: {}, files written: {}, failures: {}",
        report.total_replacements(),
        report.files_written,
        report.failures
    );
    Ok(report)
}

/// Prints the human-readable summary of a run.
///
/// Per-file counts and missing references are listed case-insensitively
/// sorted by path.
pub fn write_retarget_summary(
    writer: &mut dyn Write,
    report: &RetargetReport,
    dry_run: bool,
) -> io::Result<()> {
    if dry_run {
        writeln!(writer, "DRY RUN: no files written.")?;
        writeln!(writer)?;
    }

    if !report.per_file.is_empty() {
        let mut per_file: Vec<(String, usize)> = report
            .per_file
            .iter()
            .map(|(path, count)| (slash_path(path), *count))
            .collect();
        per_file.sort_by_key(|(path, _)| path.to_lowercase());

        writeln!(writer, "Replacements per file:")?;
        for (path, count) in per_file {
            writeln!(writer, "  {}: {}", path, count)?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "Total replacements: {}", report.total_replacements())?;

    if !report.missing.is_empty() {
        let mut missing: Vec<&MatchRecord> = report.missing.iter().collect();
        missing.sort_by_key(|m| m.sort_key());

        writeln!(writer)?;
        writeln!(
            writer,
            "Missing expected WebP files (reference found, but file does not exist):"
        )?;
        for record in missing {
            writeln!(
                writer,
                "  {}: {} -> {}",
                slash_path(&record.file),
                record.original,
                record.expected
            )?;
        }
    }
    writer.flush()
}
