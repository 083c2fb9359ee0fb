// src/output/mod.rs

//! Aggregate report generation.
//!
//! A report is a header (with a manifest of the included files), one section
//! per file, and a footer. [`generate_report`] drives a [`ReportFormatter`]
//! through that sequence, reading each file as it goes so only one file's
//! content is held in memory at a time.

use crate::cancellation::CancellationToken;
use crate::core_types::{FileEntry, RunCounts};
use crate::errors::Result;
use crate::processing::{read_text, FileReader, ReadOutcome, TextEncoding};
use log::debug;
use std::io::{self, Write};

pub mod dry_run;
pub mod formatter;
pub mod language;
pub mod markdown;
pub mod text_report;
pub mod tree;
pub mod writer; // Manages the output destination

pub use markdown::MarkdownFormatter;
pub use text_report::TextReportFormatter;

/// The layout of one aggregate report format.
pub trait ReportFormatter {
    /// Writes everything before the first file section.
    fn write_header(&self, writer: &mut dyn Write, files: &[FileEntry]) -> io::Result<()>;

    /// Writes one file's section. Unreadable files get a placeholder body.
    fn write_file(
        &self,
        writer: &mut dyn Write,
        file: &FileEntry,
        outcome: &ReadOutcome,
    ) -> io::Result<()>;

    /// Writes everything after the last file section.
    fn write_footer(&self, writer: &mut dyn Write, counts: RunCounts) -> io::Result<()>;
}

/// Writes a complete report for `files` in the given order.
///
/// Files that decode are counted as processed; undecodable or unreadable
/// files are counted as skipped and rendered with the formatter's
/// placeholder.
///
/// # Errors
/// Returns `Error::Interrupted` if `token` is cancelled between files (the
/// sections written so far are flushed first), or an I/O error if the writer
/// fails.
pub fn generate_report(
    formatter: &dyn ReportFormatter,
    files: &[FileEntry],
    reader: &dyn FileReader,
    encodings: &[TextEncoding],
    token: &CancellationToken,
    writer: &mut dyn Write,
) -> Result<RunCounts> {
    debug!("Starting report generation for {} files...", files.len());
    formatter.write_header(writer, files)?;

    let mut counts = RunCounts::default();
    for (idx, file) in files.iter().enumerate() {
        if let Err(e) = token.check() {
            writer.flush()?;
            return Err(e);
        }
        debug!(
            "Processing [{}/{}]: {}",
            idx + 1,
            files.len(),
            file.display_path()
        );

        let outcome = read_text(reader, &file.absolute_path, encodings);
        match outcome {
            ReadOutcome::Decoded(_) => counts.processed += 1,
            ReadOutcome::Undecodable | ReadOutcome::Failed(_) => counts.skipped += 1,
        }
        formatter.write_file(writer, file, &outcome)?;
    }

    formatter.write_footer(writer, counts)?;
    writer.flush()?;
    debug!(
        "Report complete. Processed: {}, skipped: {}",
        counts.processed, counts.skipped
    );
    Ok(counts)
}
