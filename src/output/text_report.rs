// src/output/text_report.rs

//! The plain-text backup report written by `consolidate`.

use super::formatter::{format_path_for_display, format_size};
use super::ReportFormatter;
use crate::constants::{RULE_WIDTH, TEXT_REPORT_TITLE, TEXT_UNREADABLE_PLACEHOLDER};
use crate::core_types::{FileEntry, RunCounts};
use crate::processing::ReadOutcome;
use chrono::{DateTime, Local};
use std::io::{self, ErrorKind, Write};
use std::path::PathBuf;

/// Formats the consolidated backup: a header with a table of contents, one
/// ruled section per file, and a processed/skipped footer.
#[derive(Debug, Clone)]
pub struct TextReportFormatter {
    root: PathBuf,
    created: DateTime<Local>,
}

impl TextReportFormatter {
    /// Creates a formatter for a walk of `root` started at `created`.
    pub fn new(root: impl Into<PathBuf>, created: DateTime<Local>) -> Self {
        Self {
            root: root.into(),
            created,
        }
    }
}

fn heavy_rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn light_rule() -> String {
    "-".repeat(RULE_WIDTH)
}

impl ReportFormatter for TextReportFormatter {
    fn write_header(&self, writer: &mut dyn Write, files: &[FileEntry]) -> io::Result<()> {
        writeln!(writer, "{}", heavy_rule())?;
        writeln!(writer, "{}", TEXT_REPORT_TITLE)?;
        writeln!(writer, "{}", heavy_rule())?;
        writeln!(writer, "Created: {}", self.created.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(writer, "Project Directory: {}", self.root.display())?;
        writeln!(writer, "Total Files: {}", files.len())?;
        writeln!(writer, "{}", heavy_rule())?;
        writeln!(writer)?;

        writeln!(writer, "TABLE OF CONTENTS")?;
        writeln!(writer, "{}", light_rule())?;
        for (idx, file) in files.iter().enumerate() {
            writeln!(
                writer,
                "{:3}. {}",
                idx + 1,
                format_path_for_display(&file.relative_path)
            )?;
        }
        writeln!(writer)?;
        writeln!(writer, "{}", heavy_rule())?;
        writeln!(writer)
    }

    fn write_file(
        &self,
        writer: &mut dyn Write,
        file: &FileEntry,
        outcome: &ReadOutcome,
    ) -> io::Result<()> {
        writeln!(writer)?;
        writeln!(writer, "{}", heavy_rule())?;
        writeln!(writer, "FILE: {}", format_path_for_display(&file.relative_path))?;
        writeln!(writer, "{}", heavy_rule())?;
        writeln!(writer, "Path: {}", file.absolute_path.display())?;
        writeln!(writer, "Size: {}", format_size(file.size))?;
        writeln!(writer, "{}", light_rule())?;
        writeln!(writer)?;

        let body = match outcome {
            ReadOutcome::Decoded(decoded) => decoded.text.clone(),
            ReadOutcome::Undecodable => TEXT_UNREADABLE_PLACEHOLDER.to_string(),
            ReadOutcome::Failed(e) if e.kind() == ErrorKind::PermissionDenied => {
                TEXT_UNREADABLE_PLACEHOLDER.to_string()
            }
            ReadOutcome::Failed(e) => format!("Error reading file: {}", e),
        };
        writer.write_all(body.as_bytes())?;
        if !body.ends_with('\n') {
            writeln!(writer)?;
        }
        writeln!(writer)
    }

    fn write_footer(&self, writer: &mut dyn Write, counts: RunCounts) -> io::Result<()> {
        writeln!(writer)?;
        writeln!(writer, "{}", heavy_rule())?;
        writeln!(writer, "END OF BACKUP")?;
        writeln!(writer, "{}", heavy_rule())?;
        writeln!(writer, "Successfully processed: {} files", counts.processed)?;
        writeln!(writer, "Skipped: {} files", counts.skipped)?;
        writeln!(writer, "Total: {} files", counts.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::{DecodedText, TextEncoding};
    use chrono::TimeZone;
    use std::path::Path;

    fn formatter() -> TextReportFormatter {
        let created = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        TextReportFormatter::new("/proj", created)
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn decoded(text: &str) -> ReadOutcome {
        ReadOutcome::Decoded(DecodedText {
            text: text.to_string(),
            encoding: TextEncoding::Utf8,
        })
    }

    #[test]
    fn test_header_and_table_of_contents() {
        let files = vec![
            FileEntry::new(Path::new("/proj"), Path::new("a.txt"), Some(1)),
            FileEntry::new(Path::new("/proj"), Path::new("src/b.py"), Some(2)),
        ];
        let out = render(|w| formatter().write_header(w, &files));
        let rule = "=".repeat(70);
        let expected = format!(
            "{rule}\nPROJECT BACKUP\n{rule}\nCreated: 2024-03-09 14:05:07\nProject Directory: /proj\nTotal Files: 2\n{rule}\n\nTABLE OF CONTENTS\n{dash}\n  1. a.txt\n  2. src/b.py\n\n{rule}\n\n",
            rule = rule,
            dash = "-".repeat(70)
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_file_section_adds_missing_newline() {
        let file = FileEntry::new(Path::new("/proj"), Path::new("notes.txt"), Some(1234));
        let out = render(|w| formatter().write_file(w, &file, &decoded("no newline")));
        assert!(out.contains("FILE: notes.txt\n"));
        assert!(out.contains("Size: 1,234 bytes\n"));
        assert!(out.ends_with(&format!("{}\n\nno newline\n\n", "-".repeat(70))));
    }

    #[test]
    fn test_file_section_keeps_existing_newline() {
        let file = FileEntry::new(Path::new("/proj"), Path::new("a.txt"), None);
        let out = render(|w| formatter().write_file(w, &file, &decoded("line\n")));
        assert!(out.contains("Size: Unknown\n"));
        assert!(out.ends_with("\n\nline\n\n"));
    }

    #[test]
    fn test_placeholders() {
        let file = FileEntry::new(Path::new("/proj"), Path::new("x.bin"), Some(3));
        let undecodable = render(|w| formatter().write_file(w, &file, &ReadOutcome::Undecodable));
        assert!(undecodable.contains("[Binary or unreadable file - skipped]\n"));

        let denied = ReadOutcome::Failed(io::Error::new(ErrorKind::PermissionDenied, "denied"));
        let out = render(|w| formatter().write_file(w, &file, &denied));
        assert!(out.contains("[Binary or unreadable file - skipped]\n"));

        let other = ReadOutcome::Failed(io::Error::new(ErrorKind::Other, "disk on fire"));
        let out = render(|w| formatter().write_file(w, &file, &other));
        assert!(out.contains("Error reading file: disk on fire\n"));
    }

    #[test]
    fn test_footer_counts() {
        let counts = RunCounts {
            processed: 3,
            skipped: 1,
        };
        let out = render(|w| formatter().write_footer(w, counts));
        assert!(out.starts_with(&format!("\n{}\nEND OF BACKUP\n", "=".repeat(70))));
        assert!(
            out.ends_with("Successfully processed: 3 files\nSkipped: 1 files\nTotal: 4 files\n")
        );
    }
}
