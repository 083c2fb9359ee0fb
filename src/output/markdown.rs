// src/output/markdown.rs

use super::formatter::format_path_for_display;
use super::language::fence_language;
use super::ReportFormatter;
use crate::constants::MARKDOWN_UNDECODABLE_PLACEHOLDER;
use crate::core_types::{FileEntry, RunCounts};
use crate::processing::ReadOutcome;
use std::io::{self, Write};
use std::path::PathBuf;

/// Formats the markdown codebase snapshot: a header, the project tree and
/// one fenced block per file, each followed by a `<file>` tag and a rule.
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    root: PathBuf,
    tree: Vec<String>,
}

impl MarkdownFormatter {
    /// `tree` is the pre-rendered structure from [`super::tree::build_tree`].
    pub fn new(root: impl Into<PathBuf>, tree: Vec<String>) -> Self {
        Self {
            root: root.into(),
            tree,
        }
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn write_header(&self, writer: &mut dyn Write, files: &[FileEntry]) -> io::Result<()> {
        writeln!(writer, "# Codebase Snapshot")?;
        writeln!(writer)?;
        writeln!(writer, "Generated from: {}", self.root.display())?;
        writeln!(writer, "Total files: {}", files.len())?;
        writeln!(writer)?;

        writeln!(writer, "## Project Structure")?;
        writeln!(writer)?;
        writeln!(writer, "```")?;
        for line in &self.tree {
            writeln!(writer, "{}", line)?;
        }
        writeln!(writer, "```")?;
        writeln!(writer)?;

        writeln!(writer, "## File Contents")?;
        writeln!(writer)
    }

    fn write_file(
        &self,
        writer: &mut dyn Write,
        file: &FileEntry,
        outcome: &ReadOutcome,
    ) -> io::Result<()> {
        let rel = format_path_for_display(&file.relative_path);
        let content = match outcome {
            ReadOutcome::Decoded(decoded) => decoded.text.clone(),
            ReadOutcome::Undecodable => MARKDOWN_UNDECODABLE_PLACEHOLDER.to_string(),
            ReadOutcome::Failed(e) => format!("[Error reading file: {}]", e),
        };

        writeln!(writer, "### {}", rel)?;
        writeln!(writer)?;
        writeln!(writer, "```{}", fence_language(file.extension.as_deref()))?;
        writer.write_all(content.as_bytes())?;
        if !content.ends_with('\n') {
            writeln!(writer)?;
        }
        writeln!(writer, "```")?;
        writeln!(writer)?;
        writeln!(
            writer,
            "<file path='{}' size='{} characters'></file>",
            rel,
            content.chars().count()
        )?;
        writeln!(writer)?;
        writeln!(writer, "---")?;
        writeln!(writer)
    }

    fn write_footer(&self, writer: &mut dyn Write, counts: RunCounts) -> io::Result<()> {
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "Processed: {} files", counts.processed)?;
        writeln!(writer, "Skipped: {} files", counts.skipped)?;
        writeln!(writer, "Total: {} files", counts.total())
    }
}
