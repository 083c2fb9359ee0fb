// src/output/dry_run.rs

use crate::core_types::FileEntry;
use crate::output::formatter::format_path_for_display;
use log::debug;
use std::io::{self, Write};

/// Writes the output for a dry run (-D).
///
/// Lists the relative paths of files that would be included, in the order
/// given. No file content is read.
pub fn write_dry_run_output(writer: &mut dyn Write, files: &[FileEntry]) -> io::Result<()> {
    debug!("Executing dry run output...");
    writeln!(writer, "\n--- Dry Run: Files that would be processed ---")?;
    for file in files {
        writeln!(writer, "- {}", format_path_for_display(&file.relative_path))?;
    }
    writeln!(writer, "--- End Dry Run ---")?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_dry_run_lists_in_given_order() {
        let root = Path::new("/absolute/path/to");
        let files = vec![
            FileEntry::new(root, Path::new("src/main.rs"), Some(100)),
            FileEntry::new(root, Path::new("README.md"), Some(100)),
        ];
        let mut buf = Vec::new();
        write_dry_run_output(&mut buf, &files).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "\n--- Dry Run: Files that would be processed ---\n- src/main.rs\n- README.md\n--- End Dry Run ---\n"
        );
    }

    #[test]
    fn test_dry_run_empty() {
        let mut buf = Vec::new();
        write_dry_run_output(&mut buf, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "\n--- Dry Run: Files that would be processed ---\n--- End Dry Run ---\n"
        );
    }
}
