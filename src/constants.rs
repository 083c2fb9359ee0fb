// src/constants.rs

//! Fixed defaults shared by the tools. These seed the configuration values
//! built at startup; nothing reads them directly at match time.

/// Width of the `=` / `-` rule lines in the text report.
pub const RULE_WIDTH: usize = 70;

/// Title line of the text report.
pub const TEXT_REPORT_TITLE: &str = "PROJECT BACKUP";

/// Default file name of the consolidated text report.
pub const DEFAULT_BACKUP_FILE: &str = "project_backup.txt";

/// Default file name of the markdown snapshot.
pub const DEFAULT_SNAPSHOT_FILE: &str = "snapshot.md";

/// Default ignore file read by the snapshot tool, relative to the root.
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Directories never descended into by the consolidator.
pub const CONSOLIDATE_EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "__pycache__",
    "node_modules",
    "venv",
    "env",
    ".venv",
    "dist",
    "build",
    ".next",
    ".cache",
    "coverage",
];

/// File names always skipped by the consolidator.
pub const CONSOLIDATE_EXCLUDED_FILES: &[&str] = &[".DS_Store", DEFAULT_BACKUP_FILE];

/// Extensions assumed to be binary. Matched case-insensitively against the
/// final suffix only.
pub const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "ico", "svg", // images
    "mp3", "mp4", "wav", "avi", "mov", // media
    "zip", "tar", "gz", "rar", "7z", // archives
    "pdf", "doc", "docx", "xls", "xlsx", // documents
    "exe", "bin", "dat", // executables
    "pyc", "pyo", // python bytecode
    "so", "dylib", "dll", // shared libraries
];

/// Directories never descended into by the snapshot generator.
pub const SNAPSHOT_EXCLUDED_DIRS: &[&str] = &[".git"];

/// Built-in snapshot excludes: glob against the relative path, or substring.
pub const SNAPSHOT_CUSTOM_EXCLUDES: &[&str] = &[
    DEFAULT_SNAPSHOT_FILE,
    "*.pyc",
    "__pycache__",
    ".DS_Store",
    "Thumbs.db",
    "*.tmp",
    "*.log",
];

/// Directories pruned by the retargeter.
pub const RETARGET_SKIP_DIRS: &[&str] = &[".git", "node_modules", "__pycache__", ".venv", "venv"];

/// Extensions of files the retargeter rewrites.
pub const RETARGET_FILE_EXTENSIONS: &[&str] = &["html", "css", "js"];

/// Directories pruned by the image integrity check.
pub const CHECK_IMAGES_SKIP_DIRS: &[&str] = &[".git", "node_modules", "unused"];

/// Placeholder for text-report entries that could not be decoded or opened.
pub const TEXT_UNREADABLE_PLACEHOLDER: &str = "[Binary or unreadable file - skipped]";

/// Placeholder for markdown entries that could not be decoded.
pub const MARKDOWN_UNDECODABLE_PLACEHOLDER: &str =
    "[Binary file or encoding error - content not displayable]";

/// Inline tree marker for a directory that could not be listed.
pub const PERMISSION_DENIED_MARKER: &str = "[Permission Denied]";
