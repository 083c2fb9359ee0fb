//! The `dirscribe` prelude for convenient library usage.
//!
//! This module re-exports the most commonly used types, traits, and functions
//! from the `dirscribe` library.
//!
//! # Example
//!
//! ```
//! use dirscribe::prelude::*;
//! # fn main() -> Result<()> {
//!
//! let site = tempfile::tempdir()?;
//! std::fs::write(site.path().join("index.html"), r#"<img src="assets/images/a.png">"#)?;
//!
//! let config = CheckImagesConfig::for_root(site.path());
//! let report = check_images(&config, &DiskReader, &CancellationToken::new())?;
//! assert_eq!(report.checked, 1);
//! assert!(!report.is_ok());
//!
//! # Ok(())
//! # }
//! ```

pub use crate::cancellation::CancellationToken;
pub use crate::cli::{CheckImagesArgs, ConsolidateArgs, RetargetArgs, SnapshotArgs};
pub use crate::config::{
    CheckImagesConfig, ConsolidateConfig, OutputDestination, RetargetConfig, SnapshotConfig,
};
pub use crate::core_types::{EntryKind, FileEntry, RunCounts};
pub use crate::errors::{Error, Result};
pub use crate::filtering::{IgnoreMatcher, IgnoreRule};
pub use crate::images::{
    check_images, retarget, IntegrityReport, MatchRecord, ReferenceRewriter, RetargetReport,
    RewriteRule,
};
pub use crate::output::ReportFormatter;
pub use crate::processing::{DiskReader, FileReader, ReadOutcome, TextEncoding};
pub use crate::{consolidate, run_consolidate, run_snapshot, snapshot};
