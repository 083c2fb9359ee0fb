//! Image reference tooling for static sites.
//!
//! - [`rewriter`]: the reference pattern and its substitution.
//! - [`retarget`]: applies the rewriter to every HTML, CSS and JS file in place.
//! - [`integrity`]: verifies that `<img>` sources exist on disk.

pub mod integrity;
pub mod retarget;
pub mod rewriter;

pub use integrity::{check_images, write_integrity_report, IntegrityReport};
pub use retarget::{retarget, write_retarget_summary, RetargetReport};
pub use rewriter::{MatchRecord, ReferenceRewriter, Rewrite, RewriteRule};
