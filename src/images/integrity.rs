// src/images/integrity.rs

//! Checks that local `<img>` sources referenced by HTML pages exist, and lists
//! the numbered photos available for assignment.

use crate::cancellation::CancellationToken;
use crate::config::CheckImagesConfig;
use crate::core_types::slash_path;
use crate::discovery::discover_files;
use crate::errors::{Error, Result};
use crate::processing::{read_text, FileReader};
use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

const IMG_TAG_PATTERN: &str = r#"<img[^>]+src=["']([^"']+)["'][^>]*>"#;
// Applied to a whole tag; the first `src=` wins, `data-src=` included.
const SRC_ATTR_PATTERN: &str = r#"src=["']([^"']+)["']"#;
const PHOTO_NAME_PATTERN: &str = r"^photo(\d+)\.(jpg|jpeg|png|webp)$";
const LOCAL_IMAGE_PREFIX: &str = "assets/images/";
const PHOTOS_DIR: &str = "assets/images/photos";

/// A referenced image that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingImage {
    /// The page that first referenced it, relative to the root.
    pub file: PathBuf,
    /// The `src` attribute as written.
    pub src: String,
    /// Where the image was looked for.
    pub full_path: PathBuf,
}

/// A `photo<N>.<ext>` file in the photos directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub number: u64,
    pub filename: String,
}

/// Outcome of an integrity check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    /// Number of HTML pages scanned.
    pub html_files: usize,
    /// Number of distinct local image sources checked.
    pub checked: usize,
    pub missing: Vec<MissingImage>,
    /// Numbered photos sorted by number; `None` when the directory is absent.
    pub photos: Option<Vec<Photo>>,
}

impl IntegrityReport {
    /// True when every referenced image exists.
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }
}

fn compile(pattern: &str, case_insensitive: bool) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| Error::Config(format!("Invalid pattern '{}': {}", pattern, e)))
}

/// Strips any `?query` or `#fragment` from a `src` value.
fn file_part(src: &str) -> &str {
    src.split(['?', '#']).next().unwrap_or(src)
}

/// Scans HTML pages under the root for `<img src="assets/images/...">`.
///
/// Each distinct `src` is checked once, relative to the root, after dropping
/// its query string and fragment. Pages that cannot be read are skipped with
/// a warning.
///
/// # Errors
/// Returns `Error::Interrupted` on cancellation.
pub fn check_images(
    config: &CheckImagesConfig,
    reader: &dyn FileReader,
    token: &CancellationToken,
) -> Result<IntegrityReport> {
    let img_tag = compile(IMG_TAG_PATTERN, true)?;
    let src_attr = compile(SRC_ATTR_PATTERN, false)?;
    let discovery = discover_files(&config.root, &config.matcher, token)?;
    let pages: Vec<_> = discovery
        .files
        .iter()
        .filter(|f| f.extension.as_deref() == Some("html"))
        .collect();

    let mut report = IntegrityReport {
        html_files: pages.len(),
        ..Default::default()
    };
    let mut seen: HashSet<String> = HashSet::new();

    for page in pages {
        token.check()?;
        let outcome = read_text(reader, &page.absolute_path, &config.encodings);
        let Some(text) = outcome.text() else {
            continue;
        };

        for tag in img_tag.find_iter(text) {
            let Some(src) = src_attr
                .captures(tag.as_str())
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
            else {
                continue;
            };
            if !src.starts_with(LOCAL_IMAGE_PREFIX) || !seen.insert(src.to_string()) {
                continue;
            }
            let full_path = config.root.join(file_part(src));
            if !full_path.exists() {
                debug!("Missing image '{}' in {}", src, page.display_path());
                report.missing.push(MissingImage {
                    file: page.relative_path.clone(),
                    src: src.to_string(),
                    full_path,
                });
            }
        }
    }
    report.checked = seen.len();
    report.photos = photo_inventory(&config.root.join(PHOTOS_DIR))?;
    Ok(report)
}

/// Lists `photo<N>.<jpg|jpeg|png|webp>` files in `dir`, sorted by `N`.
///
/// Returns `None` when the directory does not exist or cannot be listed.
pub fn photo_inventory(dir: &Path) -> Result<Option<Vec<Photo>>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            warn!("Cannot list photos in '{}': {}", dir.display(), e);
            return Ok(None);
        }
    };

    let photo_name = compile(PHOTO_NAME_PATTERN, true)?;
    let mut photos: Vec<Photo> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let filename = entry.file_name().to_string_lossy().into_owned();
            let number = photo_name
                .captures(&filename)?
                .get(1)?
                .as_str()
                .parse::<u64>()
                .ok()?;
            Some(Photo { number, filename })
        })
        .collect();
    photos.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.filename.cmp(&b.filename)));
    Ok(Some(photos))
}

/// Prints the check results and the photo inventory.
pub fn write_integrity_report(writer: &mut dyn Write, report: &IntegrityReport) -> io::Result<()> {
    writeln!(writer, "=== IMAGE INTEGRITY CHECK ===")?;
    writeln!(
        writer,
        "Checking {} HTML files for image references...",
        report.html_files
    )?;
    writeln!(writer, "Checked {} unique image references", report.checked)?;

    if !report.is_ok() {
        writeln!(writer)?;
        writeln!(writer, "MISSING IMAGES FOUND:")?;
        for image in &report.missing {
            writeln!(
                writer,
                "  {}: {} ({})",
                slash_path(&image.file),
                image.src,
                image.full_path.display()
            )?;
        }
        writeln!(writer)?;
        writeln!(writer, "{} missing image(s) detected.", report.missing.len())?;
        return writer.flush();
    }
    writeln!(writer, "All image references are valid")?;

    writeln!(writer)?;
    writeln!(writer, "=== PHOTO INVENTORY ===")?;
    match &report.photos {
        None => writeln!(writer, "No photos directory found at {}/", PHOTOS_DIR)?,
        Some(photos) => {
            writeln!(writer, "Available photos for auto-assignment:")?;
            for photo in photos {
                writeln!(writer, "  photo{}: {}", photo.number, photo.filename)?;
            }
            writeln!(writer)?;
            match (photos.first(), photos.last()) {
                (Some(first), Some(last)) => writeln!(
                    writer,
                    "Recommended range for assignment: photo{} - photo{}",
                    first.number, last.number
                )?,
                _ => writeln!(writer, "No numbered photos found in {}/", PHOTOS_DIR)?,
            }
        }
    }
    writeln!(writer)?;
    writeln!(writer, "Image integrity check passed")?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::DiskReader;
    use tempfile::tempdir;

    fn write_file(root: &Path, rel: &str, bytes: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, bytes).unwrap();
    }

    fn check(root: &Path) -> IntegrityReport {
        check_images(
            &CheckImagesConfig::for_root(root),
            &DiskReader,
            &CancellationToken::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_missing_and_present_images() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write_file(root, "assets/images/web/ok.webp", b"");
        write_file(
            root,
            "index.html",
            br#"<IMG alt="x" src="assets/images/web/ok.webp?v=3"><img src='assets/images/gone.png'>"#,
        );
        write_file(
            root,
            "about.html",
            br#"<img src="assets/images/gone.png"><img src="https://cdn.example/x.png">"#,
        );
        write_file(root, "unused/old.html", br#"<img src="assets/images/old.png">"#);

        let report = check(root);
        assert_eq!(report.html_files, 2);
        assert_eq!(report.checked, 2);
        assert!(!report.is_ok());
        assert_eq!(report.missing.len(), 1);
        assert_eq!(report.missing[0].src, "assets/images/gone.png");
        // Pages are scanned in path order, so about.html reports it first.
        assert_eq!(report.missing[0].file, PathBuf::from("about.html"));
    }

    #[test]
    fn test_first_src_attribute_is_checked() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write_file(root, "assets/images/placeholder.gif", b"");
        write_file(
            root,
            "gallery.html",
            br#"<img data-src="assets/images/lazy.png" src="assets/images/placeholder.gif"><img SRC="assets/images/upper.png">"#,
        );

        let report = check(root);
        assert_eq!(report.checked, 1);
        let missing: Vec<_> = report.missing.iter().map(|m| m.src.as_str()).collect();
        assert_eq!(missing, vec!["assets/images/lazy.png"]);
    }

    #[test]
    fn test_photo_inventory_sorted_numerically() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("photos");
        for name in ["photo10.jpg", "photo2.PNG", "photo1.webp", "photo3.gif", "cover.jpg"] {
            write_file(&dir, name, b"");
        }
        let photos = photo_inventory(&dir).unwrap().unwrap();
        let names: Vec<_> = photos.iter().map(|p| p.filename.as_str()).collect();
        assert_eq!(names, vec!["photo1.webp", "photo2.PNG", "photo10.jpg"]);
        assert!(photo_inventory(&temp.path().join("absent")).unwrap().is_none());
    }

    #[test]
    fn test_report_output_when_valid() {
        let report = IntegrityReport {
            html_files: 1,
            checked: 1,
            missing: Vec::new(),
            photos: Some(vec![
                Photo {
                    number: 1,
                    filename: "photo1.jpg".to_string(),
                },
                Photo {
                    number: 4,
                    filename: "photo4.webp".to_string(),
                },
            ]),
        };
        let mut out = Vec::new();
        write_integrity_report(&mut out, &report).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("All image references are valid\n"));
        assert!(out.contains("  photo4: photo4.webp\n"));
        assert!(out.contains("Recommended range for assignment: photo1 - photo4\n"));
        assert!(out.ends_with("Image integrity check passed\n"));
    }

    #[test]
    fn test_report_output_when_missing() {
        let report = IntegrityReport {
            html_files: 1,
            checked: 1,
            missing: vec![MissingImage {
                file: PathBuf::from("index.html"),
                src: "assets/images/a.png".to_string(),
                full_path: PathBuf::from("site/assets/images/a.png"),
            }],
            photos: None,
        };
        let mut out = Vec::new();
        write_integrity_report(&mut out, &report).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains(
            "MISSING IMAGES FOUND:\n  index.html: assets/images/a.png (site/assets/images/a.png)\n"
        ));
        assert!(out.ends_with("1 missing image(s) detected.\n"));
        assert!(!out.contains("PHOTO INVENTORY"));
    }
}
