//! Rendering of the dist-info manifest files.
//!
//! Rendering is pure string formatting; [`ManifestWriter`] only adds the
//! filesystem step. Each file is a sequence of newline-terminated lines.

use crate::project::{MetadataBlock, PackageGroup, ProjectDefinition};
use crate::tags::CompatibilityTag;
use camino::{Utf8Path, Utf8PathBuf};
use log::trace;
use std::fs;
use std::io;

/// Core metadata version written to `METADATA`.
pub const METADATA_VERSION: &str = "2.1";

/// Wheel format version written to `WHEEL`.
pub const WHEEL_VERSION: &str = "1.0";

/// File name of the core metadata.
pub const METADATA_FILE_NAME: &str = "METADATA";

/// File name of the top-level namespace listing.
pub const TOP_LEVEL_FILE_NAME: &str = "top_level.txt";

/// File name of the build descriptor.
pub const WHEEL_FILE_NAME: &str = "WHEEL";

/// Generator line value.
const GENERATOR: &str = concat!("easywheel ", env!("CARGO_PKG_VERSION"));

struct Lines(String);

impl Lines {
    fn new() -> Self {
        Self(String::new())
    }

    fn field(&mut self, key: &str, value: &str) {
        self.0.push_str(key);
        self.0.push_str(": ");
        self.0.push_str(value);
        self.0.push('\n');
    }

    fn line(&mut self, value: &str) {
        self.0.push_str(value);
        self.0.push('\n');
    }
}

/// Render `METADATA` for `project`.
///
/// An absent metadata block still yields `Summary` and `Author` lines with
/// empty values. `License` and `Keywords` are omitted when empty.
///
/// # Examples
///
/// ```
/// use easywheel::manifest::render_metadata;
///
/// let text = render_metadata("demo", "1.0", None);
/// assert_eq!(
///     text,
///     "Metadata-Version: 2.1\nName: demo\nVersion: 1.0\nSummary: \nAuthor: \n"
/// );
/// ```
#[must_use]
pub fn render_metadata(name: &str, version: &str, metadata: Option<&MetadataBlock>) -> String {
    let empty = MetadataBlock::default();
    let block = metadata.unwrap_or(&empty);
    let mut out = Lines::new();

    out.field("Metadata-Version", METADATA_VERSION);
    out.field("Name", name);
    out.field("Version", version);
    out.field("Summary", &block.summary);
    out.field("Author", &block.author_line());
    if !block.license.trim().is_empty() {
        out.field("License", &block.license);
    }
    if !block.keywords.is_empty() {
        out.field("Keywords", &block.keywords.join(","));
    }
    for platform in &block.platforms {
        out.field("Platform", platform);
    }
    for classifier in &block.classifiers {
        out.field("Classifier", classifier);
    }
    for (label, url) in &block.urls {
        out.field("Project-URL", &format!("{label}, {url}"));
    }
    out.0
}

/// Render `top_level.txt`: each package name once, in declaration order.
#[must_use]
pub fn render_top_level(packages: &[PackageGroup]) -> String {
    let mut out = Lines::new();
    let mut seen: Vec<&str> = Vec::new();
    for package in packages {
        let name = package.name.trim();
        if !seen.contains(&name) {
            seen.push(name);
            out.line(name);
        }
    }
    out.0
}

/// Render the `WHEEL` build descriptor.
///
/// # Examples
///
/// ```
/// use easywheel::manifest::render_wheel;
/// use easywheel::tags::CompatibilityTag;
///
/// let text = render_wheel(true, &CompatibilityTag::new("py3", "none", "any"));
/// assert!(text.ends_with("Root-Is-Purelib: True\nTag: py3-none-any\n"));
/// ```
#[must_use]
pub fn render_wheel(is_pure: bool, tag: &CompatibilityTag) -> String {
    let mut out = Lines::new();
    out.field("Wheel-Version", WHEEL_VERSION);
    out.field("Generator", GENERATOR);
    out.field("Root-Is-Purelib", if is_pure { "True" } else { "False" });
    out.field("Tag", &tag.to_string());
    out.0
}

/// Writes manifest files into a staging dist-info directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestWriter {
    dist_info: Utf8PathBuf,
}

impl ManifestWriter {
    /// Write into `dist_info`, which is created on first write.
    #[must_use]
    pub fn new(dist_info: impl Into<Utf8PathBuf>) -> Self {
        Self {
            dist_info: dist_info.into(),
        }
    }

    /// Staging directory the files are written to.
    #[must_use]
    pub fn dist_info(&self) -> &Utf8Path {
        &self.dist_info
    }

    /// Write `METADATA` and return its path.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn write_metadata(&self, project: &ProjectDefinition) -> io::Result<Utf8PathBuf> {
        let text = render_metadata(&project.name, &project.version, project.metadata.as_ref());
        self.write(METADATA_FILE_NAME, &text)
    }

    /// Write `top_level.txt` and return its path.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn write_top_level(&self, packages: &[PackageGroup]) -> io::Result<Utf8PathBuf> {
        self.write(TOP_LEVEL_FILE_NAME, &render_top_level(packages))
    }

    /// Write `WHEEL` and return its path.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn write_wheel(&self, is_pure: bool, tag: &CompatibilityTag) -> io::Result<Utf8PathBuf> {
        self.write(WHEEL_FILE_NAME, &render_wheel(is_pure, tag))
    }

    fn write(&self, file_name: &str, text: &str) -> io::Result<Utf8PathBuf> {
        fs::create_dir_all(&self.dist_info)?;
        let path = self.dist_info.join(file_name);
        fs::write(&path, text)?;
        trace!("wrote {path} ({} bytes)", text.len());
        Ok(path)
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
