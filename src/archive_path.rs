//! Archive-relative path normalization.
//!
//! Wheel members are addressed with forward slashes relative to the archive
//! root. [`ArchivePath`] canonicalizes raw destination text into that form
//! and rejects anything that would land outside the root once extracted.

use crate::error::ConfigError;
use serde::Serialize;
use std::fmt;

/// A normalized, archive-relative path.
///
/// Separators are forward slashes, there is no leading `./` or `/`, and no
/// segment is `.` or `..`.
///
/// # Examples
///
/// ```
/// use easywheel::archive_path::ArchivePath;
///
/// let path = ArchivePath::normalize(r".\pkg\module.py").expect("relative path");
/// assert_eq!(path.as_str(), "pkg/module.py");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ArchivePath(String);

impl ArchivePath {
    /// Normalize `raw` into archive form.
    ///
    /// Backslashes become forward slashes, empty and `.` segments are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsafeDestination`] if `raw` is absolute,
    /// contains a `..` segment, or normalizes to nothing.
    pub fn normalize(raw: &str) -> Result<Self, ConfigError> {
        let unified = raw.trim().replace('\\', "/");
        let unsafe_destination = || ConfigError::UnsafeDestination {
            destination: raw.to_owned(),
        };

        if unified.starts_with('/') {
            return Err(unsafe_destination());
        }

        let mut segments = Vec::new();
        for segment in unified.split('/') {
            match segment {
                "" | "." => {}
                ".." => return Err(unsafe_destination()),
                other => segments.push(other),
            }
        }

        if segments.is_empty() {
            return Err(unsafe_destination());
        }
        Ok(Self(segments.join("/")))
    }

    /// Wrap text built from already-escaped parts.
    pub(crate) fn from_trusted(path: String) -> Self {
        Self(path)
    }

    /// Append a single trusted segment, such as a manifest file name.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        Self(format!("{}/{name}", self.0))
    }

    /// Return the final segment.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Return the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ArchivePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArchivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
