//! The RECORD integrity listing.
//!
//! RECORD lists every archive member with its SHA-256 digest and byte size.
//! Its own row carries neither, since the file cannot hash itself.

use crate::archive_path::ArchivePath;
use crate::sha256_digest::{Sha256Digest, compute_sha256};
use camino::{Utf8Path, Utf8PathBuf};
use log::trace;
use serde::Serialize;
use std::fs;
use std::io;

/// File name of the integrity listing inside the dist-info directory.
pub const RECORD_FILE_NAME: &str = "RECORD";

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordEntry {
    /// Archive-relative member path.
    pub path: ArchivePath,
    /// Content digest; absent only for the RECORD row itself.
    pub sha256: Option<Sha256Digest>,
    /// Byte length; absent only for the RECORD row itself.
    pub size: Option<u64>,
}

impl RecordEntry {
    fn render(&self) -> String {
        match (&self.sha256, self.size) {
            (Some(digest), Some(size)) => format!("{},sha256={digest},{size}", self.path),
            _ => format!("{},,", self.path),
        }
    }
}

/// Ordered hashes of every file placed in the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrityRecord {
    entries: Vec<RecordEntry>,
}

impl IntegrityRecord {
    /// Hash `files` in order and append the self-referencing row for
    /// `record_path`.
    ///
    /// Each pair is `(path on disk, archive path)`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if any file cannot be read.
    pub fn compute(
        files: &[(Utf8PathBuf, ArchivePath)],
        record_path: ArchivePath,
    ) -> io::Result<Self> {
        let mut entries = Vec::with_capacity(files.len() + 1);
        for (source, path) in files {
            let hashed = compute_sha256(source)?;
            trace!("hashed {path}: sha256={} ({} bytes)", hashed.digest, hashed.size);
            entries.push(RecordEntry {
                path: path.clone(),
                sha256: Some(hashed.digest),
                size: Some(hashed.size),
            });
        }
        entries.push(RecordEntry {
            path: record_path,
            sha256: None,
            size: None,
        });
        Ok(Self { entries })
    }

    /// Rows in listing order; the RECORD row is last.
    #[must_use]
    pub fn entries(&self) -> &[RecordEntry] {
        &self.entries
    }

    /// Render the listing as newline-terminated CSV rows.
    #[must_use]
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.render() + "\n")
            .collect()
    }

    /// Write the rendered listing to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn write_to(&self, path: &Utf8Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.render())
    }
}
