//! Zip assembly of the final wheel.
//!
//! Every entry is deflated and stamped with the zip epoch and mode `0o644`,
//! so identical inputs produce byte-identical archives. The output file is
//! created exclusively; an existing wheel is never replaced.

use crate::archive_path::ArchivePath;
use crate::error::{BuildError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::trace;
use std::fs;
use std::io;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Permission bits recorded for every entry.
pub const ENTRY_MODE: u32 = 0o644;

/// A file on disk and the member name it takes in the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path of the file to read.
    pub source: Utf8PathBuf,
    /// Member name inside the archive.
    pub name: ArchivePath,
}

impl ArchiveEntry {
    /// Pair a source file with its archive name.
    #[must_use]
    pub fn new(source: impl Into<Utf8PathBuf>, name: ArchivePath) -> Self {
        Self {
            source: source.into(),
            name,
        }
    }
}

/// Write `entries`, in order, to a new zip file at `output`.
///
/// Missing parent directories of `output` are created.
///
/// # Errors
///
/// Returns [`BuildError::AlreadyExists`] if `output` exists, and
/// [`BuildError::Io`] or [`BuildError::Archive`] if a source cannot be
/// read or the archive cannot be written.
pub fn create_archive(output: &Utf8Path, entries: &[ArchiveEntry]) -> Result<()> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(output)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => BuildError::AlreadyExists {
                path: output.to_path_buf(),
            },
            _ => BuildError::Io(e),
        })?;

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(ENTRY_MODE);

    let mut zip = ZipWriter::new(file);
    for entry in entries {
        let mut source = fs::File::open(&entry.source)?;
        zip.start_file(entry.name.as_str(), options)?;
        let bytes = io::copy(&mut source, &mut zip)?;
        trace!("archived {} ({bytes} bytes)", entry.name);
    }
    zip.finish()?;
    Ok(())
}
