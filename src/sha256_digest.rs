//! SHA-256 digests of shipped and generated files.
//!
//! Digests are only ever produced by hashing, so the hex form is always 64
//! lowercase characters.

use camino::Utf8Path;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::io;

/// A hex-encoded SHA-256 digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Hash an in-memory buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use easywheel::sha256_digest::Sha256Digest;
    ///
    /// let digest = Sha256Digest::of_bytes(b"");
    /// assert_eq!(
    ///     digest.as_str(),
    ///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    /// );
    /// ```
    #[must_use]
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(format!("{:x}", Sha256::digest(bytes)))
    }

    /// Return the digest as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Sha256Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Digest and byte length of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigest {
    /// Content hash.
    pub digest: Sha256Digest,
    /// Number of bytes hashed.
    pub size: u64,
}

/// Hash the file at `path`, streaming its contents through the hasher.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened or read.
pub fn compute_sha256(path: &Utf8Path) -> io::Result<FileDigest> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let size = io::copy(&mut file, &mut hasher)?;
    Ok(FileDigest {
        digest: Sha256Digest(format!("{:x}", hasher.finalize())),
        size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn hashes_known_content() {
        assert_eq!(Sha256Digest::of_bytes(b"hello").as_str(), HELLO_SHA256);
    }

    #[test]
    fn file_digest_matches_in_memory_digest() {
        let dir = TempDir::new().expect("temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("hello.txt")).expect("utf-8");
        fs::write(&path, b"hello").expect("write");

        let file = compute_sha256(&path).expect("hash");
        assert_eq!(file.digest.as_str(), HELLO_SHA256);
        assert_eq!(file.size, 5);
    }

    #[test]
    fn large_files_are_hashed_in_full() {
        let dir = TempDir::new().expect("temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("big.bin")).expect("utf-8");
        let content = vec![7u8; 20_000];
        fs::write(&path, &content).expect("write");

        let file = compute_sha256(&path).expect("hash");
        assert_eq!(file.digest, Sha256Digest::of_bytes(&content));
        assert_eq!(file.size, 20_000);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = compute_sha256(Utf8Path::new("/nonexistent/easywheel.bin"))
            .expect_err("missing");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn display_shows_full_digest() {
        let digest = Sha256Digest::of_bytes(b"hello");
        assert_eq!(digest.to_string(), HELLO_SHA256);
    }
}
