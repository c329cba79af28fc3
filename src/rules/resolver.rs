//! Expansion of file rules into concrete origin/destination pairs.

use super::env::{Environment, substitute};
use super::rule::FileRule;
use crate::archive_path::ArchivePath;
use crate::error::{BuildError, ConfigError};
use crate::project::PackageGroup;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use glob::MatchOptions;
use log::trace;
use serde::Serialize;
use std::collections::HashMap;

/// File extensions that mark a file as a native library.
pub const NATIVE_EXTENSIONS: &[&str] = &["so", "pyd", "dll", "dylib"];

/// A file to ship: where it lives on disk and where it lands in the wheel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFile {
    origin: Utf8PathBuf,
    destination: ArchivePath,
}

impl ResolvedFile {
    /// Path of the file on disk.
    #[must_use]
    pub fn origin(&self) -> &Utf8Path {
        &self.origin
    }

    /// Normalized archive-relative destination.
    #[must_use]
    pub fn destination(&self) -> &ArchivePath {
        &self.destination
    }

    /// Whether the origin carries a native-library extension.
    #[must_use]
    pub fn is_native(&self) -> bool {
        self.origin
            .extension()
            .is_some_and(|ext| NATIVE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
    }
}

/// Glob options: `*` and `**` skip hidden entries unless the pattern names
/// the leading dot itself.
const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

/// Drop `.` components so origins built by joining and origins returned by
/// the glob engine compare equal.
fn lexical(path: &Utf8Path) -> Utf8PathBuf {
    path.components()
        .filter(|component| !matches!(component, Utf8Component::CurDir))
        .collect()
}

/// Resolves raw file rules against a base directory and environment.
///
/// Relative origins are joined onto `base_dir`; the process working
/// directory is never consulted or changed.
pub struct FileRuleResolver<'a> {
    base_dir: Utf8PathBuf,
    env: &'a dyn Environment,
}

impl<'a> FileRuleResolver<'a> {
    /// Create a resolver rooted at `base_dir`.
    #[must_use]
    pub fn new(base_dir: &Utf8Path, env: &'a dyn Environment) -> Self {
        Self {
            base_dir: lexical(base_dir),
            env,
        }
    }

    /// Resolve every rule of every package, in declaration order.
    ///
    /// A repeated origin/destination pair is kept once, at its first
    /// position.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for malformed rules, undefined variables or
    /// conflicting destinations, and [`BuildError::MissingSource`] when a
    /// named origin does not exist.
    pub fn resolve_packages(&self, packages: &[PackageGroup]) -> Result<Vec<ResolvedFile>, BuildError> {
        let mut resolved = Vec::new();
        let mut claimed: HashMap<ArchivePath, Utf8PathBuf> = HashMap::new();

        for package in packages {
            for file in self.resolve_package(package)? {
                match claimed.get(&file.destination) {
                    Some(origin) if *origin == file.origin => {
                        trace!("skipping repeated entry {}", file.destination);
                    }
                    Some(origin) => {
                        return Err(ConfigError::DuplicateDestination {
                            destination: file.destination.to_string(),
                            first: origin.clone(),
                            second: file.origin,
                        }
                        .into());
                    }
                    None => {
                        claimed.insert(file.destination.clone(), file.origin.clone());
                        resolved.push(file);
                    }
                }
            }
        }
        Ok(resolved)
    }

    /// Resolve the rules of a single package group.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve_packages`].
    pub fn resolve_package(&self, package: &PackageGroup) -> Result<Vec<ResolvedFile>, BuildError> {
        let mut files = Vec::new();
        for raw in &package.files {
            let substituted = substitute(raw, self.env)?;
            let rule = FileRule::parse(&substituted, &package.name)?;
            files.extend(self.resolve_rule(&rule)?);
        }
        Ok(files)
    }

    /// Expand one parsed rule.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve_packages`].
    pub fn resolve_rule(&self, rule: &FileRule) -> Result<Vec<ResolvedFile>, BuildError> {
        match rule {
            FileRule::Glob { pattern } => self.expand_glob(pattern),
            FileRule::Mapped {
                origin,
                destination,
            } => {
                let destination = if destination.ends_with(['/', '\\']) {
                    let name = Utf8Path::new(origin).file_name().ok_or_else(|| {
                        ConfigError::UnsafeDestination {
                            destination: destination.clone(),
                        }
                    })?;
                    format!("{destination}{name}")
                } else {
                    destination.clone()
                };
                Ok(vec![self.single(origin, &destination)?])
            }
            FileRule::Bare { origin } => Ok(vec![self.single(origin, origin)?]),
        }
    }

    fn single(&self, origin: &str, destination: &str) -> Result<ResolvedFile, BuildError> {
        let destination = ArchivePath::normalize(destination)?;
        let path = lexical(&self.base_dir.join(origin));
        if !path.is_file() {
            return Err(BuildError::MissingSource { path });
        }
        trace!("resolved {path} -> {destination}");
        Ok(ResolvedFile {
            origin: path,
            destination,
        })
    }

    fn expand_glob(&self, pattern: &str) -> Result<Vec<ResolvedFile>, BuildError> {
        let full = if self.base_dir.as_str().is_empty() {
            pattern.to_owned()
        } else {
            format!("{}/{}", glob::Pattern::escape(self.base_dir.as_str()), pattern)
        };
        let matches =
            glob::glob_with(&full, GLOB_OPTIONS).map_err(|e| ConfigError::InvalidGlob {
                pattern: pattern.to_owned(),
                reason: e.msg.to_owned(),
            })?;

        let mut files = Vec::new();
        for entry in matches {
            let path = entry.map_err(std::io::Error::from)?;
            if !path.is_file() {
                continue;
            }
            let origin = Utf8PathBuf::from_path_buf(path).map_err(BuildError::NonUtf8Path)?;
            let origin = lexical(&origin);
            let relative = origin.strip_prefix(&self.base_dir).unwrap_or(&origin);
            let destination = ArchivePath::normalize(relative.as_str())?;
            trace!("glob {pattern} matched {origin} -> {destination}");
            files.push(ResolvedFile {
                origin,
                destination,
            });
        }
        Ok(files)
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
