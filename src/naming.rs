//! Wheel file and dist-info directory naming.
//!
//! Wheels are named `<dist>-<version>-<tag>.whl`. The distribution name has
//! runs of `-`, `_` and `.` collapsed to `_`, and the version has `-`
//! replaced by `_`, so the only dashes left are the field separators.

use crate::archive_path::ArchivePath;
use crate::error::ConfigError;
use crate::tags::CompatibilityTag;
use std::fmt;

/// File extension of wheel archives.
pub const WHEEL_EXTENSION: &str = ".whl";

/// Suffix of the metadata directory inside a wheel.
pub const DIST_INFO_SUFFIX: &str = ".dist-info";

/// Escape a distribution name for use in file names.
///
/// # Examples
///
/// ```
/// use easywheel::naming::escape_name;
///
/// assert_eq!(escape_name("my-cool.pkg"), "my_cool_pkg");
/// assert_eq!(escape_name("a--b__c"), "a_b_c");
/// ```
#[must_use]
pub fn escape_name(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.trim().chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_run {
                escaped.push('_');
            }
            in_run = true;
        } else {
            escaped.push(c);
            in_run = false;
        }
    }
    escaped
}

/// Escape a version for use in file names.
#[must_use]
pub fn escape_version(version: &str) -> String {
    version.trim().replace('-', "_")
}

/// The stem shared by a wheel and its staging directory.
///
/// # Examples
///
/// ```
/// use easywheel::naming::WheelName;
/// use easywheel::tags::CompatibilityTag;
///
/// let name = WheelName::new("demo", "1.0", &CompatibilityTag::new("py3", "none", "any"));
/// assert_eq!(name.file_name(), "demo-1.0-py3-none-any.whl");
/// assert_eq!(name.dist_info_dir().as_str(), "demo-1.0.dist-info");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelName {
    distribution: String,
    version: String,
    stem: String,
}

impl WheelName {
    /// Derive the standard `<dist>-<version>-<tag>` stem.
    #[must_use]
    pub fn new(name: &str, version: &str, tag: &CompatibilityTag) -> Self {
        let distribution = escape_name(name);
        let version = escape_version(version);
        let stem = format!("{distribution}-{version}-{tag}");
        Self {
            distribution,
            version,
            stem,
        }
    }

    /// Use `stem` instead of the derived stem, dropping any `.whl` suffix.
    ///
    /// The dist-info directory still follows the distribution name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyField`] if nothing remains of the stem,
    /// and [`ConfigError::UnsafeDestination`] if it contains a path
    /// separator.
    pub fn with_override(self, stem: &str) -> Result<Self, ConfigError> {
        let trimmed = stem.trim();
        let stem = trimmed.strip_suffix(WHEEL_EXTENSION).unwrap_or(trimmed);
        if stem.is_empty() {
            return Err(ConfigError::EmptyField {
                field: "whl_name_override",
            });
        }
        if stem.contains(['/', '\\']) || stem == ".." {
            return Err(ConfigError::UnsafeDestination {
                destination: stem.to_owned(),
            });
        }
        Ok(Self {
            stem: stem.to_owned(),
            ..self
        })
    }

    /// Stem without extension.
    #[must_use]
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Archive file name, `<stem>.whl`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}{WHEEL_EXTENSION}", self.stem)
    }

    /// Archive path of the `<dist>-<version>.dist-info` directory.
    #[must_use]
    pub fn dist_info_dir(&self) -> ArchivePath {
        ArchivePath::from_trusted(format!(
            "{}-{}{DIST_INFO_SUFFIX}",
            self.distribution, self.version
        ))
    }
}

impl fmt::Display for WheelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{WHEEL_EXTENSION}", self.stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn native_tag() -> CompatibilityTag {
        CompatibilityTag::new("cp313", "abi3", "linux_x86_64")
    }

    #[rstest]
    fn file_name_joins_escaped_parts(native_tag: CompatibilityTag) {
        let name = WheelName::new("my-pkg", "1.0-beta", &native_tag);
        assert_eq!(name.file_name(), "my_pkg-1.0_beta-cp313-abi3-linux_x86_64.whl");
        assert_eq!(name.dist_info_dir().as_str(), "my_pkg-1.0_beta.dist-info");
    }

    #[rstest]
    #[case::plain("demo", "demo")]
    #[case::dots("zope.interface", "zope_interface")]
    #[case::mixed_run("a-._b", "a_b")]
    #[case::trimmed("  demo ", "demo")]
    fn names_are_escaped(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(escape_name(raw), expected);
    }

    #[rstest]
    #[case::bare("custom-name", "custom-name.whl")]
    #[case::with_extension("custom-name.whl", "custom-name.whl")]
    fn override_replaces_stem(native_tag: CompatibilityTag, #[case] raw: &str, #[case] file: &str) {
        let name = WheelName::new("demo", "1.0", &native_tag)
            .with_override(raw)
            .expect("valid override");
        assert_eq!(name.file_name(), file);
        assert_eq!(name.dist_info_dir().as_str(), "demo-1.0.dist-info");
    }

    #[rstest]
    fn override_of_only_extension_is_rejected(native_tag: CompatibilityTag) {
        let err = WheelName::new("demo", "1.0", &native_tag)
            .with_override(".whl")
            .expect_err("empty stem");
        assert!(matches!(err, ConfigError::EmptyField { .. }));
    }

    #[rstest]
    fn override_with_separator_is_rejected(native_tag: CompatibilityTag) {
        let err = WheelName::new("demo", "1.0", &native_tag)
            .with_override("../escape")
            .expect_err("path separator");
        assert!(matches!(err, ConfigError::UnsafeDestination { .. }));
    }
}
