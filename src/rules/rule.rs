//! Parsing of raw file rules into tagged variants.
//!
//! Dispatch happens once, here, so resolution is a plain match over
//! [`FileRule`] rather than a chain of string checks.

use crate::error::ConfigError;

/// Prefix marking a glob rule.
pub const GLOB_MARKER: &str = "!g";

/// Separator between origin and destination in a mapping rule.
pub const MAPPING_SEPARATOR: char = ':';

/// A file rule after environment substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileRule {
    /// `!g <pattern>`: every matching file, shipped at its own relative path.
    Glob {
        /// Pattern relative to the project base directory.
        pattern: String,
    },
    /// `<origin>:<destination>`: one file shipped under a new path.
    Mapped {
        /// Source path relative to the project base directory.
        origin: String,
        /// Archive path; a trailing `/` names a directory.
        destination: String,
    },
    /// `<origin>`: one file shipped at its own relative path.
    Bare {
        /// Source path relative to the project base directory.
        origin: String,
    },
}

impl FileRule {
    /// Classify a substituted rule.
    ///
    /// `package` is only used in diagnostics.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyRule`] for blank rules or blank mapping sides.
    /// - [`ConfigError::GlobWithDestination`] when a glob carries a `:`.
    /// - [`ConfigError::AmbiguousMapping`] for more than one `:`.
    ///
    /// # Examples
    ///
    /// ```
    /// use easywheel::rules::FileRule;
    ///
    /// let rule = FileRule::parse("build/lib.so : pkg/lib.so", "pkg").expect("valid rule");
    /// assert_eq!(
    ///     rule,
    ///     FileRule::Mapped {
    ///         origin: "build/lib.so".to_owned(),
    ///         destination: "pkg/lib.so".to_owned(),
    ///     }
    /// );
    /// ```
    pub fn parse(rule: &str, package: &str) -> Result<Self, ConfigError> {
        let text = rule.trim();
        let empty = || ConfigError::EmptyRule {
            package: package.to_owned(),
        };
        if text.is_empty() {
            return Err(empty());
        }

        if let Some(pattern) = text.strip_prefix(GLOB_MARKER) {
            if pattern.contains(MAPPING_SEPARATOR) {
                return Err(ConfigError::GlobWithDestination {
                    rule: text.to_owned(),
                });
            }
            let pattern = pattern.trim();
            if pattern.is_empty() {
                return Err(empty());
            }
            return Ok(Self::Glob {
                pattern: pattern.to_owned(),
            });
        }

        let mut parts = text.split(MAPPING_SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(origin), None, None) => Ok(Self::Bare {
                origin: origin.to_owned(),
            }),
            (Some(origin), Some(destination), None) => {
                let (origin, destination) = (origin.trim(), destination.trim());
                if origin.is_empty() || destination.is_empty() {
                    return Err(empty());
                }
                Ok(Self::Mapped {
                    origin: origin.to_owned(),
                    destination: destination.to_owned(),
                })
            }
            _ => Err(ConfigError::AmbiguousMapping {
                rule: text.to_owned(),
            }),
        }
    }
}
