//! Interpreter version constraints.
//!
//! A project pins its interpreter either exactly (`==3.11`) or with a floor
//! (`>=3.8`). Patch components are accepted and ignored; tags only carry
//! major and minor versions.

use crate::error::ConfigError;
use serde::Serialize;
use std::fmt;

/// A Python `major.minor` version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PythonVersion {
    /// Major version, e.g. `3`.
    pub major: u32,
    /// Minor version, e.g. `13`.
    pub minor: u32,
}

impl PythonVersion {
    /// Create a version from its components.
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// The interpreter requirement declared by a project.
///
/// # Examples
///
/// ```
/// use easywheel::project::{PythonConstraint, PythonVersion};
///
/// let floor: PythonConstraint = ">=3.8".parse().expect("valid constraint");
/// assert!(floor.is_satisfied_by(PythonVersion::new(3, 13)));
/// assert!(!floor.is_satisfied_by(PythonVersion::new(3, 7)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "version", rename_all = "snake_case")]
pub enum PythonConstraint {
    /// Only this exact minor version is accepted.
    Exact(PythonVersion),
    /// This minor version or anything newer within the same major.
    Minimum(PythonVersion),
}

impl PythonConstraint {
    /// The version named by the constraint.
    #[must_use]
    pub const fn version(&self) -> PythonVersion {
        match self {
            Self::Exact(version) | Self::Minimum(version) => *version,
        }
    }

    /// Whether an interpreter of `host` version meets the constraint.
    #[must_use]
    pub fn is_satisfied_by(&self, host: PythonVersion) -> bool {
        match self {
            Self::Exact(version) => host == *version,
            Self::Minimum(version) => host.major == version.major && host >= *version,
        }
    }
}

impl std::str::FromStr for PythonConstraint {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let invalid = |reason: &str| ConfigError::InvalidConstraint {
            value: value.to_owned(),
            reason: reason.to_owned(),
        };

        let (exact, rest) = if let Some(rest) = trimmed.strip_prefix("==") {
            (true, rest)
        } else if let Some(rest) = trimmed.strip_prefix(">=") {
            (false, rest)
        } else {
            return Err(invalid("expected '==X.Y' or '>=X.Y'"));
        };

        let mut parts = rest.trim().split('.');
        let major = parse_component(parts.next()).ok_or_else(|| invalid("missing major version"))?;
        let minor = parse_component(parts.next()).ok_or_else(|| invalid("missing minor version"))?;
        if let Some(patch) = parts.next() {
            if parse_component(Some(patch)).is_none() {
                return Err(invalid("patch version must be numeric"));
            }
        }
        if parts.next().is_some() {
            return Err(invalid("too many version components"));
        }

        let version = PythonVersion::new(major, minor);
        Ok(if exact {
            Self::Exact(version)
        } else {
            Self::Minimum(version)
        })
    }
}

fn parse_component(part: Option<&str>) -> Option<u32> {
    let digits = part?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl fmt::Display for PythonConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(version) => write!(f, "=={version}"),
            Self::Minimum(version) => write!(f, ">={version}"),
        }
    }
}
