//! The `interpreter-abi-platform` compatibility triple.

use crate::error::ResolutionError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// ABI tag used by pure and ABI-agnostic wheels.
pub const NO_ABI: &str = "none";

/// Platform tag used by platform-independent wheels.
pub const ANY_PLATFORM: &str = "any";

/// A wheel compatibility tag.
///
/// # Examples
///
/// ```
/// use easywheel::tags::CompatibilityTag;
///
/// let tag: CompatibilityTag = "cp313-abi3-linux_x86_64".parse().expect("valid tag");
/// assert_eq!(tag.abi(), "abi3");
/// assert_eq!(tag.to_string(), "cp313-abi3-linux_x86_64");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompatibilityTag {
    interpreter: String,
    abi: String,
    platform: String,
}

impl CompatibilityTag {
    /// Build a tag from its three components.
    #[must_use]
    pub fn new(
        interpreter: impl Into<String>,
        abi: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            interpreter: interpreter.into(),
            abi: abi.into(),
            platform: platform.into(),
        }
    }

    /// Interpreter component, e.g. `cp313` or `py3`.
    #[must_use]
    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    /// ABI component, e.g. `cp313`, `abi3` or `none`.
    #[must_use]
    pub fn abi(&self) -> &str {
        &self.abi
    }

    /// Platform component, e.g. `linux_x86_64` or `any`.
    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Whether the tag fits any platform.
    #[must_use]
    pub fn is_platform_independent(&self) -> bool {
        self.platform == ANY_PLATFORM
    }
}

impl fmt::Display for CompatibilityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.interpreter, self.abi, self.platform)
    }
}

impl FromStr for CompatibilityTag {
    type Err = ResolutionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut parts = value.trim().split('-');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(interpreter), Some(abi), Some(platform), None)
                if [interpreter, abi, platform].iter().all(|p| !p.is_empty()) =>
            {
                Ok(Self::new(interpreter, abi, platform))
            }
            _ => Err(ResolutionError::MalformedTag {
                tag: value.to_owned(),
            }),
        }
    }
}

impl Serialize for CompatibilityTag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
