//! Run configuration resolved from the command line and environment.
//!
//! The interpreter used for tag probing is chosen by precedence: an explicit
//! override, then `EASYWHEEL_PYTHON`, then the platform default. Blank values
//! are treated as absent so a templated but empty variable falls through to
//! the default.

use crate::rules::Environment;
use camino::{Utf8Path, Utf8PathBuf};

/// Environment variable naming the interpreter to probe.
pub const PYTHON_ENV_VAR: &str = "EASYWHEEL_PYTHON";

/// Interpreter used when nothing else is configured.
#[cfg(windows)]
pub const DEFAULT_PYTHON: &str = "python";

/// Interpreter used when nothing else is configured.
#[cfg(not(windows))]
pub const DEFAULT_PYTHON: &str = "python3";

/// Default source directory.
pub const DEFAULT_SOURCE_DIR: &str = ".";

/// Default build directory, relative to the working directory.
pub const DEFAULT_BUILD_DIR: &str = "./build";

/// Everything a run needs besides the project definition itself.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuildConfig {
    /// Directory or file holding the project definition.
    pub source: Utf8PathBuf,
    /// Directory receiving the staging tree and wheel.
    pub build_dir: Utf8PathBuf,
    /// Interpreter command used by the host probe.
    pub python: String,
    /// Whether to print the full JSON report.
    pub info: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source: Utf8PathBuf::from(DEFAULT_SOURCE_DIR),
            build_dir: Utf8PathBuf::from(DEFAULT_BUILD_DIR),
            python: DEFAULT_PYTHON.to_owned(),
            info: false,
        }
    }
}

impl BuildConfig {
    /// Source directory or definition file.
    #[must_use]
    pub fn source(&self) -> &Utf8Path {
        &self.source
    }

    /// Build output directory.
    #[must_use]
    pub fn build_dir(&self) -> &Utf8Path {
        &self.build_dir
    }
}

/// Choose the interpreter to probe.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use easywheel::config::resolve_python;
///
/// let env = HashMap::from([("EASYWHEEL_PYTHON".to_owned(), "python3.12".to_owned())]);
/// assert_eq!(resolve_python(None, &env), "python3.12");
/// assert_eq!(resolve_python(Some("pypy3"), &env), "pypy3");
/// ```
#[must_use]
pub fn resolve_python(explicit: Option<&str>, env: &dyn Environment) -> String {
    normalise(explicit.map(str::to_owned))
        .or_else(|| normalise(env.var(PYTHON_ENV_VAR)))
        .unwrap_or_else(|| DEFAULT_PYTHON.to_owned())
}

fn normalise(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
