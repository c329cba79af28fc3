//! Project definition schema and loader.
//!
//! The definition document is deserialized into a raw schema with named
//! optional fields and then validated eagerly into a [`ProjectDefinition`].
//! JSON is the canonical syntax; TOML is accepted with the same field names.

use super::constraint::PythonConstraint;
use super::metadata::{MetadataBlock, single_line};
use crate::error::{BuildError, ConfigError};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::Deserialize;

/// File names searched, in order, when a directory is given to the loader.
pub const DEFINITION_FILE_NAMES: &[&str] = &["package.json", "package.toml"];

/// A logical namespace shipped by the wheel, with its raw file rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageGroup {
    /// Top-level import name, listed in `top_level.txt`.
    pub name: String,
    /// Unresolved file rules, in declaration order.
    #[serde(default)]
    pub files: Vec<String>,
}

/// Optional build switches from the `build` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildOptions {
    /// Explicit purity; auto-detected from resolved files when absent.
    pub is_pure: Option<bool>,
    /// Request the limited/stable ABI for native packages.
    #[serde(alias = "use_stable_api")]
    pub use_stable_abi: bool,
    /// Archive stem to use instead of `<name>-<version>-<tag>`.
    pub whl_name_override: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DefinitionDocument {
    name: String,
    version: String,
    python: String,
    packages: Vec<PackageGroup>,
    #[serde(default)]
    metadata: Option<MetadataBlock>,
    #[serde(default)]
    build: BuildOptions,
}

/// Syntax of a definition document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    /// `package.json`.
    Json,
    /// `package.toml`.
    Toml,
}

impl DefinitionFormat {
    /// Infer the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        match path.extension() {
            Some("json") => Some(Self::Json),
            Some("toml") => Some(Self::Toml),
            _ => None,
        }
    }
}

/// A validated project definition.
///
/// Relative rule origins are resolved against `base_dir`, which defaults to
/// the directory holding the definition document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDefinition {
    /// Distribution name.
    pub name: String,
    /// Distribution version; only checked for non-emptiness.
    pub version: String,
    /// Interpreter requirement.
    pub python: PythonConstraint,
    /// Explicit purity, if the definition set one.
    pub is_pure: Option<bool>,
    /// Whether native builds target the stable ABI.
    pub use_stable_abi: bool,
    /// Archive stem override.
    pub whl_name_override: Option<String>,
    /// Package groups in declaration order.
    pub packages: Vec<PackageGroup>,
    /// Optional descriptive metadata.
    pub metadata: Option<MetadataBlock>,
    /// Directory that relative origins are resolved against.
    pub base_dir: Utf8PathBuf,
}

impl ProjectDefinition {
    /// Load a definition from a file, or from a directory containing
    /// `package.json` or `package.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DefinitionNotFound`] when nothing loadable is
    /// found, [`BuildError::Io`] when the file cannot be read, and any
    /// [`ConfigError`] raised by parsing or validation.
    pub fn load(path: &Utf8Path) -> Result<Self, BuildError> {
        let file = locate_definition(path)?;
        let format = DefinitionFormat::from_path(&file).ok_or_else(|| {
            ConfigError::DefinitionNotFound {
                path: file.clone(),
            }
        })?;
        debug!("loading project definition from {file}");

        let contents = std::fs::read_to_string(&file)?;
        let base_dir = match file.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
            _ => Utf8PathBuf::from("."),
        };
        Self::parse(&contents, format, &file, base_dir).map_err(BuildError::from)
    }

    /// Parse and validate a definition from text.
    ///
    /// `origin` is only used in diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed documents and the
    /// matching [`ConfigError`] for blank fields or bad constraints.
    pub fn parse(
        contents: &str,
        format: DefinitionFormat,
        origin: &Utf8Path,
        base_dir: Utf8PathBuf,
    ) -> Result<Self, ConfigError> {
        let parse_error = |reason: String| ConfigError::Parse {
            path: origin.to_path_buf(),
            reason,
        };
        let document: DefinitionDocument = match format {
            DefinitionFormat::Json => {
                serde_json::from_str(contents).map_err(|e| parse_error(e.to_string()))?
            }
            DefinitionFormat::Toml => {
                toml::from_str(contents).map_err(|e| parse_error(e.to_string()))?
            }
        };
        Self::validate(document, base_dir)
    }

    fn validate(document: DefinitionDocument, base_dir: Utf8PathBuf) -> Result<Self, ConfigError> {
        require_non_empty(&document.name, "name")?;
        require_non_empty(&document.version, "version")?;
        for package in &document.packages {
            require_non_empty(&package.name, "package name")?;
        }
        if let Some(stem) = &document.build.whl_name_override {
            require_non_empty(stem, "whl_name_override")?;
        }
        single_line("name", &document.name)?;
        single_line("version", &document.version)?;
        if let Some(metadata) = &document.metadata {
            metadata.validate()?;
        }
        let python = document.python.parse::<PythonConstraint>()?;

        Ok(Self {
            name: document.name.trim().to_owned(),
            version: document.version.trim().to_owned(),
            python,
            is_pure: document.build.is_pure,
            use_stable_abi: document.build.use_stable_abi,
            whl_name_override: document.build.whl_name_override,
            packages: document.packages,
            metadata: document.metadata,
            base_dir,
        })
    }
}

fn require_non_empty(value: &str, field: &'static str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::EmptyField { field })
    } else {
        Ok(())
    }
}

fn locate_definition(path: &Utf8Path) -> Result<Utf8PathBuf, ConfigError> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    if path.is_dir() {
        if let Some(found) = DEFINITION_FILE_NAMES
            .iter()
            .map(|name| path.join(name))
            .find(|candidate| candidate.is_file())
        {
            return Ok(found);
        }
    }
    Err(ConfigError::DefinitionNotFound {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
#[path = "definition_tests.rs"]
mod tests;
