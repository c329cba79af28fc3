//! JSON summary of a finished build.

use crate::error::Result;
use crate::pipeline::BuildOutput;
use crate::record::RecordEntry;
use crate::rules::ResolvedFile;
use crate::tags::CompatibilityTag;
use camino::Utf8Path;
use serde::Serialize;

/// Serializable view of a [`BuildOutput`].
#[derive(Debug, Serialize)]
pub struct BuildReport<'a> {
    /// Distribution name.
    pub name: &'a str,
    /// Distribution version.
    pub version: &'a str,
    /// Path of the wheel on disk.
    pub wheel: &'a Utf8Path,
    /// Compatibility tag.
    pub tag: &'a CompatibilityTag,
    /// Whether the wheel is pure.
    pub pure: bool,
    /// Shipped files with their origins.
    pub files: &'a [ResolvedFile],
    /// RECORD rows.
    pub record: &'a [RecordEntry],
}

impl<'a> BuildReport<'a> {
    /// Describe `output` for the distribution `name` at `version`.
    #[must_use]
    pub fn new(name: &'a str, version: &'a str, output: &'a BuildOutput) -> Self {
        Self {
            name,
            version,
            wheel: &output.wheel_path,
            tag: &output.tag,
            pure: output.is_pure,
            files: &output.files,
            record: output.record.entries(),
        }
    }

    /// Render as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::BuildError::Serialization`] if serialization
    /// fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
