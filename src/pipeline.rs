//! End-to-end wheel build orchestration.
//!
//! The build walks a fixed sequence of stages, each entered exactly once:
//! files are resolved, a tag is chosen, manifests are written, RECORD is
//! computed over their final bytes, and the archive is assembled. Any
//! failure aborts the build and leaves whatever was already written in the
//! staging directory.

use crate::archive::{ArchiveEntry, create_archive};
use crate::archive_path::ArchivePath;
use crate::error::{ConfigError, Result};
use crate::manifest::{ManifestWriter, METADATA_FILE_NAME, TOP_LEVEL_FILE_NAME, WHEEL_FILE_NAME};
use crate::naming::WheelName;
use crate::project::ProjectDefinition;
use crate::record::{IntegrityRecord, RECORD_FILE_NAME};
use crate::rules::{Environment, FileRuleResolver, ResolvedFile};
use crate::tags::{CompatibilityTag, HostInterpreter, TagRequest, resolve_tag};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use std::fmt;

/// Inputs for a single build.
pub struct PipelineContext<'a> {
    /// The validated project definition.
    pub project: &'a ProjectDefinition,
    /// Directory receiving the staging tree and the wheel.
    pub build_dir: &'a Utf8Path,
    /// Interpreter the wheel is tagged for.
    pub host: &'a HostInterpreter,
    /// Source of `$NAME$` substitutions.
    pub env: &'a dyn Environment,
}

/// Progress of a build, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BuildStage {
    /// The project definition is available.
    Loaded,
    /// Every file rule has been expanded.
    FilesResolved,
    /// The compatibility tag is fixed.
    TagResolved,
    /// METADATA, `top_level.txt` and WHEEL are on disk.
    ManifestsWritten,
    /// RECORD is on disk.
    RecordComputed,
    /// The wheel archive is complete.
    Archived,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Loaded => "loaded",
            Self::FilesResolved => "files resolved",
            Self::TagResolved => "tag resolved",
            Self::ManifestsWritten => "manifests written",
            Self::RecordComputed => "record computed",
            Self::Archived => "archived",
        };
        f.write_str(name)
    }
}

/// Result of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    /// Path of the finished wheel.
    pub wheel_path: Utf8PathBuf,
    /// Tag the wheel was named with.
    pub tag: CompatibilityTag,
    /// Whether the wheel was declared or detected as pure.
    pub is_pure: bool,
    /// Shipped files in archive order.
    pub files: Vec<ResolvedFile>,
    /// The RECORD written into the wheel.
    pub record: IntegrityRecord,
}

/// Decide purity: an explicit setting wins, otherwise any native-library
/// file makes the wheel impure.
#[must_use]
pub fn resolve_purity(explicit: Option<bool>, files: &[ResolvedFile]) -> bool {
    explicit.unwrap_or_else(|| !files.iter().any(ResolvedFile::is_native))
}

/// Staging and output paths for one wheel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    /// `<build>/<stem>`.
    pub staging_dir: Utf8PathBuf,
    /// `<build>/<stem>/<dist>-<version>.dist-info`.
    pub dist_info_dir: Utf8PathBuf,
    /// Archive path of the dist-info directory.
    pub dist_info_name: ArchivePath,
    /// `<build>/<stem>.whl`.
    pub wheel_path: Utf8PathBuf,
}

impl BuildLayout {
    /// Lay out `name` under `build_dir`.
    #[must_use]
    pub fn new(build_dir: &Utf8Path, name: &WheelName) -> Self {
        let staging_dir = build_dir.join(name.stem());
        let dist_info_name = name.dist_info_dir();
        Self {
            dist_info_dir: staging_dir.join(dist_info_name.as_str()),
            staging_dir,
            dist_info_name,
            wheel_path: build_dir.join(name.file_name()),
        }
    }
}

/// Reject shipped files that would land inside the generated dist-info
/// directory.
fn reject_reserved(files: &[ResolvedFile], dist_info: &ArchivePath) -> Result<()> {
    let prefix = format!("{dist_info}/");
    match files.iter().find(|f| {
        let destination = f.destination().as_str();
        destination == dist_info.as_str() || destination.starts_with(&prefix)
    }) {
        Some(file) => Err(ConfigError::ReservedDestination {
            destination: file.destination().to_string(),
            dist_info: dist_info.to_string(),
        }
        .into()),
        None => Ok(()),
    }
}

struct StageTracker {
    stage: BuildStage,
}

impl StageTracker {
    fn start() -> Self {
        debug!("build stage: {}", BuildStage::Loaded);
        Self {
            stage: BuildStage::Loaded,
        }
    }

    fn advance(&mut self, next: BuildStage) {
        debug!("build stage: {} -> {next}", self.stage);
        self.stage = next;
    }
}

/// Build the wheel described by `context`.
///
/// # Errors
///
/// Returns the first error raised by any stage: rule problems as
/// [`crate::error::ConfigError`], tag problems as
/// [`crate::error::ResolutionError`], an existing wheel as
/// [`crate::error::BuildError::AlreadyExists`], and filesystem or archive
/// failures as their respective variants.
pub fn build_wheel(context: &PipelineContext<'_>) -> Result<BuildOutput> {
    let project = context.project;
    let mut tracker = StageTracker::start();

    let resolver = FileRuleResolver::new(&project.base_dir, context.env);
    let files = resolver.resolve_packages(&project.packages)?;
    tracker.advance(BuildStage::FilesResolved);

    let is_pure = resolve_purity(project.is_pure, &files);
    let request = TagRequest {
        constraint: project.python,
        is_pure,
        use_stable_abi: project.use_stable_abi,
    };
    let tag = resolve_tag(&request, context.host)?;
    tracker.advance(BuildStage::TagResolved);

    let mut name = WheelName::new(&project.name, &project.version, &tag);
    if let Some(stem) = &project.whl_name_override {
        name = name.with_override(stem)?;
    }
    let layout = BuildLayout::new(context.build_dir, &name);
    reject_reserved(&files, &layout.dist_info_name)?;

    let writer = ManifestWriter::new(layout.dist_info_dir.clone());
    let metadata = writer.write_metadata(project)?;
    let top_level = writer.write_top_level(&project.packages)?;
    let wheel = writer.write_wheel(is_pure, &tag)?;
    tracker.advance(BuildStage::ManifestsWritten);

    let manifests = [
        (metadata, layout.dist_info_name.child(METADATA_FILE_NAME)),
        (top_level, layout.dist_info_name.child(TOP_LEVEL_FILE_NAME)),
        (wheel, layout.dist_info_name.child(WHEEL_FILE_NAME)),
    ];
    let hashed: Vec<(Utf8PathBuf, ArchivePath)> = files
        .iter()
        .map(|f| (f.origin().to_path_buf(), f.destination().clone()))
        .chain(manifests.iter().cloned())
        .collect();
    let record_name = layout.dist_info_name.child(RECORD_FILE_NAME);
    let record = IntegrityRecord::compute(&hashed, record_name.clone())?;
    let record_path = layout.dist_info_dir.join(RECORD_FILE_NAME);
    record.write_to(&record_path)?;
    tracker.advance(BuildStage::RecordComputed);

    let entries: Vec<ArchiveEntry> = manifests
        .into_iter()
        .chain(std::iter::once((record_path, record_name)))
        .chain(
            files
                .iter()
                .map(|f| (f.origin().to_path_buf(), f.destination().clone())),
        )
        .map(|(source, name)| ArchiveEntry::new(source, name))
        .collect();
    create_archive(&layout.wheel_path, &entries)?;
    tracker.advance(BuildStage::Archived);

    info!("built {}", layout.wheel_path);
    Ok(BuildOutput {
        wheel_path: layout.wheel_path,
        tag,
        is_pure,
        files,
        record,
    })
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
