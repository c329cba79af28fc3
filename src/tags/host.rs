//! Host interpreter probing and candidate tag enumeration.
//!
//! The probe runs the configured interpreter once with a short inline
//! script and reads back a JSON description. Candidate tags are then
//! generated here, most specific first, so tag selection never depends on
//! what the interpreter's own packaging libraries happen to report.

use super::compat_tag::{ANY_PLATFORM, CompatibilityTag, NO_ABI};
use crate::error::ResolutionError;
use crate::project::PythonVersion;
use log::debug;
use serde::Deserialize;
use std::process::{Command, Output};

/// Script passed to the interpreter with `-c`.
pub const PROBE_SCRIPT: &str = "import json, sys, sysconfig; print(json.dumps({\
\"implementation\": sys.implementation.name, \
\"major\": sys.version_info[0], \
\"minor\": sys.version_info[1], \
\"free_threaded\": bool(sysconfig.get_config_var(\"Py_GIL_DISABLED\")), \
\"platform\": sysconfig.get_platform()}))";

/// Abstraction for running external commands.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Run `program` with `args` and capture its output.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while spawning the process.
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<Output>;
}

/// Runs commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<Output> {
        Command::new(program).args(args).output()
    }
}

/// Raw interpreter facts reported by [`PROBE_SCRIPT`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InterpreterDescription {
    /// `sys.implementation.name`, e.g. `cpython`.
    pub implementation: String,
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
    /// Whether the build disables the GIL.
    #[serde(default)]
    pub free_threaded: bool,
    /// `sysconfig.get_platform()`, e.g. `linux-x86_64`.
    pub platform: String,
}

/// The interpreter a build targets, with its prioritized candidate tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInterpreter {
    version: PythonVersion,
    interpreter_tag: String,
    abi_tag: String,
    candidates: Vec<CompatibilityTag>,
}

impl HostInterpreter {
    /// Build a host from explicit parts, bypassing candidate generation.
    #[must_use]
    pub fn new(
        version: PythonVersion,
        interpreter_tag: impl Into<String>,
        abi_tag: impl Into<String>,
        candidates: Vec<CompatibilityTag>,
    ) -> Self {
        Self {
            version,
            interpreter_tag: interpreter_tag.into(),
            abi_tag: abi_tag.into(),
            candidates,
        }
    }

    /// Derive the host and its candidate tags from a probe description.
    ///
    /// # Examples
    ///
    /// ```
    /// use easywheel::tags::host::{HostInterpreter, InterpreterDescription};
    ///
    /// let host = HostInterpreter::from_description(&InterpreterDescription {
    ///     implementation: "cpython".to_owned(),
    ///     major: 3,
    ///     minor: 13,
    ///     free_threaded: false,
    ///     platform: "linux-x86_64".to_owned(),
    /// });
    /// assert_eq!(host.interpreter_tag(), "cp313");
    /// assert_eq!(host.candidates()[0].to_string(), "cp313-cp313-linux_x86_64");
    /// ```
    #[must_use]
    pub fn from_description(description: &InterpreterDescription) -> Self {
        let version = PythonVersion::new(description.major, description.minor);
        let short = implementation_prefix(&description.implementation);
        let interpreter_tag = format!("{short}{}{}", version.major, version.minor);
        let abi_tag = if description.free_threaded {
            format!("{interpreter_tag}t")
        } else {
            interpreter_tag.clone()
        };
        let platform = normalize_platform(&description.platform);
        let candidates = candidate_tags(
            version,
            &interpreter_tag,
            &abi_tag,
            short == "cp",
            &platform,
        );
        Self {
            version,
            interpreter_tag,
            abi_tag,
            candidates,
        }
    }

    /// Interpreter `major.minor` version.
    #[must_use]
    pub fn version(&self) -> PythonVersion {
        self.version
    }

    /// Interpreter tag, e.g. `cp313`.
    #[must_use]
    pub fn interpreter_tag(&self) -> &str {
        &self.interpreter_tag
    }

    /// Exact ABI tag, e.g. `cp313` or `cp313t`.
    #[must_use]
    pub fn abi_tag(&self) -> &str {
        &self.abi_tag
    }

    /// Supported tags, most specific first.
    #[must_use]
    pub fn candidates(&self) -> &[CompatibilityTag] {
        &self.candidates
    }
}

/// Queries an interpreter for its [`HostInterpreter`] description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonProbe {
    interpreter: String,
}

impl PythonProbe {
    /// Probe the interpreter invoked as `interpreter`.
    #[must_use]
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    /// Command used to start the interpreter.
    #[must_use]
    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    /// Run the probe on the host system.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::ProbeFailed`] if the interpreter cannot
    /// be started, exits unsuccessfully, or prints an unreadable reply.
    pub fn probe(&self) -> Result<HostInterpreter, ResolutionError> {
        self.probe_with(&SystemCommandRunner)
    }

    /// Run the probe through `runner`.
    ///
    /// # Errors
    ///
    /// See [`Self::probe`].
    pub fn probe_with(&self, runner: &dyn CommandRunner) -> Result<HostInterpreter, ResolutionError> {
        let args = vec!["-c".to_owned(), PROBE_SCRIPT.to_owned()];
        let output = runner
            .run(&self.interpreter, &args)
            .map_err(|e| self.failure(format!("could not start interpreter: {e}")))?;
        if !output.status.success() {
            return Err(self.failure(stderr_message(&output)));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let description: InterpreterDescription = serde_json::from_str(stdout.trim())
            .map_err(|e| self.failure(format!("unreadable probe output: {e}")))?;
        debug!(
            "probed {}: {} {}.{} on {}",
            self.interpreter,
            description.implementation,
            description.major,
            description.minor,
            description.platform
        );
        Ok(HostInterpreter::from_description(&description))
    }

    fn failure(&self, reason: String) -> ResolutionError {
        ResolutionError::ProbeFailed {
            interpreter: self.interpreter.clone(),
            reason,
        }
    }
}

/// Short interpreter prefix used in tags.
fn implementation_prefix(name: &str) -> String {
    match name {
        "cpython" => "cp".to_owned(),
        "pypy" => "pp".to_owned(),
        "ironpython" => "ip".to_owned(),
        "jython" => "jy".to_owned(),
        other => other.to_owned(),
    }
}

/// Replace `-` and `.` so the platform fits inside a dash-separated tag.
#[must_use]
pub fn normalize_platform(platform: &str) -> String {
    platform.replace(['-', '.'], "_")
}

fn candidate_tags(
    version: PythonVersion,
    interpreter_tag: &str,
    abi_tag: &str,
    is_cpython: bool,
    platform: &str,
) -> Vec<CompatibilityTag> {
    let PythonVersion { major, minor } = version;
    let stable_abi = format!("abi{major}");
    let mut tags = Vec::new();

    if is_cpython {
        tags.push(CompatibilityTag::new(interpreter_tag, abi_tag, platform));
        tags.push(CompatibilityTag::new(interpreter_tag, &stable_abi, platform));
        tags.push(CompatibilityTag::new(interpreter_tag, NO_ABI, platform));
        for older in (2..minor).rev() {
            tags.push(CompatibilityTag::new(
                format!("cp{major}{older}"),
                &stable_abi,
                platform,
            ));
        }
    } else {
        tags.push(CompatibilityTag::new(interpreter_tag, interpreter_tag, platform));
        tags.push(CompatibilityTag::new(interpreter_tag, NO_ABI, platform));
    }

    push_generic(&mut tags, version, platform);
    tags.push(CompatibilityTag::new(interpreter_tag, NO_ABI, ANY_PLATFORM));
    push_generic(&mut tags, version, ANY_PLATFORM);
    tags
}

/// Append `py{XY}`, `py{X}` and each older `py{X}{y}` for `platform`.
fn push_generic(tags: &mut Vec<CompatibilityTag>, version: PythonVersion, platform: &str) {
    let PythonVersion { major, minor } = version;
    tags.push(CompatibilityTag::new(format!("py{major}{minor}"), NO_ABI, platform));
    tags.push(CompatibilityTag::new(format!("py{major}"), NO_ABI, platform));
    for older in (0..minor).rev() {
        tags.push(CompatibilityTag::new(format!("py{major}{older}"), NO_ABI, platform));
    }
}

fn stderr_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        format!("interpreter exited with {}", output.status)
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
