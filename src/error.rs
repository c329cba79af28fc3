//! Error types for the wheel build pipeline.
//!
//! Errors are layered: [`ConfigError`] covers malformed definitions and file
//! rules, [`ResolutionError`] covers compatibility-tag negotiation, and
//! [`BuildError`] wraps both alongside the I/O and archive failures raised
//! while writing output. Every variant is fatal; the pipeline never retries.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors arising from a malformed or ambiguous project definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A `$NAME$` placeholder referenced an unset environment variable.
    #[error("could not find environment variable {name} for use as replacement in \"{rule}\"")]
    UndefinedVariable {
        /// The placeholder name without its `$` delimiters.
        name: String,
        /// The rule text as written in the definition.
        rule: String,
    },

    /// A glob rule also tried to override its destination.
    #[error("cannot use a destination override with a glob rule: \"{rule}\"")]
    GlobWithDestination {
        /// The offending rule after substitution.
        rule: String,
    },

    /// A rule contains more than one `:` separator.
    #[error("ambiguous file mapping \"{rule}\": expected at most one ':'")]
    AmbiguousMapping {
        /// The offending rule after substitution.
        rule: String,
    },

    /// A rule is blank, or one side of a mapping is blank.
    #[error("empty file rule in package {package}")]
    EmptyRule {
        /// The package group containing the rule.
        package: String,
    },

    /// A glob pattern failed to compile.
    #[error("invalid glob pattern \"{pattern}\": {reason}")]
    InvalidGlob {
        /// The pattern as handed to the glob engine.
        pattern: String,
        /// Description of the syntax error.
        reason: String,
    },

    /// A destination would escape the archive root.
    #[error("destination \"{destination}\" escapes the archive root")]
    UnsafeDestination {
        /// The rejected destination path.
        destination: String,
    },

    /// Two different origins were mapped onto the same archive path.
    #[error("destination {destination} is claimed by both {first} and {second}")]
    DuplicateDestination {
        /// The archive path in conflict.
        destination: String,
        /// Origin of the first claim.
        first: Utf8PathBuf,
        /// Origin of the conflicting claim.
        second: Utf8PathBuf,
    },

    /// The interpreter constraint is neither `==X.Y` nor `>=X.Y`.
    #[error("invalid python constraint \"{value}\": {reason}")]
    InvalidConstraint {
        /// The rejected constraint text.
        value: String,
        /// Description of the parse failure.
        reason: String,
    },

    /// A required top-level field is empty.
    #[error("project {field} must not be empty")]
    EmptyField {
        /// Name of the blank field.
        field: &'static str,
    },

    /// A metadata value spans several lines and would inject METADATA headers.
    #[error("metadata field {field} must be a single line")]
    MultilineMetadata {
        /// The offending field, with the URL label where relevant.
        field: String,
    },

    /// A shipped file would overwrite a generated dist-info member.
    #[error("destination {destination} is reserved for the {dist_info} directory")]
    ReservedDestination {
        /// The rejected archive path.
        destination: String,
        /// The dist-info directory name.
        dist_info: String,
    },

    /// The definition document could not be deserialized.
    #[error("failed to parse {path}: {reason}")]
    Parse {
        /// Path of the definition document.
        path: Utf8PathBuf,
        /// Parser diagnostic.
        reason: String,
    },

    /// No definition document was found, or its extension is unknown.
    #[error("no package definition found at {path}; expected package.json or package.toml")]
    DefinitionNotFound {
        /// The path that was searched.
        path: Utf8PathBuf,
    },
}

/// Errors arising when no compatibility tag fits the host interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// The host interpreter does not satisfy the project's constraint.
    #[error("host interpreter {host} does not satisfy python constraint {constraint}")]
    InterpreterMismatch {
        /// The host interpreter version, e.g. `3.13`.
        host: String,
        /// The project constraint, e.g. `>=3.8`.
        constraint: String,
    },

    /// No candidate tag matched the requested purity and ABI.
    #[error("no compatible {kind} tag found among {candidates} candidate(s)")]
    NoCompatibleTag {
        /// Human-readable description of the request.
        kind: &'static str,
        /// Number of candidates inspected.
        candidates: usize,
    },

    /// A tag string is not of the form `interpreter-abi-platform`.
    #[error("malformed compatibility tag \"{tag}\"")]
    MalformedTag {
        /// The rejected tag text.
        tag: String,
    },

    /// The host interpreter could not be queried.
    #[error("failed to probe interpreter {interpreter}: {reason}")]
    ProbeFailed {
        /// The interpreter command that was run.
        interpreter: String,
        /// Description of the failure.
        reason: String,
    },
}

/// Top-level error returned by the build pipeline.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The project definition or one of its rules is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No compatibility tag could be negotiated.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// A file named by a rule does not exist.
    #[error("source file not found: {path}")]
    MissingSource {
        /// The missing origin path.
        path: Utf8PathBuf,
    },

    /// The output archive already exists and will not be overwritten.
    #[error("output archive already exists: {path}")]
    AlreadyExists {
        /// The existing archive path.
        path: Utf8PathBuf,
    },

    /// A filesystem operation failed.
    #[error("I/O error during build: {0}")]
    Io(#[from] std::io::Error),

    /// The zip writer rejected an entry.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The build report could not be serialized.
    #[error("report serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A path on disk is not valid UTF-8.
    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(std::path::PathBuf),
}

/// Result type alias using [`BuildError`].
pub type Result<T> = std::result::Result<T, BuildError>;
