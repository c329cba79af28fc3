//! Build Python wheels from a declarative package definition.
//!
//! A build loads a [`project::ProjectDefinition`], expands its file rules
//! with [`rules`], negotiates a compatibility tag against the host
//! interpreter with [`tags`], writes the dist-info manifests
//! ([`manifest`], [`record`]) and packs everything with [`archive`]. The
//! [`pipeline`] module runs those steps in order.

pub mod archive;
pub mod archive_path;
pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod naming;
pub mod pipeline;
pub mod project;
pub mod record;
pub mod report;
pub mod rules;
pub mod sha256_digest;
pub mod tags;

pub use error::{BuildError, ConfigError, ResolutionError, Result};
pub use pipeline::{BuildOutput, PipelineContext, build_wheel};
