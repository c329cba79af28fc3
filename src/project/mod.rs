//! Project model: definition schema, interpreter constraints, and metadata.
//!
//! # Sub-modules
//!
//! - [`constraint`] — `==X.Y` / `>=X.Y` interpreter constraints.
//! - [`definition`] — definition schema, loader, and eager validation.
//! - [`metadata`] — free-form `METADATA` fields.

pub mod constraint;
pub mod definition;
pub mod metadata;

pub use constraint::{PythonConstraint, PythonVersion};
pub use definition::{BuildOptions, DefinitionFormat, PackageGroup, ProjectDefinition};
pub use metadata::MetadataBlock;
