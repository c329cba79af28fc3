//! Compatibility tag negotiation.
//!
//! [`host`] describes the interpreter the build runs against and lists the
//! tags it accepts. [`resolve_tag`] picks the one tag that names the wheel.

pub mod compat_tag;
pub mod host;
pub mod resolver;

pub use compat_tag::CompatibilityTag;
pub use host::{HostInterpreter, PythonProbe};
pub use resolver::{TagRequest, resolve_tag};
