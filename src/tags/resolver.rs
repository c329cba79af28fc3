//! Selection of the single compatibility tag for a build.

use super::compat_tag::{ANY_PLATFORM, CompatibilityTag, NO_ABI};
use super::host::HostInterpreter;
use crate::error::ResolutionError;
use crate::project::PythonConstraint;
use log::debug;

/// What the build needs from its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagRequest {
    /// The project's interpreter constraint.
    pub constraint: PythonConstraint,
    /// Whether the wheel ships no native code.
    pub is_pure: bool,
    /// Whether native code targets the limited ABI.
    pub use_stable_abi: bool,
}

/// Pick the first host candidate that satisfies `request`.
///
/// Pure wheels take a `py*-none-any` tag. An exact constraint accepts only
/// `py{X}{Y}`; a minimum constraint accepts the major-wide `py{X}`.
/// Native wheels take a platform-specific tag for the host interpreter,
/// with the exact ABI, or `abi{X}` when the stable ABI is requested.
///
/// # Errors
///
/// Returns [`ResolutionError::InterpreterMismatch`] when the host fails the
/// constraint, and [`ResolutionError::NoCompatibleTag`] when no candidate
/// fits.
///
/// # Examples
///
/// ```
/// use easywheel::project::{PythonConstraint, PythonVersion};
/// use easywheel::tags::{CompatibilityTag, HostInterpreter, TagRequest, resolve_tag};
///
/// let host = HostInterpreter::new(
///     PythonVersion::new(3, 13),
///     "cp313",
///     "cp313",
///     vec![
///         CompatibilityTag::new("cp313", "cp313", "linux_x86_64"),
///         CompatibilityTag::new("py3", "none", "any"),
///     ],
/// );
/// let request = TagRequest {
///     constraint: ">=3.8".parse::<PythonConstraint>().expect("valid"),
///     is_pure: true,
///     use_stable_abi: false,
/// };
/// let tag = resolve_tag(&request, &host).expect("pure tag");
/// assert_eq!(tag.to_string(), "py3-none-any");
/// ```
pub fn resolve_tag(
    request: &TagRequest,
    host: &HostInterpreter,
) -> Result<CompatibilityTag, ResolutionError> {
    if !request.constraint.is_satisfied_by(host.version()) {
        return Err(ResolutionError::InterpreterMismatch {
            host: host.version().to_string(),
            constraint: request.constraint.to_string(),
        });
    }

    let (kind, found) = if request.is_pure {
        let interpreter = pure_interpreter(request.constraint);
        let found = host.candidates().iter().find(|tag| {
            tag.abi() == NO_ABI
                && tag.platform() == ANY_PLATFORM
                && tag.interpreter() == interpreter
        });
        ("pure", found)
    } else {
        let abi = if request.use_stable_abi {
            format!("abi{}", host.version().major)
        } else {
            host.abi_tag().to_owned()
        };
        let found = host.candidates().iter().find(|tag| {
            tag.platform() != ANY_PLATFORM
                && tag.interpreter() == host.interpreter_tag()
                && tag.abi() == abi
        });
        let kind = if request.use_stable_abi {
            "stable-ABI native"
        } else {
            "native"
        };
        (kind, found)
    };

    let tag = found.cloned().ok_or(ResolutionError::NoCompatibleTag {
        kind,
        candidates: host.candidates().len(),
    })?;
    debug!("selected {kind} tag {tag}");
    Ok(tag)
}

fn pure_interpreter(constraint: PythonConstraint) -> String {
    match constraint {
        PythonConstraint::Exact(version) => format!("py{}{}", version.major, version.minor),
        PythonConstraint::Minimum(version) => format!("py{}", version.major),
    }
}
