//! File inclusion rules: substitution, classification, and resolution.
//!
//! A package lists raw rules such as `a.py`, `build/x.so:pkg/x.so` or
//! `!g src/**/*.py`. Each rule goes through three steps:
//!
//! 1. [`env::substitute`] replaces `$NAME$` placeholders.
//! 2. [`FileRule::parse`] classifies the text as glob, mapped, or bare.
//! 3. [`FileRuleResolver`] expands it into [`ResolvedFile`] pairs.
//!
//! Glob matches are yielded in the order of the `glob` crate, which sorts
//! each directory's entries, so expansion is stable across platforms.

pub mod env;
pub mod resolver;
pub mod rule;

pub use env::{Environment, ProcessEnvironment};
pub use resolver::{FileRuleResolver, NATIVE_EXTENSIONS, ResolvedFile};
pub use rule::FileRule;
