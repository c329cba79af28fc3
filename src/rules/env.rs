//! Environment-variable substitution for file rules.
//!
//! Rules may embed `$NAME$` placeholders anywhere in their text. Every
//! placeholder must resolve; an unset variable aborts the build.

use crate::error::ConfigError;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

#[expect(
    clippy::expect_used,
    reason = "the placeholder pattern is a compile-time constant"
)]
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)\$").expect("placeholder pattern is valid")
});

/// Source of environment variables for rule substitution.
///
/// Abstracted so resolution can run against a fixed mapping in tests
/// instead of the process environment.
pub trait Environment {
    /// Look up `name`, returning `None` when it is unset.
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads variables from the current process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Replace every `$NAME$` placeholder in `rule` with its value.
///
/// Placeholder names follow identifier rules (`[A-Za-z_][A-Za-z0-9_]*`); a
/// `$` that does not open a well-formed placeholder is kept literally.
///
/// # Errors
///
/// Returns [`ConfigError::UndefinedVariable`] for the first placeholder whose
/// variable is unset.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use easywheel::rules::env::substitute;
///
/// let env = HashMap::from([("FOO".to_owned(), "data".to_owned())]);
/// assert_eq!(substitute("$FOO$/x.txt", &env).expect("FOO is set"), "data/x.txt");
/// ```
pub fn substitute(rule: &str, env: &dyn Environment) -> Result<String, ConfigError> {
    if let Some(name) = PLACEHOLDER
        .captures_iter(rule)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .find(|name| env.var(name).is_none())
    {
        return Err(ConfigError::UndefinedVariable {
            name: name.to_owned(),
            rule: rule.to_owned(),
        });
    }

    let replaced = PLACEHOLDER.replace_all(rule, |caps: &Captures<'_>| {
        caps.get(1)
            .and_then(|m| env.var(m.as_str()))
            .unwrap_or_default()
    });
    Ok(replaced.into_owned())
}
