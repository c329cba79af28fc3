//! Descriptive package metadata.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form metadata rendered into the wheel's `METADATA` file.
///
/// Every field is optional in the definition document and defaults to empty.
/// URLs are keyed by label; a [`BTreeMap`] keeps labels unique and renders
/// them in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetadataBlock {
    /// One-line project summary.
    pub summary: String,
    /// License name or SPDX expression.
    pub license: String,
    /// Single author string.
    pub author: String,
    /// Multiple authors, used when `author` is empty.
    pub authors: Vec<String>,
    /// Labelled project URLs such as `Homepage` or `Source`.
    pub urls: BTreeMap<String, String>,
    /// Supported platform names.
    pub platforms: Vec<String>,
    /// Trove classifiers.
    pub classifiers: Vec<String>,
    /// Search keywords.
    pub keywords: Vec<String>,
}

impl MetadataBlock {
    /// Return the author line, joining `authors` when `author` is unset.
    #[must_use]
    pub fn author_line(&self) -> String {
        if self.author.trim().is_empty() {
            self.authors.join(", ")
        } else {
            self.author.clone()
        }
    }

    /// Check that every value fits on one `METADATA` header line.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MultilineMetadata`] naming the first field
    /// holding a line break.
    pub fn validate(&self) -> Result<(), ConfigError> {
        single_line("summary", &self.summary)?;
        single_line("license", &self.license)?;
        single_line("author", &self.author)?;
        for (field, values) in [
            ("authors", &self.authors),
            ("platforms", &self.platforms),
            ("classifiers", &self.classifiers),
            ("keywords", &self.keywords),
        ] {
            for value in values {
                single_line(field, value)?;
            }
        }
        for (label, url) in &self.urls {
            single_line("urls", label)?;
            single_line(&format!("urls.{label}"), url)?;
        }
        Ok(())
    }
}

pub(crate) fn single_line(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.contains(['\n', '\r']) {
        return Err(ConfigError::MultilineMetadata {
            field: field.to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn author_takes_precedence_over_authors() {
        let block = MetadataBlock {
            author: "Ada".to_owned(),
            authors: vec!["Grace".to_owned()],
            ..MetadataBlock::default()
        };
        assert_eq!(block.author_line(), "Ada");
    }

    #[test]
    fn authors_are_comma_joined() {
        let block = MetadataBlock {
            authors: vec!["Ada".to_owned(), "Grace".to_owned()],
            ..MetadataBlock::default()
        };
        assert_eq!(block.author_line(), "Ada, Grace");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let block: MetadataBlock =
            serde_json::from_str(r#"{"summary": "demo"}"#).expect("valid metadata");
        assert_eq!(block.summary, "demo");
        assert!(block.urls.is_empty());
        assert!(block.keywords.is_empty());
    }

    #[test]
    fn single_line_values_pass_validation() {
        let block = MetadataBlock {
            summary: "A demo".to_owned(),
            urls: BTreeMap::from([("Homepage".to_owned(), "https://example.org".to_owned())]),
            ..MetadataBlock::default()
        };
        assert_eq!(block.validate(), Ok(()));
    }

    #[rstest]
    #[case::summary(MetadataBlock { summary: "demo\nName: evil".to_owned(), ..MetadataBlock::default() }, "summary")]
    #[case::license(MetadataBlock { license: "MIT\r".to_owned(), ..MetadataBlock::default() }, "license")]
    #[case::classifier(
        MetadataBlock { classifiers: vec!["ok".to_owned(), "a\nb".to_owned()], ..MetadataBlock::default() },
        "classifiers"
    )]
    #[case::url(
        MetadataBlock {
            urls: BTreeMap::from([("Source".to_owned(), "x\ny".to_owned())]),
            ..MetadataBlock::default()
        },
        "urls.Source"
    )]
    fn line_breaks_are_rejected(#[case] block: MetadataBlock, #[case] field: &str) {
        assert_eq!(
            block.validate(),
            Err(ConfigError::MultilineMetadata {
                field: field.to_owned()
            })
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_str::<MetadataBlock>(r#"{"homepage_url": "x"}"#);
        assert!(result.is_err());
    }
}
