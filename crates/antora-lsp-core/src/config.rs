//! Reading `antora.yml` component descriptors.
//!
//! The descriptor is kept as a generic YAML mapping; typed accessors pull
//! out the handful of keys the editor features use. Loading never fails:
//! an unreadable or unparsable file is logged and treated as empty, which
//! callers handle exactly like a missing descriptor.

use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::cancellation::Cancellation;
use crate::error::{AntoraError, Result};
use crate::locator::{WorkspaceSearch, find_antora_config_file};

/// A parsed `antora.yml`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AntoraConfig {
    raw: Mapping,
}

impl AntoraConfig {
    /// Parse descriptor text.
    ///
    /// A document whose root is not a mapping (including an empty file)
    /// parses as an empty config.
    pub fn parse(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        let value: Value = serde_yaml::from_str(text)?;
        Ok(match value {
            Value::Mapping(raw) => Self { raw },
            _ => Self::default(),
        })
    }

    /// Read and parse a descriptor, propagating failures.
    pub fn try_load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AntoraError::io(path, e))?;
        Self::parse(&text).map_err(|source| AntoraError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse a descriptor, degrading to an empty config on failure.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Unable to parse Antora configuration");
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Look up a top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }

    /// The component name.
    pub fn name(&self) -> Option<String> {
        self.get("name").and_then(scalar_to_string)
    }

    /// The component version. `~` means an unversioned component and reads as `""`.
    pub fn version(&self) -> Option<String> {
        match self.get("version")? {
            Value::Null => Some(String::new()),
            other => scalar_to_string(other),
        }
    }

    /// The component title, if set.
    pub fn title(&self) -> Option<String> {
        self.get("title").and_then(scalar_to_string)
    }

    /// Navigation files, relative to the descriptor directory.
    pub fn nav(&self) -> Vec<String> {
        match self.get("nav") {
            Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
            _ => Vec::new(),
        }
    }

    /// The `asciidoc.attributes` mapping, or `None` when it is missing.
    ///
    /// Values are rendered as strings; `~` and `false` (an unset attribute)
    /// become `""`.
    pub fn attributes(&self) -> Option<BTreeMap<String, String>> {
        let attributes = self.get("asciidoc")?.get("attributes")?.as_mapping()?;
        Some(
            attributes
                .iter()
                .filter_map(|(key, value)| {
                    let key = scalar_to_string(key)?;
                    let value = match value {
                        Value::Null | Value::Bool(false) => String::new(),
                        other => scalar_to_string(other).unwrap_or_default(),
                    };
                    Some((key, value))
                })
                .collect(),
        )
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Locate and load the descriptor owning `document`.
///
/// Returns an empty config when no descriptor owns the document.
pub async fn get_antora_config(
    search: &dyn WorkspaceSearch,
    document: &Path,
    cancel: &Cancellation,
) -> Result<AntoraConfig> {
    Ok(find_antora_config_file(search, document, cancel)
        .await?
        .map(|config_file| AntoraConfig::load(&config_file))
        .unwrap_or_default())
}

/// The `asciidoc.attributes` of the descriptor owning `document`.
pub async fn get_attributes(
    search: &dyn WorkspaceSearch,
    document: &Path,
    cancel: &Cancellation,
) -> Result<BTreeMap<String, String>> {
    Ok(get_antora_config(search, document, cancel)
        .await?
        .attributes()
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_descriptor_fields() {
        let config = AntoraConfig::parse(
            r#"
name: docs
version: '2.1'
title: Documentation
nav:
- modules/ROOT/nav.adoc
asciidoc:
  attributes:
    product: Widget
    release: 3
    experimental: true
    hidden: false
"#,
        )
        .unwrap();

        assert_eq!(config.name().as_deref(), Some("docs"));
        assert_eq!(config.version().as_deref(), Some("2.1"));
        assert_eq!(config.title().as_deref(), Some("Documentation"));
        assert_eq!(config.nav(), vec!["modules/ROOT/nav.adoc".to_string()]);

        let attributes = config.attributes().unwrap();
        assert_eq!(attributes["product"], "Widget");
        assert_eq!(attributes["release"], "3");
        assert_eq!(attributes["experimental"], "true");
        assert_eq!(attributes["hidden"], "");
    }

    #[test]
    fn null_version_is_unversioned() {
        let config = AntoraConfig::parse("name: docs\nversion: ~\n").unwrap();
        assert_eq!(config.version().as_deref(), Some(""));
    }

    #[test]
    fn missing_attributes_is_none() {
        let config = AntoraConfig::parse("name: docs\nversion: '1.0'\n").unwrap();
        assert_eq!(config.attributes(), None);
    }

    #[test]
    fn non_mapping_document_is_empty() {
        assert!(AntoraConfig::parse("- a\n- b\n").unwrap().is_empty());
        assert!(AntoraConfig::parse("").unwrap().is_empty());
    }

    #[test]
    fn unparsable_file_loads_as_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("antora.yml");
        std::fs::write(&path, "name: [unclosed\nversion: {").unwrap();

        let config = AntoraConfig::load(&path);
        assert!(config.is_empty());
        assert!(AntoraConfig::try_load(&path).is_err());
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let config = AntoraConfig::load(&tmp.path().join("antora.yml"));
        assert_eq!(config, AntoraConfig::default());
    }
}
