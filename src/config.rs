//! Configuration for reading and writing designs
//!
//! Configuration can be built in code or loaded from TOML:
//!
//! ```toml
//! strict_tag_names = false
//! indent = 2
//!
//! [prefixes]
//! my = "com.example.widgets"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Options applied to every design context created for a read or write
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DesignConfig {
    /// Extra prefix to package mappings available to every template
    pub prefixes: BTreeMap<String, String>,

    /// Fail on tag names ending in a hyphen instead of logging a warning
    pub strict_tag_names: bool,

    /// Indent width of written templates
    pub indent: usize,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            prefixes: BTreeMap::new(),
            strict_tag_names: false,
            indent: 2,
        }
    }
}

impl DesignConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Add a prefix to package mapping
    pub fn with_prefix(mut self, prefix: impl Into<String>, package: impl Into<String>) -> Self {
        self.prefixes.insert(prefix.into(), package.into());
        self
    }

    /// Enable or disable strict tag name checking
    pub fn with_strict_tag_names(mut self, strict: bool) -> Self {
        self.strict_tag_names = strict;
        self
    }

    /// Set the indent width of written templates
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DesignConfig::default();
        assert!(config.prefixes.is_empty());
        assert!(!config.strict_tag_names);
        assert_eq!(config.indent, 2);
    }

    #[test]
    fn test_builder_pattern() {
        let config = DesignConfig::new()
            .with_prefix("my", "com.example")
            .with_strict_tag_names(true)
            .with_indent(4);
        assert_eq!(config.prefixes.get("my").map(String::as_str), Some("com.example"));
        assert!(config.strict_tag_names);
        assert_eq!(config.indent, 4);
    }

    #[test]
    fn test_parse_toml() {
        let config = DesignConfig::from_toml(
            r#"
strict_tag_names = true

[prefixes]
my = "com.example.widgets"
"#,
        )
        .expect("Should parse");
        assert!(config.strict_tag_names);
        assert_eq!(config.indent, 2);
        assert_eq!(
            config.prefixes.get("my").map(String::as_str),
            Some("com.example.widgets")
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(DesignConfig::from_toml("colour = 1").is_err());
    }

    #[test]
    fn test_invalid_toml_error() {
        assert!(DesignConfig::from_toml("this is not valid toml {{{{").is_err());
    }
}
