//! Prefix to package mappings used in tag names

use std::collections::HashMap;

use crate::markup::{write_fragment, Document, Element};

use super::error::DesignError;
use super::two_way::TwoWayMap;

/// Prefix always mapped to the built-in component package
pub const DEFAULT_PREFIX: &str = "v";

/// Package of the built-in components
pub const DEFAULT_PACKAGE: &str = "com.vaadin.ui";

/// `name` of the meta tags that declare prefixes
pub const PACKAGE_MAPPING: &str = "package-mapping";

/// Two-way mapping between tag prefixes and package names
///
/// The default prefixes are always present and never written back to a
/// document.
#[derive(Debug, Clone)]
pub struct NamespaceRegistry {
    prefixes: TwoWayMap<String, String>,
    defaults: HashMap<String, String>,
}

impl Default for NamespaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceRegistry {
    pub fn new() -> Self {
        let mut defaults = HashMap::new();
        defaults.insert(DEFAULT_PREFIX.to_string(), DEFAULT_PACKAGE.to_string());

        let mut registry = Self {
            prefixes: TwoWayMap::new(),
            defaults,
        };
        // Defaults go through the two-way map so custom mappings see them
        let defaults: Vec<_> = registry
            .defaults
            .iter()
            .map(|(prefix, package)| (prefix.clone(), package.clone()))
            .collect();
        for (prefix, package) in defaults {
            registry.map_prefix(&prefix, &package);
        }
        registry
    }

    /// Map `prefix` to `package` in both directions
    ///
    /// Returns whether either side had a mapping before.
    pub fn map_prefix(&mut self, prefix: &str, package: &str) -> bool {
        log::trace!("mapping prefix '{}' to package '{}'", prefix, package);
        self.prefixes.put(prefix.to_string(), package.to_string())
    }

    pub fn package_for(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(&prefix.to_string()).map(String::as_str)
    }

    pub fn prefix_for(&self, package: &str) -> Option<&str> {
        self.prefixes.get_key(&package.to_string()).map(String::as_str)
    }

    /// Whether `prefix` is one of the built-in default prefixes
    pub fn is_default(&self, prefix: &str) -> bool {
        self.defaults.contains_key(prefix)
    }

    /// Iterate over all prefix/package pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, k)| (p.as_str(), k.as_str()))
    }

    /// Prefix for `package`, deriving and registering one if needed
    ///
    /// A derived prefix is the package name with every `.` replaced by `_`.
    pub fn prefix_or_derive(&mut self, package: &str) -> String {
        if let Some(prefix) = self.prefix_for(package) {
            return prefix.to_string();
        }
        let prefix = package.replace('.', "_");
        log::debug!("derived prefix '{}' for package '{}'", prefix, package);
        self.map_prefix(&prefix, package);
        prefix
    }

    /// Read `package-mapping` meta tags from the document head
    ///
    /// Every entry is validated before any is registered, so a malformed
    /// entry leaves the registry untouched.
    pub fn read_prefixes(&mut self, document: &Document) -> Result<(), DesignError> {
        let mut mappings = Vec::new();
        for meta in document.head.child_elements() {
            if meta.tag() != "meta" || meta.attr("name") != Some(PACKAGE_MAPPING) {
                continue;
            }
            let Some(content) = meta.attr("content") else {
                continue;
            };
            mappings.push(parse_mapping(content).ok_or_else(|| {
                DesignError::MalformedPackageMapping {
                    markup: write_fragment(meta, 0).trim_end().to_string(),
                }
            })?);
        }

        for (prefix, package) in mappings {
            self.map_prefix(prefix, package);
        }
        Ok(())
    }

    /// Append one `package-mapping` meta tag per non-default prefix, sorted
    /// by prefix
    pub fn store_prefixes(&self, document: &mut Document) {
        let mut mappings: Vec<_> = self
            .iter()
            .filter(|(prefix, _)| !self.is_default(prefix))
            .collect();
        mappings.sort_unstable();
        for (prefix, package) in mappings {
            let meta = Element::new("meta")
                .with_attr("name", PACKAGE_MAPPING)
                .with_attr("content", format!("{}:{}", prefix, package));
            document.head.append_child(meta);
        }
    }
}

/// Split `prefix:package`; both parts must be present and non-empty
fn parse_mapping(content: &str) -> Option<(&str, &str)> {
    let mut parts = content.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(prefix), Some(package), None) if !prefix.is_empty() && !package.is_empty() => {
            Some((prefix, package))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(content: &str) -> Element {
        Element::new("meta")
            .with_attr("name", PACKAGE_MAPPING)
            .with_attr("content", content)
    }

    fn document_with(metas: Vec<Element>) -> Document {
        let mut document = Document::new();
        for m in metas {
            document.head.append_child(m);
        }
        document
    }

    #[test]
    fn test_default_prefix_seeded() {
        let registry = NamespaceRegistry::new();
        assert_eq!(registry.package_for("v"), Some("com.vaadin.ui"));
        assert_eq!(registry.prefix_for("com.vaadin.ui"), Some("v"));
        assert!(registry.is_default("v"));
    }

    #[test]
    fn test_custom_mapping_conflicts_with_default() {
        let mut registry = NamespaceRegistry::new();
        assert!(registry.map_prefix("x", "com.vaadin.ui"));
        assert_eq!(registry.package_for("v"), None);
        assert_eq!(registry.prefix_for("com.vaadin.ui"), Some("x"));
    }

    #[test]
    fn test_read_prefixes() {
        let mut registry = NamespaceRegistry::new();
        let document = document_with(vec![
            meta("my:com.example.widgets"),
            Element::new("meta").with_attr("name", "viewport").with_attr("content", "a:b:c"),
        ]);
        registry.read_prefixes(&document).unwrap();
        assert_eq!(registry.package_for("my"), Some("com.example.widgets"));
    }

    #[test]
    fn test_malformed_mapping_registers_nothing() {
        for content in ["v:com.vaadin.ui:extra", "nocolon", "x:", ":pkg"] {
            let mut registry = NamespaceRegistry::new();
            let document = document_with(vec![meta("ok:com.example"), meta(content)]);
            let err = registry.read_prefixes(&document).unwrap_err();
            match err {
                DesignError::MalformedPackageMapping { markup } => {
                    assert!(markup.contains(content), "markup {} lacks {}", markup, content);
                }
                other => panic!("Expected MalformedPackageMapping, got {:?}", other),
            }
            assert_eq!(registry.package_for("ok"), None);
            assert_eq!(registry.iter().count(), 1);
        }
    }

    #[test]
    fn test_store_prefixes_skips_default() {
        let mut registry = NamespaceRegistry::new();
        registry.map_prefix("my", "com.example");
        let mut document = Document::new();
        registry.store_prefixes(&mut document);

        let metas: Vec<_> = document.head.child_elements().collect();
        assert_eq!(metas.len(), 1);
        assert_eq!(metas[0].attr("content"), Some("my:com.example"));
    }

    #[test]
    fn test_prefix_derivation() {
        let mut registry = NamespaceRegistry::new();
        assert_eq!(registry.prefix_or_derive("com.vaadin.ui"), "v");
        assert_eq!(registry.prefix_or_derive("org.acme.ui"), "org_acme_ui");
        assert_eq!(registry.package_for("org_acme_ui"), Some("org.acme.ui"));
    }

    #[test]
    fn test_prefixes_round_trip_through_document() {
        let mut original = NamespaceRegistry::new();
        original.map_prefix("a", "com.example.a");
        original.map_prefix("b", "com.example.b");

        let mut document = Document::new();
        original.store_prefixes(&mut document);

        let mut restored = NamespaceRegistry::new();
        restored.read_prefixes(&document).unwrap();

        let mut expected: Vec<_> = original.iter().collect();
        let mut actual: Vec<_> = restored.iter().collect();
        expected.sort_unstable();
        actual.sort_unstable();
        assert_eq!(actual, expected);
    }
}
