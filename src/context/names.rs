//! Conversion between class names and tag names
//!
//! `VerticalLayout` in package `com.vaadin.ui` is written as
//! `v-vertical-layout` when `v` is the prefix of that package.

use crate::markup::Element;

use super::error::DesignError;
use super::namespace::NamespaceRegistry;

/// Tag naming a class directly through its `class` attribute
pub const ADDON_TAG: &str = "v-addon";

/// Turn a simple class name into its hyphenated tag fragment
///
/// Every uppercase letter becomes lowercase and, except at the start, is
/// preceded by a hyphen.
pub fn class_name_to_tag_fragment(class_name: &str) -> String {
    let mut fragment = String::with_capacity(class_name.len() + 4);
    for (i, c) in class_name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                fragment.push('-');
            }
            fragment.extend(c.to_lowercase());
        } else {
            fragment.push(c);
        }
    }
    fragment
}

/// Turn a hyphenated tag fragment back into a simple class name
///
/// The first character and every character after a hyphen are uppercased
/// and the hyphens dropped. A trailing hyphen is dropped as well.
pub fn tag_fragment_to_class_name(fragment: &str) -> String {
    let mut class_name = String::with_capacity(fragment.len());
    let mut capitalize = true;
    for c in fragment.chars() {
        if c == '-' {
            capitalize = true;
        } else if capitalize {
            class_name.extend(c.to_uppercase());
            capitalize = false;
        } else {
            class_name.push(c);
        }
    }
    class_name
}

/// Resolve the qualified class name of a template element
///
/// `v-addon` elements name their class in the `class` attribute. Any other
/// tag is `prefix-fragment`, where the prefix must be registered. A tag that
/// ends in a hyphen is logged and tolerated unless `strict` is set.
pub fn resolve_class_name(
    design: &Element,
    namespaces: &NamespaceRegistry,
    strict: bool,
) -> Result<String, DesignError> {
    let tag = design.tag();
    if tag == ADDON_TAG {
        return Ok(design.attr("class").unwrap_or_default().to_string());
    }

    let missing_prefix = || DesignError::MissingPrefix {
        tag: tag.to_string(),
    };
    let (prefix, fragment) = tag.split_once('-').ok_or_else(missing_prefix)?;
    if fragment.trim_end_matches('-').is_empty() {
        return Err(missing_prefix());
    }

    let package = namespaces
        .package_for(prefix)
        .ok_or_else(|| DesignError::UnknownTag {
            tag: tag.to_string(),
        })?;

    if fragment.ends_with('-') {
        if strict {
            return Err(DesignError::MalformedTag {
                tag: tag.to_string(),
            });
        }
        log::warn!("A tag name should not end with '-': {}", tag);
    }

    Ok(format!("{}.{}", package, tag_fragment_to_class_name(fragment)))
}
