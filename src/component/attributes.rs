//! Shared component state and attribute conversion helpers

use crate::context::{DesignContext, DesignError, CAPTION_ATTRIBUTE, ID_ATTRIBUTE};
use crate::markup::Element;

/// State every built-in component carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentState {
    pub id: Option<String>,
    pub caption: Option<String>,
    pub description: Option<String>,
    pub style_name: Option<String>,
    pub enabled: bool,
    pub visible: bool,
}

impl Default for ComponentState {
    fn default() -> Self {
        Self {
            id: None,
            caption: None,
            description: None,
            style_name: None,
            enabled: true,
            visible: true,
        }
    }
}

impl ComponentState {
    /// Read the shared attributes from `design`
    pub fn read(&mut self, design: &Element) -> Result<(), DesignError> {
        if let Some(id) = read_string(design, ID_ATTRIBUTE) {
            self.id = Some(id);
        }
        if let Some(caption) = read_string(design, CAPTION_ATTRIBUTE) {
            self.caption = Some(caption);
        }
        if let Some(description) = read_string(design, "description") {
            self.description = Some(description);
        }
        if let Some(style_name) = read_string(design, "style-name") {
            self.style_name = Some(style_name);
        }
        if let Some(enabled) = read_bool(design, "enabled")? {
            self.enabled = enabled;
        }
        if let Some(visible) = read_bool(design, "visible")? {
            self.visible = visible;
        }
        Ok(())
    }

    /// Write the attributes that differ from `defaults`
    pub fn write(&self, design: &mut Element, defaults: &ComponentState) {
        write_string(design, ID_ATTRIBUTE, self.id.as_deref(), defaults.id.as_deref());
        write_string(
            design,
            CAPTION_ATTRIBUTE,
            self.caption.as_deref(),
            defaults.caption.as_deref(),
        );
        write_string(
            design,
            "description",
            self.description.as_deref(),
            defaults.description.as_deref(),
        );
        write_string(
            design,
            "style-name",
            self.style_name.as_deref(),
            defaults.style_name.as_deref(),
        );
        write_bool(design, "enabled", self.enabled, defaults.enabled);
        write_bool(design, "visible", self.visible, defaults.visible);
    }

    /// Write against the cached default state
    pub fn write_with_defaults(&self, design: &mut Element, context: &DesignContext) {
        let defaults = context.default_instance::<ComponentState>();
        self.write(design, &defaults);
    }
}

/// Read a string attribute
pub fn read_string(design: &Element, name: &str) -> Option<String> {
    design.attr(name).map(str::to_owned)
}

/// Read a boolean attribute
///
/// A bare attribute or `"true"` is true and `"false"` is false; any other
/// value is rejected.
pub fn read_bool(design: &Element, name: &str) -> Result<Option<bool>, DesignError> {
    match design.attr(name) {
        None => Ok(None),
        Some("") | Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some(other) => Err(DesignError::invalid_attribute(
            design.tag(),
            name,
            other,
            "expected a boolean",
        )),
    }
}

/// Write a string attribute unless it equals the default
pub fn write_string(design: &mut Element, name: &str, value: Option<&str>, default: Option<&str>) {
    if value == default {
        return;
    }
    if let Some(value) = value {
        design.set_attr(name, value);
    }
}

/// Write a boolean attribute unless it equals the default
pub fn write_bool(design: &mut Element, name: &str, value: bool, default: bool) {
    if value == default {
        return;
    }
    design.set_attr(name, if value { "" } else { "false" });
}
