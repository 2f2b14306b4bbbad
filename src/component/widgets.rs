//! Built-in leaf components

use std::any::Any;

use super::attributes::{read_bool, read_string, write_bool, write_string, ComponentState};
use super::{Component, ComponentClass};
use crate::context::{DesignContext, DesignError};
use crate::markup::Element;

macro_rules! state_accessors {
    () => {
        fn id(&self) -> Option<&str> {
            self.state.id.as_deref()
        }

        fn set_id(&mut self, id: Option<String>) {
            self.state.id = id;
        }

        fn caption(&self) -> Option<&str> {
            self.state.caption.as_deref()
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    };
}

/// A clickable button
///
/// The caption may be given either as the `caption` attribute or as the
/// element's text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Button {
    pub state: ComponentState,
    pub html_content_allowed: bool,
}

impl Button {
    pub fn new(caption: impl Into<String>) -> Self {
        let mut button = Self::default();
        button.state.caption = Some(caption.into());
        button
    }
}

impl Component for Button {
    fn class(&self) -> ComponentClass {
        ComponentClass::builtin("Button")
    }

    state_accessors!();

    fn read_design(
        &mut self,
        design: &Element,
        _context: &mut DesignContext,
    ) -> Result<(), DesignError> {
        self.state.read(design)?;
        let text = design.text();
        if !text.is_empty() {
            self.state.caption = Some(text);
        }
        if let Some(allowed) = read_bool(design, "html-content-allowed")? {
            self.html_content_allowed = allowed;
        }
        Ok(())
    }

    fn write_design(
        &self,
        design: &mut Element,
        context: &mut DesignContext,
    ) -> Result<(), DesignError> {
        let defaults = context.default_instance::<Button>();
        self.state.write(design, &defaults.state);
        write_bool(
            design,
            "html-content-allowed",
            self.html_content_allowed,
            defaults.html_content_allowed,
        );
        Ok(())
    }
}

/// How label text is interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContentMode {
    #[default]
    Text,
    Preformatted,
    Html,
}

impl ContentMode {
    fn as_str(self) -> &'static str {
        match self {
            ContentMode::Text => "text",
            ContentMode::Preformatted => "preformatted",
            ContentMode::Html => "html",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(ContentMode::Text),
            "preformatted" => Some(ContentMode::Preformatted),
            "html" => Some(ContentMode::Html),
            _ => None,
        }
    }
}

/// A text label; its value is the element's text content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    pub state: ComponentState,
    value: String,
    pub content_mode: ContentMode,
}

impl Label {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

impl Component for Label {
    fn class(&self) -> ComponentClass {
        ComponentClass::builtin("Label")
    }

    state_accessors!();

    fn read_design(
        &mut self,
        design: &Element,
        _context: &mut DesignContext,
    ) -> Result<(), DesignError> {
        self.state.read(design)?;
        if let Some(mode) = design.attr("content-mode") {
            self.content_mode = ContentMode::parse(mode).ok_or_else(|| {
                DesignError::invalid_attribute(
                    design.tag(),
                    "content-mode",
                    mode,
                    "expected text, preformatted or html",
                )
            })?;
        }
        self.value = design.text();
        Ok(())
    }

    fn write_design(
        &self,
        design: &mut Element,
        context: &mut DesignContext,
    ) -> Result<(), DesignError> {
        let defaults = context.default_instance::<Label>();
        self.state.write(design, &defaults.state);
        if self.content_mode != defaults.content_mode {
            design.set_attr("content-mode", self.content_mode.as_str());
        }
        if !self.value.is_empty() {
            design.append_text(self.value.clone());
        }
        Ok(())
    }
}

/// A single-line text input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub state: ComponentState,
    pub value: Option<String>,
    pub placeholder: Option<String>,
    pub max_length: Option<u32>,
}

impl Component for TextField {
    fn class(&self) -> ComponentClass {
        ComponentClass::builtin("TextField")
    }

    state_accessors!();

    fn read_design(
        &mut self,
        design: &Element,
        _context: &mut DesignContext,
    ) -> Result<(), DesignError> {
        self.state.read(design)?;
        if let Some(value) = read_string(design, "value") {
            self.value = Some(value);
        }
        if let Some(placeholder) = read_string(design, "placeholder") {
            self.placeholder = Some(placeholder);
        }
        if let Some(max_length) = design.attr("max-length") {
            let parsed = max_length.parse::<u32>().map_err(|e| {
                DesignError::invalid_attribute(design.tag(), "max-length", max_length, e.to_string())
            })?;
            self.max_length = Some(parsed);
        }
        Ok(())
    }

    fn write_design(
        &self,
        design: &mut Element,
        context: &mut DesignContext,
    ) -> Result<(), DesignError> {
        let defaults = context.default_instance::<TextField>();
        self.state.write(design, &defaults.state);
        write_string(design, "value", self.value.as_deref(), defaults.value.as_deref());
        write_string(
            design,
            "placeholder",
            self.placeholder.as_deref(),
            defaults.placeholder.as_deref(),
        );
        if self.max_length != defaults.max_length {
            if let Some(max_length) = self.max_length {
                design.set_attr("max-length", max_length.to_string());
            }
        }
        Ok(())
    }
}
