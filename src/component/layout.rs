//! Built-in ordered layouts
//!
//! A layout creates its children from its child elements and writes them back
//! as child nodes. The per-child `:expand` attribute lives on the child's
//! element but belongs to the layout.

use std::any::Any;

use super::attributes::{read_bool, write_bool, ComponentState};
use super::{Component, ComponentClass, ComponentRef};
use crate::context::{DesignContext, DesignError};
use crate::markup::Element;

const EXPAND_ATTRIBUTE: &str = ":expand";

/// Layout-level settings compared against the cached defaults on write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutState {
    pub spacing: bool,
    pub margin: bool,
}

#[derive(Debug, Clone)]
struct Slot {
    component: ComponentRef,
    expand_ratio: f32,
}

#[derive(Debug, Clone, Default)]
struct OrderedLayout {
    state: ComponentState,
    layout: LayoutState,
    slots: Vec<Slot>,
}

impl OrderedLayout {
    fn add(&mut self, component: ComponentRef) {
        self.slots.push(Slot {
            component,
            expand_ratio: 0.0,
        });
    }

    fn set_expand_ratio(&mut self, component: &ComponentRef, ratio: f32) -> bool {
        match self.slots.iter_mut().find(|s| s.component == *component) {
            Some(slot) => {
                slot.expand_ratio = ratio;
                true
            }
            None => false,
        }
    }

    fn expand_ratio(&self, component: &ComponentRef) -> Option<f32> {
        self.slots
            .iter()
            .find(|s| s.component == *component)
            .map(|s| s.expand_ratio)
    }

    fn children(&self) -> Vec<ComponentRef> {
        self.slots.iter().map(|s| s.component.clone()).collect()
    }

    fn read(&mut self, design: &Element, context: &mut DesignContext) -> Result<(), DesignError> {
        self.state.read(design)?;
        if let Some(spacing) = read_bool(design, "spacing")? {
            self.layout.spacing = spacing;
        }
        if let Some(margin) = read_bool(design, "margin")? {
            self.layout.margin = margin;
        }

        self.slots.clear();
        for child_design in design.child_elements() {
            let component = context.create_child(child_design)?;
            let expand_ratio = read_expand_ratio(child_design)?;
            self.slots.push(Slot {
                component,
                expand_ratio,
            });
        }
        Ok(())
    }

    fn write(&self, design: &mut Element, context: &mut DesignContext) -> Result<(), DesignError> {
        self.state.write_with_defaults(design, context);
        let defaults = context.default_instance::<LayoutState>();
        write_bool(design, "spacing", self.layout.spacing, defaults.spacing);
        write_bool(design, "margin", self.layout.margin, defaults.margin);

        for slot in &self.slots {
            let mut child_design = context.create_node(&slot.component)?;
            if slot.expand_ratio != 0.0 {
                let value = if slot.expand_ratio == 1.0 {
                    String::new()
                } else {
                    slot.expand_ratio.to_string()
                };
                child_design.set_attr(EXPAND_ATTRIBUTE, value);
            }
            design.append_child(child_design);
        }
        Ok(())
    }
}

/// A bare `:expand` means a ratio of one
fn read_expand_ratio(child_design: &Element) -> Result<f32, DesignError> {
    match child_design.attr(EXPAND_ATTRIBUTE) {
        None => Ok(0.0),
        Some("") => Ok(1.0),
        Some(value) => value.parse::<f32>().map_err(|e| {
            DesignError::invalid_attribute(child_design.tag(), EXPAND_ATTRIBUTE, value, e.to_string())
        }),
    }
}

macro_rules! ordered_layout {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            inner: OrderedLayout,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            /// Append a child component
            pub fn add_component(&mut self, component: ComponentRef) {
                self.inner.add(component);
            }

            /// Set a child's expand ratio; returns false if it is not a child
            pub fn set_expand_ratio(&mut self, component: &ComponentRef, ratio: f32) -> bool {
                self.inner.set_expand_ratio(component, ratio)
            }

            pub fn expand_ratio(&self, component: &ComponentRef) -> Option<f32> {
                self.inner.expand_ratio(component)
            }

            pub fn state(&self) -> &ComponentState {
                &self.inner.state
            }

            pub fn state_mut(&mut self) -> &mut ComponentState {
                &mut self.inner.state
            }

            pub fn layout(&self) -> &LayoutState {
                &self.inner.layout
            }

            pub fn layout_mut(&mut self) -> &mut LayoutState {
                &mut self.inner.layout
            }
        }

        impl Component for $name {
            fn class(&self) -> ComponentClass {
                ComponentClass::builtin(stringify!($name))
            }

            fn id(&self) -> Option<&str> {
                self.inner.state.id.as_deref()
            }

            fn set_id(&mut self, id: Option<String>) {
                self.inner.state.id = id;
            }

            fn caption(&self) -> Option<&str> {
                self.inner.state.caption.as_deref()
            }

            fn read_design(
                &mut self,
                design: &Element,
                context: &mut DesignContext,
            ) -> Result<(), DesignError> {
                self.inner.read(design, context)
            }

            fn write_design(
                &self,
                design: &mut Element,
                context: &mut DesignContext,
            ) -> Result<(), DesignError> {
                self.inner.write(design, context)
            }

            fn children(&self) -> Vec<ComponentRef> {
                self.inner.children()
            }

            fn as_any(&self) -> &dyn Any {
                self
            }
        }
    };
}

ordered_layout!(
    /// Lays out its children top to bottom
    VerticalLayout
);

ordered_layout!(
    /// Lays out its children left to right
    HorizontalLayout
);
