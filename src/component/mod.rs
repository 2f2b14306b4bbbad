//! Components that can be read from and written to designs
//!
//! The [`Component`] trait is the contract the design context drives: it
//! exposes the global id and caption, and knows how to populate itself from a
//! template element and how to write itself back into one. Containers call
//! back into the [`DesignContext`] for their children.

mod attributes;
mod layout;
mod widgets;

use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::context::{ComponentRegistry, DesignContext, DesignError, DEFAULT_PACKAGE};
use crate::markup::Element;

pub use attributes::{read_bool, read_string, write_bool, write_string, ComponentState};
pub use layout::{HorizontalLayout, LayoutState, VerticalLayout};
pub use widgets::{Button, Label, TextField};

/// Package and simple name identifying a component implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentClass {
    pub package: &'static str,
    pub simple_name: &'static str,
}

impl ComponentClass {
    pub const fn new(package: &'static str, simple_name: &'static str) -> Self {
        Self {
            package,
            simple_name,
        }
    }

    /// A class in the built-in package
    pub const fn builtin(simple_name: &'static str) -> Self {
        Self::new(DEFAULT_PACKAGE, simple_name)
    }

    /// `package.SimpleName`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.simple_name)
    }
}

impl fmt::Display for ComponentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.simple_name)
    }
}

/// A UI component that can take part in design synchronization
pub trait Component: fmt::Debug {
    /// The class this component is registered under
    fn class(&self) -> ComponentClass;

    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: Option<String>);

    fn caption(&self) -> Option<&str>;

    /// Populate this component from a template element
    ///
    /// Containers create their children through `context.create_child`.
    fn read_design(&mut self, design: &Element, context: &mut DesignContext)
        -> Result<(), DesignError>;

    /// Write this component's state into a template element
    ///
    /// Implementations write the global id and caption themselves.
    /// Containers append child nodes made with `context.create_node`.
    fn write_design(&self, design: &mut Element, context: &mut DesignContext)
        -> Result<(), DesignError>;

    /// Child components, for containers
    fn children(&self) -> Vec<ComponentRef> {
        Vec::new()
    }

    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to a component
///
/// Equality and hashing follow identity, so two handles are equal only when
/// they point at the same component.
#[derive(Clone)]
pub struct ComponentRef(Rc<RefCell<dyn Component>>);

impl ComponentRef {
    pub fn new<C: Component + 'static>(component: C) -> Self {
        Self(Rc::new(RefCell::new(component)))
    }

    pub fn borrow(&self) -> Ref<'_, dyn Component> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, dyn Component> {
        self.0.borrow_mut()
    }

    pub fn class(&self) -> ComponentClass {
        self.0.borrow().class()
    }

    pub fn id(&self) -> Option<String> {
        self.0.borrow().id().map(str::to_owned)
    }

    pub fn set_id(&self, id: Option<String>) {
        self.0.borrow_mut().set_id(id);
    }

    pub fn caption(&self) -> Option<String> {
        self.0.borrow().caption().map(str::to_owned)
    }

    pub fn children(&self) -> Vec<ComponentRef> {
        self.0.borrow().children()
    }

    /// Run `f` against the concrete component type, if it matches
    pub fn with<C: Component + 'static, R>(&self, f: impl FnOnce(&C) -> R) -> Option<R> {
        let component = self.0.borrow();
        component.as_any().downcast_ref::<C>().map(f)
    }

    fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }
}

impl PartialEq for ComponentRef {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for ComponentRef {}

impl Hash for ComponentRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(component) => f
                .debug_struct("ComponentRef")
                .field("class", &component.class().simple_name)
                .field("id", &component.id())
                .finish(),
            Err(_) => f.write_str("ComponentRef(<borrowed>)"),
        }
    }
}

/// Register every built-in component class
pub fn register_builtins(registry: &mut ComponentRegistry) {
    let results = [
        registry.register::<VerticalLayout>(),
        registry.register::<HorizontalLayout>(),
        registry.register::<Button>(),
        registry.register::<Label>(),
        registry.register::<TextField>(),
    ];
    for result in results {
        if let Err(e) = result {
            log::debug!("built-in component already registered: {}", e);
        }
    }
}
