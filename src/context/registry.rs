//! Component class registry for resolving qualified class names to constructors

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::component::{self, Component, ComponentRef};

/// Errors that can occur while resolving or constructing a component class
#[derive(Debug, Error)]
pub enum ClassError {
    /// No constructor registered under the name
    #[error("component class not found: {name}")]
    NotFound { name: String },

    /// Duplicate class registration
    #[error("duplicate component class registration: {name}")]
    Duplicate { name: String },

    /// The constructor itself failed
    #[error("could not instantiate {name}: {message}")]
    Construction { name: String, message: String },

    /// The constructor produced a component of another class
    #[error("resolved class {actual} is not a {requested}")]
    Mismatch { requested: String, actual: String },
}

/// Constructor stored for a class
pub type Constructor = Box<dyn Fn() -> Result<ComponentRef, ClassError>>;

/// Registry mapping qualified class names to constructors
#[derive(Default)]
pub struct ComponentRegistry {
    constructors: HashMap<String, Constructor>,
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("ComponentRegistry")
            .field("classes", &names)
            .finish()
    }
}

impl ComponentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in components
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        component::register_builtins(&mut registry);
        registry
    }

    /// Register a component type constructed through `Default`
    pub fn register<C>(&mut self) -> Result<(), ClassError>
    where
        C: Component + Default + 'static,
    {
        let name = C::default().class().qualified_name();
        self.register_with(name, || Ok(ComponentRef::new(C::default())))
    }

    /// Register a constructor under a qualified class name
    pub fn register_with<F>(&mut self, name: impl Into<String>, constructor: F) -> Result<(), ClassError>
    where
        F: Fn() -> Result<ComponentRef, ClassError> + 'static,
    {
        let name = name.into();
        if self.constructors.contains_key(&name) {
            return Err(ClassError::Duplicate { name });
        }
        log::trace!("registered component class {}", name);
        self.constructors.insert(name, Box::new(constructor));
        Ok(())
    }

    /// Check if a class is registered
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Get all registered class names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(|s| s.as_str())
    }

    /// Construct a new instance of the named class
    pub fn instantiate(&self, name: &str) -> Result<ComponentRef, ClassError> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| ClassError::NotFound {
                name: name.to_string(),
            })?;

        let component = constructor()?;
        let actual = component.class().qualified_name();
        if actual != name {
            return Err(ClassError::Mismatch {
                requested: name.to_string(),
                actual,
            });
        }
        Ok(component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Button, Label};

    #[test]
    fn test_registry_register_and_instantiate() {
        let mut registry = ComponentRegistry::new();
        registry.register::<Button>().expect("Should register");
        assert!(registry.contains("com.vaadin.ui.Button"));

        let button = registry
            .instantiate("com.vaadin.ui.Button")
            .expect("Should instantiate");
        assert_eq!(button.class().simple_name, "Button");
    }

    #[test]
    fn test_registry_duplicate_error() {
        let mut registry = ComponentRegistry::new();
        registry.register::<Button>().expect("First register should succeed");
        let result = registry.register::<Button>();
        assert!(matches!(result, Err(ClassError::Duplicate { .. })));
    }

    #[test]
    fn test_registry_not_found() {
        let registry = ComponentRegistry::new();
        assert!(matches!(
            registry.instantiate("com.example.Nothing"),
            Err(ClassError::NotFound { .. })
        ));
    }

    #[test]
    fn test_registry_mismatched_constructor() {
        let mut registry = ComponentRegistry::new();
        registry
            .register_with("com.example.Fancy", || Ok(ComponentRef::new(Label::default())))
            .unwrap();
        assert!(matches!(
            registry.instantiate("com.example.Fancy"),
            Err(ClassError::Mismatch { .. })
        ));
    }

    #[test]
    fn test_registry_failing_constructor() {
        let mut registry = ComponentRegistry::new();
        registry
            .register_with("com.example.Broken", || {
                Err(ClassError::Construction {
                    name: "com.example.Broken".to_string(),
                    message: "no default state".to_string(),
                })
            })
            .unwrap();
        let err = registry.instantiate("com.example.Broken").unwrap_err();
        assert!(err.to_string().contains("no default state"));
    }

    #[test]
    fn test_builtins_registered() {
        let registry = ComponentRegistry::with_builtins();
        for name in [
            "com.vaadin.ui.VerticalLayout",
            "com.vaadin.ui.HorizontalLayout",
            "com.vaadin.ui.Button",
            "com.vaadin.ui.Label",
            "com.vaadin.ui.TextField",
        ] {
            assert!(registry.contains(name), "missing {}", name);
        }
    }
}
