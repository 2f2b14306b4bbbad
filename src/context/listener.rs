//! Component creation events

use std::rc::Rc;

use crate::component::ComponentRef;

use super::DesignContext;

/// Error returned by a failing listener
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// Fired each time a component is created from a template element
#[derive(Debug)]
pub struct ComponentCreatedEvent<'a> {
    context: &'a DesignContext,
    local_id: Option<&'a str>,
    component: &'a ComponentRef,
}

impl<'a> ComponentCreatedEvent<'a> {
    pub fn new(
        context: &'a DesignContext,
        local_id: Option<&'a str>,
        component: &'a ComponentRef,
    ) -> Self {
        Self {
            context,
            local_id,
            component,
        }
    }

    /// The context that created the component
    pub fn context(&self) -> &'a DesignContext {
        self.context
    }

    /// The local id of the created component, if it has one
    pub fn local_id(&self) -> Option<&'a str> {
        self.local_id
    }

    pub fn component(&self) -> &'a ComponentRef {
        self.component
    }
}

/// Receives component creation events
pub trait ComponentCreationListener {
    fn component_created(&self, event: &ComponentCreatedEvent<'_>) -> Result<(), ListenerError>;
}

impl<F> ComponentCreationListener for F
where
    F: Fn(&ComponentCreatedEvent<'_>) -> Result<(), ListenerError>,
{
    fn component_created(&self, event: &ComponentCreatedEvent<'_>) -> Result<(), ListenerError> {
        self(event)
    }
}

/// Ordered list of creation listeners
#[derive(Default)]
pub(crate) struct CreationListeners {
    listeners: Vec<Rc<dyn ComponentCreationListener>>,
}

impl CreationListeners {
    /// Append a listener; the same listener may be added more than once
    pub fn add(&mut self, listener: Rc<dyn ComponentCreationListener>) {
        self.listeners.push(listener);
    }

    /// Remove the first occurrence of `listener`
    pub fn remove(&mut self, listener: &Rc<dyn ComponentCreationListener>) -> bool {
        let position = self
            .listeners
            .iter()
            .position(|l| std::ptr::addr_eq(Rc::as_ptr(l), Rc::as_ptr(listener)));
        match position {
            Some(index) => {
                self.listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Notify every listener in registration order, stopping at the first failure
    pub fn fire(&self, event: &ComponentCreatedEvent<'_>) -> Result<(), ListenerError> {
        for listener in &self.listeners {
            listener.component_created(event)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }
}
