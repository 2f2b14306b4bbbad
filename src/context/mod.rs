//! Design context: the binding between a component tree and its template
//!
//! A [`DesignContext`] is created for one read or write of a design. While a
//! template is read it records which component carries which global id, local
//! id and caption, and which tag prefix stands for which package. While a
//! component tree is written it supplies the prefixes and local ids back.

mod cache;
mod error;
mod identifiers;
mod listener;
mod namespace;
mod names;
mod registry;
mod two_way;

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

pub use cache::DefaultInstanceCache;
pub use error::DesignError;
pub use identifiers::IdentifierRegistry;
pub use listener::{ComponentCreatedEvent, ComponentCreationListener, ListenerError};
pub use namespace::{NamespaceRegistry, DEFAULT_PACKAGE, DEFAULT_PREFIX, PACKAGE_MAPPING};
pub use names::{
    class_name_to_tag_fragment, resolve_class_name, tag_fragment_to_class_name, ADDON_TAG,
};
pub use registry::{ClassError, ComponentRegistry, Constructor};
pub use two_way::TwoWayMap;

use crate::component::ComponentRef;
use crate::config::DesignConfig;
use crate::markup::{Document, Element};
use listener::CreationListeners;

/// Attribute holding a component's global id
pub const ID_ATTRIBUTE: &str = "id";

/// Attribute holding a component's caption
pub const CAPTION_ATTRIBUTE: &str = "caption";

/// Attribute holding a component's local id
pub const LOCAL_ID_ATTRIBUTE: &str = "_id";

/// State collected while a component tree is built from, or written to, a
/// template
pub struct DesignContext {
    identifiers: IdentifierRegistry,
    namespaces: NamespaceRegistry,
    classes: Rc<ComponentRegistry>,
    instances: Arc<DefaultInstanceCache>,
    listeners: CreationListeners,
    component_root: Option<ComponentRef>,
    strict_tag_names: bool,
}

impl Default for DesignContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DesignContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DesignContext")
            .field("identifiers", &self.identifiers)
            .field("namespaces", &self.namespaces)
            .field("classes", &self.classes)
            .field("listeners", &self.listeners.len())
            .field("component_root", &self.component_root)
            .field("strict_tag_names", &self.strict_tag_names)
            .finish()
    }
}

impl DesignContext {
    /// Create a context with the built-in components and a private cache
    pub fn new() -> Self {
        Self::with_services(
            Rc::new(ComponentRegistry::with_builtins()),
            Arc::new(DefaultInstanceCache::new()),
        )
    }

    /// Create a context sharing an application's class registry and
    /// default-instance cache
    pub fn with_services(classes: Rc<ComponentRegistry>, instances: Arc<DefaultInstanceCache>) -> Self {
        Self {
            identifiers: IdentifierRegistry::new(),
            namespaces: NamespaceRegistry::new(),
            classes,
            instances,
            listeners: CreationListeners::default(),
            component_root: None,
            strict_tag_names: false,
        }
    }

    /// Apply configured prefixes and tag name strictness
    pub fn configure(&mut self, config: &DesignConfig) {
        for (prefix, package) in &config.prefixes {
            self.namespaces.map_prefix(prefix, package);
        }
        self.strict_tag_names = config.strict_tag_names;
    }

    /// Builder-style [`configure`](Self::configure)
    pub fn with_config(mut self, config: &DesignConfig) -> Self {
        self.configure(config);
        self
    }

    pub fn set_strict_tag_names(&mut self, strict: bool) {
        self.strict_tag_names = strict;
    }

    pub fn component_by_local_id(&self, local_id: &str) -> Option<&ComponentRef> {
        self.identifiers.component_by_local_id(local_id)
    }

    pub fn component_by_id(&self, global_id: &str) -> Option<&ComponentRef> {
        self.identifiers.component_by_id(global_id)
    }

    pub fn component_by_caption(&self, caption: &str) -> Option<&ComponentRef> {
        self.identifiers.component_by_caption(caption)
    }

    pub fn local_id_of(&self, component: &ComponentRef) -> Option<&str> {
        self.identifiers.local_id_of(component)
    }

    /// Give `component` a global id, evicting any previous holder
    ///
    /// Returns whether another component held the id.
    pub fn map_id(&mut self, global_id: &str, component: &ComponentRef) -> bool {
        self.identifiers.map_id(global_id, component)
    }

    /// Give `component` a local id; see [`IdentifierRegistry::map_local_id`]
    pub fn map_local_id(&mut self, local_id: &str, component: &ComponentRef) -> bool {
        self.identifiers.map_local_id(local_id, component)
    }

    /// Register `component` under `caption`; last registration wins
    pub fn map_caption(&mut self, caption: &str, component: &ComponentRef) -> bool {
        self.identifiers.map_caption(caption, component)
    }

    /// Map a tag prefix to a package name
    pub fn map_prefix(&mut self, prefix: &str, package: &str) -> bool {
        self.namespaces.map_prefix(prefix, package)
    }

    pub fn namespaces(&self) -> &NamespaceRegistry {
        &self.namespaces
    }

    /// Read the prefix declarations in the document head
    pub fn read_prefixes(&mut self, document: &Document) -> Result<(), DesignError> {
        self.namespaces.read_prefixes(document)
    }

    /// Write the non-default prefix declarations into the document head
    pub fn store_prefixes(&self, document: &mut Document) {
        self.namespaces.store_prefixes(document);
    }

    /// Shared default instance of `T`; must be treated as read-only
    pub fn default_instance<T>(&self) -> Arc<T>
    where
        T: Default + Send + Sync + 'static,
    {
        self.instances.get::<T>()
    }

    pub fn component_root(&self) -> Option<&ComponentRef> {
        self.component_root.as_ref()
    }

    pub fn set_component_root(&mut self, root: Option<ComponentRef>) {
        self.component_root = root;
    }

    pub fn add_component_creation_listener(&mut self, listener: Rc<dyn ComponentCreationListener>) {
        self.listeners.add(listener);
    }

    /// Remove the first registration of `listener`; returns whether it was found
    pub fn remove_component_creation_listener(
        &mut self,
        listener: &Rc<dyn ComponentCreationListener>,
    ) -> bool {
        self.listeners.remove(listener)
    }

    /// Create the component described by `design`, including its subtree
    ///
    /// The component populates itself from the element, its identifiers are
    /// registered and creation listeners are notified.
    pub fn create_child(&mut self, design: &Element) -> Result<ComponentRef, DesignError> {
        let component = self.instantiate_component(design)?;
        self.synchronize_and_register(&component, design)?;
        log::debug!("created {} from <{}>", component.class(), design.tag());

        let local_id = self.identifiers.local_id_of(&component);
        let event = ComponentCreatedEvent::new(self, local_id, &component);
        self.listeners.fire(&event).map_err(DesignError::Listener)?;
        Ok(component)
    }

    /// Populate `component` from `design` and register its identifiers
    ///
    /// A global id already held by another component is rejected and
    /// nothing is registered for this component.
    pub fn synchronize_and_register(
        &mut self,
        component: &ComponentRef,
        design: &Element,
    ) -> Result<(), DesignError> {
        component.borrow_mut().read_design(design, self)?;

        if let Some(id) = component.id().filter(|id| !id.is_empty()) {
            if self.identifiers.is_id_taken(&id, component) {
                return Err(DesignError::DuplicateId { id });
            }
            self.identifiers.map_id(&id, component);
        }

        if let Some(local_id) = design.attr(LOCAL_ID_ATTRIBUTE) {
            self.identifiers.map_local_id(local_id, component);
        }

        if let Some(caption) = component.caption().filter(|c| !c.is_empty()) {
            self.identifiers.map_caption(&caption, component);
        }
        Ok(())
    }

    fn instantiate_component(&self, design: &Element) -> Result<ComponentRef, DesignError> {
        let class_name = resolve_class_name(design, &self.namespaces, self.strict_tag_names)?;
        self.classes
            .instantiate(&class_name)
            .map_err(|source| DesignError::NoComponentClass {
                tag: design.tag().to_string(),
                source,
            })
    }

    /// Create the template element for `component`, including its subtree
    ///
    /// The tag comes from the component's package prefix (derived and
    /// registered if the package has none) and class name. The local id is
    /// added after the component has written its own attributes.
    pub fn create_node(&mut self, component: &ComponentRef) -> Result<Element, DesignError> {
        let class = component.class();
        let prefix = self.namespaces.prefix_or_derive(class.package);
        let tag = format!("{}-{}", prefix, class_name_to_tag_fragment(class.simple_name));

        let mut design = Element::new(tag);
        component.borrow().write_design(&mut design, self)?;

        if let Some(local_id) = self.identifiers.local_id_of(component) {
            design.set_attr(LOCAL_ID_ATTRIBUTE, local_id);
        }
        Ok(design)
    }
}
