//! Global id, local id and caption lookups

use std::collections::HashMap;

use crate::component::ComponentRef;

use super::two_way::TwoWayMap;

/// The three identifier namespaces of a design context
///
/// - global ids are exclusive: mapping an id moves it off its previous holder
/// - local ids are a one-to-one map kept only here, not on the component
/// - captions may repeat; the last component registered under a caption wins
#[derive(Debug, Default)]
pub struct IdentifierRegistry {
    ids: HashMap<String, ComponentRef>,
    local_ids: TwoWayMap<String, ComponentRef>,
    captions: HashMap<String, ComponentRef>,
}

impl IdentifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give `component` the global id `global_id`
    ///
    /// A different component holding the id loses it (its id is cleared).
    /// The component's previous id, if different, is unmapped. Returns
    /// whether the id was held by a different component.
    pub fn map_id(&mut self, global_id: &str, component: &ComponentRef) -> bool {
        let previous_holder = self
            .ids
            .get(global_id)
            .filter(|holder| *holder != component)
            .cloned();
        if let Some(holder) = &previous_holder {
            log::trace!("global id '{}' evicted from {:?}", global_id, holder);
            holder.set_id(None);
        }

        if let Some(old_id) = component.id() {
            if old_id != global_id && self.ids.get(&old_id) == Some(component) {
                self.ids.remove(&old_id);
            }
        }

        component.set_id(Some(global_id.to_string()));
        self.ids.insert(global_id.to_string(), component.clone());
        previous_holder.is_some()
    }

    /// Whether `global_id` is held by a component other than `component`
    pub fn is_id_taken(&self, global_id: &str, component: &ComponentRef) -> bool {
        self.ids
            .get(global_id)
            .is_some_and(|holder| holder != component)
    }

    /// Map a local id to a component in both directions
    ///
    /// Returns whether the local id or the component had a mapping before.
    pub fn map_local_id(&mut self, local_id: &str, component: &ComponentRef) -> bool {
        self.local_ids.put(local_id.to_string(), component.clone())
    }

    /// Map a caption to a component
    ///
    /// Captions are not unique: the previous component under the caption is
    /// simply shadowed. Returns whether the caption was mapped before.
    pub fn map_caption(&mut self, caption: &str, component: &ComponentRef) -> bool {
        self.captions
            .insert(caption.to_string(), component.clone())
            .is_some()
    }

    pub fn component_by_id(&self, global_id: &str) -> Option<&ComponentRef> {
        self.ids.get(global_id)
    }

    pub fn component_by_local_id(&self, local_id: &str) -> Option<&ComponentRef> {
        self.local_ids.get(&local_id.to_string())
    }

    pub fn component_by_caption(&self, caption: &str) -> Option<&ComponentRef> {
        self.captions.get(caption)
    }

    /// Local id registered for `component`
    pub fn local_id_of(&self, component: &ComponentRef) -> Option<&str> {
        self.local_ids.get_key(component).map(String::as_str)
    }
}
