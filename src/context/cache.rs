//! Shared cache of default instances, one per type

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

type Instance = Arc<dyn Any + Send + Sync>;

/// Memoizing cache of default-constructed instances keyed by type
///
/// Entries are created on first request and never evicted. Returned
/// instances are shared between every caller, so they are read-only.
/// One cache is meant to be shared by all contexts of an application.
#[derive(Default)]
pub struct DefaultInstanceCache {
    instances: RwLock<HashMap<TypeId, Instance>>,
}

impl fmt::Debug for DefaultInstanceCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultInstanceCache")
            .field("len", &self.len())
            .finish()
    }
}

impl DefaultInstanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default instance of `T`, constructed on first use
    pub fn get<T>(&self) -> Arc<T>
    where
        T: Default + Send + Sync + 'static,
    {
        let key = TypeId::of::<T>();
        if let Some(instance) = Self::lookup::<T>(&self.instances.read(), key) {
            return instance;
        }

        let mut instances = self.instances.write();
        // Another thread may have filled the entry between the two locks
        if let Some(instance) = Self::lookup::<T>(&instances, key) {
            return instance;
        }
        let instance = Arc::new(T::default());
        instances.insert(key, instance.clone() as Instance);
        instance
    }

    fn lookup<T>(instances: &HashMap<TypeId, Instance>, key: TypeId) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        instances
            .get(&key)
            .cloned()
            .and_then(|instance| instance.downcast::<T>().ok())
    }

    /// Number of cached instances
    pub fn len(&self) -> usize {
        self.instances.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.read().is_empty()
    }
}
