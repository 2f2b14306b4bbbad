//! One-to-one map kept consistent in both directions

use std::collections::HashMap;
use std::hash::Hash;

/// A map from keys to values that also maps each value back to its key
///
/// Every key maps to exactly one value and every value to exactly one key.
/// Re-mapping either side drops the stale entry on the other side.
#[derive(Debug, Clone)]
pub struct TwoWayMap<K, V> {
    forward: HashMap<K, V>,
    reverse: HashMap<V, K>,
}

impl<K, V> Default for TwoWayMap<K, V> {
    fn default() -> Self {
        Self {
            forward: HashMap::new(),
            reverse: HashMap::new(),
        }
    }
}

impl<K, V> TwoWayMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `key` to `value` and `value` to `key`
    ///
    /// If `key` was mapped to a different value, that value's reverse entry
    /// is removed. If `value` was mapped to a different key, that key's
    /// forward entry is removed. Returns whether `key` or `value` had any
    /// mapping before the call.
    pub fn put(&mut self, key: K, value: V) -> bool {
        let old_value = self.forward.insert(key.clone(), value.clone());
        if let Some(old) = &old_value {
            if *old != value {
                self.reverse.remove(old);
            }
        }

        let old_key = self.reverse.insert(value, key.clone());
        if let Some(old) = &old_key {
            if *old != key {
                self.forward.remove(old);
            }
        }

        old_value.is_some() || old_key.is_some()
    }

    /// Value mapped to `key`
    pub fn get(&self, key: &K) -> Option<&V> {
        self.forward.get(key)
    }

    /// Key mapped to `value`
    pub fn get_key(&self, value: &V) -> Option<&K> {
        self.reverse.get(value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.forward.contains_key(key)
    }

    pub fn contains_value(&self, value: &V) -> bool {
        self.reverse.contains_key(value)
    }

    /// Iterate over key/value pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.forward.iter()
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}
