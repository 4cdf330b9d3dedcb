//! Ordered map type for mapping values.
//!
//! This module provides [`Map`], a wrapper around [`IndexMap`] keyed by
//! strings. Insertion order matters twice in this crate: flattening walks a
//! mapping in iteration order so flat output is reproducible, and
//! unflattening inserts keys in the order their paths were first seen.
//!
//! ```rust
//! use flattery::{flatten, Map, Value};
//!
//! let mut db: Map<Value> = Map::new();
//! db.insert("port".to_string(), Value::from(5432));
//! db.insert("host".to_string(), Value::from("localhost"));
//!
//! let flat = flatten(&Value::Mapping(db));
//! assert_eq!(flat.paths().collect::<Vec<_>>(), vec!["port", "host"]);
//! ```

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// An insertion-ordered map of string keys to `V`.
///
/// Re-inserting an existing key replaces its value in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Map<V>(IndexMap<String, V>);

impl<V> Map<V> {
    /// Creates an empty `Map`.
    #[must_use]
    pub fn new() -> Self {
        Map(IndexMap::new())
    }

    /// Creates an empty `Map` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Map(IndexMap::with_capacity(capacity))
    }

    /// Inserts `value` under `key`, returning the previous value if any.
    pub fn insert(&mut self, key: String, value: V) -> Option<V> {
        self.0.insert(key, value)
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, V> {
        self.0.keys()
    }

    /// Values in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, V> {
        self.0.values()
    }

    /// `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, V> {
        self.0.iter()
    }
}

impl<V> Default for Map<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> From<HashMap<String, V>> for Map<V> {
    fn from(map: HashMap<String, V>) -> Self {
        Map(map.into_iter().collect())
    }
}

impl<V> From<Map<V>> for HashMap<String, V> {
    fn from(map: Map<V>) -> Self {
        map.0.into_iter().collect()
    }
}

impl<V> IntoIterator for Map<V> {
    type Item = (String, V);
    type IntoIter = indexmap::map::IntoIter<String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a Map<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = indexmap::map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<V> FromIterator<(String, V)> for Map<V> {
    fn from_iter<T: IntoIterator<Item = (String, V)>>(iter: T) -> Self {
        Map(IndexMap::from_iter(iter))
    }
}

impl<V: Serialize> Serialize for Map<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}
