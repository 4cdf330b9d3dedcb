//! The flat side of the transform: an ordered map from path strings to leaves.
//!
//! A [`FlatMap`] is what [`flatten`](crate::flatten) produces and what
//! [`unflatten`](crate::unflatten) consumes. Entry order is kept for
//! reproducible output, but it carries no meaning of its own: two flat maps
//! with the same entries in different orders unflatten to the same tree (up to
//! mapping key order).
//!
//! How a flat map is encoded afterwards (query string, environment variables,
//! a key-value store) is up to the caller. `FlatMap` implements serde's
//! `Serialize` and `Deserialize` as a plain single-level map, so any serde
//! format can carry it.
//!
//! ## Examples
//!
//! ```rust
//! use flattery::{FlatMap, Leaf};
//!
//! let mut flat = FlatMap::new();
//! flat.insert("db.host", "localhost");
//! flat.insert("db.port", 5432);
//! flat.insert("db.password", None);
//!
//! assert_eq!(flat.len(), 3);
//! assert_eq!(flat.get("db.password"), Some(&Leaf::Null));
//! assert_eq!(
//!     flat.paths().collect::<Vec<_>>(),
//!     vec!["db.host", "db.port", "db.password"]
//! );
//! ```

use crate::value::{Leaf, Scalar};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// An insertion-ordered map of path strings to leaves.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatMap<S = Scalar>(IndexMap<String, Leaf<S>>);

impl FlatMap {
    /// Creates an empty `FlatMap` holding [`Scalar`] leaves.
    ///
    /// Use [`FlatMap::default`] for other payload types.
    #[must_use]
    pub fn new() -> Self {
        FlatMap(IndexMap::new())
    }
}

impl<S> FlatMap<S> {
    /// Creates an empty `FlatMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        FlatMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a leaf at `path`.
    ///
    /// If the map already held an entry at this path, the old leaf is returned
    /// and the path keeps its original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flattery::FlatMap;
    ///
    /// let mut flat = FlatMap::new();
    /// assert!(flat.insert("a.b", 1).is_none());
    /// assert!(flat.insert("a.b", 2).is_some());
    /// ```
    pub fn insert<P, L>(&mut self, path: P, leaf: L) -> Option<Leaf<S>>
    where
        P: Into<String>,
        L: Into<Leaf<S>>,
    {
        self.0.insert(path.into(), leaf.into())
    }

    /// Returns the leaf stored at `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Leaf<S>> {
        self.0.get(path)
    }

    /// Removes the leaf at `path`, keeping the order of the remaining entries.
    pub fn remove(&mut self, path: &str) -> Option<Leaf<S>> {
        self.0.shift_remove(path)
    }

    /// Returns `true` if the map holds an entry at `path`.
    #[must_use]
    pub fn contains_path(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the paths, in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    /// Returns an iterator over the leaves, in insertion order.
    pub fn leaves(&self) -> indexmap::map::Values<'_, String, Leaf<S>> {
        self.0.values()
    }

    /// Returns an iterator over `(path, leaf)` pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Leaf<S>> {
        self.0.iter()
    }

    /// Sorts entries by path so output is stable regardless of how the map was built.
    pub fn sort_paths(&mut self) {
        self.0.sort_keys();
    }
}

impl<S> Default for FlatMap<S> {
    fn default() -> Self {
        FlatMap(IndexMap::new())
    }
}

impl<S> From<HashMap<String, Leaf<S>>> for FlatMap<S> {
    fn from(map: HashMap<String, Leaf<S>>) -> Self {
        FlatMap(map.into_iter().collect())
    }
}

impl<S> From<BTreeMap<String, Leaf<S>>> for FlatMap<S> {
    fn from(map: BTreeMap<String, Leaf<S>>) -> Self {
        FlatMap(map.into_iter().collect())
    }
}

impl<S> From<FlatMap<S>> for HashMap<String, Leaf<S>> {
    fn from(map: FlatMap<S>) -> Self {
        map.0.into_iter().collect()
    }
}

impl<S> IntoIterator for FlatMap<S> {
    type Item = (String, Leaf<S>);
    type IntoIter = indexmap::map::IntoIter<String, Leaf<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, S> IntoIterator for &'a FlatMap<S> {
    type Item = (&'a String, &'a Leaf<S>);
    type IntoIter = indexmap::map::Iter<'a, String, Leaf<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<S> FromIterator<(String, Leaf<S>)> for FlatMap<S> {
    fn from_iter<T: IntoIterator<Item = (String, Leaf<S>)>>(iter: T) -> Self {
        FlatMap(IndexMap::from_iter(iter))
    }
}

impl<S> Extend<(String, Leaf<S>)> for FlatMap<S> {
    fn extend<T: IntoIterator<Item = (String, Leaf<S>)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl<S: Serialize> Serialize for FlatMap<S> {
    fn serialize<Se>(&self, serializer: Se) -> Result<Se::Ok, Se::Error>
    where
        Se: Serializer,
    {
        serializer.collect_map(self.0.iter())
    }
}

impl<'de, S: Deserialize<'de>> Deserialize<'de> for FlatMap<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        IndexMap::<String, Leaf<S>>::deserialize(deserializer).map(FlatMap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut flat = FlatMap::new();
        flat.insert("b", 1);
        flat.insert("a", 2);
        flat.insert("b", 3);

        assert_eq!(flat.paths().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(flat.get("b"), Some(&Leaf::from(3)));
    }

    #[test]
    fn test_remove_and_sort() {
        let mut flat = FlatMap::new();
        flat.insert("c", 1);
        flat.insert("a", 2);
        flat.insert("b", 3);

        assert_eq!(flat.remove("a"), Some(Leaf::from(2)));
        assert!(!flat.contains_path("a"));

        flat.sort_paths();
        assert_eq!(flat.paths().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn test_generic_payload() {
        let mut flat: FlatMap<char> = FlatMap::default();
        flat.insert("x", Leaf::Scalar('x'));
        flat.insert("y", None);

        let leaves: Vec<_> = flat.leaves().cloned().collect();
        assert_eq!(leaves, vec![Leaf::Scalar('x'), Leaf::Null]);
    }
}
