//! # flattery
//!
//! Fast flattening and unflattening of nested data structures.
//!
//! ## What does it do?
//!
//! `flattery` converts between a nested tree of mappings, sequences and
//! scalars and a single flat map whose keys are dot-joined paths:
//!
//! ```text
//! {"a": {"b": 42, "c": [1, 2]}}   <=>   {"a.b": 42, "a.c.0": 1, "a.c.1": 2}
//! ```
//!
//! The flat form fits anywhere a single level of key-value pairs is all you
//! get: query strings, environment variables, spreadsheet columns, simple
//! key-value stores.
//!
//! ## Key Features
//!
//! - **Structure Inference**: all-digit sibling segments rebuild a sequence, anything else a mapping
//! - **Sparse Sequences**: missing indices are filled with null up to the largest index
//! - **Strict Input Checking**: mixed, ambiguous or conflicting paths are rejected, never guessed
//! - **Serde Bridge**: any `Serialize`/`Deserialize` type can pass through the flat form
//! - **Generic Leaves**: the transform never inspects scalar payloads, so any `Clone` type works
//!
//! ## Quick Start
//!
//! ```rust
//! use flattery::{flatten, unflatten, value};
//!
//! let nested = value!({ "a": { "b": 42, "c": [1, 2] } });
//!
//! let flat = flatten(&nested);
//! assert_eq!(flat.paths().collect::<Vec<_>>(), vec!["a.b", "a.c.0", "a.c.1"]);
//!
//! let back = unflatten(&flat).unwrap();
//! assert_eq!(back, nested);
//! ```
//!
//! ### Sparse Sequences
//!
//! ```rust
//! use flattery::{unflatten, value, FlatMap};
//!
//! let mut flat = FlatMap::new();
//! flat.insert("a.0", 1);
//! flat.insert("a.3", 4);
//!
//! assert_eq!(unflatten(&flat).unwrap(), value!({ "a": [1, null, null, 4] }));
//! ```
//!
//! ### Typed Data
//!
//! ```rust
//! use flattery::{from_flat, to_flat};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Server { host: String, ports: Vec<u16> }
//!
//! let server = Server { host: "localhost".to_string(), ports: vec![80, 443] };
//! let flat = to_flat(&server).unwrap();
//! assert!(flat.contains_path("ports.1"));
//!
//! let back: Server = from_flat(&flat).unwrap();
//! assert_eq!(back, server);
//! ```
//!
//! ## Round-Trip Limits
//!
//! `unflatten(flatten(v)) == v` holds except where the flat form cannot carry
//! the information:
//!
//! - empty mappings and empty sequences produce no entries and come back
//!   missing (an empty top-level container comes back as an empty mapping)
//! - mapping keys made only of digits come back as sequence indices
//! - mapping keys containing the delimiter come back as extra nesting
//! - a mapping whose only key is the empty string comes back as a bare scalar
//!
//! ## Untrusted Input
//!
//! Unflattening allocates `max_index + 1` slots per sequence, so a single path
//! like `a.999999999` requests a huge allocation. Use
//! [`FlattenOptions::with_max_sequence_len`] when the flat map is not trusted.
//!
//! Unflattening also recurses once per path segment, so paths are refused
//! with [`Error::ResourceLimitExceeded`] beyond [`DEFAULT_MAX_DEPTH`] segments.
//! [`FlattenOptions::with_max_depth`] changes the limit; a very large one lets
//! a single long path overflow the stack. Flattening walks with an explicit
//! stack and has no depth limit.
//!
//! ## Logging
//!
//! Structural decisions and rejected inputs are reported through `tracing` at
//! `trace` and `debug` level. The crate never installs a subscriber.

mod flatten;
mod unflatten;

pub mod de;
pub mod error;
pub mod flat;
pub mod macros;
pub mod map;
pub mod options;
pub mod path;
pub mod ser;
pub mod value;

pub use de::{from_value, ValueDeserializer};
pub use error::{Error, Limit, Result};
pub use flat::FlatMap;
pub use flatten::flatten_with_options;
pub use map::Map;
pub use options::{FlattenOptions, DEFAULT_DELIMITER, DEFAULT_MAX_DEPTH};
pub use ser::{to_value, ValueSerializer};
pub use unflatten::unflatten_with_options;
pub use value::{Leaf, Number, Scalar, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Flattens `value` into a map from dot-joined paths to leaves.
///
/// Every scalar and null becomes one entry; empty containers produce none.
///
/// # Examples
///
/// ```rust
/// use flattery::{flatten, value, Leaf};
///
/// let flat = flatten(&value!({ "a": { "b": 42 }, "c": [null] }));
/// assert_eq!(flat.get("a.b"), Some(&Leaf::from(42)));
/// assert_eq!(flat.get("c.0"), Some(&Leaf::Null));
/// ```
#[must_use]
pub fn flatten<S: Clone>(value: &Value<S>) -> FlatMap<S> {
    flatten_with_options(value, &FlattenOptions::default())
}

/// Rebuilds the nested value described by a flat map of dot-joined paths.
///
/// # Examples
///
/// ```rust
/// use flattery::{unflatten, value, FlatMap};
///
/// let mut flat = FlatMap::new();
/// flat.insert("a.0.b", 1);
/// flat.insert("a.0.c", 2);
///
/// assert_eq!(unflatten(&flat).unwrap(), value!({ "a": [{ "b": 1, "c": 2 }] }));
/// ```
///
/// # Errors
///
/// Returns an error if the paths do not describe a single tree: index and key
/// segments under one parent, two spellings of one index, a path that is
/// both a leaf and a container, or a path longer than [`DEFAULT_MAX_DEPTH`]
/// segments. See [`unflatten_with_options`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn unflatten<S: Clone>(flat: &FlatMap<S>) -> Result<Value<S>> {
    unflatten_with_options(flat, &FlattenOptions::default())
}

/// Serializes any `T: Serialize` straight into a flat map.
///
/// # Errors
///
/// Returns an error if `T` cannot be represented as a [`Value`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_flat<T>(value: &T) -> Result<FlatMap>
where
    T: ?Sized + Serialize,
{
    to_flat_with_options(value, &FlattenOptions::default())
}

/// Serializes any `T: Serialize` into a flat map with custom options.
///
/// # Errors
///
/// Returns an error if `T` cannot be represented as a [`Value`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_flat_with_options<T>(value: &T, options: &FlattenOptions) -> Result<FlatMap>
where
    T: ?Sized + Serialize,
{
    Ok(flatten_with_options(&to_value(value)?, options))
}

/// Deserializes an instance of `T` from a flat map.
///
/// Fields whose value was an empty collection are absent from the flat map;
/// give them `#[serde(default)]` to read them back.
///
/// # Errors
///
/// Returns an error if the flat map cannot be unflattened or the resulting
/// value does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_flat<T>(flat: &FlatMap) -> Result<T>
where
    T: DeserializeOwned,
{
    from_flat_with_options(flat, &FlattenOptions::default())
}

/// Deserializes an instance of `T` from a flat map with custom options.
///
/// # Errors
///
/// Returns an error if the flat map cannot be unflattened or the resulting
/// value does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_flat_with_options<T>(flat: &FlatMap, options: &FlattenOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(unflatten_with_options(flat, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Database {
        host: String,
        port: u16,
        replicas: Vec<String>,
        password: Option<String>,
    }

    #[test]
    fn test_to_flat_paths() {
        let db = Database {
            host: "db1".to_string(),
            port: 5432,
            replicas: vec!["db2".to_string(), "db3".to_string()],
            password: None,
        };

        let flat = to_flat(&db).unwrap();
        assert_eq!(
            flat.paths().collect::<Vec<_>>(),
            vec!["host", "port", "replicas.0", "replicas.1", "password"]
        );
        assert_eq!(flat.get("password"), Some(&Leaf::Null));

        let back: Database = from_flat(&flat).unwrap();
        assert_eq!(back, db);
    }

    #[test]
    fn test_custom_options_roundtrip() {
        let db = Database {
            host: "db1".to_string(),
            port: 5432,
            replicas: vec!["db2".to_string()],
            password: Some("hunter2".to_string()),
        };

        let options = FlattenOptions::new().with_delimiter('_');
        let flat = to_flat_with_options(&db, &options).unwrap();
        assert!(flat.contains_path("replicas_0"));

        let back: Database = from_flat_with_options(&flat, &options).unwrap();
        assert_eq!(back, db);
    }

    #[test]
    fn test_from_flat_propagates_structure_errors() {
        let mut flat = FlatMap::new();
        flat.insert("replicas.0", "a");
        flat.insert("replicas.x", "b");

        let result: Result<Database> = from_flat(&flat);
        assert!(matches!(result, Err(Error::MalformedPath { .. })));
    }
}
