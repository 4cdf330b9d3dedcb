//! Error types for flattening, unflattening and the serde bridge.
//!
//! Flattening a [`Value`](crate::Value) never fails. Every error here comes from
//! [`unflatten`](crate::unflatten) rejecting a flat map whose paths do not
//! describe a single tree, or from converting between Rust types and values.
//!
//! ## Error Categories
//!
//! - **Malformed paths**: index and key segments mixed under one prefix
//! - **Ambiguous indices**: `"1"` and `"01"` both addressing the same slot
//! - **Resource limits**: a sparse index that would allocate too large a sequence,
//!   or a path nested deeper than the configured maximum
//! - **Path conflicts**: a path that is both a leaf and a container
//! - **Serde errors**: unsupported types or custom messages from `Serialize`/`Deserialize`
//!
//! ## Examples
//!
//! ```rust
//! use flattery::{unflatten, Error, FlatMap};
//!
//! let mut flat = FlatMap::new();
//! flat.insert("a.0", 1);
//! flat.insert("a.b", 2);
//!
//! match unflatten(&flat) {
//!     Err(Error::MalformedPath { prefix, .. }) => assert_eq!(prefix, "a"),
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by this crate.
///
/// Path-related variants carry the offending prefix so the caller can locate
/// the bad entries in its input. The top level is reported as an empty prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Sibling segments under one prefix mix sequence indices and mapping keys
    #[error("Malformed path at '{prefix}': index segment '{index}' and key segment '{key}' share a parent")]
    MalformedPath {
        prefix: String,
        index: String,
        key: String,
    },

    /// Two differently-spelled index segments resolve to the same slot
    #[error("Ambiguous index at '{prefix}': segments '{first}' and '{second}' address the same slot")]
    AmbiguousIndex {
        prefix: String,
        first: String,
        second: String,
    },

    /// A sequence index or a path depth exceeds the configured (or addressable) maximum
    #[error("Resource limit exceeded at '{prefix}': {kind} {requested} exceeds maximum {limit}")]
    ResourceLimitExceeded {
        prefix: String,
        kind: Limit,
        requested: String,
        limit: usize,
    },

    /// A path addresses a leaf that other paths treat as a container
    #[error("Path conflict at '{path}': value is both a leaf and a container")]
    PathConflict { path: String },

    /// Unsupported type for conversion to a value
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a malformed path error for mixed segment kinds under `prefix`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flattery::Error;
    ///
    /// let err = Error::malformed_path("a", "0", "b");
    /// assert!(err.to_string().contains("'a'"));
    /// ```
    pub fn malformed_path(prefix: &str, index: &str, key: &str) -> Self {
        Error::MalformedPath {
            prefix: prefix.to_string(),
            index: index.to_string(),
            key: key.to_string(),
        }
    }

    /// Creates an ambiguous index error for two spellings of one slot.
    pub fn ambiguous_index(prefix: &str, first: &str, second: &str) -> Self {
        Error::AmbiguousIndex {
            prefix: prefix.to_string(),
            first: first.to_string(),
            second: second.to_string(),
        }
    }

    /// Creates a resource limit error for an index that cannot be allocated.
    pub fn resource_limit(prefix: &str, index: &str, limit: usize) -> Self {
        Error::ResourceLimitExceeded {
            prefix: prefix.to_string(),
            kind: Limit::SequenceIndex,
            requested: index.to_string(),
            limit,
        }
    }

    /// Creates a resource limit error for a path with too many segments.
    ///
    /// `prefix` is the path cut off at the deepest level still allowed.
    pub fn depth_limit(prefix: &str, depth: usize, limit: usize) -> Self {
        Error::ResourceLimitExceeded {
            prefix: prefix.to_string(),
            kind: Limit::PathDepth,
            requested: depth.to_string(),
            limit,
        }
    }

    /// Creates a conflict error for a path that is both a leaf and a container.
    pub fn path_conflict(path: &str) -> Self {
        Error::PathConflict {
            path: path.to_string(),
        }
    }

    /// Creates an unsupported type error for types that have no value representation.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flattery::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

/// The resource a [`Error::ResourceLimitExceeded`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limit {
    /// Slots in one sequence, see [`FlattenOptions::max_sequence_len`](crate::FlattenOptions::max_sequence_len)
    SequenceIndex,
    /// Segments in one path, see [`FlattenOptions::max_depth`](crate::FlattenOptions::max_depth)
    PathDepth,
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::SequenceIndex => f.write_str("sequence index"),
            Limit::PathDepth => f.write_str("path depth"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_prefix() {
        let err = Error::ambiguous_index("a.b", "1", "01");
        let msg = err.to_string();
        assert!(msg.contains("'a.b'"));
        assert!(msg.contains("'01'"));

        let err = Error::resource_limit("a", "1000", 10);
        assert!(err.to_string().contains("sequence index 1000 exceeds maximum 10"));

        let err = Error::depth_limit("k.k", 5000, 2);
        assert!(err.to_string().contains("'k.k': path depth 5000 exceeds maximum 2"));

        let err = Error::path_conflict("a.b");
        assert!(err.to_string().contains("both a leaf and a container"));
    }

    #[test]
    fn test_serde_custom() {
        let err = <Error as serde::de::Error>::custom("bad input");
        assert_eq!(err, Error::Custom("bad input".to_string()));
    }
}
