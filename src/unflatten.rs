//! Unflatten: flat path map back to a nested value.
//!
//! The tree is rebuilt one nesting level at a time. At each level the entries
//! are grouped by their next segment, in first-seen order, and the group keys
//! decide the container:
//!
//! - every key is an index segment: a sequence of `max_index + 1` slots,
//!   unreferenced slots left as null
//! - every key is a key segment: a mapping in first-seen order
//! - a mix of both: [`Error::MalformedPath`]
//!
//! A group holding a single entry that ends at this level is that entry's
//! leaf. The whole input is validated on the way down, so an error is always
//! returned instead of a partially built value.
//!
//! The rebuild recurses once per level. Paths longer than
//! [`FlattenOptions::max_depth`] are refused before anything is built.

use crate::path::{self, PathBuilder, Segment};
use crate::{Error, FlatMap, FlattenOptions, Leaf, Map, Result, Value};
use indexmap::IndexMap;
use std::collections::HashMap;

struct Entry<'a, S> {
    segments: Vec<&'a str>,
    leaf: &'a Leaf<S>,
}

/// Rebuilds the nested value described by `flat`.
///
/// An empty flat map yields an empty mapping. A flat map whose only entry sits
/// at the empty path yields that leaf on its own, mirroring how
/// [`flatten_with_options`](crate::flatten_with_options) stores a top-level scalar.
///
/// # Errors
///
/// - [`Error::MalformedPath`] if index and key segments share a parent
/// - [`Error::AmbiguousIndex`] if two spellings such as `1` and `01` share a parent
/// - [`Error::ResourceLimitExceeded`] if an index exceeds `options.max_sequence_len`
///   or cannot be allocated at all, or a path has more than `options.max_depth` segments
/// - [`Error::PathConflict`] if one path is a leaf and a prefix of another
pub fn unflatten_with_options<S: Clone>(
    flat: &FlatMap<S>,
    options: &FlattenOptions,
) -> Result<Value<S>> {
    build(flat, options).map_err(|err| {
        tracing::debug!(error = %err, "rejected flat map");
        err
    })
}

fn build<S: Clone>(flat: &FlatMap<S>, options: &FlattenOptions) -> Result<Value<S>> {
    if flat.is_empty() {
        return Ok(Value::Mapping(Map::new()));
    }
    if flat.len() == 1 {
        if let Some(leaf) = flat.get("") {
            return Ok(Value::from(leaf.clone()));
        }
    }

    let mut entries = Vec::with_capacity(flat.len());
    for (path, leaf) in flat {
        let segments = path::split(path, options.delimiter);
        if let Some(max) = options.max_depth {
            if segments.len() > max {
                let allowed = path::join(&segments[..max], options.delimiter);
                return Err(Error::depth_limit(&allowed, segments.len(), max));
            }
        }
        entries.push(Entry { segments, leaf });
    }
    let level: Vec<&Entry<'_, S>> = entries.iter().collect();

    let mut builder = Builder {
        options,
        prefix: PathBuilder::new(options.delimiter),
    };
    builder.level(level, 0)
}

struct Builder<'o> {
    options: &'o FlattenOptions,
    prefix: PathBuilder,
}

impl Builder<'_> {
    /// Builds the container whose children are addressed by `segments[depth]`.
    ///
    /// Every entry passed in has more than `depth` segments.
    fn level<'a, S: Clone>(&mut self, entries: Vec<&Entry<'a, S>>, depth: usize) -> Result<Value<S>> {
        let mut groups: IndexMap<&'a str, Vec<&Entry<'a, S>>> = IndexMap::new();
        for entry in entries {
            groups.entry(entry.segments[depth]).or_default().push(entry);
        }

        let mut first_index = None;
        let mut first_key = None;
        for segment in groups.keys().copied().map(Segment::classify) {
            match segment {
                Segment::Index(s) => first_index = first_index.or(Some(s)),
                Segment::Key(s) => first_key = first_key.or(Some(s)),
            }
            if let (Some(index), Some(key)) = (first_index, first_key) {
                return Err(Error::malformed_path(self.prefix.as_str(), index, key));
            }
        }

        if first_index.is_some() {
            self.sequence(groups, depth)
        } else {
            self.mapping(groups, depth)
        }
    }

    fn mapping<'a, S: Clone>(
        &mut self,
        groups: IndexMap<&'a str, Vec<&Entry<'a, S>>>,
        depth: usize,
    ) -> Result<Value<S>> {
        let mut map = Map::with_capacity(groups.len());
        for (segment, members) in groups {
            let child = self.child(segment, members, depth)?;
            map.insert(segment.to_string(), child);
        }
        Ok(Value::Mapping(map))
    }

    fn sequence<'a, S: Clone>(
        &mut self,
        groups: IndexMap<&'a str, Vec<&Entry<'a, S>>>,
        depth: usize,
    ) -> Result<Value<S>> {
        let limit = self.options.max_sequence_len;
        let mut spellings: HashMap<&'a str, &'a str> = HashMap::with_capacity(groups.len());
        let mut slots = Vec::with_capacity(groups.len());
        let mut len = 0usize;

        for segment in groups.keys().copied() {
            let classified = Segment::classify(segment);
            let canonical = classified.canonical_index().unwrap_or(segment);
            if let Some(previous) = spellings.insert(canonical, segment) {
                return Err(Error::ambiguous_index(self.prefix.as_str(), previous, segment));
            }

            let index = classified
                .index()
                .filter(|&i| i < usize::MAX)
                .ok_or_else(|| {
                    Error::resource_limit(self.prefix.as_str(), segment, limit.unwrap_or(usize::MAX))
                })?;
            if let Some(max) = limit {
                if index >= max {
                    return Err(Error::resource_limit(self.prefix.as_str(), segment, max));
                }
            }
            len = len.max(index + 1);
            slots.push(index);
        }

        let mut seq: Vec<Value<S>> = Vec::new();
        seq.try_reserve_exact(len).map_err(|_| {
            Error::resource_limit(self.prefix.as_str(), &(len - 1).to_string(), usize::MAX)
        })?;
        seq.resize_with(len, || Value::Null);
        tracing::trace!(prefix = self.prefix.as_str(), len, "allocated sequence");

        for ((segment, members), index) in groups.into_iter().zip(slots) {
            seq[index] = self.child(segment, members, depth)?;
        }
        Ok(Value::Sequence(seq))
    }

    fn child<'a, S: Clone>(
        &mut self,
        segment: &'a str,
        members: Vec<&Entry<'a, S>>,
        depth: usize,
    ) -> Result<Value<S>> {
        let mark = self.prefix.push(segment);
        let ends_here = members.iter().any(|e| e.segments.len() == depth + 1);

        let child = if !ends_here {
            self.level(members, depth + 1)
        } else if members.len() == 1 {
            Ok(Value::from(members[0].leaf.clone()))
        } else {
            Err(Error::path_conflict(self.prefix.as_str()))
        };

        self.prefix.pop(mark);
        child
    }
}
