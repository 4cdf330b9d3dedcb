//! Flatten: nested value to flat path map.

use crate::path::PathBuilder;
use crate::{FlatMap, FlattenOptions, Leaf, Value};

/// Flattens `value` into a map from delimiter-joined paths to leaves.
///
/// Every scalar and every null becomes exactly one entry at its path. Empty
/// mappings and empty sequences contribute no entries. A top-level scalar or
/// null is stored under the empty path.
///
/// Paths are emitted depth-first in the value's own iteration order. The walk
/// keeps its own stack, so nesting depth is bounded by memory only.
pub fn flatten_with_options<S: Clone>(value: &Value<S>, options: &FlattenOptions) -> FlatMap<S> {
    let mut walk = Walk {
        out: FlatMap::default(),
        path: PathBuilder::new(options.delimiter),
        stack: Vec::new(),
    };
    walk.enter(value, None);

    while let Some(frame) = walk.stack.last_mut() {
        let path = &mut walk.path;
        let next = match &mut frame.children {
            Children::Sequence(iter) => iter
                .next()
                .map(|(i, child)| (path.push(&i.to_string()), child)),
            Children::Mapping(iter) => iter.next().map(|(key, child)| (path.push(key), child)),
        };
        match next {
            Some((mark, child)) => walk.enter(child, Some(mark)),
            None => {
                if let Some(Frame { mark: Some(mark), .. }) = walk.stack.pop() {
                    walk.path.pop(mark);
                }
            }
        }
    }

    tracing::trace!(entries = walk.out.len(), "flattened value");
    walk.out
}

enum Children<'v, S> {
    Sequence(std::iter::Enumerate<std::slice::Iter<'v, Value<S>>>),
    Mapping(indexmap::map::Iter<'v, String, Value<S>>),
}

/// A container being walked; `mark` undoes the segment that led into it.
struct Frame<'v, S> {
    children: Children<'v, S>,
    mark: Option<usize>,
}

struct Walk<'v, S> {
    out: FlatMap<S>,
    path: PathBuilder,
    stack: Vec<Frame<'v, S>>,
}

impl<'v, S: Clone> Walk<'v, S> {
    /// Records a leaf at the current path, or opens a container.
    fn enter(&mut self, value: &'v Value<S>, mark: Option<usize>) {
        let leaf = match value {
            Value::Null => Leaf::Null,
            Value::Scalar(s) => Leaf::Scalar(s.clone()),
            Value::Sequence(seq) => {
                self.stack.push(Frame {
                    children: Children::Sequence(seq.iter().enumerate()),
                    mark,
                });
                return;
            }
            Value::Mapping(map) => {
                self.stack.push(Frame {
                    children: Children::Mapping(map.iter()),
                    mark,
                });
                return;
            }
        };
        self.out.insert(self.path.as_str(), leaf);
        if let Some(mark) = mark {
            self.path.pop(mark);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{flatten, value, FlatMap, FlattenOptions, Leaf, Map, Value};

    fn paths<S>(flat: &FlatMap<S>) -> Vec<&str> {
        flat.paths().collect()
    }

    #[test]
    fn test_empty_containers_vanish() {
        assert!(flatten(&value!({})).is_empty());
        assert!(flatten(&value!([])).is_empty());

        let flat = flatten(&value!({ "a": {}, "b": [], "c": 1 }));
        assert_eq!(paths(&flat), vec!["c"]);
    }

    #[test]
    fn test_null_is_a_leaf() {
        let flat = flatten(&value!({ "a": [null] }));
        assert_eq!(paths(&flat), vec!["a.0"]);
        assert_eq!(flat.get("a.0"), Some(&Leaf::Null));

        let flat = flatten(&value!({ "a": [1, null, 3] }));
        assert_eq!(paths(&flat), vec!["a.0", "a.1", "a.2"]);
    }

    #[test]
    fn test_top_level_leaf_uses_empty_path() {
        let flat = flatten(&Value::from(5));
        assert_eq!(flat.get(""), Some(&Leaf::from(5)));
        assert_eq!(flat.len(), 1);

        let flat = flatten(&Value::<u8>::Null);
        assert_eq!(flat.get(""), Some(&Leaf::Null));
    }

    #[test]
    fn test_mapping_order_is_kept() {
        let mut map = Map::new();
        map.insert("z".to_string(), Value::from(1));
        map.insert("a".to_string(), Value::from(2));
        map.insert("m".to_string(), Value::from(3));

        let flat = flatten(&Value::Mapping(map));
        assert_eq!(paths(&flat), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_empty_key_segments() {
        let flat = flatten(&value!({ "": { "a": 1 } }));
        assert_eq!(paths(&flat), vec![".a"]);
    }

    #[test]
    fn test_custom_delimiter() {
        let options = FlattenOptions::new().with_delimiter('/');
        let flat = crate::flatten_with_options(&value!({ "a": { "b": [true] } }), &options);
        assert_eq!(paths(&flat), vec!["a/b/0"]);
    }

    #[test]
    fn test_deep_nesting_does_not_recurse() {
        let mut value = Value::from(1);
        for _ in 0..50_000 {
            let mut map = Map::new();
            map.insert("k".to_string(), value);
            value = Value::Mapping(map);
        }

        let flat = flatten(&value);
        assert_eq!(flat.len(), 1);
        let path = flat.paths().next().unwrap();
        assert_eq!(path.len(), 50_000 * 2 - 1);

        // Unwind by hand; the derived drop recurses once per level.
        let mut current = value;
        while let Value::Mapping(mut map) = current {
            current = map.get_mut("k").map(std::mem::take).unwrap_or_default();
        }
    }
}
