//! Property-based tests for the round-trip laws
//!
//! Generated values avoid the shapes the flat form cannot carry: empty
//! containers, digit-only keys, empty keys and keys holding the delimiter.

use flattery::{
    flatten, flatten_with_options, from_flat, to_flat, unflatten, unflatten_with_options,
    FlattenOptions, Map, Value,
};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,12}".prop_map(Value::from),
    ]
}

fn key() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_-]{0,7}"
}

fn nested() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..5).prop_map(Value::Sequence),
            prop::collection::vec((key(), inner), 1..5).prop_map(|pairs| {
                Value::Mapping(pairs.into_iter().collect::<Map<Value>>())
            }),
        ]
    })
}

proptest! {
    #[test]
    fn prop_unflatten_inverts_flatten(value in nested()) {
        let flat = flatten(&value);
        prop_assert_eq!(unflatten(&flat).unwrap(), value);
    }

    #[test]
    fn prop_flatten_is_idempotent(value in nested()) {
        let once = flatten(&value);
        let twice = flatten(&unflatten(&once).unwrap());
        prop_assert_eq!(
            once.paths().collect::<Vec<_>>(),
            twice.paths().collect::<Vec<_>>()
        );
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_every_leaf_has_one_entry(value in nested()) {
        fn count(value: &Value) -> usize {
            match value {
                Value::Null | Value::Scalar(_) => 1,
                Value::Sequence(seq) => seq.iter().map(count).sum(),
                Value::Mapping(map) => map.values().map(count).sum(),
            }
        }
        prop_assert_eq!(flatten(&value).len(), count(&value));
    }

    #[test]
    fn prop_custom_delimiter_roundtrip(value in nested()) {
        let options = FlattenOptions::new().with_delimiter('/');
        let flat = flatten_with_options(&value, &options);
        prop_assert!(flat.paths().all(|p| !p.contains('.')));
        prop_assert_eq!(unflatten_with_options(&flat, &options).unwrap(), value);
    }

    #[test]
    fn prop_sparse_sequence_fills_with_null(indices in prop::collection::btree_set(0usize..64, 1..8)) {
        let mut flat = flattery::FlatMap::new();
        for i in &indices {
            flat.insert(format!("s.{}", i), *i as i64);
        }

        let value = unflatten(&flat).unwrap();
        let seq = value.get("s").and_then(Value::as_sequence).unwrap();
        let max = *indices.iter().next_back().unwrap();
        prop_assert_eq!(seq.len(), max + 1);
        for (i, slot) in seq.iter().enumerate() {
            if indices.contains(&i) {
                prop_assert_eq!(slot, &Value::from(i as i64));
            } else {
                prop_assert_eq!(slot, &Value::Null);
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
struct Record {
    id: u32,
    label: String,
    scores: Vec<i32>,
    parent: Option<u32>,
}

fn record() -> impl Strategy<Value = Record> {
    (
        any::<u32>(),
        "[a-zA-Z ]{0,16}",
        prop::collection::vec(any::<i32>(), 1..6),
        proptest::option::of(any::<u32>()),
    )
        .prop_map(|(id, label, scores, parent)| Record {
            id,
            label,
            scores,
            parent,
        })
}

proptest! {
    #[test]
    fn prop_struct_roundtrip(r in record()) {
        let flat = to_flat(&r).unwrap();
        let back: Record = from_flat(&flat).unwrap();
        prop_assert_eq!(back, r);
    }

    #[test]
    fn prop_struct_list_roundtrip(rs in prop::collection::vec(record(), 1..6)) {
        let flat = to_flat(&rs).unwrap();
        let back: Vec<Record> = from_flat(&flat).unwrap();
        prop_assert_eq!(back, rs);
    }
}
