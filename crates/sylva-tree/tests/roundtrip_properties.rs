//! Property tests for the (de)serialization boundary.

use proptest::prelude::*;
use serde_json::json;
use sylva_tree::Tree;
use sylva_test_utils::fixtures::fixture_tree;

fn arb_value_triplet() -> impl Strategy<Value = (String, f64, bool)> {
    (any::<String>(), -1.0e9..1.0e9f64, any::<bool>())
}

/// Build `count` named shapes and assign the given leaf values.
fn populated_tree(values: &[(String, f64, bool)]) -> Tree {
    let mut t = fixture_tree();
    for (i, (label, width, visible)) in values.iter().enumerate() {
        let name = format!("s{i}");
        let shape = t.create(t.root(), "shape", Some(&name), None).unwrap();
        let label_node = t.child_by_name(shape, "label").unwrap();
        t.set_text(label_node, label.clone());
        let width_node = t.child_by_name(shape, "width").unwrap();
        t.set_measure_value(width_node, *width);
        let visible_node = t.child_by_name(shape, "visible").unwrap();
        t.set_flag(visible_node, *visible);
    }
    t
}

/// A structurally identical tree with no values assigned.
fn blank_tree(count: usize) -> Tree {
    let mut t = fixture_tree();
    for i in 0..count {
        let name = format!("s{i}");
        t.create(t.root(), "shape", Some(&name), None).unwrap();
    }
    t
}

proptest! {
    /// Deserializing one tree's serialization into a structurally
    /// identical fresh tree reproduces every leaf value.
    #[test]
    fn serialize_deserialize_round_trip(
        values in prop::collection::vec(arb_value_triplet(), 0..6)
    ) {
        let first = populated_tree(&values);
        let snapshot = first.serialize(first.root());

        let mut second = blank_tree(values.len());
        second.deserialize(second.root(), &snapshot);
        prop_assert_eq!(second.serialize(second.root()), snapshot);
    }

    /// Sequence input never errors or grows a non-set node, however
    /// long it is.
    #[test]
    fn sequence_input_truncates_quietly(
        extra in prop::collection::vec(any::<i32>(), 0..16)
    ) {
        let mut t = fixture_tree();
        let shape = t.create(t.root(), "shape", Some("s"), None).unwrap();
        let before = t.child_count(shape);

        let items: Vec<serde_json::Value> =
            extra.iter().map(|v| json!(v)).collect();
        t.deserialize(shape, &json!(items));
        prop_assert_eq!(t.child_count(shape), before);
    }

    /// Serialization in simple mode never emits null entries at any
    /// nesting level.
    #[test]
    fn simple_mode_output_is_sparse(
        values in prop::collection::vec(arb_value_triplet(), 0..4)
    ) {
        fn has_empty_entry(value: &serde_json::Value) -> bool {
            match value {
                serde_json::Value::Object(map) => map
                    .values()
                    .any(|v| v.is_null() || has_empty_entry(v)),
                _ => false,
            }
        }

        let t = populated_tree(&values);
        let sparse = t.serialize_mode(t.root(), sylva_tree::SerializeMode::Simple);
        prop_assert!(!has_empty_entry(&sparse));
    }
}
