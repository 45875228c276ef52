//! Generic value → tree deserialization.
//!
//! Dispatch is structural and deliberately tolerant: unparsable text
//! falls back to raw scalar data, sequences truncate beyond the child
//! count, unknown mapping keys are ignored, and scalars that do not
//! fit the receiving payload are dropped. Nothing in this module
//! errors on data shape — forward and backward compatibility of
//! persisted documents outranks strictness here, and collaborators
//! above the tree can be strict where they need to be.

use sylva_core::value;
use sylva_core::{NodeId, Payload, Value};

use crate::serialize::SerializeMode;
use crate::tree::Tree;

impl Tree {
    /// Deserialize `data` into the subtree rooted at `id`.
    pub fn deserialize(&mut self, id: NodeId, data: &Value) {
        self.deserialize_mode(id, data, SerializeMode::Full);
    }

    /// Deserialize `data`, threading the mode through the recursion.
    ///
    /// Both modes accept the same inputs; the mode mirrors
    /// [`serialize_mode`](Tree::serialize_mode) so a caller can keep
    /// one mode value for both directions.
    pub fn deserialize_mode(&mut self, id: NodeId, data: &Value, mode: SerializeMode) {
        match data {
            Value::Null => {}
            Value::String(text) => self.deserialize_text(id, text, mode),
            Value::Array(items) => self.deserialize_sequence(id, items, mode),
            Value::Object(map) => self.deserialize_mapping(id, map, mode),
            scalar => self.assign_scalar(id, scalar),
        }
    }

    /// Text input: a composite tries a JSON parse to recover
    /// structure; a leaf consumes the text directly, parsed per its
    /// payload. Either way, text that fits nothing is dropped, never
    /// an error.
    fn deserialize_text(&mut self, id: NodeId, text: &str, mode: SerializeMode) {
        if self.payload(id).is_leaf() {
            self.assign_text(id, text);
            return;
        }
        match value::loose_parse(text) {
            parsed @ (Value::Array(_) | Value::Object(_)) => {
                self.deserialize_mode(id, &parsed, mode);
            }
            // A scalar carries no structure for a composite.
            _ => {}
        }
    }

    /// Sequence input: positional assignment in construction order.
    /// Sets grow to fit; other nodes stop at their child count.
    fn deserialize_sequence(&mut self, id: NodeId, items: &[Value], mode: SerializeMode) {
        let grows = self.payload(id).is_set();
        for (index, item) in items.iter().enumerate() {
            match self.child_at(id, index) {
                Some(child) => self.deserialize_mode(child, item, mode),
                None if grows => {
                    let _ = self.add_element(id, None, Some(item));
                }
                None => break,
            }
        }
    }

    /// Mapping input: keys resolve to children by name, then through
    /// the kind's alias vocabulary; null values and unknown keys are
    /// skipped. Sets create elements for unknown keys instead — their
    /// children are dynamic, not declared.
    fn deserialize_mapping(
        &mut self,
        id: NodeId,
        map: &serde_json::Map<String, Value>,
        mode: SerializeMode,
    ) {
        if self.payload(id).is_set() {
            for (key, item) in map {
                if item.is_null() {
                    continue;
                }
                match self.child_by_name(id, key) {
                    Some(child) => self.deserialize_mode(child, item, mode),
                    None => {
                        let _ = self.add_element(id, Some(key), Some(item));
                    }
                }
            }
            return;
        }
        if matches!(self.payload(id), Payload::Measure { .. }) {
            self.assign_measure_mapping(id, map);
            return;
        }
        for (key, item) in map {
            if item.is_null() {
                continue;
            }
            if let Some(child) = self.resolve_field(id, key) {
                self.deserialize_mode(child, item, mode);
            }
        }
    }

    /// Find the child a mapping key addresses: by name first, then by
    /// the kind chain's alias vocabulary.
    fn resolve_field(&self, id: NodeId, key: &str) -> Option<NodeId> {
        if let Some(child) = self.child_by_name(id, key) {
            return Some(child);
        }
        let kind = self.kind_of(id)?;
        let canonical = self.kinds.resolve_alias(kind, key)?;
        self.child_by_name(id, canonical)
    }

    /// Non-string scalar into a leaf payload.
    fn assign_scalar(&mut self, id: NodeId, data: &Value) {
        match data {
            Value::Bool(b) => {
                self.set_flag(id, *b);
            }
            Value::Number(n) => {
                let Some(v) = n.as_f64() else { return };
                match self.payload(id) {
                    Payload::Number(_) => {
                        self.set_number(id, v);
                    }
                    Payload::Measure { .. } => {
                        self.set_measure_value(id, v);
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    /// Raw text into a leaf payload, parsed per the payload's shape.
    fn assign_text(&mut self, id: NodeId, text: &str) {
        match self.payload(id) {
            Payload::Text(_) => {
                self.set_text(id, text);
            }
            Payload::Link(_) => {
                self.set_link(id, text);
            }
            Payload::Number(_) => {
                if let Ok(v) = text.parse::<f64>() {
                    self.set_number(id, v);
                }
            }
            Payload::Flag(_) => {
                if let Ok(v) = text.parse::<bool>() {
                    self.set_flag(id, v);
                }
            }
            Payload::Measure { .. } => self.assign_measure_text(id, text),
            _ => {}
        }
    }

    /// `"<magnitude> <unit>"` text form of a measure.
    fn assign_measure_text(&mut self, id: NodeId, text: &str) {
        let mut parts = text.split_whitespace();
        let Some(head) = parts.next() else { return };
        let Ok(v) = head.parse::<f64>() else { return };
        self.set_measure_value(id, v);
        let unit = parts.collect::<Vec<_>>().join(" ");
        if !unit.is_empty() {
            self.set_measure_unit(id, &unit);
        }
    }

    /// `{ "value": n, "unit": "..." }` mapping form of a measure.
    fn assign_measure_mapping(&mut self, id: NodeId, map: &serde_json::Map<String, Value>) {
        if let Some(unit) = map.get("unit").and_then(Value::as_str) {
            self.set_measure_unit(id, unit);
        }
        if let Some(v) = map.get("value").and_then(Value::as_f64) {
            self.set_measure_value(id, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sylva_core::{KindDef, KindTable, PayloadSpec, Unit};

    fn kinds() -> KindTable {
        let mut table = KindTable::new();
        table
            .register(KindDef::with_payload("string", PayloadSpec::Text))
            .unwrap();
        table
            .register(KindDef::with_payload("number", PayloadSpec::Number))
            .unwrap();
        table
            .register(KindDef::with_payload("boolean", PayloadSpec::Flag))
            .unwrap();
        table
            .register(
                KindDef::with_payload("distance", PayloadSpec::Measure).units(vec![
                    Unit::new("meters", &["m"], 1.0),
                    Unit::new("centimeters", &["cm"], 0.01),
                ]),
            )
            .unwrap();
        table
            .register(
                KindDef::branch("shape")
                    .alias("w", "width")
                    .child("label", "string")
                    .child("width", "distance")
                    .child("count", "number")
                    .child("visible", "boolean"),
            )
            .unwrap();
        table.register(KindDef::branch("root")).unwrap();
        table
    }

    fn shape_tree() -> (Tree, NodeId) {
        let mut t = Tree::new(kinds(), "root").unwrap();
        let shape = t.create(t.root(), "shape", Some("x"), None).unwrap();
        (t, shape)
    }

    #[test]
    fn mapping_keys_assign_by_child_name() {
        let (mut t, shape) = shape_tree();
        t.deserialize(shape, &json!({ "label": "box", "count": 3 }));
        let label = t.child_by_name(shape, "label").unwrap();
        let count = t.child_by_name(shape, "count").unwrap();
        assert_eq!(t.text(label), Some("box"));
        assert_eq!(t.number(count), Some(3.0));
    }

    #[test]
    fn unknown_keys_are_silently_ignored() {
        let (mut t, shape) = shape_tree();
        t.deserialize(shape, &json!({ "label": "box", "from_the_future": 9 }));
        let label = t.child_by_name(shape, "label").unwrap();
        assert_eq!(t.text(label), Some("box"));
    }

    #[test]
    fn null_values_leave_the_child_untouched() {
        let (mut t, shape) = shape_tree();
        let label = t.child_by_name(shape, "label").unwrap();
        t.set_text(label, "box");
        t.deserialize(shape, &json!({ "label": null }));
        assert_eq!(t.text(label), Some("box"));
    }

    #[test]
    fn aliases_map_old_vocabulary_onto_current_fields() {
        let (mut t, shape) = shape_tree();
        t.deserialize(shape, &json!({ "w": 4.0 }));
        let width = t.child_by_name(shape, "width").unwrap();
        assert_eq!(t.measure_value(width), Some(4.0));
    }

    #[test]
    fn sequences_assign_positionally_and_truncate() {
        let (mut t, shape) = shape_tree();
        // Children in construction order: label, width, count,
        // visible. Two extra entries must be dropped without error.
        t.deserialize(shape, &json!(["box", 2.5, 7, true, "extra", 11]));
        let label = t.child_by_name(shape, "label").unwrap();
        let width = t.child_by_name(shape, "width").unwrap();
        let count = t.child_by_name(shape, "count").unwrap();
        let visible = t.child_by_name(shape, "visible").unwrap();
        assert_eq!(t.text(label), Some("box"));
        assert_eq!(t.measure_value(width), Some(2.5));
        assert_eq!(t.number(count), Some(7.0));
        assert_eq!(t.flag(visible), Some(true));
    }

    #[test]
    fn json_text_restores_structure_at_a_composite() {
        let (mut t, shape) = shape_tree();
        t.deserialize(shape, &json!(r#"{ "label": "box", "count": 2 }"#));
        let label = t.child_by_name(shape, "label").unwrap();
        let count = t.child_by_name(shape, "count").unwrap();
        assert_eq!(t.text(label), Some("box"));
        assert_eq!(t.number(count), Some(2.0));
    }

    #[test]
    fn unparsable_text_at_a_leaf_is_raw_scalar_data() {
        let (mut t, shape) = shape_tree();
        let label = t.child_by_name(shape, "label").unwrap();
        t.deserialize(label, &json!("not json at all"));
        assert_eq!(t.text(label), Some("not json at all"));
    }

    #[test]
    fn numeric_text_fits_a_numeric_leaf() {
        let (mut t, shape) = shape_tree();
        let count = t.child_by_name(shape, "count").unwrap();
        t.deserialize(count, &json!("42"));
        assert_eq!(t.number(count), Some(42.0));
        // A text leaf keeps the same input verbatim instead.
        let label = t.child_by_name(shape, "label").unwrap();
        t.deserialize(label, &json!("42"));
        assert_eq!(t.text(label), Some("42"));
    }

    #[test]
    fn mismatched_scalars_are_dropped() {
        let (mut t, shape) = shape_tree();
        let count = t.child_by_name(shape, "count").unwrap();
        t.set_number(count, 1.0);
        t.deserialize(count, &json!("rather a lot"));
        t.deserialize(count, &json!(true));
        assert_eq!(t.number(count), Some(1.0));
    }

    #[test]
    fn measures_accept_all_three_input_forms() {
        let (mut t, shape) = shape_tree();
        let width = t.child_by_name(shape, "width").unwrap();

        t.deserialize(width, &json!(3.0));
        assert_eq!(t.measure_value(width), Some(3.0));

        t.deserialize(width, &json!("5 cm"));
        assert_eq!(t.measure_value(width), Some(5.0));
        assert_eq!(t.measure_unit(width).unwrap().name, "centimeters");

        t.deserialize(width, &json!({ "value": 9, "unit": "m" }));
        assert_eq!(t.measure_value(width), Some(9.0));
        assert_eq!(t.measure_unit(width).unwrap().name, "meters");
    }

    #[test]
    fn deserializing_an_unchanged_value_keeps_the_tree_clean() {
        let (mut t, shape) = shape_tree();
        let label = t.child_by_name(shape, "label").unwrap();
        t.set_text(label, "box");
        t.update(0.0);

        t.deserialize(shape, &json!({ "label": "box" }));
        assert!(t.is_updated(t.root()));

        t.deserialize(shape, &json!({ "label": "crate" }));
        assert!(!t.is_updated(label));
        assert!(!t.is_updated(t.root()));
    }

    #[test]
    fn scalar_input_at_a_composite_is_ignored() {
        let (mut t, shape) = shape_tree();
        t.deserialize(shape, &json!(5));
        t.deserialize(shape, &json!("plain text"));
        assert_eq!(t.child_count(shape), 4);
    }
}
