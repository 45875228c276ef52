//! Tree → generic value serialization.
//!
//! A composite node serializes to a mapping from child name to the
//! child's own recursively serialized value, built in child order.
//! Nameless children have no key in the object-producing direction and
//! are skipped. Leaf payloads serialize to their scalar, or null while
//! unset.

use sylva_core::value;
use sylva_core::{NodeId, Payload, Value};

use crate::node::NodeRecord;
use crate::tree::Tree;

/// Serialization mode.
///
/// `Full` (the default) writes an entry for every named child, unset
/// leaves included. `Simple` omits entries whose value is empty —
/// null, or a hollow mapping/sequence — yielding a sparse output that
/// contains only meaningfully-set data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SerializeMode {
    /// Every named child appears, unset values as null.
    #[default]
    Full,
    /// Entries with empty values are omitted.
    Simple,
}

impl Tree {
    /// Serialize the subtree rooted at `id` in [`SerializeMode::Full`].
    pub fn serialize(&self, id: NodeId) -> Value {
        self.serialize_mode(id, SerializeMode::Full)
    }

    /// Serialize the subtree rooted at `id`.
    pub fn serialize_mode(&self, id: NodeId, mode: SerializeMode) -> Value {
        let record = &self.nodes[id.index()];
        match &record.payload {
            Payload::Branch | Payload::Set { .. } => {
                let mut map = serde_json::Map::new();
                for &child in &record.children {
                    let Some(name) = self.nodes[child.index()].name.as_deref() else {
                        continue;
                    };
                    let entry = self.serialize_mode(child, mode);
                    if mode == SerializeMode::Simple && value::is_empty(&entry) {
                        continue;
                    }
                    map.insert(name.to_owned(), entry);
                }
                Value::Object(map)
            }
            Payload::Text(text) => text
                .as_deref()
                .map_or(Value::Null, |t| Value::String(t.to_owned())),
            Payload::Link(target) => target
                .as_deref()
                .map_or(Value::Null, |t| Value::String(t.to_owned())),
            Payload::Number(n) => n.map_or(Value::Null, value::number),
            Payload::Flag(b) => b.map_or(Value::Null, Value::Bool),
            Payload::Measure { value: v, unit } => self.serialize_measure(record, *v, *unit),
        }
    }

    /// The canonical string form: the JSON text of the default-mode
    /// serialization.
    pub fn to_json(&self, id: NodeId) -> String {
        self.serialize(id).to_string()
    }

    /// A measure in its default unit is a bare number; in any other
    /// unit it is a `"<magnitude> <abbreviation>"` string, so the unit
    /// survives a round trip.
    fn serialize_measure(&self, record: &NodeRecord, v: Option<f64>, unit: usize) -> Value {
        let Some(v) = v else {
            return Value::Null;
        };
        if unit == 0 {
            return value::number(v);
        }
        let abbrev = record
            .kind
            .map(|k| self.kinds.record(k))
            .and_then(|k| k.units.get(unit))
            .map(|u| u.abbreviations.first().unwrap_or(&u.name).clone());
        match abbrev {
            Some(abbrev) => Value::String(format!("{v} {abbrev}")),
            None => value::number(v),
        }
    }
}
