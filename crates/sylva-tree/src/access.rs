//! Typed access to leaf payloads.
//!
//! Getters return `None` when the node holds a different payload.
//! Setters are change-detecting: assigning the value a leaf already
//! holds does nothing, while a real change stores the value and forces
//! the dirty state upward. Setters report whether anything changed and
//! silently ignore payload mismatches, in line with the tolerant data
//! policy.

use sylva_core::{NodeId, Payload, Unit};

use crate::tree::Tree;

impl Tree {
    /// The node's text, when it is a text leaf with a value.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.payload(id) {
            Payload::Text(v) => v.as_deref(),
            _ => None,
        }
    }

    /// Assign a text leaf.
    pub fn set_text(&mut self, id: NodeId, value: impl Into<String>) -> bool {
        let value = value.into();
        match &mut self.nodes[id.index()].payload {
            Payload::Text(slot) if slot.as_ref() != Some(&value) => {
                *slot = Some(value);
                self.invalidate(id);
                true
            }
            _ => false,
        }
    }

    /// The node's number, when it is a numeric leaf with a value.
    pub fn number(&self, id: NodeId) -> Option<f64> {
        match self.payload(id) {
            Payload::Number(v) => *v,
            _ => None,
        }
    }

    /// Assign a numeric leaf.
    pub fn set_number(&mut self, id: NodeId, value: f64) -> bool {
        match &mut self.nodes[id.index()].payload {
            Payload::Number(slot) if *slot != Some(value) => {
                *slot = Some(value);
                self.invalidate(id);
                true
            }
            _ => false,
        }
    }

    /// The node's flag, when it is a boolean leaf with a value.
    pub fn flag(&self, id: NodeId) -> Option<bool> {
        match self.payload(id) {
            Payload::Flag(v) => *v,
            _ => None,
        }
    }

    /// Assign a boolean leaf.
    pub fn set_flag(&mut self, id: NodeId, value: bool) -> bool {
        match &mut self.nodes[id.index()].payload {
            Payload::Flag(slot) if *slot != Some(value) => {
                *slot = Some(value);
                self.invalidate(id);
                true
            }
            _ => false,
        }
    }

    /// The referenced name, when the node is a link leaf with a value.
    pub fn link(&self, id: NodeId) -> Option<&str> {
        match self.payload(id) {
            Payload::Link(v) => v.as_deref(),
            _ => None,
        }
    }

    /// Assign a link leaf.
    pub fn set_link(&mut self, id: NodeId, target: impl Into<String>) -> bool {
        let target = target.into();
        match &mut self.nodes[id.index()].payload {
            Payload::Link(slot) if slot.as_ref() != Some(&target) => {
                *slot = Some(target);
                self.invalidate(id);
                true
            }
            _ => false,
        }
    }

    /// The measure's magnitude in its current unit.
    pub fn measure_value(&self, id: NodeId) -> Option<f64> {
        match self.payload(id) {
            Payload::Measure { value, .. } => *value,
            _ => None,
        }
    }

    /// Assign a measure's magnitude, leaving its unit unchanged.
    pub fn set_measure_value(&mut self, id: NodeId, value: f64) -> bool {
        match &mut self.nodes[id.index()].payload {
            Payload::Measure { value: slot, .. } if *slot != Some(value) => {
                *slot = Some(value);
                self.invalidate(id);
                true
            }
            _ => false,
        }
    }

    /// The measure's current unit, when its kind declares a unit table.
    pub fn measure_unit(&self, id: NodeId) -> Option<&Unit> {
        let unit = match self.payload(id) {
            Payload::Measure { unit, .. } => *unit,
            _ => return None,
        };
        let kind = self.kind_of(id)?;
        self.kinds.record(kind).units.get(unit)
    }

    /// Switch a measure to the unit matching `unit` (name or
    /// abbreviation). Unknown units leave the node untouched.
    ///
    /// The magnitude is not converted; the unit qualifies how the
    /// stored number reads.
    pub fn set_measure_unit(&mut self, id: NodeId, unit: &str) -> bool {
        let Some(kind) = self.kind_of(id) else {
            return false;
        };
        let Some(index) = self.kinds.record(kind).unit_index(unit) else {
            return false;
        };
        match &mut self.nodes[id.index()].payload {
            Payload::Measure { unit: slot, .. } if *slot != index => {
                *slot = index;
                self.invalidate(id);
                true
            }
            _ => false,
        }
    }

    /// The measure's magnitude converted to its base unit.
    ///
    /// A measure without a unit table reads back unconverted.
    pub fn measure_base_value(&self, id: NodeId) -> Option<f64> {
        let value = self.measure_value(id)?;
        let factor = self.measure_unit(id).map_or(1.0, |u| u.factor);
        Some(value * factor)
    }
}
