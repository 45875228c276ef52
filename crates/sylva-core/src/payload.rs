//! Node payload variants.
//!
//! A node's payload is the typed data it carries between structural
//! edges. The closed set of variants, together with the kind table's
//! parent links, replaces a runtime class hierarchy: a "distance" and a
//! "time" are both `Measure` payloads whose kinds descend from
//! `measure`.

use crate::id::KindId;

/// Payload declaration used when registering a kind.
///
/// Set elements are declared by kind *name*; the table resolves the
/// name to a [`KindId`] at registration time, which forces element
/// kinds to be registered before the collections that contain them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PayloadSpec {
    /// A pure composite: data lives in declared children.
    Branch,
    /// A text leaf.
    Text,
    /// A numeric leaf.
    Number,
    /// A boolean leaf.
    Flag,
    /// A numeric leaf with a unit drawn from the kind's unit table.
    Measure,
    /// A by-name reference to another node, resolved by collaborators.
    Link,
    /// A homogeneous ordered collection of child nodes.
    Set {
        /// Kind name of the elements.
        element: String,
    },
}

/// The typed data a node carries.
///
/// Leaf variants start unset (`None`) and serialize to null until a
/// value is assigned. `Measure` tracks the index of its current unit in
/// the kind's unit table; index 0 is the default unit.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// A pure composite: data lives in declared children.
    Branch,
    /// A text leaf.
    Text(Option<String>),
    /// A numeric leaf.
    Number(Option<f64>),
    /// A boolean leaf.
    Flag(Option<bool>),
    /// A numeric leaf expressed in one of the kind's units.
    Measure {
        /// Magnitude in the current unit, if set.
        value: Option<f64>,
        /// Index into the kind's unit table.
        unit: usize,
    },
    /// A by-name reference to another node.
    Link(Option<String>),
    /// A homogeneous ordered collection.
    Set {
        /// Resolved kind of the elements.
        element: KindId,
    },
}

impl Payload {
    /// Whether this payload is a scalar leaf (carries its own value
    /// rather than delegating to children).
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Self::Branch | Self::Set { .. })
    }

    /// Whether this payload is a set collection.
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set { .. })
    }
}
