//! Read-only node views.
//!
//! [`NodeRef`] borrows a tree and wraps one node, giving the typed
//! facade over the arena: reflection, structural navigation, leaf
//! reads, and serialization, all delegating to the tree without
//! adding semantics.

use std::fmt;

use sylva_core::{NodeId, Payload, Value};

use crate::serialize::SerializeMode;
use crate::tree::Tree;

/// A read-only view of one node in a tree.
///
/// Cheap to copy; holds the tree borrow for its lifetime.
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t Tree,
    id: NodeId,
}

impl<'t> NodeRef<'t> {
    pub(crate) fn new(tree: &'t Tree, id: NodeId) -> Self {
        Self { tree, id }
    }

    /// The node's ID in the arena.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's name, if it has one.
    pub fn name(&self) -> Option<&'t str> {
        self.tree.name(self.id)
    }

    /// The node's kind name, if it has one.
    pub fn kind_name(&self) -> Option<&'t str> {
        self.tree.kind_name(self.id)
    }

    /// Whether the node reflects the named kind (directly or through
    /// its kind's is-a chain).
    pub fn is(&self, kind_name: &str) -> bool {
        self.tree.is(self.id, kind_name)
    }

    /// Whether the node has been incorporated into the latest update
    /// pass.
    pub fn updated(&self) -> bool {
        self.tree.is_updated(self.id)
    }

    /// The node's payload.
    pub fn payload(&self) -> &'t Payload {
        self.tree.payload(self.id)
    }

    /// The parent node.
    pub fn parent(&self) -> Option<NodeRef<'t>> {
        self.tree.parent(self.id).map(|p| NodeRef::new(self.tree, p))
    }

    /// The children, in construction order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'t>> + '_ {
        self.tree
            .children(self.id)
            .iter()
            .map(|&c| NodeRef::new(self.tree, c))
    }

    /// Find a child by name.
    pub fn child(&self, name: &str) -> Option<NodeRef<'t>> {
        self.tree
            .child_by_name(self.id, name)
            .map(|c| NodeRef::new(self.tree, c))
    }

    /// The nearest ancestor matching the given kind and/or name.
    pub fn ancestor(&self, kind: Option<&str>, name: Option<&str>) -> Option<NodeRef<'t>> {
        self.tree
            .ancestor(self.id, kind, name)
            .map(|a| NodeRef::new(self.tree, a))
    }

    /// The node's text, when it is a text leaf with a value.
    pub fn text(&self) -> Option<&'t str> {
        self.tree.text(self.id)
    }

    /// The node's number, when it is a numeric leaf with a value.
    pub fn number(&self) -> Option<f64> {
        self.tree.number(self.id)
    }

    /// The node's flag, when it is a boolean leaf with a value.
    pub fn flag(&self) -> Option<bool> {
        self.tree.flag(self.id)
    }

    /// Serialize the subtree in [`SerializeMode::Full`].
    pub fn serialize(&self) -> Value {
        self.tree.serialize(self.id)
    }

    /// Serialize the subtree.
    pub fn serialize_mode(&self, mode: SerializeMode) -> Value {
        self.tree.serialize_mode(self.id, mode)
    }
}

impl fmt::Display for NodeRef<'_> {
    /// The canonical string form: the JSON text of the default-mode
    /// serialization.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.serialize())
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("kind", &self.kind_name())
            .finish()
    }
}

impl Tree {
    /// A read-only view of the given node.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef::new(self, id)
    }
}
