//! Strongly-typed identifiers for nodes, kinds, and update hooks.

use std::fmt;

/// Identifies a node within a tree arena.
///
/// Nodes are appended to the arena at construction and assigned
/// sequential IDs. `NodeId(n)` corresponds to the n-th node created in
/// the tree. IDs are only minted by the tree that owns the node; passing
/// an ID from a different tree is a programmer error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The arena slot this ID refers to.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a kind (reflected type) within a [`KindTable`](crate::KindTable).
///
/// Kinds are registered in dependency order; a kind's parent always has
/// a smaller ID than the kind itself, which makes the is-a chain
/// structurally acyclic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KindId(pub u32);

impl KindId {
    /// The table slot this ID refers to.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for KindId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a registered update hook within one node's hook list.
///
/// Hooks are never removed, so the ID is stable for the lifetime of the
/// tree. IDs are scoped to a single node and stage: two hooks on
/// different nodes may carry the same `HookId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookId(pub u32);

impl fmt::Display for HookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for HookId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
