//! The tree arena: node storage, structural queries, and dirty flags.
//!
//! # Architecture
//!
//! All nodes live in one `Vec` indexed by [`NodeId`]. Slots are never
//! freed — there is no detach operation, so IDs stay valid for the
//! tree's lifetime and the arena needs no generation counters. The
//! kind table travels with the tree; every structural operation that
//! needs reflection resolves through it.
//!
//! # Invariants
//!
//! - A child appears in exactly one parent's child list, appended at
//!   construction; the list order is canonical and never changes.
//! - Named siblings are unique; construction rejects duplicates.
//! - A node whose `updated` flag is false has only false ancestors,
//!   except transiently inside an update pass.

use std::fmt;

use sylva_core::{HookId, KindId, KindTable, NodeId, Payload, TreeError, Value};

use crate::config::TreeConfig;
use crate::hook::{HookStage, UpdateContext};
use crate::metrics::UpdateMetrics;
use crate::node::NodeRecord;

/// An arena-backed reflective node tree.
///
/// Created with a kind table and a root kind; grown by
/// [`create`](Tree::create) and the set operations; driven by
/// [`update`](crate::update) and the (de)serialization operations.
pub struct Tree {
    pub(crate) kinds: KindTable,
    pub(crate) nodes: Vec<NodeRecord>,
    pub(crate) metrics: UpdateMetrics,
    config: TreeConfig,
    root: NodeId,
}

impl Tree {
    /// Create a tree whose root is an instance of `root_kind`.
    ///
    /// The root node is unnamed; declared children of the root kind
    /// are instantiated immediately.
    pub fn new(kinds: KindTable, root_kind: &str) -> Result<Self, TreeError> {
        Self::with_config(kinds, root_kind, TreeConfig::default())
    }

    /// Create a tree with an explicit [`TreeConfig`].
    pub fn with_config(
        kinds: KindTable,
        root_kind: &str,
        config: TreeConfig,
    ) -> Result<Self, TreeError> {
        let root_id = kinds.id(root_kind).ok_or_else(|| TreeError::UnknownKind {
            name: root_kind.to_owned(),
        })?;
        let mut tree = Self {
            kinds,
            nodes: Vec::with_capacity(config.node_capacity),
            metrics: UpdateMetrics::default(),
            config,
            root: NodeId(0),
        };
        tree.root = tree.instantiate(root_id, None, None)?;
        Ok(tree)
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The tree's kind table.
    pub fn kinds(&self) -> &KindTable {
        &self.kinds
    }

    /// The tree's configuration.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Counters accumulated by construction and update passes.
    pub fn metrics(&self) -> &UpdateMetrics {
        &self.metrics
    }

    /// Zero the metrics counters.
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ── Construction ─────────────────────────────────────────────────

    /// Create a node of the named kind under `parent`.
    ///
    /// Declared children of the kind are instantiated recursively; the
    /// new subtree starts dirty and forces the dirty state upward
    /// through every ancestor. When `data` is given it is deserialized
    /// into the new node before returning.
    pub fn create(
        &mut self,
        parent: NodeId,
        kind: &str,
        name: Option<&str>,
        data: Option<&Value>,
    ) -> Result<NodeId, TreeError> {
        let kind_id = self.kinds.id(kind).ok_or_else(|| TreeError::UnknownKind {
            name: kind.to_owned(),
        })?;
        let id = self.instantiate(kind_id, name, Some(parent))?;
        if let Some(data) = data {
            self.deserialize(id, data);
        }
        Ok(id)
    }

    /// Create a kindless leaf holding the given payload.
    ///
    /// Kindless nodes reflect nothing: `is` returns false for every
    /// name. Useful for the most primitive ad-hoc values.
    pub fn create_leaf(
        &mut self,
        parent: NodeId,
        name: Option<&str>,
        payload: Payload,
    ) -> Result<NodeId, TreeError> {
        self.attach(None, name, Some(parent), payload)
    }

    /// Instantiate a kind: one node plus its declared children.
    pub(crate) fn instantiate(
        &mut self,
        kind: KindId,
        name: Option<&str>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, TreeError> {
        let record = self.kinds.record(kind);
        let payload = record.payload.clone();
        let declared = record.children.clone();
        let id = self.attach(Some(kind), name, parent, payload)?;
        for (child_name, child_kind) in declared {
            self.instantiate(child_kind, Some(&child_name), Some(id))?;
        }
        Ok(id)
    }

    /// Append one node record to the arena and link it to its parent.
    fn attach(
        &mut self,
        kind: Option<KindId>,
        name: Option<&str>,
        parent: Option<NodeId>,
        payload: Payload,
    ) -> Result<NodeId, TreeError> {
        if let (Some(parent), Some(name)) = (parent, name) {
            if self.child_by_name(parent, name).is_some() {
                return Err(TreeError::DuplicateSiblingName {
                    parent: self.nodes[parent.index()].name.clone(),
                    name: name.to_owned(),
                });
            }
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes
            .push(NodeRecord::new(name.map(str::to_owned), kind, parent, payload));
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        self.metrics.nodes_created += 1;
        // Object creation is itself a structural mutation: the fresh
        // node is dirty and every ancestor must be revisited.
        self.invalidate(id);
        Ok(id)
    }

    // ── Structural queries ───────────────────────────────────────────

    /// The node's name, if it has one.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.index()].name.as_deref()
    }

    /// The node's kind, if it has one.
    pub fn kind_of(&self, id: NodeId) -> Option<KindId> {
        self.nodes[id.index()].kind
    }

    /// The node's kind name, if it has one.
    pub fn kind_name(&self, id: NodeId) -> Option<&str> {
        self.kind_of(id).map(|k| self.kinds.record(k).name.as_str())
    }

    /// Whether the node reflects the named kind, directly or through
    /// its kind's is-a chain. A kindless node matches nothing.
    pub fn is(&self, id: NodeId, kind_name: &str) -> bool {
        match self.kind_of(id) {
            Some(kind) => self.kinds.is(kind, kind_name),
            None => false,
        }
    }

    /// The node's parent.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// The node's children, in construction order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Number of children.
    pub fn child_count(&self, id: NodeId) -> usize {
        self.nodes[id.index()].children.len()
    }

    /// Find a child by name (linear scan in child order).
    pub fn child_by_name(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.nodes[id.index()]
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child.index()].name.as_deref() == Some(name))
    }

    /// The child at the given position, if any.
    pub fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.nodes[id.index()].children.get(index).copied()
    }

    /// The node's payload.
    pub fn payload(&self, id: NodeId) -> &Payload {
        &self.nodes[id.index()].payload
    }

    /// Search strictly upward for the nearest ancestor matching the
    /// given kind and/or name.
    ///
    /// The node itself is never considered. With no criteria the
    /// search matches nothing. Returns the shallowest-hop match, or
    /// `None` when the root is reached without one.
    pub fn ancestor(
        &self,
        id: NodeId,
        kind: Option<&str>,
        name: Option<&str>,
    ) -> Option<NodeId> {
        if kind.is_none() && name.is_none() {
            return None;
        }
        let mut current = self.parent(id);
        while let Some(node) = current {
            let kind_ok = kind.map_or(true, |k| self.is(node, k));
            let name_ok = name.map_or(true, |n| self.name(node) == Some(n));
            if kind_ok && name_ok {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// [`ancestor`](Tree::ancestor) filtered by kind only — the common
    /// collaborator lookup.
    pub fn ancestor_of_kind(&self, id: NodeId, kind: &str) -> Option<NodeId> {
        self.ancestor(id, Some(kind), None)
    }

    // ── Dirty tracking ───────────────────────────────────────────────

    /// Whether the node has been incorporated into the latest update
    /// pass.
    pub fn is_updated(&self, id: NodeId) -> bool {
        self.nodes[id.index()].updated
    }

    /// Mark the node stale and force the stale state upward through
    /// every ancestor.
    ///
    /// Propagation is strictly upward and unconditional: intermediate
    /// flags may have been set clean mid-pass, so the walk never stops
    /// early.
    pub fn invalidate(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(node) = current {
            let record = &mut self.nodes[node.index()];
            record.updated = false;
            current = record.parent;
        }
    }

    /// Mark only this node clean. Never touches ancestors or
    /// descendants.
    pub fn mark_updated(&mut self, id: NodeId) {
        self.nodes[id.index()].updated = true;
    }

    // ── Hooks ────────────────────────────────────────────────────────

    /// Register an update hook on a node.
    ///
    /// Hooks fire synchronously in registration order, every time the
    /// traversal visits the node at the given stage. Hooks are never
    /// removed; the returned ID identifies the hook within this node
    /// and stage.
    pub fn register_hook(
        &mut self,
        id: NodeId,
        stage: HookStage,
        hook: impl FnMut(&mut Tree, NodeId, &UpdateContext<'_>) + 'static,
    ) -> HookId {
        let list = match stage {
            HookStage::Pre => &mut self.nodes[id.index()].pre_hooks,
            HookStage::Post => &mut self.nodes[id.index()].post_hooks,
        };
        list.push(Box::new(hook));
        HookId((list.len() - 1) as u32)
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("nodes", &self.nodes.len())
            .field("kinds", &self.kinds.len())
            .field("root", &self.root)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sylva_core::{KindDef, PayloadSpec};

    fn kinds() -> KindTable {
        let mut table = KindTable::new();
        table.register(KindDef::branch("object")).unwrap();
        table
            .register(KindDef::with_payload("number", PayloadSpec::Number))
            .unwrap();
        table
            .register(
                KindDef::branch("entity")
                    .parent("object")
                    .child("weight", "number"),
            )
            .unwrap();
        table.register(KindDef::branch("root")).unwrap();
        table
    }

    fn tree() -> Tree {
        Tree::new(kinds(), "root").unwrap()
    }

    #[test]
    fn unknown_root_kind_is_rejected() {
        let err = Tree::new(kinds(), "missing").unwrap_err();
        assert_eq!(
            err,
            TreeError::UnknownKind {
                name: "missing".into()
            }
        );
    }

    #[test]
    fn declared_children_are_instantiated_in_order() {
        let mut t = tree();
        let e = t.create(t.root(), "entity", Some("e"), None).unwrap();
        assert_eq!(t.child_count(e), 1);
        let weight = t.child_by_name(e, "weight").unwrap();
        assert_eq!(t.child_at(e, 0), Some(weight));
        assert_eq!(t.kind_name(weight), Some("number"));
    }

    #[test]
    fn fresh_nodes_start_dirty_and_dirty_their_ancestors() {
        let mut t = tree();
        t.update(0.0);
        assert!(t.is_updated(t.root()));
        let e = t.create(t.root(), "entity", Some("e"), None).unwrap();
        assert!(!t.is_updated(e));
        assert!(!t.is_updated(t.root()));
    }

    #[test]
    fn duplicate_sibling_names_are_rejected() {
        let mut t = tree();
        t.create(t.root(), "entity", Some("e"), None).unwrap();
        let err = t.create(t.root(), "entity", Some("e"), None).unwrap_err();
        assert!(matches!(err, TreeError::DuplicateSiblingName { .. }));
    }

    #[test]
    fn unnamed_siblings_may_repeat() {
        let mut t = tree();
        t.create(t.root(), "entity", None, None).unwrap();
        t.create(t.root(), "entity", None, None).unwrap();
        assert_eq!(t.child_count(t.root()), 2);
    }

    #[test]
    fn invalidate_reaches_every_ancestor() {
        let mut t = tree();
        let a = t.create(t.root(), "entity", Some("a"), None).unwrap();
        let b = t.child_by_name(a, "weight").unwrap();
        t.update(0.0);
        t.invalidate(b);
        assert!(!t.is_updated(b));
        assert!(!t.is_updated(a));
        assert!(!t.is_updated(t.root()));
    }

    #[test]
    fn mark_updated_touches_only_the_node() {
        let mut t = tree();
        let a = t.create(t.root(), "entity", Some("a"), None).unwrap();
        let b = t.child_by_name(a, "weight").unwrap();
        t.mark_updated(b);
        assert!(t.is_updated(b));
        assert!(!t.is_updated(a));
        assert!(!t.is_updated(t.root()));
    }

    #[test]
    fn ancestor_on_root_is_none() {
        let t = tree();
        assert_eq!(t.ancestor_of_kind(t.root(), "root"), None);
    }

    #[test]
    fn ancestor_finds_the_nearest_match() {
        let mut t = tree();
        let outer = t.create(t.root(), "entity", Some("outer"), None).unwrap();
        let inner = t.create(outer, "entity", Some("inner"), None).unwrap();
        let leaf = t.child_by_name(inner, "weight").unwrap();
        assert_eq!(t.ancestor_of_kind(leaf, "entity"), Some(inner));
        assert_eq!(t.ancestor_of_kind(leaf, "root"), Some(t.root()));
    }

    #[test]
    fn ancestor_matches_through_the_kind_chain() {
        let mut t = tree();
        let e = t.create(t.root(), "entity", Some("e"), None).unwrap();
        let leaf = t.child_by_name(e, "weight").unwrap();
        // "entity" descends from "object".
        assert_eq!(t.ancestor_of_kind(leaf, "object"), Some(e));
    }

    #[test]
    fn ancestor_filters_by_name() {
        let mut t = tree();
        let outer = t.create(t.root(), "entity", Some("outer"), None).unwrap();
        let inner = t.create(outer, "entity", Some("inner"), None).unwrap();
        let leaf = t.child_by_name(inner, "weight").unwrap();
        assert_eq!(t.ancestor(leaf, Some("entity"), Some("outer")), Some(outer));
        assert_eq!(t.ancestor(leaf, None, Some("outer")), Some(outer));
    }

    #[test]
    fn ancestor_without_criteria_matches_nothing() {
        let mut t = tree();
        let e = t.create(t.root(), "entity", Some("e"), None).unwrap();
        assert_eq!(t.ancestor(e, None, None), None);
    }

    #[test]
    fn kindless_leaves_reflect_nothing() {
        let mut t = tree();
        let leaf = t
            .create_leaf(t.root(), Some("raw"), Payload::Text(None))
            .unwrap();
        assert!(!t.is(leaf, "object"));
        assert_eq!(t.kind_name(leaf), None);
    }

    proptest! {
        /// Invalidating any node in a linear chain dirties the whole
        /// ancestor path, and only that path.
        #[test]
        fn invalidate_closure_over_chains(depth in 1usize..12, target in 0usize..12) {
            let target = target.min(depth - 1);
            let mut t = tree();
            let mut chain = vec![t.root()];
            for i in 0..depth {
                let name = format!("n{i}");
                let id = t.create(*chain.last().unwrap(), "object", Some(&name), None).unwrap();
                chain.push(id);
            }
            // A sibling off the root to check it stays clean.
            let side = t.create(t.root(), "object", Some("side"), None).unwrap();
            t.update(0.0);
            prop_assert!(chain.iter().all(|&id| t.is_updated(id)));

            t.invalidate(chain[target + 1]);
            for (i, &id) in chain.iter().enumerate() {
                prop_assert_eq!(t.is_updated(id), i > target + 1);
            }
            prop_assert!(t.is_updated(side));
        }
    }
}
