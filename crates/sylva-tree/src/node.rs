//! The arena node record.

use smallvec::SmallVec;
use sylva_core::{KindId, NodeId, Payload};

use crate::hook::UpdateHook;

/// Child-id storage; inline up to four children, spilling to the heap
/// for wider nodes.
pub(crate) type ChildIds = SmallVec<[NodeId; 4]>;

/// One node's slot in the arena.
///
/// The `children` list is the only ownership edge; `parent` is a plain
/// back-index. `name` doubles as the node's serialization key and is
/// unique among siblings (enforced at construction).
pub(crate) struct NodeRecord {
    pub(crate) name: Option<String>,
    pub(crate) kind: Option<KindId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: ChildIds,
    pub(crate) payload: Payload,
    pub(crate) updated: bool,
    pub(crate) pre_hooks: Vec<UpdateHook>,
    pub(crate) post_hooks: Vec<UpdateHook>,
}

impl NodeRecord {
    pub(crate) fn new(
        name: Option<String>,
        kind: Option<KindId>,
        parent: Option<NodeId>,
        payload: Payload,
    ) -> Self {
        Self {
            name,
            kind,
            parent,
            children: ChildIds::new(),
            payload,
            // A fresh node has by definition not been incorporated into
            // any update pass yet.
            updated: false,
            pre_hooks: Vec::new(),
            post_hooks: Vec::new(),
        }
    }
}
