//! The incremental update traversal.
//!
//! An external driver periodically calls [`Tree::update`] on the root
//! (or [`Tree::update_node`] on any subtree). The traversal is a
//! synchronous depth-first pre-order walk: a stale node fires its
//! pre-update hooks, is marked clean, visits its children left to
//! right in construction order, then fires its post-update hooks.
//! Because the node is marked clean *before* its children run, a
//! child's hook may re-dirty the node without being overwritten.
//!
//! There is no partial-update rollback: if a hook panics, flags are
//! left exactly as far as the traversal had progressed.

use sylva_core::{NodeId, Value};

use crate::hook::{HookStage, UpdateContext};
use crate::tree::Tree;

impl Tree {
    /// Run an unforced update pass over the whole tree.
    pub fn update(&mut self, dt: f64) {
        self.update_node(self.root(), dt, false, None);
    }

    /// Run an update pass over the subtree rooted at `id`.
    ///
    /// When the node is already clean and `forced` is false this is a
    /// no-op. A forced pass visits every descendant regardless of
    /// flags. `data` is forwarded unchanged to every hook invocation
    /// in the pass.
    pub fn update_node(&mut self, id: NodeId, dt: f64, forced: bool, data: Option<&Value>) {
        self.metrics.passes += 1;
        let ctx = UpdateContext { dt, forced, data };
        self.update_subtree(id, &ctx);
    }

    fn update_subtree(&mut self, id: NodeId, ctx: &UpdateContext<'_>) {
        if self.nodes[id.index()].updated && !ctx.forced {
            self.metrics.nodes_skipped += 1;
            return;
        }
        self.fire_hooks(id, HookStage::Pre, ctx);
        self.nodes[id.index()].updated = true;
        self.metrics.nodes_visited += 1;
        let children = self.nodes[id.index()].children.clone();
        for child in children {
            self.update_subtree(child, ctx);
        }
        self.fire_hooks(id, HookStage::Post, ctx);
    }

    /// Invoke one node's hook list for a stage, in registration order.
    ///
    /// The list is detached while firing so hooks can take `&mut Tree`;
    /// hooks registered on this node during the invocation are spliced
    /// back in after the detached list, preserving registration order.
    fn fire_hooks(&mut self, id: NodeId, stage: HookStage, ctx: &UpdateContext<'_>) {
        let slot = match stage {
            HookStage::Pre => &mut self.nodes[id.index()].pre_hooks,
            HookStage::Post => &mut self.nodes[id.index()].post_hooks,
        };
        if slot.is_empty() {
            return;
        }
        let mut hooks = std::mem::take(slot);
        for hook in hooks.iter_mut() {
            hook(self, id, ctx);
            self.metrics.hooks_fired += 1;
        }
        let slot = match stage {
            HookStage::Pre => &mut self.nodes[id.index()].pre_hooks,
            HookStage::Post => &mut self.nodes[id.index()].post_hooks,
        };
        let registered_while_firing = std::mem::replace(slot, hooks);
        slot.extend(registered_while_firing);
    }
}
