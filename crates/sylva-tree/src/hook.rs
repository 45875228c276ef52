//! Update hooks: per-node callback lists fired around the traversal.
//!
//! Each node carries two ordered lists of hooks — pre-update and
//! post-update — invoked synchronously in registration order. Hooks
//! receive mutable access to the whole tree, so a hook may re-dirty
//! ancestors, assign leaf values, or register further hooks; hooks
//! registered on a node while that node's list is firing join the list
//! after the current invocation completes.

use sylva_core::{NodeId, Value};

use crate::tree::Tree;

/// Which side of a node's update the hook fires on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookStage {
    /// Before the node is marked clean and its children are visited.
    Pre,
    /// After every child has been updated.
    Post,
}

/// Per-pass data handed to every hook invocation.
///
/// The same context flows unchanged through the whole traversal: the
/// timestep, whether the pass ignores clean flags, and the optional
/// caller-supplied payload.
#[derive(Clone, Copy, Debug)]
pub struct UpdateContext<'a> {
    /// Timestep forwarded by the driving host, in seconds.
    pub dt: f64,
    /// Whether the pass visits clean nodes too.
    pub forced: bool,
    /// Optional pass payload supplied by the caller.
    pub data: Option<&'a Value>,
}

/// A registered update callback.
///
/// Hooks are plain boxed closures — no trait object hierarchy — kept
/// in per-node lists and invoked in registration order. The tree is
/// not `Send`, so hooks carry no threading bound.
pub type UpdateHook = Box<dyn FnMut(&mut Tree, NodeId, &UpdateContext<'_>)>;
