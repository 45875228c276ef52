//! Update-pass counters for host telemetry.
//!
//! [`UpdateMetrics`] captures what the incremental traversal actually
//! did, letting an embedding host confirm that dirty tracking is
//! suppressing redundant work.

use serde::{Deserialize, Serialize};

/// Counters accumulated across update passes.
///
/// All counters are cumulative since tree construction (or the last
/// [`reset`](UpdateMetrics::reset)). The tree populates them during
/// traversal; hosts read them between passes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMetrics {
    /// Number of update passes started.
    pub passes: u64,
    /// Nodes created in the arena.
    pub nodes_created: u64,
    /// Nodes visited and marked clean by the traversal.
    pub nodes_visited: u64,
    /// Nodes skipped because they were already clean and the pass was
    /// not forced.
    pub nodes_skipped: u64,
    /// Pre- and post-update hooks invoked.
    pub hooks_fired: u64,
}

impl UpdateMetrics {
    /// Zero all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
