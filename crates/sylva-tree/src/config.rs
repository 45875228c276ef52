//! Tree configuration parameters.

use serde::{Deserialize, Serialize};

/// Configuration for a tree arena.
///
/// Validated implicitly — every value is usable; the parameters only
/// tune allocation behavior. Immutable after tree construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Initial arena capacity in nodes.
    ///
    /// Default: 64. Trees grow past this transparently; the capacity
    /// only avoids early reallocation for documents of known size.
    pub node_capacity: usize,
}

impl TreeConfig {
    /// Default initial arena capacity.
    pub const DEFAULT_NODE_CAPACITY: usize = 64;

    /// Create a config with the given initial node capacity.
    pub fn new(node_capacity: usize) -> Self {
        Self { node_capacity }
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NODE_CAPACITY)
    }
}
