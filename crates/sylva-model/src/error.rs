//! Model-layer errors.
//!
//! Unlike the tolerant tree core, the model layer is strict at its
//! reference boundaries: a presence naming a space that does not exist
//! is a real error the host must see, not data to be shrugged off.

use std::error::Error;
use std::fmt;

use sylva_core::NodeId;

/// Errors from model-level lookups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelError {
    /// The node handed to a presence operation is not a presence.
    NotAPresence {
        /// The offending node.
        node: NodeId,
    },
    /// The presence has no enclosing root to resolve references
    /// against.
    NoEnclosingRoot {
        /// The presence node.
        node: NodeId,
    },
    /// The presence does not reference any space.
    SpaceUnset,
    /// The referenced space is not registered in the root's spaces.
    SpaceNotFound {
        /// The unresolved space name.
        name: String,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAPresence { node } => write!(f, "node {node} is not a presence"),
            Self::NoEnclosingRoot { node } => {
                write!(f, "node {node} has no enclosing root")
            }
            Self::SpaceUnset => write!(f, "presence references no space"),
            Self::SpaceNotFound { name } => write!(f, "space '{name}' not found"),
        }
    }
}

impl Error for ModelError {}
