//! Error types for the Sylva framework.
//!
//! Errors are reserved for construction-time invariant violations:
//! registering a malformed kind, or structurally invalid node creation.
//! Malformed *data* is never an error — the (de)serialization layer is
//! tolerant by contract and silently truncates or ignores what it cannot
//! interpret.

use std::error::Error;
use std::fmt;

/// Errors from kind registration in a [`KindTable`](crate::KindTable).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KindError {
    /// A kind with this name is already registered.
    DuplicateKind {
        /// Name of the colliding kind.
        name: String,
    },
    /// The declared parent kind has not been registered yet.
    ///
    /// Parents must be registered before their children; this ordering
    /// is what keeps the is-a chain acyclic.
    UnknownParent {
        /// The kind being registered.
        kind: String,
        /// The missing parent name.
        parent: String,
    },
    /// A declared child references a kind that has not been registered.
    UnknownChildKind {
        /// The kind being registered.
        kind: String,
        /// The child field name.
        child: String,
        /// The missing child kind name.
        child_kind: String,
    },
    /// The declared set element kind has not been registered.
    UnknownElementKind {
        /// The kind being registered.
        kind: String,
        /// The missing element kind name.
        element: String,
    },
    /// Two declared children share the same field name.
    DuplicateChild {
        /// The kind being registered.
        kind: String,
        /// The colliding field name.
        child: String,
    },
}

impl fmt::Display for KindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKind { name } => {
                write!(f, "kind '{name}' is already registered")
            }
            Self::UnknownParent { kind, parent } => {
                write!(f, "kind '{kind}' declares unregistered parent '{parent}'")
            }
            Self::UnknownChildKind {
                kind,
                child,
                child_kind,
            } => {
                write!(
                    f,
                    "kind '{kind}' child '{child}' references unregistered kind '{child_kind}'"
                )
            }
            Self::UnknownElementKind { kind, element } => {
                write!(
                    f,
                    "kind '{kind}' declares unregistered set element kind '{element}'"
                )
            }
            Self::DuplicateChild { kind, child } => {
                write!(f, "kind '{kind}' declares child '{child}' twice")
            }
        }
    }
}

impl Error for KindError {}

/// Errors from node construction in a tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// The requested kind name is not present in the tree's kind table.
    UnknownKind {
        /// The unresolved kind name.
        name: String,
    },
    /// A sibling with the same name already exists under the parent.
    ///
    /// Node names double as serialization keys, so duplicates would
    /// silently shadow each other; construction rejects them instead.
    DuplicateSiblingName {
        /// Name of the parent node, if it has one.
        parent: Option<String>,
        /// The colliding node name.
        name: String,
    },
    /// An element operation was applied to a node that is not a set.
    NotASet {
        /// The offending node.
        node: crate::NodeId,
    },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind { name } => write!(f, "unknown kind '{name}'"),
            Self::DuplicateSiblingName { parent, name } => match parent {
                Some(parent) => {
                    write!(f, "node '{parent}' already has a child named '{name}'")
                }
                None => write!(f, "a sibling named '{name}' already exists"),
            },
            Self::NotASet { node } => write!(f, "node {node} is not a set"),
        }
    }
}

impl Error for TreeError {}
