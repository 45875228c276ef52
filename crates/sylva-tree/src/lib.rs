//! Arena-backed reflective node tree.
//!
//! This crate implements the structural heart of Sylva: a [`Tree`]
//! arena holding every node of a document by stable index, with
//! upward-propagating dirty flags, a synchronous pre-order update
//! traversal with per-node hooks, and tolerant bidirectional mapping
//! between the tree and a generic JSON value.
//!
//! # Ownership model
//!
//! The only ownership edges are the parent→children index lists inside
//! the arena. Parent back-references and the node→kind association are
//! plain indices with no lifetime of their own, so the pointer-cycle
//! hazards of a direct parent/child object graph cannot arise. Nodes
//! are never removed; a subtree's lifetime is the tree's lifetime.
//!
//! # Threading
//!
//! The tree is single-threaded by design: `update`, `serialize`, and
//! `deserialize` are ordinary synchronous calls, and no locking
//! discipline guards the dirty flags. Embedders in threaded hosts must
//! serialize access externally.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod access;
pub mod config;
pub mod deserialize;
pub mod hook;
pub mod metrics;
pub mod serialize;
pub mod set;
pub mod tree;
pub mod update;
pub mod view;

mod node;

pub use config::TreeConfig;
pub use hook::{HookStage, UpdateContext, UpdateHook};
pub use metrics::UpdateMetrics;
pub use serialize::SerializeMode;
pub use tree::Tree;
pub use view::NodeRef;
