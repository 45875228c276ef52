//! Sylva: a reflective node-tree framework.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Sylva sub-crates. For most users, adding `sylva` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use sylva::prelude::*;
//! use serde_json::json;
//!
//! // Declare a vocabulary: kinds are registered leaves-first.
//! let mut kinds = KindTable::new();
//! kinds.register(KindDef::with_payload("string", PayloadSpec::Text)).unwrap();
//! kinds
//!     .register(KindDef::branch("widget").child("label", "string"))
//!     .unwrap();
//! kinds.register(KindDef::branch("root")).unwrap();
//!
//! // Grow a tree and assign a leaf.
//! let mut tree = Tree::new(kinds, "root").unwrap();
//! let widget = tree.create(tree.root(), "widget", Some("w"), None).unwrap();
//! let label = tree.child_by_name(widget, "label").unwrap();
//! tree.set_text(label, "hello");
//!
//! // Mutations dirty the path to the root; an update pass settles it.
//! assert!(!tree.is_updated(tree.root()));
//! tree.update(0.016);
//! assert!(tree.is_updated(tree.root()));
//!
//! // The whole tree maps losslessly to a generic JSON value.
//! assert_eq!(tree.serialize(tree.root()), json!({ "w": { "label": "hello" } }));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for items not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `sylva-core` | IDs, errors, payloads, kinds, the value boundary |
//! | [`tree`] | `sylva-tree` | The arena tree, hooks, views, config, metrics |
//! | [`model`] | `sylva-model` | Standard kind registry and the document facade |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, errors, and the kind table (`sylva-core`).
pub use sylva_core as types;

/// The arena node tree (`sylva-tree`).
pub use sylva_tree as tree;

/// Standard kinds and the document facade (`sylva-model`).
pub use sylva_model as model;

/// The most commonly used items, re-exported flat.
pub mod prelude {
    pub use sylva_core::{
        HookId, KindDef, KindError, KindId, KindTable, NodeId, Payload, PayloadSpec, TreeError,
        Unit, Value,
    };
    pub use sylva_model::{standard_kinds, Document, ModelError};
    pub use sylva_tree::{
        HookStage, NodeRef, SerializeMode, Tree, TreeConfig, UpdateContext, UpdateMetrics,
    };
}
