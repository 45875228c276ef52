//! Standard kind library and document facade.
//!
//! This crate is the concrete layer over the Sylva framework: the
//! [`standard_kinds`] registry (simple values, measures with unit
//! tables, resources, and the composite model kinds), and the
//! [`Document`] facade wiring a tree over that registry with the
//! collaborator lookups a host needs — most notably resolving a
//! presence's space by name through the enclosing root.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod document;
pub mod error;
pub mod registry;

pub use document::Document;
pub use error::ModelError;
pub use registry::standard_kinds;
