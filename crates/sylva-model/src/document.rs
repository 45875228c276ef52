//! The document facade.
//!
//! A [`Document`] is a tree over the standard registry rooted at the
//! `root` kind, with conveniences for the three top-level collections
//! and the presence→space reference lookup collaborators rely on.

use std::fmt;

use sylva_core::{NodeId, TreeError, Value};
use sylva_tree::{SerializeMode, Tree};

use crate::error::ModelError;
use crate::registry::standard_kinds;

/// A document: spaces, presences, and assemblies under one root.
pub struct Document {
    tree: Tree,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        let tree = Tree::new(standard_kinds(), "root")
            .expect("the standard registry declares the root kind");
        Self { tree }
    }

    /// Create a document and deserialize `data` into it.
    pub fn from_value(data: &Value) -> Self {
        let mut doc = Self::new();
        let root = doc.tree.root();
        doc.tree.deserialize(root, data);
        doc
    }

    /// The underlying tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Mutable access to the underlying tree.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// The `spaces` collection.
    pub fn spaces(&self) -> NodeId {
        self.top_level("spaces")
    }

    /// The `presences` collection.
    pub fn presences(&self) -> NodeId {
        self.top_level("presences")
    }

    /// The `assemblies` collection.
    pub fn assemblies(&self) -> NodeId {
        self.top_level("assemblies")
    }

    fn top_level(&self, name: &str) -> NodeId {
        self.tree
            .child_by_name(self.tree.root(), name)
            .expect("the root kind declares its collections")
    }

    /// Add a named space, deserializing `data` into it when given.
    pub fn add_space(&mut self, name: &str, data: Option<&Value>) -> Result<NodeId, TreeError> {
        let spaces = self.spaces();
        self.tree.add_element(spaces, Some(name), data)
    }

    /// Add a named presence, deserializing `data` into it when given.
    pub fn add_presence(&mut self, name: &str, data: Option<&Value>) -> Result<NodeId, TreeError> {
        let presences = self.presences();
        self.tree.add_element(presences, Some(name), data)
    }

    /// Add a named assembly, deserializing `data` into it when given.
    pub fn add_assembly(&mut self, name: &str, data: Option<&Value>) -> Result<NodeId, TreeError> {
        let assemblies = self.assemblies();
        self.tree.add_element(assemblies, Some(name), data)
    }

    /// Run an unforced update pass over the document.
    pub fn update(&mut self, dt: f64) {
        self.tree.update(dt);
    }

    /// Serialize the whole document.
    pub fn serialize(&self, mode: SerializeMode) -> Value {
        self.tree.serialize_mode(self.tree.root(), mode)
    }

    /// Deserialize `data` into the document.
    pub fn deserialize(&mut self, data: &Value) {
        let root = self.tree.root();
        self.tree.deserialize(root, data);
    }

    /// Resolve the space a presence references by name.
    ///
    /// Walks up from the presence to its enclosing root, then looks
    /// the referenced name up in the root's spaces. This is the strict
    /// boundary over the tolerant core: a dangling reference is an
    /// error the host must handle.
    pub fn resolve_presence_space(&self, presence: NodeId) -> Result<NodeId, ModelError> {
        if !self.tree.is(presence, "presence") {
            return Err(ModelError::NotAPresence { node: presence });
        }
        let name = self
            .tree
            .child_by_name(presence, "space")
            .and_then(|link| self.tree.link(link))
            .ok_or(ModelError::SpaceUnset)?;
        let root = self
            .tree
            .ancestor_of_kind(presence, "root")
            .ok_or(ModelError::NoEnclosingRoot { node: presence })?;
        let spaces = self
            .tree
            .child_by_name(root, "spaces")
            .ok_or(ModelError::NoEnclosingRoot { node: presence })?;
        self.tree
            .child_by_name(spaces, name)
            .ok_or_else(|| ModelError::SpaceNotFound {
                name: name.to_owned(),
            })
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Document {
    /// The JSON text of the document's default-mode serialization.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.serialize(SerializeMode::Full))
    }
}
