//! Set operations: named, ordered, homogeneous collections.
//!
//! A set is a node whose `Set` payload declares the kind of its
//! elements. Unlike declared children, set elements are created
//! dynamically — by [`Tree::add_element`] or by deserializing data
//! that mentions names the set does not have yet. Element reads go
//! through the ordinary child accessors ([`Tree::child_by_name`],
//! [`Tree::child_at`], [`Tree::children`]); a set adds nothing to the
//! read path.

use sylva_core::{KindId, NodeId, Payload, TreeError, Value};

use crate::tree::Tree;

impl Tree {
    /// The element kind a set node declares, or `None` for non-sets.
    pub fn element_kind(&self, id: NodeId) -> Option<KindId> {
        match self.payload(id) {
            Payload::Set { element } => Some(*element),
            _ => None,
        }
    }

    /// Construct a new element of the set's declared kind, append it,
    /// and deserialize `data` into it.
    ///
    /// The element's name is taken from `name`, falling back to a
    /// `"name"` entry in `data`; unnamed elements are allowed but
    /// cannot be addressed by name or serialized as mapping keys.
    /// Named elements must be unique within the set.
    pub fn add_element(
        &mut self,
        set: NodeId,
        name: Option<&str>,
        data: Option<&Value>,
    ) -> Result<NodeId, TreeError> {
        let element = self
            .element_kind(set)
            .ok_or(TreeError::NotASet { node: set })?;
        let from_data = match name {
            Some(_) => None,
            None => data
                .and_then(|d| d.get("name"))
                .and_then(Value::as_str)
                .map(str::to_owned),
        };
        let name = name.or(from_data.as_deref());
        let id = self.instantiate(element, name, Some(set))?;
        if let Some(data) = data {
            self.deserialize(id, data);
        }
        Ok(id)
    }
}
