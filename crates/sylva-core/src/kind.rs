//! Kind definitions and the [`KindTable`] used for type reflection.
//!
//! A kind is the identity record of a reflected type: a name, an
//! optional parent kind (forming a single-inheritance is-a chain), an
//! alias map for vocabulary migration, a payload declaration, declared
//! children instantiated with every node of the kind, and an optional
//! unit table for measures.
//!
//! # Invariants
//!
//! - Kind names are unique within a table.
//! - A kind can only name an already-registered parent, so parent IDs
//!   are always smaller than child IDs and the chain is acyclic by
//!   construction.
//! - Records are immutable after registration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::KindError;
use crate::id::KindId;
use crate::payload::{Payload, PayloadSpec};

/// A measurement unit: a canonical name, accepted abbreviations, and
/// the factor converting a magnitude in this unit to the base unit.
///
/// The first unit in a kind's table is the default; its factor should
/// be 1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Canonical unit name, e.g. `"meters"`.
    pub name: String,
    /// Accepted short forms, e.g. `["m", "ms"]`.
    pub abbreviations: Vec<String>,
    /// Conversion factor to the base unit.
    pub factor: f64,
}

impl Unit {
    /// Create a unit from a name, its abbreviations, and a factor.
    pub fn new(name: &str, abbreviations: &[&str], factor: f64) -> Self {
        Self {
            name: name.to_owned(),
            abbreviations: abbreviations.iter().map(|s| (*s).to_owned()).collect(),
            factor,
        }
    }

    /// Whether `text` matches this unit's name or one of its
    /// abbreviations.
    pub fn matches(&self, text: &str) -> bool {
        self.name == text || self.abbreviations.iter().any(|a| a == text)
    }
}

/// A child field declared by a kind, instantiated with every node of
/// the kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildSpec {
    /// Field name; doubles as the serialization key.
    pub name: String,
    /// Kind name of the child, resolved at registration.
    pub kind: String,
}

/// Registration form of a kind.
///
/// Built with the constructor methods, then consumed by
/// [`KindTable::register`].
#[derive(Clone, Debug, PartialEq)]
pub struct KindDef {
    /// Kind name, unique within the table.
    pub name: String,
    /// Parent kind name, if any.
    pub parent: Option<String>,
    /// Alternate field-name vocabulary: alias → canonical name.
    pub aliases: Vec<(String, String)>,
    /// Payload declaration.
    pub payload: PayloadSpec,
    /// Declared children.
    pub children: Vec<ChildSpec>,
    /// Unit table for `Measure` payloads; first entry is the default.
    pub units: Vec<Unit>,
}

impl KindDef {
    /// A composite kind with no payload of its own.
    pub fn branch(name: &str) -> Self {
        Self::with_payload(name, PayloadSpec::Branch)
    }

    /// A leaf kind with the given payload.
    pub fn with_payload(name: &str, payload: PayloadSpec) -> Self {
        Self {
            name: name.to_owned(),
            parent: None,
            aliases: Vec::new(),
            payload,
            children: Vec::new(),
            units: Vec::new(),
        }
    }

    /// Declare the parent kind.
    pub fn parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_owned());
        self
    }

    /// Map an alternate field name to its canonical form.
    pub fn alias(mut self, alias: &str, canonical: &str) -> Self {
        self.aliases.push((alias.to_owned(), canonical.to_owned()));
        self
    }

    /// Declare a child field of the given kind.
    pub fn child(mut self, name: &str, kind: &str) -> Self {
        self.children.push(ChildSpec {
            name: name.to_owned(),
            kind: kind.to_owned(),
        });
        self
    }

    /// Declare a set child holding elements of the given kind.
    pub fn set(self, name: &str, element: &str) -> Self {
        // A set child is an anonymous single-purpose kind; the table
        // synthesizes it at registration under "<kind>.<name>".
        self.child(name, &format!("[{element}]"))
    }

    /// Attach a unit table (for `Measure` payloads).
    pub fn units(mut self, units: Vec<Unit>) -> Self {
        self.units = units;
        self
    }
}

/// A resolved, immutable kind record stored in the table.
#[derive(Clone, Debug, PartialEq)]
pub struct KindRecord {
    /// Kind name.
    pub name: String,
    /// Parent kind, if any. Always a smaller ID than this record's.
    pub parent: Option<KindId>,
    /// Alias → canonical field name.
    pub aliases: IndexMap<String, String>,
    /// Payload template cloned into every node of this kind.
    pub payload: Payload,
    /// Declared children, in declaration order.
    pub children: Vec<(String, KindId)>,
    /// Unit table; empty for non-measure kinds.
    pub units: Vec<Unit>,
}

impl KindRecord {
    /// Find a unit by name or abbreviation.
    pub fn unit_index(&self, text: &str) -> Option<usize> {
        self.units.iter().position(|u| u.matches(text))
    }
}

/// The reflection table: an append-only array of kind records.
///
/// Registration order is the dependency order — parents, child kinds,
/// and set element kinds must exist before the kinds that reference
/// them. This discipline replaces runtime inheritance with a flat table
/// of parent links queried by [`KindTable::is`].
#[derive(Clone, Debug, Default)]
pub struct KindTable {
    records: Vec<KindRecord>,
    by_name: IndexMap<String, KindId>,
}

impl KindTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a kind, resolving every name it references.
    pub fn register(&mut self, def: KindDef) -> Result<KindId, KindError> {
        if self.by_name.contains_key(&def.name) {
            return Err(KindError::DuplicateKind { name: def.name });
        }

        let parent = match &def.parent {
            Some(parent) => Some(self.id(parent).ok_or_else(|| KindError::UnknownParent {
                kind: def.name.clone(),
                parent: parent.clone(),
            })?),
            None => None,
        };

        let payload = self.resolve_payload(&def.name, &def.payload)?;

        let mut children: Vec<(String, KindId)> = Vec::with_capacity(def.children.len());
        for child in &def.children {
            if children.iter().any(|(name, _)| name == &child.name) {
                return Err(KindError::DuplicateChild {
                    kind: def.name.clone(),
                    child: child.name.clone(),
                });
            }
            let kind = self.resolve_child_kind(&def.name, child)?;
            children.push((child.name.clone(), kind));
        }

        let id = KindId(self.records.len() as u32);
        self.by_name.insert(def.name.clone(), id);
        self.records.push(KindRecord {
            name: def.name,
            parent,
            aliases: def.aliases.into_iter().collect(),
            payload,
            children,
            units: def.units,
        });
        Ok(id)
    }

    /// Resolve a declared child to its kind, synthesizing an anonymous
    /// set kind for `[element]` declarations.
    fn resolve_child_kind(&mut self, kind: &str, child: &ChildSpec) -> Result<KindId, KindError> {
        if let Some(element) = child
            .kind
            .strip_prefix('[')
            .and_then(|k| k.strip_suffix(']'))
        {
            let element_id = self.id(element).ok_or_else(|| KindError::UnknownElementKind {
                kind: kind.to_owned(),
                element: element.to_owned(),
            })?;
            let set_name = format!("{kind}.{}", child.name);
            if let Some(existing) = self.id(&set_name) {
                return Ok(existing);
            }
            let id = KindId(self.records.len() as u32);
            self.by_name.insert(set_name.clone(), id);
            self.records.push(KindRecord {
                name: set_name,
                parent: None,
                aliases: IndexMap::new(),
                payload: Payload::Set {
                    element: element_id,
                },
                children: Vec::new(),
                units: Vec::new(),
            });
            return Ok(id);
        }
        self.id(&child.kind).ok_or_else(|| KindError::UnknownChildKind {
            kind: kind.to_owned(),
            child: child.name.clone(),
            child_kind: child.kind.clone(),
        })
    }

    fn resolve_payload(&self, kind: &str, spec: &PayloadSpec) -> Result<Payload, KindError> {
        Ok(match spec {
            PayloadSpec::Branch => Payload::Branch,
            PayloadSpec::Text => Payload::Text(None),
            PayloadSpec::Number => Payload::Number(None),
            PayloadSpec::Flag => Payload::Flag(None),
            PayloadSpec::Measure => Payload::Measure {
                value: None,
                unit: 0,
            },
            PayloadSpec::Link => Payload::Link(None),
            PayloadSpec::Set { element } => Payload::Set {
                element: self.id(element).ok_or_else(|| KindError::UnknownElementKind {
                    kind: kind.to_owned(),
                    element: element.clone(),
                })?,
            },
        })
    }

    /// Look up a kind by name.
    pub fn id(&self, name: &str) -> Option<KindId> {
        self.by_name.get(name).copied()
    }

    /// The record for a kind.
    pub fn record(&self, id: KindId) -> &KindRecord {
        &self.records[id.index()]
    }

    /// Whether `id` names `name`, directly or through any ancestor in
    /// its is-a chain.
    pub fn is(&self, id: KindId, name: &str) -> bool {
        let record = self.record(id);
        if record.name == name {
            return true;
        }
        match record.parent {
            Some(parent) => self.is(parent, name),
            None => false,
        }
    }

    /// Resolve an alternate field name to its canonical form, walking
    /// the is-a chain from `id` upward.
    pub fn resolve_alias<'a>(&'a self, id: KindId, alias: &str) -> Option<&'a str> {
        let mut current = Some(id);
        while let Some(kind) = current {
            let record = self.record(kind);
            if let Some(canonical) = record.aliases.get(alias) {
                return Some(canonical);
            }
            current = record.parent;
        }
        None
    }

    /// Number of registered kinds (including synthesized set kinds).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no kinds.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over registered kinds in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (KindId, &KindRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (KindId(i as u32), r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_chain() -> KindTable {
        let mut table = KindTable::new();
        table
            .register(KindDef::with_payload("measure", PayloadSpec::Measure))
            .unwrap();
        table
            .register(
                KindDef::with_payload("distance", PayloadSpec::Measure)
                    .parent("measure")
                    .units(vec![
                        Unit::new("meters", &["m"], 1.0),
                        Unit::new("centimeters", &["cm"], 0.01),
                    ]),
            )
            .unwrap();
        table
    }

    #[test]
    fn is_matches_own_name() {
        let table = table_with_chain();
        let distance = table.id("distance").unwrap();
        assert!(table.is(distance, "distance"));
    }

    #[test]
    fn is_matches_every_ancestor() {
        let table = table_with_chain();
        let distance = table.id("distance").unwrap();
        assert!(table.is(distance, "measure"));
        assert!(!table.is(distance, "angle"));
    }

    #[test]
    fn is_does_not_match_descendants() {
        let table = table_with_chain();
        let measure = table.id("measure").unwrap();
        assert!(!table.is(measure, "distance"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut table = table_with_chain();
        let err = table
            .register(KindDef::branch("measure"))
            .unwrap_err();
        assert_eq!(
            err,
            KindError::DuplicateKind {
                name: "measure".into()
            }
        );
    }

    #[test]
    fn parent_must_be_registered_first() {
        let mut table = KindTable::new();
        let err = table
            .register(KindDef::branch("shape").parent("object"))
            .unwrap_err();
        assert!(matches!(err, KindError::UnknownParent { .. }));
    }

    #[test]
    fn aliases_resolve_through_the_chain() {
        let mut table = KindTable::new();
        table
            .register(KindDef::branch("object").alias("id", "name"))
            .unwrap();
        table
            .register(KindDef::branch("shape").parent("object").alias("w", "width"))
            .unwrap();
        let shape = table.id("shape").unwrap();
        assert_eq!(table.resolve_alias(shape, "w"), Some("width"));
        assert_eq!(table.resolve_alias(shape, "id"), Some("name"));
        assert_eq!(table.resolve_alias(shape, "unrelated"), None);
    }

    #[test]
    fn set_children_synthesize_an_element_typed_kind() {
        let mut table = KindTable::new();
        table.register(KindDef::branch("shape")).unwrap();
        let assembly = table
            .register(KindDef::branch("assembly").set("shapes", "shape"))
            .unwrap();
        let record = table.record(assembly);
        let (name, set_kind) = &record.children[0];
        assert_eq!(name, "shapes");
        let shape = table.id("shape").unwrap();
        assert_eq!(
            table.record(*set_kind).payload,
            Payload::Set { element: shape }
        );
    }

    #[test]
    fn unknown_element_kind_is_rejected() {
        let mut table = KindTable::new();
        let err = table
            .register(KindDef::branch("assembly").set("shapes", "shape"))
            .unwrap_err();
        assert!(matches!(err, KindError::UnknownElementKind { .. }));
    }

    #[test]
    fn unit_lookup_accepts_abbreviations() {
        let table = table_with_chain();
        let distance = table.id("distance").unwrap();
        let record = table.record(distance);
        assert_eq!(record.unit_index("cm"), Some(1));
        assert_eq!(record.unit_index("centimeters"), Some(1));
        assert_eq!(record.unit_index("furlongs"), None);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// A kind reflects every name on its parent chain, however
            /// deep, and nothing off it.
            #[test]
            fn is_holds_along_random_chains(depth in 1usize..16, probe in 0usize..16) {
                let mut table = KindTable::new();
                let mut names: Vec<String> = Vec::new();
                for i in 0..depth {
                    let name = format!("kind{i}");
                    let mut def = KindDef::branch(&name);
                    if let Some(prev) = names.last() {
                        def = def.parent(prev);
                    }
                    table.register(def).unwrap();
                    names.push(name);
                }
                let leaf = table.id(&names[depth - 1]).unwrap();
                let probe = probe.min(depth - 1);
                prop_assert!(table.is(leaf, &names[probe]));
                prop_assert!(!table.is(leaf, "unrelated"));
            }
        }
    }
}
