//! Shared kind registries and pre-built trees for test scenarios.

use sylva_core::{KindDef, KindTable, PayloadSpec, Unit};
use sylva_tree::Tree;

/// A compact registry exercising every payload shape: simple leaves,
/// a measured leaf, a composite with an alias, and a set.
pub fn fixture_kinds() -> KindTable {
    let mut table = KindTable::new();
    table
        .register(KindDef::with_payload("string", PayloadSpec::Text))
        .unwrap();
    table
        .register(KindDef::with_payload("number", PayloadSpec::Number))
        .unwrap();
    table
        .register(KindDef::with_payload("boolean", PayloadSpec::Flag))
        .unwrap();
    table
        .register(
            KindDef::with_payload("distance", PayloadSpec::Measure).units(vec![
                Unit::new("meters", &["m"], 1.0),
                Unit::new("centimeters", &["cm"], 0.01),
                Unit::new("kilometers", &["km"], 1000.0),
            ]),
        )
        .unwrap();
    table
        .register(
            KindDef::branch("shape")
                .alias("w", "width")
                .child("label", "string")
                .child("width", "distance")
                .child("visible", "boolean"),
        )
        .unwrap();
    table
        .register(
            KindDef::branch("assembly")
                .child("extends", "string")
                .set("shapes", "shape"),
        )
        .unwrap();
    table.register(KindDef::branch("root")).unwrap();
    table
}

/// A tree over [`fixture_kinds`] rooted at `"root"`.
pub fn fixture_tree() -> Tree {
    Tree::new(fixture_kinds(), "root").unwrap()
}
