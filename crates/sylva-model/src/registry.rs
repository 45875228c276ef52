//! The standard kind registry.
//!
//! Registers the built-in vocabulary in dependency order: simple value
//! kinds first, then the measure family, then the composite model
//! kinds, and finally the `root` document kind. Measures form an is-a
//! chain under `measure`, so `is("measure")` holds for a distance, an
//! angle, and a time alike.

use sylva_core::{KindDef, KindTable, PayloadSpec, Unit};

/// Register one kind of the standard vocabulary.
fn must(table: &mut KindTable, def: KindDef) {
    table
        .register(def)
        .expect("standard kind registry is internally consistent");
}

/// Build the standard kind table.
pub fn standard_kinds() -> KindTable {
    let mut table = KindTable::new();

    // Simple value kinds.
    must(&mut table, KindDef::with_payload("string", PayloadSpec::Text));
    must(&mut table, KindDef::with_payload("number", PayloadSpec::Number));
    must(
        &mut table,
        KindDef::with_payload("boolean", PayloadSpec::Flag),
    );
    must(&mut table, KindDef::with_payload("link", PayloadSpec::Link));

    // The measure family. The base kind has no unit table and reads
    // back as a bare number.
    must(
        &mut table,
        KindDef::with_payload("measure", PayloadSpec::Measure),
    );
    must(
        &mut table,
        KindDef::with_payload("distance", PayloadSpec::Measure)
            .parent("measure")
            .units(vec![
                Unit::new("meters", &["m"], 1.0),
                Unit::new("centimeters", &["cm"], 0.01),
                Unit::new("millimeters", &["mm"], 0.001),
                Unit::new("kilometers", &["km"], 1000.0),
            ]),
    );
    must(
        &mut table,
        KindDef::with_payload("angle", PayloadSpec::Measure)
            .parent("measure")
            .units(vec![
                Unit::new("degrees", &["deg"], 1.0),
                Unit::new("radians", &["rad"], 57.29577951308232),
            ]),
    );
    must(
        &mut table,
        KindDef::with_payload("time", PayloadSpec::Measure)
            .parent("measure")
            .units(vec![
                Unit::new("seconds", &["s"], 1.0),
                Unit::new("milliseconds", &["ms"], 0.001),
                Unit::new("minutes", &["min"], 60.0),
                Unit::new("hours", &["h"], 3600.0),
            ]),
    );

    // An external data resource is its URL.
    must(
        &mut table,
        KindDef::with_payload("resource", PayloadSpec::Text),
    );

    // Composite model kinds, all descending from "object".
    must(&mut table, KindDef::branch("object"));
    must(
        &mut table,
        KindDef::branch("shape")
            .parent("object")
            .alias("w", "width")
            .alias("h", "height")
            .alias("d", "depth")
            .child("width", "distance")
            .child("height", "distance")
            .child("depth", "distance"),
    );
    must(
        &mut table,
        KindDef::branch("part")
            .parent("object")
            .child("shape", "link"),
    );
    must(
        &mut table,
        KindDef::branch("assembly")
            .parent("object")
            .child("extends", "string")
            .set("shapes", "shape")
            .set("parts", "part"),
    );
    must(
        &mut table,
        KindDef::branch("space")
            .parent("object")
            .child("shared", "boolean"),
    );
    must(
        &mut table,
        KindDef::branch("presence")
            .parent("object")
            .child("space", "link"),
    );

    // The document root.
    must(
        &mut table,
        KindDef::branch("root")
            .set("spaces", "space")
            .set("presences", "presence")
            .set("assemblies", "assembly"),
    );

    table
}
