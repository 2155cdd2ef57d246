use std::fs;
use tempfile::tempdir;
use vanity_catalog::{Catalog, CatalogError, Predicate, vanity};
use vanity_domain::{ChoiceValue, SlotType};

#[test]
fn loads_builtin_catalog_written_to_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(&path, vanity::catalog().unwrap().to_json().unwrap()).unwrap();

    let catalog = Catalog::load(&path).unwrap();
    let width = catalog.section(SlotType::Width).unwrap();
    let (_, wide) = width.find(&ChoiceValue::Number(120)).unwrap();
    assert_eq!(wide.visible, Predicate::equals(SlotType::Breadth, 46));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = Catalog::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
    assert!(err.to_string().contains("Failed to read catalog file"));
}

#[test]
fn malformed_json_is_a_serialize_error() {
    let err = Catalog::from_json("{ \"sections\": 7 }").unwrap_err();
    assert_eq!(err.kind(), "Serialize");
}

#[test]
fn minimal_json_catalog_is_accepted() {
    let json = r#"{
        "sections": [
            {
                "slot": "handle",
                "label": "Handle",
                "options": { "flat": [ { "value": "HDL-BAR-CHROME" }, { "value": null, "label": "No handle" } ] }
            },
            {
                "slot": "stand",
                "label": "Stand",
                "visible": { "op": "isSet", "slot": "handle" },
                "rules": [ { "trigger": "handle", "when": { "family": "KNOB" }, "target": null, "preserveIfNull": true } ],
                "options": { "flat": [ { "value": "STAND-FLOOR-CHROME" } ] }
            }
        ],
        "defaults": { "handle": "HDL-BAR-CHROME" }
    }"#;

    let catalog = Catalog::from_json(json).unwrap();
    assert_eq!(catalog.sections().len(), 2);
    assert!(catalog.section(SlotType::Stand).unwrap().preserves_null());
    assert_eq!(catalog.defaults().text(SlotType::Handle), Some("HDL-BAR-CHROME"));
    assert_eq!(catalog.rules().subscribers(SlotType::Handle).len(), 1);
}

#[test]
fn invalid_json_catalog_is_rejected_after_parsing() {
    let json = r#"{
        "sections": [
            { "slot": "tap", "label": "Tap", "options": { "flat": [ { "value": "TAP-8201-CHROME" } ] } }
        ],
        "defaults": { "tap": "TAP-9999-GOLD" }
    }"#;

    let err = Catalog::from_json(json).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidCatalog { .. }));
}
