//! Integration tests for JSON export and validated import.

use dvc_model::{Filter, FilterKind, LayerMode, SelectionRef};
use dvc_store::{ImportError, ImportMode, LayerDocument, LayerStore, StoreError};
use tempfile::tempdir;

fn populated_store() -> LayerStore {
    let mut store = LayerStore::new();
    let classes = store.add_layer();
    let picks = store.add_layer();
    store.add_filter(&classes, FilterKind::Type);
    let filter = store.add_filter(&picks, FilterKind::Selection).unwrap();
    store.add_selected_elements(&picks, filter.id(), [SelectionRef::named("1", "Order")]);
    store.update_layer(
        &picks,
        &dvc_store::LayerPatch::default().with_mode(LayerMode::Hide),
    );
    store
}

#[test]
fn export_then_import_restores_layers() {
    let original = populated_store();
    let json = original.export_json().unwrap();

    let mut restored = LayerStore::new();
    restored.import_json(&json, ImportMode::Strict).unwrap();
    assert_eq!(restored.layers(), original.layers());
}

#[test]
fn export_to_path_writes_pretty_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("layers.json");
    let store = populated_store();
    store.export_to_path(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n  \"layers\": ["));
    assert!(!dir.path().join("nested").join("layers.json.tmp").exists());

    let mut loaded = LayerStore::new();
    loaded.import_from_path(&path, ImportMode::Strict).unwrap();
    assert_eq!(loaded.layers(), store.layers());
}

#[test]
fn invalid_document_lists_every_issue_and_keeps_state() {
    let mut store = populated_store();
    let before = store.clone();
    let text = r#"{
        "layers": [
            {"id": "a", "name": "A", "active": "yes", "zIndex": 1, "filters": [
                {"id": "f", "name": "F", "type": "colour"}
            ]},
            {"id": "a", "name": 5, "active": true, "zIndex": 2, "filters": []}
        ]
    }"#;

    let error = store.import_json(text, ImportMode::Strict).unwrap_err();
    let paths: Vec<&str> = error.issues().iter().map(|issue| issue.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "layers.0.active",
            "layers.0.filters.0.type",
            "layers.1.id",
            "layers.1.name"
        ]
    );
    assert!(
        error
            .to_string()
            .starts_with("Invalid configuration format: layers.0.active: Expected boolean, received string, ")
    );
    assert_eq!(store, before);
}

#[test]
fn malformed_json_keeps_state() {
    let mut store = populated_store();
    let before = store.clone();
    let error = store.import_json("not json", ImportMode::Strict).unwrap_err();
    assert!(matches!(error, ImportError::Json(_)));
    assert_eq!(store, before);
}

#[test]
fn reserved_default_layer_id_is_rejected() {
    let text = r#"{"layers": [{"id": "default", "name": "D", "active": true, "zIndex": 0, "filters": []}]}"#;
    let error = LayerDocument::from_json(text, ImportMode::Strict).unwrap_err();
    assert_eq!(error.issues()[0].path, "layers.0.id");
}

#[test]
fn lenient_import_fills_missing_lists() {
    let mut store = populated_store();
    store.import_json("{}", ImportMode::Lenient).unwrap();
    assert!(store.layers().is_empty());

    let text = r#"{"layers": [{"id": "a", "name": "A", "visible": false, "zIndex": 3}]}"#;
    store.import_json(text, ImportMode::Lenient).unwrap();
    let layer = store.layer("a").unwrap();
    assert!(!layer.active);
    assert!(layer.filters.is_empty());
    assert_eq!(layer.mode, LayerMode::Show);

    let error = LayerStore::new().import_json(text, ImportMode::Strict).unwrap_err();
    assert_eq!(error.issues()[0].path, "layers.0.filters");
}

#[test]
fn pattern_filter_types_are_optional() {
    let text = r#"{"layers": [{"id": "a", "name": "A", "active": true, "zIndex": 0, "filters": [
        {"id": "f", "name": "F", "type": "pattern", "pattern": "/^Order/i"}
    ]}]}"#;
    let document = LayerDocument::from_json(text, ImportMode::Strict).unwrap();
    let filter = &document.layers[0].filters[0];
    assert_eq!(filter.kind(), FilterKind::Pattern);
    assert!(matches!(filter, Filter::Pattern(pattern) if pattern.types.is_none()));
}

#[test]
fn imported_configuration_replaces_current() {
    let mut store = LayerStore::new();
    store
        .import_json(r#"{"layers": [], "configuration": "uml"}"#, ImportMode::Strict)
        .unwrap();
    assert_eq!(store.configuration(), "uml");
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempdir().unwrap();
    let mut store = LayerStore::new();
    let error = store
        .import_from_path(&dir.path().join("absent.json"), ImportMode::Strict)
        .unwrap_err();
    assert!(matches!(error, StoreError::Io { operation: "read", .. }));
}
