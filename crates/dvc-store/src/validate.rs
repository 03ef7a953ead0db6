//! Shape validation for imported layer documents.
//!
//! Validation runs on the raw JSON value before deserialization so that every
//! problem is reported at once, each with the dotted path of the offending value.

use std::collections::HashSet;

use serde_json::{Map, Value};

use dvc_model::{DEFAULT_BUCKET, FilterKind, LayerMode};

use crate::error::ValidationIssue;

/// How strictly an import treats missing top-level data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// `layers` and every layer's `filters` must be present.
    #[default]
    Strict,
    /// Missing `layers` or `filters` are read as empty lists.
    Lenient,
}

/// Collects every issue in `value`. An empty result means the document can be imported.
pub fn validate_document(value: &Value, mode: ImportMode) -> Vec<ValidationIssue> {
    let mut validator = Validator {
        mode,
        issues: Vec::new(),
    };
    validator.document(value);
    validator.issues
}

struct Validator {
    mode: ImportMode,
    issues: Vec<ValidationIssue>,
}

impl Validator {
    fn push(&mut self, path: &[String], message: impl Into<String>) {
        self.issues
            .push(ValidationIssue::new(path.join("."), message));
    }

    fn document(&mut self, value: &Value) {
        let Some(root) = self.object(&[], value) else {
            return;
        };

        match root.get("layers") {
            Some(Value::Array(layers)) => {
                let mut ids = HashSet::new();
                for (index, layer) in layers.iter().enumerate() {
                    let path = vec!["layers".to_string(), index.to_string()];
                    self.layer(&path, layer, &mut ids);
                }
            }
            Some(other) => self.push(&["layers".to_string()], expected("array", other)),
            None if self.mode == ImportMode::Strict => {
                self.push(&["layers".to_string()], "Required");
            }
            None => {}
        }

        self.optional_string(&[], root, "configuration");
    }

    fn layer<'a>(&mut self, path: &[String], value: &'a Value, ids: &mut HashSet<&'a str>) {
        let Some(layer) = self.object(path, value) else {
            return;
        };

        if let Some(id) = self.required_string(path, layer, "id") {
            if id == DEFAULT_BUCKET {
                self.push(
                    &child(path, "id"),
                    format!("Layer id '{DEFAULT_BUCKET}' is reserved"),
                );
            } else if !ids.insert(id) {
                self.push(&child(path, "id"), format!("Duplicate layer id '{id}'"));
            }
        }
        self.required_string(path, layer, "name");

        // `visible` is the older name of `active`.
        let active_key = if layer.contains_key("active") || !layer.contains_key("visible") {
            "active"
        } else {
            "visible"
        };
        match layer.get(active_key) {
            Some(Value::Bool(_)) => {}
            Some(other) => self.push(&child(path, active_key), expected("boolean", other)),
            None => self.push(&child(path, active_key), "Required"),
        }
        if active_key == "active" && layer.contains_key("visible") {
            self.push(&child(path, "visible"), "Cannot be combined with 'active'");
        }

        match layer.get("zIndex") {
            Some(Value::Number(number)) if number.is_i64() => {}
            Some(Value::Number(number)) if !number.is_f64() => {
                self.push(
                    &child(path, "zIndex"),
                    format!("Number must be between {} and {}", i64::MIN, i64::MAX),
                );
            }
            Some(Value::Number(_)) => {
                self.push(&child(path, "zIndex"), "Expected integer, received float");
            }
            Some(other) => self.push(&child(path, "zIndex"), expected("number", other)),
            None => self.push(&child(path, "zIndex"), "Required"),
        }

        match layer.get("type") {
            None => {}
            Some(Value::String(mode))
                if [LayerMode::Show, LayerMode::Hide]
                    .iter()
                    .any(|known| known.as_str() == mode) => {}
            Some(other) => self.push(
                &child(path, "type"),
                format!(
                    "Invalid enum value. Expected 'show' | 'hide', received {}",
                    received(other)
                ),
            ),
        }

        match layer.get("filters") {
            Some(Value::Array(filters)) => {
                let mut filter_ids = HashSet::new();
                for (index, filter) in filters.iter().enumerate() {
                    let mut filter_path = child(path, "filters");
                    filter_path.push(index.to_string());
                    self.filter(&filter_path, filter, &mut filter_ids);
                }
            }
            Some(other) => self.push(&child(path, "filters"), expected("array", other)),
            None if self.mode == ImportMode::Strict => {
                self.push(&child(path, "filters"), "Required");
            }
            None => {}
        }

        self.optional_string(path, layer, "groupId");
        self.optional_string(path, layer, "styleClass");
    }

    fn filter<'a>(&mut self, path: &[String], value: &'a Value, ids: &mut HashSet<&'a str>) {
        let Some(filter) = self.object(path, value) else {
            return;
        };

        if let Some(id) = self.required_string(path, filter, "id")
            && !ids.insert(id)
        {
            self.push(&child(path, "id"), format!("Duplicate filter id '{id}'"));
        }
        self.required_string(path, filter, "name");

        let kind = match filter.get("type") {
            Some(Value::String(tag)) => tag.parse::<FilterKind>().ok(),
            _ => None,
        };
        let Some(kind) = kind else {
            self.push(
                &child(path, "type"),
                "Invalid discriminator value. Expected 'type' | 'pattern' | 'selection'",
            );
            return;
        };

        match kind {
            FilterKind::Type => self.string_array(path, filter, "types", true),
            FilterKind::Pattern => {
                self.required_string(path, filter, "pattern");
                self.string_array(path, filter, "types", false);
            }
            FilterKind::Selection => self.selection_elements(path, filter),
        }
    }

    fn selection_elements(&mut self, path: &[String], filter: &Map<String, Value>) {
        let elements_path = child(path, "elements");
        let elements = match filter.get("elements") {
            Some(Value::Array(elements)) => elements,
            Some(other) => return self.push(&elements_path, expected("array", other)),
            None => return self.push(&elements_path, "Required"),
        };
        for (index, element) in elements.iter().enumerate() {
            let element_path = child(&elements_path, &index.to_string());
            if let Some(element) = self.object(&element_path, element) {
                self.required_string(&element_path, element, "id");
                self.optional_string(&element_path, element, "name");
            }
        }
    }

    fn object<'a>(&mut self, path: &[String], value: &'a Value) -> Option<&'a Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            other => {
                self.push(path, expected("object", other));
                None
            }
        }
    }

    fn required_string<'a>(
        &mut self,
        path: &[String],
        map: &'a Map<String, Value>,
        key: &str,
    ) -> Option<&'a str> {
        match map.get(key) {
            Some(Value::String(text)) => Some(text),
            Some(other) => {
                self.push(&child(path, key), expected("string", other));
                None
            }
            None => {
                self.push(&child(path, key), "Required");
                None
            }
        }
    }

    fn optional_string(&mut self, path: &[String], map: &Map<String, Value>, key: &str) {
        match map.get(key) {
            None | Some(Value::String(_)) => {}
            Some(other) => self.push(&child(path, key), expected("string", other)),
        }
    }

    fn string_array(&mut self, path: &[String], map: &Map<String, Value>, key: &str, required: bool) {
        let array_path = child(path, key);
        match map.get(key) {
            Some(Value::Array(items)) => {
                for (index, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        self.push(&child(&array_path, &index.to_string()), expected("string", item));
                    }
                }
            }
            Some(other) => self.push(&array_path, expected("array", other)),
            None if required => self.push(&array_path, "Required"),
            None => {}
        }
    }
}

fn child(path: &[String], key: &str) -> Vec<String> {
    let mut path = path.to_vec();
    path.push(key.to_string());
    path
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn expected(kind: &str, value: &Value) -> String {
    format!("Expected {kind}, received {}", kind_of(value))
}

fn received(value: &Value) -> String {
    match value {
        Value::String(text) => format!("'{text}'"),
        other => kind_of(other).to_string(),
    }
}
