//! Layer documents: the JSON form layers are exported to and imported from.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use dvc_model::Layer;

use crate::error::{ImportError, Result, StoreError};
use crate::validate::{ImportMode, validate_document};

/// Serialized layer state.
///
/// ```json
/// { "layers": [ { "id": "...", "name": "...", "active": true, "zIndex": 1, "filters": [] } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerDocument {
    #[serde(default)]
    pub layers: Vec<Layer>,
    /// Configuration name written by older exports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<String>,
}

impl LayerDocument {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self {
            layers,
            configuration: None,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(StoreError::Serialization)
    }

    /// Parses and validates `text`, reporting every shape problem at once.
    pub fn from_json(text: &str, mode: ImportMode) -> std::result::Result<Self, ImportError> {
        let value: Value = serde_json::from_str(text)?;
        let issues = validate_document(&value, mode);
        if !issues.is_empty() {
            return Err(ImportError::Invalid { issues });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Reads a document from disk.
    pub fn load(path: &Path, mode: ImportMode) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| StoreError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source: e,
        })?;
        let document = Self::from_json(&text, mode)?;
        tracing::debug!(
            path = %path.display(),
            layers = document.layers.len(),
            "loaded layer document"
        );
        Ok(document)
    }

    /// Writes the document to disk through a temp file and rename.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        let temp_path = path.with_extension("json.tmp");

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = File::create(&temp_path).map_err(|e| StoreError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;
        file.write_all(json.as_bytes())
            .and_then(|()| file.write_all(b"\n"))
            .and_then(|()| file.sync_all())
            .map_err(|e| StoreError::Io {
                operation: "write",
                path: temp_path.clone(),
                source: e,
            })?;

        fs::rename(&temp_path, path).map_err(|e| StoreError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source: e,
        })?;

        tracing::info!("Saved layer document to {}", path.display());
        Ok(())
    }
}
