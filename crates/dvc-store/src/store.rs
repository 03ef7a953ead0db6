//! Caller-owned, editable layer state.
//!
//! Every mutator returns whether it changed anything. Unknown layer or filter
//! ids are no-ops, never errors.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};
use uuid::Uuid;

use dvc_model::{Filter, FilterKind, Layer, LayerId, LayerMode, SelectionRef};

use crate::document::LayerDocument;
use crate::error::{ImportError, Result};
use crate::validate::ImportMode;

pub const DEFAULT_CONFIGURATION: &str = "default";

/// Partial update for [`LayerStore::update_layer`]. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerPatch {
    pub name: Option<String>,
    pub active: Option<bool>,
    pub mode: Option<LayerMode>,
    pub z_index: Option<i64>,
}

impl LayerPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn with_mode(mut self, mode: LayerMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_z_index(mut self, z_index: i64) -> Self {
        self.z_index = Some(z_index);
        self
    }

    fn apply(&self, layer: &mut Layer) {
        if let Some(name) = &self.name {
            layer.name.clone_from(name);
        }
        if let Some(active) = self.active {
            layer.active = active;
        }
        if let Some(mode) = self.mode {
            layer.mode = mode;
        }
        if let Some(z_index) = self.z_index {
            layer.z_index = z_index;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerStore {
    layers: Vec<Layer>,
    configuration: String,
}

impl Default for LayerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStore {
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            configuration: DEFAULT_CONFIGURATION.to_string(),
        }
    }

    pub fn from_layers(layers: Vec<Layer>) -> Self {
        Self {
            layers,
            ..Self::new()
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, layer_id: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == layer_id)
    }

    fn layer_mut(&mut self, layer_id: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id == layer_id)
    }

    pub fn configuration(&self) -> &str {
        &self.configuration
    }

    pub fn set_configuration(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.configuration == name {
            return false;
        }
        self.configuration = name;
        true
    }

    // --- layers ---

    /// Appends `Layer N`: active, showing, without filters, above every existing layer.
    pub fn add_layer(&mut self) -> LayerId {
        let z_index = self
            .layers
            .iter()
            .map(|layer| layer.z_index)
            .max()
            .map_or(1, |max| max + 1);
        let id = Uuid::new_v4().to_string();
        let name = format!("Layer {}", self.layers.len() + 1);
        debug!(layer = %id, z_index, "adding layer");
        self.layers.push(Layer::new(id.clone(), name, z_index));
        id
    }

    pub fn update_layer(&mut self, layer_id: &str, patch: &LayerPatch) -> bool {
        let Some(layer) = self.layer_mut(layer_id) else {
            return false;
        };
        let before = layer.clone();
        patch.apply(layer);
        *layer != before
    }

    pub fn delete_layer(&mut self, layer_id: &str) -> bool {
        let before = self.layers.len();
        self.layers.retain(|layer| layer.id != layer_id);
        self.layers.len() != before
    }

    pub fn toggle_layer(&mut self, layer_id: &str) -> bool {
        match self.layer_mut(layer_id) {
            Some(layer) => {
                layer.active = !layer.active;
                true
            }
            None => false,
        }
    }

    /// Moves the layer at `from` to `to`, then renumbers every `zIndex` to its position.
    pub fn reorder_layers(&mut self, from: usize, to: usize) -> bool {
        if from >= self.layers.len() || to >= self.layers.len() {
            return false;
        }
        let layer = self.layers.remove(from);
        self.layers.insert(to, layer);
        for (index, layer) in self.layers.iter_mut().enumerate() {
            // Layer counts never approach i64::MAX.
            layer.z_index = index as i64;
        }
        true
    }

    // --- filters ---

    /// Appends `Filter N` with an empty payload of `kind`. Returns a copy of it.
    pub fn add_filter(&mut self, layer_id: &str, kind: FilterKind) -> Option<Filter> {
        let layer = self.layer_mut(layer_id)?;
        let name = format!("Filter {}", layer.filters.len() + 1);
        let filter = Filter::empty(kind, Uuid::new_v4().to_string(), name);
        layer.filters.push(filter.clone());
        Some(filter)
    }

    /// Replaces a filter. A filter never changes kind, so a replacement of
    /// another kind is refused.
    pub fn update_filter(&mut self, layer_id: &str, filter_id: &str, filter: Filter) -> bool {
        let Some(existing) = self
            .layer_mut(layer_id)
            .and_then(|layer| layer.filter_mut(filter_id))
        else {
            return false;
        };
        if existing.kind() != filter.kind() {
            warn!(
                layer = layer_id,
                filter = filter_id,
                from = %existing.kind(),
                to = %filter.kind(),
                "refusing to change filter kind"
            );
            return false;
        }
        if *existing == filter {
            return false;
        }
        *existing = filter;
        true
    }

    pub fn delete_filter(&mut self, layer_id: &str, filter_id: &str) -> bool {
        let Some(layer) = self.layer_mut(layer_id) else {
            return false;
        };
        let before = layer.filters.len();
        layer.filters.retain(|filter| filter.id() != filter_id);
        layer.filters.len() != before
    }

    /// Adds picks to a selection filter, skipping ids it already holds.
    pub fn add_selected_elements(
        &mut self,
        layer_id: &str,
        filter_id: &str,
        elements: impl IntoIterator<Item = SelectionRef>,
    ) -> bool {
        let Some(Filter::Selection(selection)) = self
            .layer_mut(layer_id)
            .and_then(|layer| layer.filter_mut(filter_id))
        else {
            return false;
        };
        let mut known: HashSet<String> = selection
            .elements
            .iter()
            .map(|element| element.id.clone())
            .collect();
        let before = selection.elements.len();
        for element in elements {
            if known.insert(element.id.clone()) {
                selection.elements.push(element);
            }
        }
        selection.elements.len() != before
    }

    pub fn delete_selected_element(
        &mut self,
        layer_id: &str,
        filter_id: &str,
        element_id: &str,
    ) -> bool {
        let Some(Filter::Selection(selection)) = self
            .layer_mut(layer_id)
            .and_then(|layer| layer.filter_mut(filter_id))
        else {
            return false;
        };
        let before = selection.elements.len();
        selection.elements.retain(|element| element.id != element_id);
        selection.elements.len() != before
    }

    // --- import / export ---

    pub fn document(&self) -> LayerDocument {
        LayerDocument::new(self.layers.clone())
    }

    pub fn export_json(&self) -> Result<String> {
        self.document().to_json()
    }

    pub fn export_to_path(&self, path: &Path) -> Result<()> {
        self.document().save(path)
    }

    /// Replaces all layers with the ones in `text`. Nothing changes on error.
    pub fn import_json(
        &mut self,
        text: &str,
        mode: ImportMode,
    ) -> std::result::Result<(), ImportError> {
        let document = LayerDocument::from_json(text, mode)?;
        self.replace(document);
        Ok(())
    }

    pub fn import_from_path(&mut self, path: &Path, mode: ImportMode) -> Result<()> {
        let document = LayerDocument::load(path, mode)?;
        self.replace(document);
        Ok(())
    }

    fn replace(&mut self, document: LayerDocument) {
        debug!(layers = document.layers.len(), "replacing layers");
        self.layers = document.layers;
        if let Some(configuration) = document.configuration {
            self.configuration = configuration;
        }
    }
}

impl From<LayerDocument> for LayerStore {
    fn from(document: LayerDocument) -> Self {
        let mut store = Self::new();
        store.replace(document);
        store
    }
}
