//! Derived per-layer element assignment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::element::ElementId;
use crate::layer::{DEFAULT_BUCKET, LayerId};

/// Element ids claimed by each layer plus the `default` bucket of
/// unclaimed elements.
///
/// Serializes as a single flat object keyed by layer id, with the reserved
/// `default` key alongside. Recomputed on every pass and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementIdsPerLayer {
    #[serde(flatten)]
    pub layers: BTreeMap<LayerId, Vec<ElementId>>,
    #[serde(default)]
    pub default: Vec<ElementId>,
}

impl ElementIdsPerLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids claimed by a layer. Unknown layers claim nothing.
    pub fn layer(&self, layer_id: &str) -> &[ElementId] {
        self.layers
            .get(layer_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Looks up a bucket by key, treating `default` as the unclaimed bucket.
    pub fn bucket(&self, key: &str) -> &[ElementId] {
        if key == DEFAULT_BUCKET {
            &self.default
        } else {
            self.layer(key)
        }
    }

    pub fn insert_layer(&mut self, layer_id: impl Into<LayerId>, ids: Vec<ElementId>) {
        self.layers.insert(layer_id.into(), ids);
    }

    /// Number of ids across all buckets, including `default`.
    pub fn total_ids(&self) -> usize {
        self.layers.values().map(Vec::len).sum::<usize>() + self.default.len()
    }

    /// Finds the bucket that holds an element id.
    pub fn owner_of(&self, element_id: &str) -> Option<&str> {
        if self.default.iter().any(|id| id == element_id) {
            return Some(DEFAULT_BUCKET);
        }
        self.layers
            .iter()
            .find(|(_, ids)| ids.iter().any(|id| id == element_id))
            .map(|(layer_id, _)| layer_id.as_str())
    }
}
