//! Partitioning of element ids into per-layer buckets.

use std::cmp::Reverse;
use std::collections::HashSet;

use tracing::{trace, warn};

use dvc_model::{
    DEFAULT_BUCKET, Element, ElementId, ElementIdsPerLayer, FilterCombination, Layer, ZOrder,
    all_element_ids,
};

use crate::resolver::claimed_set;

/// Layers in claiming order. The sort is stable, so equal `zIndex` values
/// keep their input order.
pub fn sort_layers(layers: &[Layer], z_order: ZOrder) -> Vec<&Layer> {
    let mut sorted: Vec<&Layer> = layers.iter().collect();
    match z_order {
        ZOrder::Ascending => sorted.sort_by_key(|layer| layer.z_index),
        ZOrder::Descending => sorted.sort_by_key(|layer| Reverse(layer.z_index)),
    }
    sorted
}

/// Assigns every element to at most one layer, first claim wins.
///
/// Elements no layer claims end up in the `default` bucket. Without layers
/// the result holds only the `default` bucket with every element id. A layer
/// whose id is the reserved `default` key claims nothing.
pub fn assign(
    elements: &[Element],
    layers: &[Layer],
    z_order: ZOrder,
    combination: FilterCombination,
) -> ElementIdsPerLayer {
    let mut buckets = ElementIdsPerLayer::new();
    let mut seen: HashSet<ElementId> = HashSet::new();

    for layer in sort_layers(layers, z_order) {
        if layer.id == DEFAULT_BUCKET {
            warn!(layer = %layer.id, "layer id is reserved, skipping layer");
            continue;
        }
        let claimed = claimed_set(elements, layer, combination);
        let claimed_count = claimed.len();
        let bucket: Vec<ElementId> = claimed
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();
        trace!(
            layer = %layer.id,
            z_index = layer.z_index,
            claimed = claimed_count,
            assigned = bucket.len(),
            "layer resolved"
        );
        match buckets.layers.get_mut(&layer.id) {
            Some(existing) => {
                warn!(layer = %layer.id, "duplicate layer id, merging buckets");
                existing.extend(bucket);
            }
            None => buckets.insert_layer(layer.id.clone(), bucket),
        }
    }

    buckets.default = all_element_ids(elements)
        .into_iter()
        .filter(|id| !seen.contains(id))
        .collect();
    buckets
}
