//! Visibility policies: from per-layer buckets to the visible id set.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexSet;
use tracing::debug;

use dvc_model::{ElementId, ElementIdsPerLayer, Layer, LayerMode, PolicyKind};

/// Strategy turning an assignment into the visible element ids.
///
/// `layers` arrive already sorted by priority, highest priority first.
pub trait VisibilityPolicy: fmt::Debug + Send + Sync {
    fn kind(&self) -> PolicyKind;

    fn visible_ids(&self, buckets: &ElementIdsPerLayer, layers: &[&Layer]) -> Vec<ElementId>;
}

/// Returns the policy implementation for a kind.
pub fn policy_for(kind: PolicyKind) -> Box<dyn VisibilityPolicy> {
    match kind {
        PolicyKind::Advanced => Box::new(AdvancedPolicy),
        PolicyKind::Basic => Box::new(BasicPolicy),
    }
}

/// Inclusion-only layers.
///
/// Unclaimed elements are visible and every active layer adds its bucket.
/// Inactive layers add nothing, and layer modes are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPolicy;

impl VisibilityPolicy for BasicPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Basic
    }

    fn visible_ids(&self, buckets: &ElementIdsPerLayer, layers: &[&Layer]) -> Vec<ElementId> {
        let mut visible: IndexSet<&ElementId> = buckets.default.iter().collect();
        for layer in layers.iter().filter(|layer| layer.active) {
            visible.extend(buckets.layer(&layer.id));
        }
        visible.into_iter().cloned().collect()
    }
}

/// Show/hide typed layers.
///
/// Each element is decided by the highest-priority active layer that claims
/// it; everything no active layer decided stays visible.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdvancedPolicy;

impl VisibilityPolicy for AdvancedPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Advanced
    }

    fn visible_ids(&self, buckets: &ElementIdsPerLayer, layers: &[&Layer]) -> Vec<ElementId> {
        let mut decided: HashSet<&str> = HashSet::new();
        let mut shown: Vec<ElementId> = Vec::new();
        let mut hidden = 0usize;

        for layer in layers.iter().filter(|layer| layer.active) {
            for id in buckets.layer(&layer.id) {
                if !decided.insert(id.as_str()) {
                    continue;
                }
                match layer.mode {
                    LayerMode::Show => shown.push(id.clone()),
                    LayerMode::Hide => hidden += 1,
                }
            }
        }

        let listed: HashSet<&str> = layers.iter().map(|layer| layer.id.as_str()).collect();
        let fall_through = buckets
            .default
            .iter()
            .chain(layers.iter().flat_map(|layer| buckets.layer(&layer.id)))
            .chain(
                buckets
                    .layers
                    .iter()
                    .filter(|(layer_id, _)| !listed.contains(layer_id.as_str()))
                    .flat_map(|(_, ids)| ids),
            );
        for id in fall_through {
            if decided.insert(id.as_str()) {
                shown.push(id.clone());
            }
        }

        debug!(shown = shown.len(), hidden, "advanced visibility computed");
        shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<ElementId> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn basic_policy_ignores_inactive_layers() {
        let mut buckets = ElementIdsPerLayer::new();
        buckets.insert_layer("on", ids(&["1"]));
        buckets.insert_layer("off", ids(&["2"]));
        buckets.default = ids(&["3"]);
        let on = Layer::new("on", "on", 0);
        let off = Layer::new("off", "off", 1).with_active(false);
        let visible = BasicPolicy.visible_ids(&buckets, &[&on, &off]);
        assert_eq!(visible, ids(&["3", "1"]));
    }

    #[test]
    fn advanced_policy_keeps_ids_of_unknown_layers_visible() {
        let mut buckets = ElementIdsPerLayer::new();
        buckets.insert_layer("gone", ids(&["1"]));
        buckets.default = ids(&["2"]);
        let visible = AdvancedPolicy.visible_ids(&buckets, &[]);
        assert_eq!(visible, ids(&["2", "1"]));
    }
}
