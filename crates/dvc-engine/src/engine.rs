//! Visibility engine tying assignment and policy together.
//!
//! The engine is a pure function of its inputs. It holds only its options
//! and the policy chosen at construction, so callers can keep one engine
//! around and recompute whenever the model or the layers change.

use serde::Serialize;
use tracing::{debug, debug_span};

use dvc_model::{Element, ElementId, ElementIdsPerLayer, EngineOptions, Layer};

use crate::assignment::{assign, sort_layers};
use crate::policy::{VisibilityPolicy, policy_for};

/// Outcome of one full recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    #[serde(rename = "elementIdsPerLayer")]
    pub per_layer: ElementIdsPerLayer,
    pub visible: Vec<ElementId>,
}

impl Resolution {
    pub fn is_visible(&self, element_id: &str) -> bool {
        self.visible.iter().any(|id| id == element_id)
    }

    /// Ids of the forest that did not make it into the visible set, in tree order.
    pub fn hidden(&self, elements: &[Element]) -> Vec<ElementId> {
        let visible: std::collections::HashSet<&str> =
            self.visible.iter().map(String::as_str).collect();
        dvc_model::all_element_ids(elements)
            .into_iter()
            .filter(|id| !visible.contains(id.as_str()))
            .collect()
    }
}

#[derive(Debug)]
pub struct VisibilityEngine {
    options: EngineOptions,
    policy: Box<dyn VisibilityPolicy>,
}

impl VisibilityEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            policy: policy_for(options.policy),
        }
    }

    /// Uses a caller-supplied policy instead of the one named in `options`.
    pub fn with_policy(options: EngineOptions, policy: Box<dyn VisibilityPolicy>) -> Self {
        Self { options, policy }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn policy(&self) -> &dyn VisibilityPolicy {
        self.policy.as_ref()
    }

    /// Partitions element ids into per-layer buckets.
    pub fn assign(&self, elements: &[Element], layers: &[Layer]) -> ElementIdsPerLayer {
        let span = debug_span!("assign", layers = layers.len());
        let _guard = span.enter();
        let buckets = assign(
            elements,
            layers,
            self.options.z_order,
            self.options.filter_combination,
        );
        debug!(
            claimed = buckets.total_ids() - buckets.default.len(),
            unclaimed = buckets.default.len(),
            "elements assigned"
        );
        buckets
    }

    /// Computes the visible ids from an assignment.
    pub fn visible_ids(&self, buckets: &ElementIdsPerLayer, layers: &[Layer]) -> Vec<ElementId> {
        let span = debug_span!("visibility", policy = ?self.policy.kind());
        let _guard = span.enter();
        let ordered = sort_layers(layers, self.options.z_order);
        self.policy.visible_ids(buckets, &ordered)
    }

    /// Runs assignment and visibility in one pass.
    pub fn resolve(&self, elements: &[Element], layers: &[Layer]) -> Resolution {
        let per_layer = self.assign(elements, layers);
        let visible = self.visible_ids(&per_layer, layers);
        Resolution { per_layer, visible }
    }
}

impl Default for VisibilityEngine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}
