//! Property tests for the full resolution pipeline.

use std::collections::HashSet;

use proptest::prelude::*;

use dvc_engine::VisibilityEngine;
use dvc_model::{
    Element, ElementType, EngineOptions, Filter, FilterCombination, Layer, LayerMode,
    PatternFilter, PolicyKind, SelectionFilter, SelectionRef, TypeFilter, ZOrder,
    all_element_ids,
};

const TYPES: [ElementType; 4] = [
    ElementType::Class,
    ElementType::Interface,
    ElementType::OwnedAttribute,
    ElementType::OwnedOperation,
];

const PATTERNS: [&str; 5] = ["a", "/^e[0-9]$/", "/[broken/", "", "E1"];

/// Builds a forest where node `i` hangs below `parents[i]` (always `< i`).
fn build_forest(nodes: &[(Option<usize>, usize, bool)]) -> Vec<Element> {
    fn build(index: usize, nodes: &[(Option<usize>, usize, bool)]) -> Element {
        let (_, type_index, named) = nodes[index];
        let mut element = Element::new(format!("e{index}"), TYPES[type_index].clone());
        if named {
            element = element.with_name(format!("E{index}"));
        }
        let children = (0..nodes.len())
            .filter(|child| nodes[*child].0 == Some(index))
            .map(|child| build(child, nodes))
            .collect();
        element.with_children(children)
    }
    (0..nodes.len())
        .filter(|index| nodes[*index].0.is_none())
        .map(|index| build(index, nodes))
        .collect()
}

fn forest_strategy() -> impl Strategy<Value = Vec<Element>> {
    prop::collection::vec((any::<prop::sample::Index>(), 0..TYPES.len(), any::<bool>(), any::<bool>()), 0..16)
        .prop_map(|raw| {
            let nodes: Vec<(Option<usize>, usize, bool)> = raw
                .into_iter()
                .enumerate()
                .map(|(index, (parent, type_index, is_child, named))| {
                    let parent = (index > 0 && is_child).then(|| parent.index(index));
                    (parent, type_index, named)
                })
                .collect();
            build_forest(&nodes)
        })
}

fn filter_strategy() -> impl Strategy<Value = Filter> {
    prop_oneof![
        prop::collection::vec(0..TYPES.len(), 0..3).prop_map(|indices| {
            Filter::Type(TypeFilter {
                id: "t".to_string(),
                name: "types".to_string(),
                types: indices.into_iter().map(|index| TYPES[index].clone()).collect(),
            })
        }),
        (0..PATTERNS.len()).prop_map(|index| {
            Filter::Pattern(PatternFilter {
                id: "p".to_string(),
                name: "pattern".to_string(),
                pattern: PATTERNS[index].to_string(),
                types: None,
            })
        }),
        prop::collection::vec(0..20usize, 0..6).prop_map(|ids| {
            Filter::Selection(SelectionFilter {
                id: "s".to_string(),
                name: "selection".to_string(),
                elements: ids
                    .into_iter()
                    .map(|id| SelectionRef::new(format!("e{id}")))
                    .collect(),
            })
        }),
    ]
}

fn layers_strategy() -> impl Strategy<Value = Vec<Layer>> {
    prop::collection::vec(
        (
            -3i64..3,
            any::<bool>(),
            any::<bool>(),
            prop::collection::vec(filter_strategy(), 0..3),
        ),
        0..5,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(index, (z_index, active, hide, filters))| {
                let mode = if hide { LayerMode::Hide } else { LayerMode::Show };
                let mut layer = Layer::new(format!("l{index}"), format!("Layer {index}"), z_index)
                    .with_active(active)
                    .with_mode(mode);
                layer.filters = filters;
                layer
            })
            .collect()
    })
}

fn options_strategy() -> impl Strategy<Value = EngineOptions> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(descending, first_two, basic)| {
        EngineOptions {
            z_order: if descending { ZOrder::Descending } else { ZOrder::Ascending },
            filter_combination: if first_two {
                FilterCombination::FirstTwo
            } else {
                FilterCombination::All
            },
            policy: if basic { PolicyKind::Basic } else { PolicyKind::Advanced },
        }
    })
}

proptest! {
    #[test]
    fn resolution_is_idempotent(
        forest in forest_strategy(),
        layers in layers_strategy(),
        options in options_strategy(),
    ) {
        let engine = VisibilityEngine::new(options);
        let first = engine.resolve(&forest, &layers);
        let second = engine.resolve(&forest, &layers);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn buckets_partition_all_elements(
        forest in forest_strategy(),
        layers in layers_strategy(),
        options in options_strategy(),
    ) {
        let engine = VisibilityEngine::new(options);
        let buckets = engine.assign(&forest, &layers);
        let all: HashSet<String> = all_element_ids(&forest).into_iter().collect();

        let mut seen = HashSet::new();
        for id in buckets.layers.values().flatten().chain(buckets.default.iter()) {
            prop_assert!(seen.insert(id.clone()), "id {} assigned twice", id);
        }
        prop_assert_eq!(seen, all);
    }

    #[test]
    fn visible_ids_are_unique_known_elements(
        forest in forest_strategy(),
        layers in layers_strategy(),
        options in options_strategy(),
    ) {
        let engine = VisibilityEngine::new(options);
        let resolution = engine.resolve(&forest, &layers);
        let all: HashSet<String> = all_element_ids(&forest).into_iter().collect();
        let visible: HashSet<&String> = resolution.visible.iter().collect();
        prop_assert_eq!(visible.len(), resolution.visible.len());
        prop_assert!(resolution.visible.iter().all(|id| all.contains(id)));
    }

    #[test]
    fn only_active_hide_layers_hide_under_advanced_policy(
        forest in forest_strategy(),
        layers in layers_strategy(),
    ) {
        let engine = VisibilityEngine::default();
        let resolution = engine.resolve(&forest, &layers);
        let hidden_by_layers: HashSet<&String> = layers
            .iter()
            .filter(|layer| layer.active && layer.mode == LayerMode::Hide)
            .flat_map(|layer| resolution.per_layer.layer(&layer.id))
            .collect();
        for id in resolution.hidden(&forest) {
            prop_assert!(hidden_by_layers.contains(&id), "{} hidden without a hide layer", id);
        }
    }
}
