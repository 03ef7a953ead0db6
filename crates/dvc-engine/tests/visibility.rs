//! Tests for both visibility policies.

use dvc_engine::{BasicPolicy, VisibilityEngine, VisibilityPolicy};
use dvc_model::{
    Element, ElementIdsPerLayer, ElementType, EngineOptions, Filter, Layer, LayerMode,
    PolicyKind, SelectionFilter, SelectionRef, TypeFilter,
};

fn elements(ids: &[&str]) -> Vec<Element> {
    ids.iter()
        .map(|id| Element::new(*id, ElementType::Class))
        .collect()
}

fn picking(id: &str, z_index: i64, mode: LayerMode, ids: &[&str]) -> Layer {
    Layer::new(id, format!("layer {id}"), z_index)
        .with_mode(mode)
        .with_filter(Filter::Selection(SelectionFilter {
            id: "1".to_string(),
            name: "filter 1".to_string(),
            elements: ids.iter().copied().map(SelectionRef::new).collect(),
        }))
}

fn sorted(mut ids: Vec<String>) -> Vec<String> {
    ids.sort();
    ids
}

fn advanced() -> VisibilityEngine {
    VisibilityEngine::default()
}

fn basic() -> VisibilityEngine {
    VisibilityEngine::new(EngineOptions::new().with_policy(PolicyKind::Basic))
}

// --- advanced policy ---

#[test]
fn hide_layer_with_priority_hides_contested_element() {
    let layers = vec![
        picking("hide", 1, LayerMode::Hide, &["2"]),
        picking("show", 2, LayerMode::Show, &["1", "2", "3"]),
    ];
    let resolution = advanced().resolve(&elements(&["1", "2", "3", "4"]), &layers);
    assert_eq!(sorted(resolution.visible.clone()), vec!["1", "3", "4"]);
    assert!(!resolution.is_visible("2"));
    assert_eq!(resolution.hidden(&elements(&["1", "2", "3", "4"])), vec!["2"]);
}

#[test]
fn all_active_show_layers_show_everything() {
    let layers = vec![
        picking("1", 1, LayerMode::Show, &["1", "2"]),
        picking("2", 2, LayerMode::Show, &["3"]),
    ];
    let resolution = advanced().resolve(&elements(&["1", "2", "3", "4"]), &layers);
    assert_eq!(sorted(resolution.visible), vec!["1", "2", "3", "4"]);
}

#[test]
fn all_active_hide_layers_hide_what_they_claim() {
    let layers = vec![
        picking("1", 1, LayerMode::Hide, &["1", "2"]),
        picking("2", 2, LayerMode::Hide, &["3", "4"]),
    ];
    let resolution = advanced().resolve(&elements(&["1", "2", "3", "4"]), &layers);
    assert!(resolution.visible.is_empty());
}

#[test]
fn no_active_layer_shows_everything() {
    let layers = vec![
        picking("1", 1, LayerMode::Hide, &["1", "2"]).with_active(false),
        picking("2", 2, LayerMode::Hide, &["3", "4"]).with_active(false),
    ];
    let resolution = advanced().resolve(&elements(&["1", "2", "3", "4"]), &layers);
    assert_eq!(resolution.visible, vec!["1", "2", "3", "4"]);
}

#[test]
fn lowest_active_z_index_decides() {
    let layers = vec![
        picking("1", 1, LayerMode::Hide, &["2"]),
        picking("2", 2, LayerMode::Show, &["1", "2", "3"]),
        picking("3", 3, LayerMode::Hide, &["3", "4"]),
    ];
    let resolution = advanced().resolve(&elements(&["1", "2", "3", "4"]), &layers);
    assert_eq!(sorted(resolution.visible), vec!["1", "3"]);
}

#[test]
fn inactive_higher_priority_layer_lets_claims_fall_through() {
    let layers = vec![
        picking("off", 0, LayerMode::Hide, &["1"]).with_active(false),
        picking("hide", 1, LayerMode::Hide, &["1", "2"]),
    ];
    let resolution = advanced().resolve(&elements(&["1", "2", "3"]), &layers);
    assert_eq!(resolution.visible, vec!["3", "1"]);
}

#[test]
fn advanced_output_order_is_shown_then_default_then_fall_through() {
    let layers = vec![
        picking("off", 0, LayerMode::Show, &["4"]).with_active(false),
        picking("show", 1, LayerMode::Show, &["3", "1"]),
    ];
    let resolution = advanced().resolve(&elements(&["1", "2", "3", "4"]), &layers);
    assert_eq!(resolution.visible, vec!["1", "3", "2", "4"]);
}

#[test]
fn zero_layers_show_every_element() {
    let resolution = advanced().resolve(&elements(&["1", "2", "3"]), &[]);
    assert_eq!(resolution.per_layer.default, vec!["1", "2", "3"]);
    assert_eq!(resolution.visible, vec!["1", "2", "3"]);
}

#[test]
fn type_layer_hides_class_with_members() {
    let forest = vec![
        Element::new("c", ElementType::Class)
            .with_name("Order")
            .with_children(vec![Element::new("a", ElementType::OwnedAttribute)]),
        Element::new("i", ElementType::Interface).with_name("Priced"),
    ];
    let layer = Layer::new("classes", "Classes", 0)
        .with_mode(LayerMode::Hide)
        .with_filter(Filter::Type(TypeFilter {
            id: "t".to_string(),
            name: "classes".to_string(),
            types: vec![ElementType::Class],
        }));
    let resolution = advanced().resolve(&forest, &[layer]);
    assert_eq!(resolution.visible, vec!["i"]);
}

#[test]
fn resolution_serializes_buckets_and_visible_ids() {
    let layers = vec![picking("L1", 1, LayerMode::Hide, &["2"])];
    let resolution = advanced().resolve(&elements(&["1", "2"]), &layers);
    let value = serde_json::to_value(&resolution).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "elementIdsPerLayer": {"L1": ["2"], "default": ["1"]},
            "visible": ["1"]
        })
    );
}

// --- basic policy ---

#[test]
fn basic_policy_returns_ids_of_active_layers() {
    let layers = vec![
        Layer::new("1", "layer 1", 1),
        Layer::new("2", "layer 1", 1).with_active(false),
    ];
    let mut buckets = ElementIdsPerLayer::new();
    buckets.insert_layer("1", vec!["2".to_string(), "3".to_string()]);
    buckets.insert_layer("2", vec!["1".to_string(), "4".to_string(), "5".to_string()]);
    assert_eq!(basic().visible_ids(&buckets, &layers), vec!["2", "3"]);
}

#[test]
fn basic_policy_without_layers_or_buckets_is_empty() {
    let mut buckets = ElementIdsPerLayer::new();
    buckets.insert_layer("1", vec!["2".to_string(), "3".to_string()]);
    assert!(basic().visible_ids(&buckets, &[]).is_empty());

    let layers = vec![Layer::new("1", "layer 1", 1)];
    assert!(basic().visible_ids(&ElementIdsPerLayer::new(), &layers).is_empty());

    let inactive = vec![Layer::new("1", "layer 1", 1).with_active(false)];
    assert!(basic().visible_ids(&buckets, &inactive).is_empty());
}

#[test]
fn basic_policy_ignores_hide_mode() {
    let layers = vec![picking("L", 0, LayerMode::Hide, &["1"])];
    let resolution = basic().resolve(&elements(&["1", "2"]), &layers);
    assert_eq!(resolution.visible, vec!["2", "1"]);
}

#[test]
fn legacy_options_reproduce_inclusion_only_engine() {
    let engine = VisibilityEngine::new(EngineOptions::legacy());
    assert_eq!(engine.policy().kind(), PolicyKind::Basic);
    let layers = vec![
        picking("low", 1, LayerMode::Show, &["1"]),
        picking("high", 2, LayerMode::Show, &["1", "2"]).with_active(false),
    ];
    let resolution = engine.resolve(&elements(&["1", "2", "3"]), &layers);
    assert_eq!(resolution.per_layer.layer("high"), ["1", "2"]);
    assert!(resolution.per_layer.layer("low").is_empty());
    assert_eq!(resolution.visible, vec!["3"]);
}

#[test]
fn custom_policy_can_be_injected() {
    let engine = VisibilityEngine::with_policy(EngineOptions::default(), Box::new(BasicPolicy));
    assert_eq!(engine.policy().kind(), PolicyKind::Basic);
    assert_eq!(engine.options().policy, PolicyKind::Advanced);
}
