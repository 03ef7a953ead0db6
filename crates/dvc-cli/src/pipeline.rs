//! File-to-report steps shared by the `dvc` commands.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use dvc_engine::{PatternError, PatternMatcher, VisibilityEngine, VisibleElements, is_regex_pattern};
use dvc_model::{
    Element, ElementId, ElementIdsPerLayer, EngineOptions, Filter, Layer, all_element_ids,
    count_elements,
};

/// A model file holds either a bare element forest or `{ "elements": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ModelFile {
    Forest(Vec<Element>),
    Wrapped { elements: Vec<Element> },
}

pub fn parse_model(text: &str) -> Result<Vec<Element>> {
    let model: ModelFile = serde_json::from_str(text).context("parse model elements")?;
    Ok(match model {
        ModelFile::Forest(elements) | ModelFile::Wrapped { elements } => elements,
    })
}

pub fn load_model(path: &Path) -> Result<Vec<Element>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read model {}", path.display()))?;
    let elements =
        parse_model(&text).with_context(|| format!("load model {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        elements = count_elements(&elements),
        "loaded model"
    );
    Ok(elements)
}

/// Everything `dvc resolve` reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveReport {
    pub options: EngineOptions,
    pub element_ids_per_layer: ElementIdsPerLayer,
    pub visible: Vec<ElementId>,
    pub hidden: Vec<ElementId>,
    /// Set when `visible` was expanded with ancestors for rendering.
    pub with_ancestors: bool,
}

impl ResolveReport {
    pub fn total(&self) -> usize {
        self.visible.len() + self.hidden.len()
    }
}

pub fn resolve(
    elements: &[Element],
    layers: &[Layer],
    options: EngineOptions,
    with_ancestors: bool,
) -> ResolveReport {
    let engine = VisibilityEngine::new(options);
    let resolution = engine.resolve(elements, layers);
    let visible = if with_ancestors {
        VisibleElements::from_visible_ids(elements, &resolution.visible).ordered_ids(elements)
    } else {
        resolution.visible
    };
    let shown: HashSet<&str> = visible.iter().map(String::as_str).collect();
    let hidden = all_element_ids(elements)
        .into_iter()
        .filter(|id| !shown.contains(id.as_str()))
        .collect();
    ResolveReport {
        options,
        element_ids_per_layer: resolution.per_layer,
        visible,
        hidden,
        with_ancestors,
    }
}

/// A regex pattern that will silently match nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternWarning {
    pub layer_id: String,
    pub filter_id: String,
    pub pattern: String,
    pub error: PatternError,
}

pub fn pattern_warnings(layers: &[Layer]) -> Vec<PatternWarning> {
    let mut warnings = Vec::new();
    for layer in layers {
        for filter in &layer.filters {
            let Filter::Pattern(pattern) = filter else {
                continue;
            };
            if !is_regex_pattern(&pattern.pattern) {
                continue;
            }
            if let Err(error) = PatternMatcher::try_compile(&pattern.pattern) {
                warnings.push(PatternWarning {
                    layer_id: layer.id.clone(),
                    filter_id: pattern.id.clone(),
                    pattern: pattern.pattern.clone(),
                    error,
                });
            }
        }
    }
    warnings
}
