use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::filter::Filter;

/// Identifier of a layer, unique within a layer store.
pub type LayerId = String;

/// Key of the bucket holding elements no layer claimed.
pub const DEFAULT_BUCKET: &str = "default";

/// Whether an active layer shows or hides the elements it claims.
///
/// Documents from the inclusion-only schema carry no mode; those layers
/// deserialize as [`LayerMode::Show`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerMode {
    #[default]
    Show,
    Hide,
}

impl LayerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerMode::Show => "show",
            LayerMode::Hide => "hide",
        }
    }
}

impl fmt::Display for LayerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayerMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "show" => Ok(LayerMode::Show),
            "hide" => Ok(LayerMode::Hide),
            _ => Err(ModelError::UnknownLayerMode(s.to_string())),
        }
    }
}

/// An ordered, toggle-able grouping of diagram elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    /// Inactive layers take no part in visibility decisions.
    #[serde(alias = "visible")]
    pub active: bool,
    /// Priority key. Ties keep input order.
    pub z_index: i64,
    #[serde(rename = "type", default)]
    pub mode: LayerMode,
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_class: Option<String>,
}

impl Layer {
    /// Creates an active, filter-less show layer.
    pub fn new(id: impl Into<LayerId>, name: impl Into<String>, z_index: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            active: true,
            z_index,
            mode: LayerMode::Show,
            filters: Vec::new(),
            group_id: None,
            style_class: None,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: LayerMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn filter(&self, filter_id: &str) -> Option<&Filter> {
        self.filters.iter().find(|filter| filter.id() == filter_id)
    }

    pub fn filter_mut(&mut self, filter_id: &str) -> Option<&mut Filter> {
        self.filters
            .iter_mut()
            .find(|filter| filter.id() == filter_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_layer_reads_visible_and_defaults_to_show() {
        let json = r#"{"id":"1","name":"Layer 1","visible":false,"zIndex":0,"filters":[]}"#;
        let layer: Layer = serde_json::from_str(json).unwrap();
        assert!(!layer.active);
        assert_eq!(layer.mode, LayerMode::Show);
        assert_eq!(layer.z_index, 0);
    }

    #[test]
    fn layer_serializes_camel_case_fields() {
        let layer = Layer::new("l1", "Hidden details", 3).with_mode(LayerMode::Hide);
        let value = serde_json::to_value(&layer).unwrap();
        assert_eq!(value["zIndex"], 3);
        assert_eq!(value["type"], "hide");
        assert_eq!(value["active"], true);
        assert!(value.get("groupId").is_none());
    }

    #[test]
    fn layer_mode_parse() {
        assert_eq!("Hide".parse::<LayerMode>(), Ok(LayerMode::Hide));
        assert!("blend".parse::<LayerMode>().is_err());
    }
}
