//! Configuration options for the visibility engine.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Order in which layers claim elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZOrder {
    /// Lower `zIndex` claims first and wins contested elements.
    #[default]
    Ascending,
    /// Higher `zIndex` claims first (older engine generation).
    Descending,
}

/// How the filters of one layer are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCombination {
    /// Intersection of every filter.
    #[default]
    All,
    /// Intersection of the first two filters only; later filters are ignored.
    FirstTwo,
}

/// Strategy that turns per-layer buckets into the visible id set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Show/hide typed layers; the highest-priority active layer decides.
    #[default]
    Advanced,
    /// Inclusion-only layers; active layers add their elements.
    Basic,
}

/// Options controlling layer resolution and visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub z_order: ZOrder,
    pub filter_combination: FilterCombination,
    pub policy: PolicyKind,
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options reproducing the inclusion-only engine generation.
    pub fn legacy() -> Self {
        Self {
            z_order: ZOrder::Descending,
            filter_combination: FilterCombination::FirstTwo,
            policy: PolicyKind::Basic,
        }
    }

    pub fn with_z_order(mut self, z_order: ZOrder) -> Self {
        self.z_order = z_order;
        self
    }

    pub fn with_filter_combination(mut self, combination: FilterCombination) -> Self {
        self.filter_combination = combination;
        self
    }

    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }
}

impl FromStr for ZOrder {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascending" | "asc" => Ok(ZOrder::Ascending),
            "descending" | "desc" => Ok(ZOrder::Descending),
            _ => Err(ModelError::UnknownOption {
                option: "z_order",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for FilterCombination {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "all" => Ok(FilterCombination::All),
            "first_two" => Ok(FilterCombination::FirstTwo),
            _ => Err(ModelError::UnknownOption {
                option: "filter_combination",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "advanced" => Ok(PolicyKind::Advanced),
            "basic" => Ok(PolicyKind::Basic),
            _ => Err(ModelError::UnknownOption {
                option: "policy",
                value: s.to_string(),
            }),
        }
    }
}
