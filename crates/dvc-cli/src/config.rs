//! `dvc.toml` configuration.
//!
//! ```toml
//! [engine]
//! z_order = "ascending"            # or "descending"
//! filter_combination = "all"       # or "first_two"
//! policy = "advanced"              # or "basic"
//! ```
//!
//! Every key is optional. Command line flags win over file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use dvc_model::{EngineOptions, FilterCombination, PolicyKind, ZOrder};

/// File picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "dvc.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub engine: EngineOptions,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("parse configuration")
    }

    /// Loads `explicit` if given, else `dvc.toml` in `dir` when present,
    /// else the defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        let path: PathBuf = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = dir.join(DEFAULT_CONFIG_FILE);
                if !candidate.is_file() {
                    tracing::debug!("no configuration file, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("read configuration {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("load configuration {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}

/// Engine settings given on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOverrides {
    /// Start from the legacy preset before applying the other overrides.
    pub legacy: bool,
    pub z_order: Option<ZOrder>,
    pub filter_combination: Option<FilterCombination>,
    pub policy: Option<PolicyKind>,
}

impl EngineOverrides {
    pub fn apply(&self, options: EngineOptions) -> EngineOptions {
        let mut options = if self.legacy {
            EngineOptions::legacy()
        } else {
            options
        };
        if let Some(z_order) = self.z_order {
            options = options.with_z_order(z_order);
        }
        if let Some(combination) = self.filter_combination {
            options = options.with_filter_combination(combination);
        }
        if let Some(policy) = self.policy {
            options = options.with_policy(policy);
        }
        options
    }
}
