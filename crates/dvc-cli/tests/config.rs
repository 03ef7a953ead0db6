//! Integration tests for configuration loading and command line overrides.

use dvc_cli::config::{Config, DEFAULT_CONFIG_FILE, EngineOverrides};
use dvc_model::{EngineOptions, FilterCombination, PolicyKind, ZOrder};
use tempfile::tempdir;

#[test]
fn empty_file_gives_defaults() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config.engine, EngineOptions::default());
}

#[test]
fn engine_table_sets_options() {
    let config = Config::from_toml_str(
        r#"
        [engine]
        z_order = "descending"
        policy = "basic"
        "#,
    )
    .unwrap();
    assert_eq!(config.engine.z_order, ZOrder::Descending);
    assert_eq!(config.engine.policy, PolicyKind::Basic);
    assert_eq!(config.engine.filter_combination, FilterCombination::All);
}

#[test]
fn unknown_values_are_rejected() {
    assert!(Config::from_toml_str("[engine]\npolicy = \"loud\"").is_err());
    assert!(Config::from_toml_str("[renderer]\nwidth = 3").is_err());
}

#[test]
fn missing_default_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let config = Config::load(None, dir.path()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn default_file_in_directory_is_used() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join(DEFAULT_CONFIG_FILE),
        "[engine]\nfilter_combination = \"first_two\"\n",
    )
    .unwrap();
    let config = Config::load(None, dir.path()).unwrap();
    assert_eq!(config.engine.filter_combination, FilterCombination::FirstTwo);
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("other.toml");
    let error = Config::load(Some(&missing), dir.path()).unwrap_err();
    assert!(format!("{error:#}").contains("read configuration"));
}

#[test]
fn overrides_win_over_file_values() {
    let file = EngineOptions::new().with_policy(PolicyKind::Basic);
    let overrides = EngineOverrides {
        policy: Some(PolicyKind::Advanced),
        ..EngineOverrides::default()
    };
    let options = overrides.apply(file);
    assert_eq!(options.policy, PolicyKind::Advanced);
    assert_eq!(options.z_order, ZOrder::Ascending);
}

#[test]
fn legacy_preset_applies_before_individual_overrides() {
    let overrides = EngineOverrides {
        legacy: true,
        z_order: Some(ZOrder::Ascending),
        ..EngineOverrides::default()
    };
    let options = overrides.apply(EngineOptions::default());
    assert_eq!(options.z_order, ZOrder::Ascending);
    assert_eq!(options.filter_combination, FilterCombination::FirstTwo);
    assert_eq!(options.policy, PolicyKind::Basic);
}

#[test]
fn no_overrides_keep_file_values() {
    let file = EngineOptions::legacy();
    assert_eq!(EngineOverrides::default().apply(file), file);
}
