//! Integration tests for settings file IO.
//!
//! Exercises the load-or-create flow against a real (temporary) filesystem.

use macro_chain_config::{ChainSettings, ConfigError};
use std::fs;
use tempfile::TempDir;

fn temp_settings_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("macro-chain").join("settings.yaml")
}

#[test]
fn test_missing_file_creates_defaults() {
    let dir = TempDir::new().unwrap();
    let path = temp_settings_path(&dir);
    assert!(!path.exists());

    let settings = ChainSettings::load_from(&path).unwrap();
    assert_eq!(settings, ChainSettings::default());

    // The file now exists and parses back to the same settings.
    assert!(path.exists());
    let reloaded = ChainSettings::load_from(&path).unwrap();
    assert_eq!(reloaded, settings);
}

#[test]
fn test_save_and_reload_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = temp_settings_path(&dir);

    let settings = ChainSettings {
        liveness_grace_ms: 4200,
        legacy_run_bank: true,
    };
    settings.save_to(&path).unwrap();

    let reloaded = ChainSettings::load_from(&path).unwrap();
    assert_eq!(reloaded, settings);
}

#[test]
fn test_save_leaves_no_temp_file() {
    let dir = TempDir::new().unwrap();
    let path = temp_settings_path(&dir);

    ChainSettings::default().save_to(&path).unwrap();

    let entries: Vec<_> = fs::read_dir(path.parent().unwrap())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec!["settings.yaml"]);
}

#[test]
fn test_corrupt_yaml_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = temp_settings_path(&dir);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "liveness_grace_ms: [not a number").unwrap();

    let err = ChainSettings::load_from(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Parse(_))
    ));
}

#[test]
fn test_zero_grace_is_a_validation_error() {
    let dir = TempDir::new().unwrap();
    let path = temp_settings_path(&dir);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "liveness_grace_ms: 0").unwrap();

    let err = ChainSettings::load_from(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Validation(_))
    ));
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = temp_settings_path(&dir);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "legacy_run_bank: true\n").unwrap();

    let settings = ChainSettings::load_from(&path).unwrap();
    assert!(settings.legacy_run_bank);
    assert_eq!(settings.liveness_grace_ms, 2000);
}
