use serial_test::serial;
use std::fs;
use tempfile::tempdir;
use vanity_kernel::config::{ConfigError, load_app_config};

#[test]
#[serial]
fn loads_file_and_keeps_defaults_for_missing_keys() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("vanity.toml");
    fs::write(&path, "[engine]\nmax_iterations = 32\n\n[session]\nproduct = \"vanity-xl\"\n")?;

    let cfg = load_app_config(Some(&path))?;
    assert_eq!(cfg.engine.max_iterations, 32);
    assert!(cfg.engine.reject_hidden_choices);
    assert_eq!(cfg.session.product, "vanity-xl");
    assert_eq!(cfg.logging.level, "info");
    Ok(())
}

#[test]
#[serial]
fn explicit_missing_file_is_an_error() {
    let dir = tempdir().expect("temp dir");
    let err = load_app_config(Some(dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Config { .. }));
    assert_eq!(err.kind(), "Config");
}

#[test]
#[serial]
fn malformed_file_is_an_error() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("vanity.toml");
    fs::write(&path, "[engine]\nmax_iterations = \"many\"\n").expect("write config");

    assert!(load_app_config(Some(&path)).is_err());
}
