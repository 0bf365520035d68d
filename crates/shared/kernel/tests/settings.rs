use ggp_kernel::{ConfigError, GgConstants};
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

// SAFETY: tests touching the process environment run serially.
#[allow(unsafe_code)]
fn set_env(key: &str, value: &str) {
    unsafe { std::env::set_var(key, value) };
}

#[allow(unsafe_code)]
fn remove_env(key: &str) {
    unsafe { std::env::remove_var(key) };
}

#[test]
#[serial]
fn settings_file_overrides_selected_constants() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("provisioner.toml");
    fs::write(&path, "build_directory = \"dist\"\nroot_ca_name = \"ca.pem\"\n")?;

    let constants = GgConstants::load(&path)?;
    assert_eq!(constants.build_directory(), "dist");
    assert_eq!(constants.root_ca_name(), "ca.pem");
    assert_eq!(constants.core_private_key_name(), "core.key");
    Ok(())
}

#[test]
#[serial]
fn environment_overrides_settings_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("provisioner.toml");
    fs::write(&path, "build_directory = \"dist\"\n")?;

    set_env("GGP__BUILD_DIRECTORY", "from-env");
    let loaded = GgConstants::load(&path);
    remove_env("GGP__BUILD_DIRECTORY");

    assert_eq!(loaded?.build_directory(), "from-env");
    Ok(())
}

#[test]
#[serial]
fn missing_settings_file_fails() {
    let err = GgConstants::load("/nonexistent/provisioner.toml").unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}
