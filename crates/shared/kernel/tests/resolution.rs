use ggp_kernel::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SUBSCRIPTIONS: &str = r#"
fromCloudSubscriptions = []
toCloudSubscriptions = ["telemetry"]
outputTopics = []
inputTopics = []
"#;

fn registry(root: &Path) -> GgConstants {
    GgConstants::builder().resource_root(root).build()
}

fn write_function_defaults(root: &Path, body: &str) {
    let dir = root.join("foundation");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("function.defaults.toml"), body).unwrap();
}

#[test]
fn isolation_mode_true_means_containerized() {
    let temp = TempDir::new().unwrap();
    write_function_defaults(temp.path(), &format!("[conf]\ngreengrassContainer = true\n{SUBSCRIPTIONS}"));

    let constants = registry(temp.path());
    let mode = GgVariables::new(&constants).default_function_isolation_mode().unwrap();
    assert_eq!(mode, IsolationMode::ContainerizedExecution);
}

#[test]
fn isolation_mode_false_means_direct_execution() {
    let temp = TempDir::new().unwrap();
    write_function_defaults(temp.path(), "[conf]\ngreengrassContainer = false\n");

    let constants = registry(temp.path());
    let mode = GgVariables::new(&constants).default_function_isolation_mode().unwrap();
    assert_eq!(mode, IsolationMode::DirectExecution);
}

#[test]
fn isolation_mode_fails_when_switch_is_absent() {
    let temp = TempDir::new().unwrap();
    write_function_defaults(temp.path(), &format!("[conf]\n{SUBSCRIPTIONS}"));

    let constants = registry(temp.path());
    let err = GgVariables::new(&constants).default_function_isolation_mode().unwrap_err();
    assert!(matches!(err, ConfigError::Config { .. }));
    assert!(err.to_string().contains("conf.greengrassContainer"));
}

#[test]
fn isolation_mode_rejects_values_that_are_not_booleans() {
    for value in ["1", "\"yes\"", "\"true\""] {
        let temp = TempDir::new().unwrap();
        write_function_defaults(temp.path(), &format!("[conf]\ngreengrassContainer = {value}\n"));

        let constants = registry(temp.path());
        let err = GgVariables::new(&constants).default_function_isolation_mode().unwrap_err();
        assert!(matches!(err, ConfigError::Config { .. }), "{value} should be rejected");
        assert!(err.to_string().contains("conf.greengrassContainer"));
    }
}

#[test]
fn isolation_mode_uses_registry_key() {
    let temp = TempDir::new().unwrap();
    write_function_defaults(temp.path(), "[sandbox]\nenabled = false\n");

    let constants = GgConstants::builder()
        .resource_root(temp.path())
        .conf_greengrass_container("sandbox.enabled")
        .build();
    let mode = GgVariables::new(&constants).default_function_isolation_mode().unwrap();
    assert_eq!(mode, IsolationMode::DirectExecution);
}

#[test]
fn missing_defaults_file_is_attributable() {
    let temp = TempDir::new().unwrap();
    let constants = registry(temp.path());
    let variables = GgVariables::new(&constants);

    let err = variables.connector_defaults().unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
    assert!(err.to_string().contains("connector.defaults.toml"));

    assert!(variables.function_defaults().is_err());
    assert!(variables.default_function_isolation_mode().is_err());
}

#[test]
fn malformed_defaults_file_fails() {
    let temp = TempDir::new().unwrap();
    write_function_defaults(temp.path(), "greengrassContainer = = true");

    let constants = registry(temp.path());
    let err = GgVariables::new(&constants).function_defaults().unwrap_err();
    assert!(matches!(err, ConfigError::Config { .. }));
}

#[test]
fn every_call_reparses_the_file() {
    let temp = TempDir::new().unwrap();
    write_function_defaults(temp.path(), "[conf]\ngreengrassContainer = true\n");

    let constants = registry(temp.path());
    let variables = GgVariables::new(&constants);
    assert_eq!(variables.default_function_isolation_mode().unwrap(), IsolationMode::ContainerizedExecution);

    write_function_defaults(temp.path(), "[conf]\ngreengrassContainer = false\n");
    assert_eq!(variables.default_function_isolation_mode().unwrap(), IsolationMode::DirectExecution);
}

#[test]
fn function_subscriptions_are_resolved() {
    let temp = TempDir::new().unwrap();
    write_function_defaults(temp.path(), &format!("[conf]\ngreengrassContainer = true\n{SUBSCRIPTIONS}"));

    let constants = registry(temp.path());
    let subs = GgVariables::new(&constants).function_defaults().unwrap().subscriptions().unwrap();
    assert_eq!(subs.to_cloud_subscriptions, ["telemetry"]);
    assert_eq!(subs.len(), 1);
}
