// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Patchbay configuration system.

use patchbay_config::diagnostic::{ConfigError, suggest_key};
use patchbay_config::{
    Config, PLUGINS_KEY, load_and_validate, load_and_validate_str, load_config,
    load_config_from_path, load_config_from_str, save_config,
};
use serde_json::json;
use serial_test::serial;

/// Valid TOML with plugin-namespaced keys deserializes successfully.
#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
PLUGINS = ["discovery", "mfe"]
MFE_HOST = "apps.local.overhang.io"
MFE_PORT = 2000
DISCOVERY_MYSQL_DATABASE = "discovery"

[MFE_EXTRA]
theme = "dark"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.enabled_plugins().unwrap(), vec!["discovery", "mfe"]);
    assert_eq!(
        config.get("MFE_HOST"),
        Some(&json!("apps.local.overhang.io"))
    );
    assert_eq!(config.get("MFE_PORT"), Some(&json!(2000)));
    assert_eq!(config.get("MFE_EXTRA"), Some(&json!({"theme": "dark"})));
}

/// Missing config file under the root yields an empty configuration.
#[test]
#[serial]
fn missing_config_file_silently_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(dir.path()).expect("missing file should be skipped");
    assert!(config.enabled_plugins().unwrap().is_empty());
}

/// `PATCHBAY_PLUGINS` overrides the list stored in config.toml, keeping key case.
#[test]
#[serial]
fn env_var_overrides_plugins() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "PLUGINS = [\"alpha\"]\nALPHA_HOST = \"from-toml\"\n").unwrap();

    // SAFETY: guarded by #[serial]; no other test thread touches the environment.
    unsafe {
        std::env::set_var("PATCHBAY_PLUGINS", r#"["alpha", "beta"]"#);
        std::env::set_var("PATCHBAY_ALPHA_HOST", "from-env");
    }
    let result = load_config_from_path(&path);
    unsafe {
        std::env::remove_var("PATCHBAY_PLUGINS");
        std::env::remove_var("PATCHBAY_ALPHA_HOST");
    }

    let config = result.expect("env overrides should merge");
    assert_eq!(config.enabled_plugins().unwrap(), vec!["alpha", "beta"]);
    assert_eq!(config.get("ALPHA_HOST"), Some(&json!("from-env")));
}

/// Figment layering can also be driven directly, as the CLI does for overrides.
#[test]
fn figment_merge_overrides_key() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::string("ALPHA_HOST = \"from-toml\""))
        .merge(("ALPHA_HOST", "override"))
        .extract()
        .expect("should merge override");

    assert_eq!(config.get("ALPHA_HOST"), Some(&json!("override")));
}

#[test]
fn load_and_validate_accepts_plugin_list() {
    let config = load_and_validate_str("PLUGINS = [\"alpha\"]").expect("should validate");
    assert_eq!(config.enabled_plugins().unwrap(), vec!["alpha"]);
}

#[test]
fn load_and_validate_rejects_scalar_plugins() {
    let errors = load_and_validate_str("PLUGINS = \"alpha\"").unwrap_err();
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key == PLUGINS_KEY))
    );
}

#[test]
fn load_and_validate_reports_syntax_errors() {
    let errors = load_and_validate_str("PLUGINS = [\"alpha\"").unwrap_err();
    assert_eq!(errors.len(), 1);
}

#[test]
#[serial]
fn saved_config_round_trips_through_root() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::new();
    config.set(PLUGINS_KEY, json!(["alpha"]));
    config.set("ALPHA_FLAGS", json!({"debug": true}));
    save_config(&dir.path().join("config.toml"), &config).unwrap();

    let loaded = load_and_validate(dir.path()).expect("saved config should load");
    assert_eq!(loaded, config);
}

#[test]
fn diagnostic_suggests_installed_plugin() {
    assert_eq!(
        suggest_key("discovry", &["discovery", "ecommerce"]),
        Some("discovery".to_string())
    );
}

#[test]
fn config_error_implements_diagnostic() {
    use miette::Diagnostic;

    let err = ConfigError::unknown_plugin("ecommrce", &["ecommerce"]);
    let code = err.code().map(|c| c.to_string());
    assert_eq!(code.as_deref(), Some("patchbay::plugins::not_installed"));
}

#[test]
fn config_error_renders_with_miette() {
    use miette::GraphicalReportHandler;

    let err = ConfigError::unknown_plugin("ecommrce", &["ecommerce"]);
    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &err)
        .expect("should render");
    assert!(buf.contains("ecommrce"));
    assert!(buf.contains("did you mean `ecommerce`"));
}
