// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the `patchbay` binary.
//!
//! Each test creates an isolated project root with plugin directories on
//! disk and runs the compiled binary against it. Tests are independent and
//! order-insensitive.

use std::process::{Command, Output};

use patchbay_test_utils::PluginDirFixture;

fn patchbay(fixture: &PluginDirFixture, args: &[&str]) -> Output {
    let data_home = fixture.root().join("xdg");
    Command::new(env!("CARGO_BIN_EXE_patchbay"))
        .arg("--root")
        .arg(fixture.root())
        .args(args)
        .env_remove("RUST_LOG")
        .env("HOME", &data_home)
        .env("XDG_DATA_HOME", &data_home)
        .output()
        .expect("failed to run patchbay")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn fixture_with_mfe() -> PluginDirFixture {
    let fixture = PluginDirFixture::new().unwrap();
    fixture
        .add_plugin(
            "mfe",
            r#"
[plugin]
name = "mfe"
version = "1.2.0"
templates = "templates"

[config.set]
HOST = "apps.local"

[config.defaults]
PORT = 8002

[patches]
caddyfile = "mfe.local { reverse_proxy mfe:8002 }"

[hooks]
init = ["lms", "mfe"]
"#,
        )
        .unwrap();
    fixture
}

// ---- Listing ----

#[test]
fn list_without_plugins() {
    let fixture = PluginDirFixture::new().unwrap();
    let output = patchbay(&fixture, &["plugins", "list"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("No plugins installed."));
}

#[test]
fn list_shows_installed_and_enabled_status() {
    let fixture = fixture_with_mfe();
    let before = patchbay(&fixture, &["plugins", "list"]);
    assert!(stdout(&before).contains("mfe"));
    assert!(stdout(&before).contains("installed"));

    assert!(patchbay(&fixture, &["plugins", "enable", "mfe"]).status.success());
    let after = patchbay(&fixture, &["plugins", "list"]);
    assert!(stdout(&after).contains("enabled"));
}

// ---- Enable / disable ----

#[test]
fn enable_persists_configuration() {
    let fixture = fixture_with_mfe();
    let output = patchbay(&fixture, &["plugins", "enable", "mfe"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Plugin mfe enabled"));

    let saved = std::fs::read_to_string(fixture.root().join("config.toml")).unwrap();
    let config = patchbay_config::load_config_from_str(&saved).unwrap();
    assert_eq!(config.enabled_plugins().unwrap(), vec!["mfe"]);
}

#[test]
fn enable_unknown_plugin_fails_without_writing() {
    let fixture = fixture_with_mfe();
    let output = patchbay(&fixture, &["plugins", "enable", "mef"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("not installed"));
    assert!(!fixture.root().join("config.toml").exists());
}

#[test]
fn disable_removes_plugin() {
    let fixture = fixture_with_mfe();
    fixture.write_config("PLUGINS = [\"mfe\"]\n").unwrap();

    let output = patchbay(&fixture, &["plugins", "disable", "mfe"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Plugin mfe disabled"));

    let saved = std::fs::read_to_string(fixture.root().join("config.toml")).unwrap();
    let config = patchbay_config::load_config_from_str(&saved).unwrap();
    assert!(config.enabled_plugins().unwrap().is_empty());
}

#[test]
fn disable_without_plugins_key_fails() {
    let fixture = fixture_with_mfe();
    let output = patchbay(&fixture, &["plugins", "disable", "mfe"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("PLUGINS"));
}

// ---- Inspection ----

#[test]
fn printroot_prints_templates_directory() {
    let fixture = fixture_with_mfe();
    let output = patchbay(&fixture, &["plugins", "printroot", "mfe"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let expected = fixture.plugins_dir().join("mfe").join("templates");
    assert_eq!(stdout(&output).trim_end(), expected.display().to_string());
}

#[test]
fn patches_and_hooks_reflect_enabled_plugins() {
    let fixture = fixture_with_mfe();
    let disabled = patchbay(&fixture, &["patches", "caddyfile"]);
    assert!(disabled.status.success());
    assert!(stdout(&disabled).is_empty());

    fixture.write_config("PLUGINS = [\"mfe\"]\n").unwrap();
    let patches = patchbay(&fixture, &["patches", "caddyfile"]);
    assert_eq!(
        stdout(&patches).trim_end(),
        "mfe.local { reverse_proxy mfe:8002 }"
    );

    let hooks = patchbay(&fixture, &["hooks", "init"]);
    assert_eq!(stdout(&hooks).trim_end(), "mfe: lms mfe");
}

#[test]
fn printvalue_applies_overlays_and_defaults() {
    let fixture = fixture_with_mfe();
    fixture.write_config("PLUGINS = [\"mfe\"]\n").unwrap();

    let host = patchbay(&fixture, &["config", "printvalue", "MFE_HOST"]);
    assert!(host.status.success(), "stderr: {}", stderr(&host));
    assert_eq!(stdout(&host).trim_end(), "apps.local");

    let port = patchbay(&fixture, &["config", "printvalue", "MFE_PORT"]);
    assert_eq!(stdout(&port).trim_end(), "8002");

    let missing = patchbay(&fixture, &["config", "printvalue", "NOPE"]);
    assert!(!missing.status.success());
}

#[test]
fn user_values_override_plugin_overlays() {
    let fixture = fixture_with_mfe();
    fixture
        .write_config("PLUGINS = [\"mfe\"]\nMFE_HOST = \"custom.host\"\n")
        .unwrap();
    let host = patchbay(&fixture, &["config", "printvalue", "MFE_HOST"]);
    assert_eq!(stdout(&host).trim_end(), "custom.host");
}

// ---- Official plugins ----

#[test]
fn official_plugin_shadows_directory_plugin() {
    let fixture = fixture_with_mfe();
    fixture
        .add_official("patchbaymfe", &PluginDirFixture::manifest("mfe", "9.0.0"))
        .unwrap();
    let output = patchbay(&fixture, &["plugins", "list"]);
    let out = stdout(&output);
    assert_eq!(out.lines().count(), 1);
    assert!(out.contains("9.0.0"));
    assert!(out.contains("official"));
}

// ---- Plugin commands ----

#[test]
#[cfg(unix)]
fn enabled_plugin_command_is_dispatched() {
    let fixture = PluginDirFixture::new().unwrap();
    fixture
        .add_plugin(
            "greet",
            r#"
[plugin]
name = "greet"
version = "0.1.0"

[command]
about = "Say hello"
exec = ["sh", "-c", "echo hello-$0"]
"#,
        )
        .unwrap();

    let disabled = patchbay(&fixture, &["greet", "world"]);
    assert!(!disabled.status.success());
    assert!(stderr(&disabled).contains("unrecognized command"));

    fixture.write_config("PLUGINS = [\"greet\"]\n").unwrap();
    let enabled = patchbay(&fixture, &["greet", "world"]);
    assert!(enabled.status.success(), "stderr: {}", stderr(&enabled));
    assert_eq!(stdout(&enabled).trim_end(), "hello-world");
}

#[test]
fn invalid_configuration_is_reported() {
    let fixture = PluginDirFixture::new().unwrap();
    fixture.write_config("PLUGINS = \"mfe\"\n").unwrap();
    let output = patchbay(&fixture, &["plugins", "list"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("PLUGINS"));
}
