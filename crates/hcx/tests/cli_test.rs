//! Integration tests for the `hcx` CLI binary.
//!
//! Argument parsing, help output, completions and error exit codes run
//! without a connector; the admin round trip runs against a mock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `hcx` binary with env isolation.
///
/// Clears every variable the credential chain reads and points config
/// directories at `home`, so tests never touch the user's configuration.
fn hcx_cmd_in(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("hcx");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env("DBUS_SESSION_BUS_ADDRESS", "unix:path=/nonexistent")
        .env_remove("RUST_LOG")
        .env_remove("HCX_PROFILE")
        .env_remove("HCX_OUTPUT")
        .env_remove("HCX_URL")
        .env_remove("HCX_USER")
        .env_remove("HCX_PASSWORD")
        .env_remove("HCX_ADMIN_USER")
        .env_remove("HCX_ADMIN_PASSWORD")
        .env_remove("HCX_ALLOW_UNVERIFIED_SSL")
        .env_remove("VMC_API_TOKEN");
    cmd
}

fn hcx_cmd() -> assert_cmd::Command {
    hcx_cmd_in(Path::new("/tmp/hcx-cli-test-nonexistent"))
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = hcx_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_lists_operations() {
    hcx_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("site-pairing")
            .and(predicate::str::contains("network-profile"))
            .and(predicate::str::contains("compute-profile"))
            .and(predicate::str::contains("service-mesh"))
            .and(predicate::str::contains("l2-extension"))
            .and(predicate::str::contains("vmc")),
    );
}

#[test]
fn test_version_flag() {
    hcx_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hcx"));
}

#[test]
fn test_completions_bash() {
    hcx_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Argument errors ─────────────────────────────────────────────────

#[test]
fn test_invalid_output_format() {
    let output = hcx_cmd()
        .args(["--output", "table", "location", "show"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("possible values") || text.contains("invalid value"), "{text}");
}

#[test]
fn test_sddc_needs_id_or_name() {
    let output = hcx_cmd().args(["vmc", "activate"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_subcommands_exist() {
    hcx_cmd()
        .args(["site-pairing", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("create")
                .and(predicate::str::contains("show"))
                .and(predicate::str::contains("delete")),
        );
    hcx_cmd()
        .args(["vmc", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("activate").and(predicate::str::contains("deactivate")));
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn test_missing_url_is_a_config_error() {
    hcx_cmd()
        .args(["site-pairing", "show", "https://remote.example"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("HCX_URL"));
}

#[test]
fn test_url_without_credentials() {
    hcx_cmd()
        .env("HCX_URL", "https://hcx.example")
        .args(["site-pairing", "show", "https://remote.example"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No credentials"));
}

#[test]
fn test_unknown_profile() {
    hcx_cmd()
        .args(["--profile", "nowhere", "location", "show"])
        .assert()
        .code(9)
        .stderr(predicate::str::contains("nowhere"));
}

#[test]
fn test_config_show_no_config() {
    hcx_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn test_config_init_writes_profile() {
    let home = tempfile::tempdir().unwrap();
    hcx_cmd_in(home.path())
        .args([
            "config",
            "init",
            "--name",
            "lab",
            "--url",
            "https://hcx.lab.local",
            "--username",
            "administrator@vsphere.local",
        ])
        .assert()
        .success();

    let written = std::fs::read_to_string(home.path().join("hcx/config.toml")).unwrap();
    assert!(written.contains("default_profile = \"lab\""), "{written}");
    assert!(written.contains("url = \"https://hcx.lab.local\""), "{written}");

    hcx_cmd_in(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[profiles.lab]"));
}

// ── Against a mock connector ────────────────────────────────────────

fn write_profile(home: &Path, server: &MockServer) {
    let dir = home.join("hcx");
    std::fs::create_dir_all(&dir).unwrap();
    let config = format!(
        "default_profile = \"mock\"\n\n\
         [profiles.mock]\n\
         url = \"{uri}\"\n\
         admin_url = \"{uri}\"\n\
         admin_username = \"admin\"\n\
         admin_password = \"admin-pass\"\n",
        uri = server.uri()
    );
    std::fs::write(dir.join("config.toml"), config).unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_location_show_as_yaml() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/global/config/location"))
        .and(basic_auth("admin", "admin-pass"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "city": "Paris",
            "country": "France",
            "cityAscii": "Paris",
            "province": "Ile-de-France",
            "latitude": 48.85,
            "longitude": 2.35
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    write_profile(home.path(), &server);
    let home_path = home.path().to_path_buf();

    let output = tokio::task::spawn_blocking(move || {
        hcx_cmd_in(&home_path)
            .args(["--output", "yaml", "location", "show"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(stdout.contains("city: Paris"), "{stdout}");
    assert!(stdout.contains("cityAscii: Paris"), "{stdout}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_admin_rejection_maps_to_auth_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/global/config/location"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    write_profile(home.path(), &server);
    let home_path = home.path().to_path_buf();

    let output = tokio::task::spawn_blocking(move || {
        hcx_cmd_in(&home_path)
            .args(["location", "show"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(output.status.code(), Some(3), "{}", combined_output(&output));
}
