//! Integration tests for the `around` binary
//!
//! None of these reach a backend: they cover configuration, token storage and
//! the failure paths that stop before a query is issued.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "AROUND_API_ROOT",
    "AROUND_AUTH_PREFIX",
    "AROUND_DEFAULT_RADIUS_KM",
    "AROUND_JITTER_DEGREES",
    "AROUND_GEOLOCATION_URL",
    "AROUND_HIGH_ACCURACY",
    "AROUND_GEO_TIMEOUT_MS",
    "AROUND_GEO_MAXIMUM_AGE_MS",
];

/// Run the binary inside `dir` with a clean AROUND_* environment
fn around(dir: &Path, args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_around"));
    command.current_dir(dir).args(args).env("RUST_LOG", "off");
    for var in ENV_VARS {
        command.env_remove(var);
    }
    command.output().expect("Failed to execute command")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

#[test]
fn test_config_json_lists_defaults() {
    let dir = TempDir::new().unwrap();

    let output = around(dir.path(), &["config", "--json"]);
    assert!(output.status.success(), "Command should succeed");

    let parsed = stdout_json(&output);
    assert_eq!(parsed["status"], "success");

    let values = &parsed["data"]["values"];
    assert_eq!(values["api_root"]["value"], "http://localhost:8080");
    assert_eq!(values["api_root"]["source"], "Default");
    assert_eq!(values["auth_prefix"]["value"], "Bearer");
    assert_eq!(values["default_radius_km"]["value"], "20 km");
    assert!(parsed["data"]["config_file"].is_null());
}

#[test]
fn test_config_file_env_and_flags_are_layered() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".around")).unwrap();
    std::fs::write(
        dir.path().join(".around").join("config.toml"),
        "api_root = \"http://file.test\"\nauth_prefix = \"Token\"\n",
    )
    .unwrap();

    let mut command = Command::new(env!("CARGO_BIN_EXE_around"));
    command
        .current_dir(dir.path())
        .args(["config", "--json", "--api-root", "http://flag.test"])
        .env("RUST_LOG", "off");
    for var in ENV_VARS {
        command.env_remove(var);
    }
    command.env("AROUND_DEFAULT_RADIUS_KM", "7.5");
    let output = command.output().unwrap();
    assert!(output.status.success());

    let values = stdout_json(&output)["data"]["values"].clone();
    assert_eq!(values["api_root"]["value"], "http://flag.test");
    assert_eq!(values["api_root"]["source"], "Cli");
    assert_eq!(values["auth_prefix"]["value"], "Token");
    assert_eq!(values["auth_prefix"]["source"], "File");
    assert_eq!(values["default_radius_km"]["value"], "7.5 km");
    assert_eq!(values["default_radius_km"]["source"], "Environment");
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();

    let output = around(dir.path(), &["config", "--config", "missing.toml"]);
    assert!(!output.status.success());
}

#[test]
fn test_token_is_stored_and_cleared() {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("session.json");
    let state_arg = state.to_str().unwrap();

    let output = around(dir.path(), &["token", "abc123", "--state", state_arg, "--json"]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["data"]["stored"], true);

    let content: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&state).unwrap()).unwrap();
    assert_eq!(content["TOKEN_KEY"], "abc123");

    let output = around(dir.path(), &["token", "--clear", "--state", state_arg, "--json"]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["data"]["stored"], false);
}

#[test]
fn test_nearby_without_token_fails() {
    let dir = TempDir::new().unwrap();

    let output = around(dir.path(), &["nearby"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No auth token"));
}

#[test]
fn test_nearby_without_location_fails_before_querying() {
    let dir = TempDir::new().unwrap();

    // Unroutable backend: a query attempt would surface as a transport error
    let output = around(
        dir.path(),
        &["nearby", "--token", "t", "--api-root", "http://127.0.0.1:9", "--json"],
    );
    assert!(!output.status.success());

    let parsed = stdout_json(&output);
    assert_eq!(parsed["status"], "error");
    assert_eq!(parsed["data"]["error_message"], "Location unknown. Retry geolocation first.");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Location unknown"));
}

#[test]
fn test_start_without_geolocation_reports_unsupported() {
    let dir = TempDir::new().unwrap();

    let output = around(dir.path(), &["start", "--token", "t", "--json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Your browser does not support geolocation!"));
}

#[test]
fn test_map_without_center_does_nothing() {
    let dir = TempDir::new().unwrap();

    let output = around(dir.path(), &["map", "--token", "t"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("nothing to refresh"));
}

#[test]
fn test_post_with_missing_image_fails() {
    let dir = TempDir::new().unwrap();

    let output = around(dir.path(), &["post", "missing.jpg", "-m", "hi", "--token", "t"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Image file not found"));
}
