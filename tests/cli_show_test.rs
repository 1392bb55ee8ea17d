//! Integration tests for `guicfg show` and `guicfg url`.
//!
//! These drive the binary with real environment variables, set per-command.

mod common;

use common::{TestEnv, parse_json};
use predicates::prelude::*;

// ============================================================================
// Defaults and stored values
// ============================================================================

#[test]
fn test_show_without_config_file_uses_defaults() {
    let env = TestEnv::new();

    let output = env.guicfg().arg("show").assert().success();
    let json = parse_json(&output.get_output().stdout);

    assert_eq!(json["address"]["value"], "127.0.0.1:8384");
    assert_eq!(json["address"]["source"], "default");
    assert_eq!(json["use_tls"]["value"], false);
    assert_eq!(json["base_url"], "http://127.0.0.1:8384/");
}

#[test]
fn test_no_subcommand_defaults_to_show() {
    let env = TestEnv::new();

    env.guicfg()
        .assert()
        .success()
        .stdout(predicate::str::contains("\"base_url\""));
}

#[test]
fn test_show_reads_stored_values() {
    let env = TestEnv::new();
    env.write_config(
        r#"
address "0.0.0.0:8384"
use-tls #true
api-key "stored-key-0123456789"
"#,
    );

    let output = env.guicfg().arg("show").assert().success();
    let json = parse_json(&output.get_output().stdout);

    assert_eq!(json["address"]["value"], "0.0.0.0:8384");
    assert_eq!(json["address"]["source"], "config");
    assert_eq!(json["use_tls"]["value"], true);
    assert_eq!(json["api_key"]["value"], "stor...6789");
    assert_eq!(json["base_url"], "https://127.0.0.1:8384/");
}

#[test]
fn test_show_reveal_prints_full_key() {
    let env = TestEnv::new();
    env.write_config("api-key \"stored-key-0123456789\"\n");

    let output = env.guicfg().args(["show", "--reveal"]).assert().success();
    let json = parse_json(&output.get_output().stdout);

    assert_eq!(json["api_key"]["value"], "stored-key-0123456789");
}

#[test]
fn test_show_human_output() {
    let env = TestEnv::new();

    env.guicfg()
        .args(["-H", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Address:  127.0.0.1:8384 (default)"))
        .stdout(predicate::str::contains("URL:      http://127.0.0.1:8384/"))
        .stdout(predicate::str::contains("API key:  (none)"));
}

// ============================================================================
// Environment overrides
// ============================================================================

#[test]
fn test_bare_address_override_forces_plain_http() {
    let env = TestEnv::new();
    env.write_config("use-tls #true\n");

    let output = env
        .guicfg()
        .arg("show")
        .env("GUI_ADDRESS_OVERRIDE", "192.0.2.1:9000")
        .assert()
        .success();
    let json = parse_json(&output.get_output().stdout);

    assert_eq!(json["address"]["value"], "192.0.2.1:9000");
    assert_eq!(json["address"]["source"], "env:GUI_ADDRESS_OVERRIDE");
    assert_eq!(json["use_tls"]["value"], false);
}

#[test]
fn test_https_address_override() {
    let env = TestEnv::new();

    let output = env
        .guicfg()
        .arg("show")
        .env("GUI_ADDRESS_OVERRIDE", "https://192.0.2.1:9000/")
        .assert()
        .success();
    let json = parse_json(&output.get_output().stdout);

    assert_eq!(json["address"]["value"], "192.0.2.1:9000");
    assert_eq!(json["use_tls"]["value"], true);
    assert_eq!(json["base_url"], "https://192.0.2.1:9000/");
}

#[test]
fn test_malformed_override_is_passed_through() {
    let env = TestEnv::new();

    let output = env
        .guicfg()
        .arg("show")
        .env("GUI_ADDRESS_OVERRIDE", "not a valid url/with space")
        .assert()
        .success();
    let json = parse_json(&output.get_output().stdout);

    assert_eq!(json["address"]["value"], "not a valid url/with space");
}

#[test]
fn test_malformed_override_warns_on_stderr() {
    let env = TestEnv::new();

    env.guicfg()
        .arg("url")
        .env("GUI_ADDRESS_OVERRIDE", "not a valid url/with space")
        .assert()
        .success()
        .stderr(predicate::str::contains("not a valid URL"));
}

#[test]
fn test_empty_override_is_ignored() {
    let env = TestEnv::new();
    env.write_config("address \"10.1.1.1:8080\"\n");

    let output = env
        .guicfg()
        .arg("show")
        .env("GUI_ADDRESS_OVERRIDE", "")
        .env("GUI_APIKEY_OVERRIDE", "")
        .assert()
        .success();
    let json = parse_json(&output.get_output().stdout);

    assert_eq!(json["address"]["value"], "10.1.1.1:8080");
    assert_eq!(json["api_key"]["source"], "config");
}

#[test]
fn test_api_key_override() {
    let env = TestEnv::new();
    env.write_config("api-key \"stored\"\n");

    let output = env
        .guicfg()
        .args(["show", "--reveal"])
        .env("GUI_APIKEY_OVERRIDE", "secret")
        .assert()
        .success();
    let json = parse_json(&output.get_output().stdout);

    assert_eq!(json["api_key"]["value"], "secret");
    assert_eq!(json["api_key"]["source"], "env:GUI_APIKEY_OVERRIDE");
}

// ============================================================================
// Base URL canonicalization
// ============================================================================

fn url_for_address(address: &str) -> String {
    let env = TestEnv::new();
    env.write_config(&format!("address \"{}\"\n", address));

    let output = env.guicfg().args(["-H", "url"]).assert().success();
    String::from_utf8(output.get_output().stdout.clone())
        .unwrap()
        .trim()
        .to_string()
}

#[test]
fn test_url_empty_host() {
    assert_eq!(url_for_address(":8384"), "http://127.0.0.1:8384/");
}

#[test]
fn test_url_ipv4_wildcard() {
    assert_eq!(url_for_address("0.0.0.0:8384"), "http://127.0.0.1:8384/");
}

#[test]
fn test_url_ipv6_wildcard() {
    assert_eq!(url_for_address("[::]:8384"), "http://[::1]:8384/");
}

#[test]
fn test_url_json_output() {
    let env = TestEnv::new();

    let output = env
        .guicfg()
        .arg("url")
        .env("GUI_ADDRESS_OVERRIDE", ":7000")
        .assert()
        .success();
    let json = parse_json(&output.get_output().stdout);

    assert_eq!(json["url"], "http://127.0.0.1:7000/");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_invalid_config_file_fails() {
    let env = TestEnv::new();
    env.write_config("address \"unterminated\n");

    env.guicfg()
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"error\""));
}
