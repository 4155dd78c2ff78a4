//! CLI tests driving the curlbridge binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary isolated from the user's config directory
fn curlbridge(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("curlbridge").unwrap();
    cmd.env("CURLBRIDGE_CONFIG_DIR", config_dir.path()).env_remove("RUST_LOG");
    cmd
}

// =============================================================================
// validate
// =============================================================================

#[test]
fn test_validate_ok() {
    let dir = TempDir::new().unwrap();
    curlbridge(&dir)
        .args(["validate", "curl https://example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Command is valid"));
}

#[test]
fn test_validate_reports_all_violations() {
    let dir = TempDir::new().unwrap();
    curlbridge(&dir)
        .args(["validate", "ls"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("must start with 'curl'"))
        .stdout(predicate::str::contains("too short"));
}

// =============================================================================
// parse
// =============================================================================

#[test]
fn test_parse_prints_json() {
    let dir = TempDir::new().unwrap();
    let output = curlbridge(&dir)
        .args(["parse", "--compact", "curl -X POST -d 'a=1&b=2' https://x.com?q=1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["method"], "POST");
    assert_eq!(json["bodyType"], "url-encoded");
    assert_eq!(json["urlEncodedData"][1]["key"], "b");
    assert_eq!(json["queryParams"][0]["value"], "1");
}

#[test]
fn test_parse_from_stdin() {
    let dir = TempDir::new().unwrap();
    curlbridge(&dir)
        .args(["parse", "-"])
        .write_stdin("curl \\\n  https://example.com/a\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"url\": \"https://example.com/a\""));
}

#[test]
fn test_parse_without_url_fails() {
    let dir = TempDir::new().unwrap();
    curlbridge(&dir)
        .args(["parse", "curl -X GET -v"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No URL"));
}

#[test]
fn test_parse_rejects_invalid_command() {
    let dir = TempDir::new().unwrap();
    curlbridge(&dir)
        .args(["parse", "wget https://example.com"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("must start with 'curl'"));
}

// =============================================================================
// generate / resolve
// =============================================================================

fn write_fixtures(dir: &TempDir) -> std::path::PathBuf {
    let collection = dir.path().join("collection.json");
    std::fs::write(
        &collection,
        r#"{"id": "c1", "name": "Demo", "variables": [{"key": "base", "value": "https://local.test"}], "environmentId": "prod"}"#,
    )
    .unwrap();

    let envs = dir.path().join("secrets").join("environments");
    std::fs::create_dir_all(&envs).unwrap();
    std::fs::write(envs.join("prod.json"), r#"{"base": "https://prod.test", "token": "t0k"}"#).unwrap();
    collection
}

#[test]
fn test_generate_with_collection() {
    let dir = TempDir::new().unwrap();
    let collection = write_fixtures(&dir);

    curlbridge(&dir)
        .args(["generate", "--collection"])
        .arg(&collection)
        .write_stdin(r#"{"method": "GET", "url": "{{base}}/me", "headers": [{"key": "Authorization", "value": "Bearer {{token}}"}]}"#)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("curl https://prod.test/me -H 'Authorization: Bearer t0k'"));
}

#[test]
fn test_generate_multiline_without_collection() {
    let dir = TempDir::new().unwrap();
    let request = dir.path().join("request.json");
    std::fs::write(&request, r#"{"method": "DELETE", "url": "https://example.com/1", "followRedirects": false}"#).unwrap();

    curlbridge(&dir)
        .args(["generate", "--multiline", "--input"])
        .arg(&request)
        .assert()
        .success()
        .stdout("curl -X DELETE https://example.com/1 \\\n  --max-redirs 0\n");
}

#[test]
fn test_multiline_from_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[defaults]\nmultiline = true\n").unwrap();

    curlbridge(&dir)
        .args(["generate"])
        .write_stdin(r#"{"url": "https://example.com", "timeoutSeconds": 5}"#)
        .assert()
        .success()
        .stdout("curl https://example.com \\\n  --max-time 5 \\\n  -L\n");
}

#[test]
fn test_resolve_warns_on_unresolved() {
    let dir = TempDir::new().unwrap();
    let collection = write_fixtures(&dir);

    curlbridge(&dir)
        .args(["resolve", "{{base}}/{{nope}}", "--collection"])
        .arg(&collection)
        .assert()
        .success()
        .stdout("https://prod.test/{{nope}}\n")
        .stderr(predicate::str::contains("unresolved variables: nope"));
}

#[test]
fn test_resolve_with_broken_secret_file() {
    let dir = TempDir::new().unwrap();
    let collection = write_fixtures(&dir);
    std::fs::write(dir.path().join("secrets").join("environments").join("prod.json"), "{broken").unwrap();

    curlbridge(&dir)
        .args(["resolve", "{{base}}", "--collection"])
        .arg(&collection)
        .assert()
        .success()
        .stdout("https://local.test\n");
}
