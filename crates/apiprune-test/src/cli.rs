//! CLI regression tests for the `apiprune` binary.
//!
//! These tests invoke the binary as a subprocess to catch regressions in flag
//! names, exit codes and output formats that the library tests can't catch.
//!
//! Run with: `cargo test -p apiprune-test`
//! Requires the `apiprune` binary to be built first (`cargo build -p apiprune`).

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::fixtures::fixture_path;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Returns an assert_cmd Command wrapping the `apiprune` binary.
fn apiprune() -> Command {
    // cargo_bin is deprecated for custom build-dir setups; fine for standard workspace use.
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("apiprune")
        .expect("apiprune binary not found, run `cargo build -p apiprune` first");
    cmd.env_remove("RUST_LOG")
        .env_remove("APIPRUNE_LOG_LEVEL")
        .env_remove("APIPRUNE_LOG_FORMAT");
    cmd
}

/// Run `apiprune shake --spec <fixture> <extra>` and parse stdout as JSON.
fn shake_json(fixture: &str, extra: &[&str]) -> Value {
    let output = apiprune()
        .args(["shake", "--spec"])
        .arg(fixture_path(fixture))
        .args(extra)
        .output()
        .expect("failed to run apiprune");

    assert!(
        output.status.success(),
        "shake failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn keys(value: &Value) -> Vec<String> {
    value
        .as_object()
        .map(|object| object.keys().cloned().collect())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// apiprune shake
// ---------------------------------------------------------------------------

#[test]
fn shake_without_patterns_drops_only_unreachable_components() {
    let result = shake_json("catalog.yaml", &[]);

    assert_eq!(
        keys(&result["document"]["paths"]),
        vec!["/categories/{id}", "/products", "/health"]
    );
    assert_eq!(
        result["summary"],
        json!({
            "removedPaths": [],
            "removedSchemas": ["Unused"],
            "removedParameters": [],
            "removedResponses": [],
            "removedRequestBodies": [],
            "removedSecuritySchemes": ["apiKey"]
        })
    );
}

#[test]
fn shake_by_pattern_follows_schema_cycles() {
    let result = shake_json("catalog.yaml", &["--pattern", "^/categories"]);
    let document = &result["document"];

    assert_eq!(keys(&document["paths"]), vec!["/categories/{id}"]);
    assert_eq!(
        keys(&document["components"]),
        vec!["schemas", "parameters", "responses"]
    );
    assert_eq!(
        keys(&document["components"]["schemas"]),
        vec!["Category", "Product"]
    );

    let summary = &result["summary"];
    assert_eq!(summary["removedPaths"], json!(["/products", "/health"]));
    assert_eq!(summary["removedSchemas"], json!(["Unused"]));
    assert_eq!(summary["removedRequestBodies"], json!(["ProductInput"]));
    assert_eq!(
        summary["removedSecuritySchemes"],
        json!(["bearerAuth", "apiKey"])
    );
}

#[test]
fn shake_by_path_template_keeps_security_and_request_body() {
    let result = shake_json("catalog.yaml", &["--path", "/products"]);
    let components = &result["document"]["components"];

    assert_eq!(keys(&result["document"]["paths"]), vec!["/products"]);
    assert_eq!(keys(&components["schemas"]), vec!["Category", "Product"]);
    assert_eq!(keys(&components["requestBodies"]), vec!["ProductInput"]);
    assert_eq!(keys(&components["securitySchemes"]), vec!["bearerAuth"]);
    assert_eq!(result["summary"]["removedParameters"], json!(["CategoryId"]));
    assert_eq!(result["summary"]["removedResponses"], json!(["NotFound"]));
}

#[test]
fn shake_patterns_and_templates_combine() {
    let result = shake_json(
        "catalog.yaml",
        &["--pattern", "^/health$", "--path", "/products"],
    );
    assert_eq!(
        keys(&result["document"]["paths"]),
        vec!["/products", "/health"]
    );
    assert_eq!(result["summary"]["removedPaths"], json!(["/categories/{id}"]));
}

#[test]
fn shake_swagger_v2_uses_flat_sections() {
    let result = shake_json("petstore-v2.json", &["-p", "^/pets$"]);
    let document = &result["document"];

    assert!(document.get("components").is_none());
    assert_eq!(keys(&document["definitions"]), vec!["Pet", "Error"]);
    // api_key is required globally, petstore_auth by the kept operation.
    assert_eq!(
        keys(&document["securityDefinitions"]),
        vec!["api_key", "petstore_auth"]
    );
    assert_eq!(document["basePath"], "/v1");

    assert_eq!(result["summary"]["removedPaths"], json!(["/stores"]));
    assert_eq!(result["summary"]["removedSchemas"], json!(["Store"]));
    assert_eq!(result["summary"]["removedSecuritySchemes"], json!(["basic"]));
}

#[test]
fn shake_summary_only() {
    let result = shake_json("catalog.yaml", &["--pattern", "^/health", "--summary-only"]);

    assert!(result.get("document").is_none());
    assert_eq!(
        result["removedSchemas"],
        json!(["Category", "Product", "Unused"])
    );
}

#[test]
fn shake_yaml_format() {
    apiprune()
        .args(["shake", "--format", "yaml", "--spec"])
        .arg(fixture_path("catalog.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("document:"))
        .stdout(contains("removedSchemas:"));
}

#[test]
fn shake_writes_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("pruned.yaml");

    apiprune()
        .args(["shake", "--pattern", "^/products$", "--spec"])
        .arg(fixture_path("catalog.yaml"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(contains("pruned"));

    // Format follows the output extension.
    let content = std::fs::read_to_string(&output).unwrap();
    let written: Value = serde_yaml::from_str(&content).unwrap();
    assert_eq!(keys(&written["document"]["paths"]), vec!["/products"]);
}

#[test]
fn shake_invalid_pattern_exits_one() {
    apiprune()
        .args(["shake", "--pattern", "(unclosed", "--spec"])
        .arg(fixture_path("catalog.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("E1006"));
}

#[test]
fn shake_unknown_format_exits_one() {
    apiprune()
        .args(["shake", "--format", "toml", "--spec"])
        .arg(fixture_path("catalog.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("E1008"));
}

#[test]
fn shake_missing_file_exits_one() {
    apiprune()
        .args(["shake", "--spec", "this-file-does-not-exist.yaml"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("error:"));
}

#[test]
fn shake_rejects_invalid_input() {
    apiprune()
        .args(["shake", "--spec"])
        .arg(fixture_path("missing-info.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Missing or invalid info object"));
}

#[test]
fn shake_no_validate_skips_checks() {
    let result = shake_json("missing-info.yaml", &["--no-validate"]);
    assert_eq!(keys(&result["document"]["paths"]), vec!["/ping"]);
}

#[test]
fn shake_parse_error_exits_one() {
    apiprune()
        .args(["shake", "--spec"])
        .arg(fixture_path("invalid-parse-error.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("E1002"));
}

// ---------------------------------------------------------------------------
// apiprune validate
// ---------------------------------------------------------------------------

#[test]
fn validate_valid_specs_exit_zero() {
    apiprune()
        .args(["validate", "--spec"])
        .arg(fixture_path("catalog.yaml"))
        .arg(fixture_path("petstore-v2.json"))
        .assert()
        .success()
        .stderr(contains("is valid (3.0.3)"))
        .stderr(contains("is valid (2.0)"))
        .stderr(contains("2 valid, 0 invalid"));
}

#[test]
fn validate_invalid_spec_exits_one() {
    apiprune()
        .args(["validate", "--spec"])
        .arg(fixture_path("invalid-parse-error.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("E1002"));
}

#[test]
fn validate_missing_info_exits_one() {
    apiprune()
        .args(["validate", "--spec"])
        .arg(fixture_path("missing-info.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("has 1 error(s)"))
        .stderr(contains("Missing or invalid info object"));
}

#[test]
fn validate_missing_file_exits_one() {
    apiprune()
        .args(["validate", "--spec", "this-file-does-not-exist.yaml"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("I/O error"));
}

#[test]
fn validate_unknown_format_exits_two() {
    apiprune()
        .args(["validate", "--format", "xml", "--spec"])
        .arg(fixture_path("catalog.yaml"))
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(contains("invalid value 'xml'"));
}

#[test]
fn validate_json_output() {
    let output = apiprune()
        .args(["validate", "--format", "json", "--spec"])
        .arg(fixture_path("catalog.yaml"))
        .arg(fixture_path("missing-info.yaml"))
        .output()
        .expect("failed to run apiprune");

    assert_eq!(output.status.code(), Some(1));
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"], json!({ "total": 2, "valid": 1, "invalid": 1 }));
    assert_eq!(report["results"][0]["valid"], true);
    assert_eq!(report["results"][0]["version"], "3.0.3");
    assert_eq!(report["results"][1]["valid"], false);
}

// ---------------------------------------------------------------------------
// apiprune paths
// ---------------------------------------------------------------------------

#[test]
fn paths_lists_endpoints_in_source_order() {
    apiprune()
        .args(["paths", "--spec"])
        .arg(fixture_path("catalog.yaml"))
        .assert()
        .success()
        .stdout("GET /categories/{id}\nPOST /products\nGET /health\n");
}

#[test]
fn paths_applies_selection() {
    apiprune()
        .args(["paths", "--pattern", "^/pets", "--spec"])
        .arg(fixture_path("petstore-v2.json"))
        .assert()
        .success()
        .stdout("GET /pets\n");
}

// ---------------------------------------------------------------------------
// Global options
// ---------------------------------------------------------------------------

#[test]
fn unknown_log_format_exits_one() {
    apiprune()
        .args(["--log-format", "xml", "paths", "--spec"])
        .arg(fixture_path("catalog.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("unknown log format"));
}

#[test]
fn info_logging_goes_to_stderr() {
    let result = apiprune()
        .args(["--log-level", "info", "--log-format", "json", "shake", "--spec"])
        .arg(fixture_path("catalog.yaml"))
        .assert()
        .success()
        .stderr(contains("document_pruned"));

    let output = result.get_output();
    assert!(serde_json::from_slice::<Value>(&output.stdout).is_ok());

    // The library's own summary is debug-level, so info shows one event.
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("\"document pruned\"").count(), 1, "{stderr}");
}
