//! CLI integration tests
//!
//! These tests verify the CLI commands work correctly by running the binary.

#![cfg(feature = "cli")]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

const VALID_FILTER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<fes:Filter xmlns:fes="http://www.opengis.net/fes/2.0">
  <fes:PropertyIsEqualTo matchCase="false">
    <fes:ValueReference>name</fes:ValueReference>
    <fes:Literal>Main St</fes:Literal>
  </fes:PropertyIsEqualTo>
</fes:Filter>"#;

const MISSING_ESCAPE: &str = r#"<fes:Filter xmlns:fes="http://www.opengis.net/fes/2.0">
  <fes:PropertyIsLike wildCard="*" singleChar=".">
    <fes:ValueReference>name</fes:ValueReference>
    <fes:Literal>Ma*</fes:Literal>
  </fes:PropertyIsLike>
</fes:Filter>"#;

fn fes20(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fes20"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn fixture(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ============================================================================
// Classes Command Tests
// ============================================================================

#[test]
fn test_cli_classes_lists_the_package() {
    let output = fes20(&["classes"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "classes should succeed");
    assert!(stdout.contains("Package: fes20 (http://www.opengis.net/fes/2.0)"));
    assert!(stdout.contains("FilterType"), "should list classes");
    assert!(stdout.contains("VersionActionTokens"), "should list enums");
    assert!(stdout.contains("(abstract)"), "should mark abstract classes");
}

#[test]
fn test_cli_classes_json_output() {
    let output = fes20(&["classes", "--json"]);
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).expect("should be valid JSON");
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 83);
    assert_eq!(entries[21]["name"], "DocumentRoot");
    assert_eq!(entries[57]["kind"], "enum");
    assert_eq!(entries[82]["name"], "VersionType");
}

// ============================================================================
// Features Command Tests
// ============================================================================

#[test]
fn test_cli_features_table() {
    let output = fes20(&["features", "BinaryComparisonOpType"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Class: BinaryComparisonOpType"));
    assert!(stdout.contains("Features: 4 (0 inherited)"));
    assert!(stdout.contains("expressionGroup"));
    assert!(stdout.contains("read-only"), "expression view should be flagged");
}

#[test]
fn test_cli_features_json_output() {
    let output = fes20(&["features", "--json", "FilterType"]);
    assert!(output.status.success());

    let class: serde_json::Value = serde_json::from_slice(&output.stdout).expect("should be valid JSON");
    assert_eq!(class["name"], "FilterType");
    assert_eq!(class["id"], 26);
}

#[test]
fn test_cli_features_unknown_class() {
    let output = fes20(&["features", "QueryType"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Error: The class 'QueryType' is not a valid classifier"));
}

// ============================================================================
// Parse Command Tests
// ============================================================================

#[test]
fn test_cli_parse_union_members() {
    let output = fes20(&["parse", "VersionType", "LAST"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Member:   VersionActionTokens"));
    assert!(stdout.contains("Kind:     enum VersionActionTokens"));
    assert!(stdout.contains("Value:    LAST"));

    let output = fes20(&["parse", "VersionType", "7"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Member:   xs:positiveInteger"));
    assert!(stdout.contains("Kind:     integer"));
}

#[test]
fn test_cli_parse_list() {
    let output = fes20(&["parse", "AliasesType", "a b c"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Kind:     list of 3"));
}

#[test]
fn test_cli_parse_invalid_literal() {
    let output = fes20(&["parse", "VersionType", "latest"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Invalid value: 'latest' for datatype :VersionType"));
}

// ============================================================================
// Check Command Tests
// ============================================================================

#[test]
fn test_cli_check_valid_document() {
    let file = fixture(VALID_FILTER);
    let output = fes20(&["check", path_arg(file.path())]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "stdout: {}", stdout);
    assert!(stdout.contains("is valid (Filter)"));
}

#[test]
fn test_cli_check_echo() {
    let file = fixture(VALID_FILTER);
    let output = fes20(&["check", "--echo", path_arg(file.path())]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("<fes:PropertyIsEqualTo matchCase=\"false\">"));
}

#[test]
fn test_cli_check_reports_errors() {
    let file = fixture(MISSING_ESCAPE);
    let output = fes20(&["check", path_arg(file.path())]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("escapeChar"));
    assert!(stdout.contains("has 1 error(s)"));
}

#[test]
fn test_cli_check_missing_file() {
    let output = fes20(&["check", "/nonexistent/filter.xml"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.starts_with("Error:"));
}

#[test]
fn test_cli_check_malformed_xml() {
    let file = fixture("<fes:Filter xmlns:fes=\"http://www.opengis.net/fes/2.0\">");
    let output = fes20(&["check", path_arg(file.path())]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("XML error"));
}
