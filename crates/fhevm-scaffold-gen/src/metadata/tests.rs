// crates/fhevm-scaffold-gen/src/metadata/tests.rs
// ============================================================================
// Module: Package Metadata Unit Tests
// Description: Unit coverage for package.json rewriting.
// Purpose: Ensure only identifying fields change.
// Dependencies: fhevm-scaffold-gen, serde_json, tempfile
// ============================================================================

#![allow(
    clippy::panic,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    reason = "Test-only panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;

use serde_json::Value;

use super::PACKAGE_METADATA_FILE;
use super::patch_metadata;
use super::rewrite_package_metadata;
use crate::GenerateError;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Template metadata resembling the Hardhat base template.
const TEMPLATE_PACKAGE: &str = r#"{
  "name": "fhevm-hardhat-template",
  "description": "Hardhat-based template for developing FHEVM Solidity smart contracts",
  "version": "0.1.0",
  "license": "BSD-3-Clause-Clear",
  "scripts": {
    "compile": "hardhat compile",
    "test": "hardhat test"
  },
  "devDependencies": {
    "hardhat": "^2.26.0",
    "@fhevm/hardhat-plugin": "^0.1.0"
  }
}
"#;

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Identifying fields are replaced and the rest is preserved.
#[test]
fn patch_replaces_identity_and_keeps_dependencies() -> Result<(), Box<dyn std::error::Error>> {
    let rendered =
        patch_metadata(TEMPLATE_PACKAGE, "fhevm-example-demo", "Demo example", "https://x.test")?;
    let parsed: Value = serde_json::from_str(&rendered)?;
    let original: Value = serde_json::from_str(TEMPLATE_PACKAGE)?;

    if parsed["name"] != "fhevm-example-demo"
        || parsed["description"] != "Demo example"
        || parsed["homepage"] != "https://x.test"
    {
        return Err("identity fields were not rewritten".into());
    }
    for field in ["version", "license", "scripts", "devDependencies"] {
        if parsed[field] != original[field] {
            return Err(format!("field changed unexpectedly: {field}").into());
        }
    }
    if !rendered.ends_with("}\n") {
        return Err("rendered metadata must end with a newline".into());
    }
    Ok(())
}

/// Existing keys keep their position.
#[test]
fn patch_preserves_key_order() -> Result<(), Box<dyn std::error::Error>> {
    let rendered = patch_metadata(TEMPLATE_PACKAGE, "n", "d", "h")?;
    let parsed: Value = serde_json::from_str(&rendered)?;
    let keys: Vec<&str> = parsed
        .as_object()
        .ok_or("expected object")?
        .keys()
        .map(String::as_str)
        .collect();
    let expected =
        vec!["name", "description", "version", "license", "scripts", "devDependencies", "homepage"];
    if keys != expected {
        return Err(format!("unexpected key order: {keys:?}").into());
    }
    Ok(())
}

/// Non-object documents are rejected.
#[test]
fn patch_rejects_non_object() {
    assert!(matches!(patch_metadata("[1, 2]", "n", "d", "h"), Err(GenerateError::Serialization(_))));
}

/// Missing metadata is reported with its path.
#[test]
fn rewrite_reports_missing_metadata() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    match rewrite_package_metadata(temp.path(), "n", "d", "h") {
        Err(GenerateError::MetadataNotFound(path)) if path == temp.path().join(PACKAGE_METADATA_FILE) => {
            Ok(())
        }
        Err(other) => Err(format!("unexpected error: {other}").into()),
        Ok(_) => Err("expected missing metadata error".into()),
    }
}

/// Rewrites land on disk.
#[test]
fn rewrite_updates_file_in_place() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    fs::write(temp.path().join(PACKAGE_METADATA_FILE), TEMPLATE_PACKAGE)?;
    let path = rewrite_package_metadata(temp.path(), "fhevm-example-demo", "Demo", "")?;
    let parsed: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
    if parsed["name"] != "fhevm-example-demo" || parsed["homepage"] != "" {
        return Err("metadata not rewritten on disk".into());
    }
    Ok(())
}
