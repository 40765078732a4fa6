// crates/fhevm-scaffold-catalog/src/catalog/tests.rs
// ============================================================================
// Module: Catalog Unit Tests
// Description: Unit coverage for catalog validation and resolution.
// Purpose: Ensure malformed catalogs fail closed and lookups enumerate keys.
// Dependencies: fhevm-scaffold-catalog, tempfile, std
// ============================================================================

//! ## Overview
//! Exercises catalog validation rules, key resolution, and source checks.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;

use super::Catalog;
use super::CatalogError;
use super::EntryKind;
use super::title_from_key;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Minimal valid catalog with two examples and one category.
const VALID_CATALOG: &str = r#"
[project]
homepage = "https://example.invalid/reviews"

[[categories]]
key = "review"
name = "Peer Review"
description = "Review workflow examples."
members = ["submit", "score"]

[[examples]]
key = "submit"
description = "Submit a paper."
category = "review"
sources = [
    { role = "contract", path = "contracts/Submit.sol" },
    { role = "test", path = "test/Submit.test.ts" },
]

[[examples]]
key = "score"
title = "Encrypted Score"
description = "Score a paper."
category = "review"
concepts = ["Scores are hashed before storage."]
sources = [
    { role = "contract", path = "contracts/Score.sol" },
    { role = "test", path = "test/Score.test.ts" },
]
"#;

/// Parses a catalog rooted at the current directory.
fn parse(content: &str) -> Result<Catalog, CatalogError> {
    Catalog::from_toml_str(content, ".")
}

/// Asserts that a catalog body is rejected as invalid.
fn assert_invalid(content: &str) {
    match parse(content) {
        Err(CatalogError::Invalid(_) | CatalogError::Parse(_)) => {}
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected catalog to be rejected"),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Valid catalogs keep declaration order.
#[test]
fn valid_catalog_preserves_declaration_order() {
    let catalog = parse(VALID_CATALOG).unwrap();
    assert_eq!(catalog.example_keys(), vec!["submit", "score"]);
    assert_eq!(catalog.category_keys(), vec!["review"]);
    assert_eq!(catalog.project().homepage, "https://example.invalid/reviews");
    assert_eq!(catalog.project().index_file, "SUMMARY.md");
}

/// Titles fall back to the key when not declared.
#[test]
fn display_title_falls_back_to_key() {
    let catalog = parse(VALID_CATALOG).unwrap();
    assert_eq!(catalog.resolve("submit").unwrap().display_title(), "Submit");
    assert_eq!(catalog.resolve("score").unwrap().display_title(), "Encrypted Score");
}

/// Unknown keys enumerate every valid key.
#[test]
fn unknown_key_lists_all_valid_keys() {
    let catalog = parse(VALID_CATALOG).unwrap();
    let err = catalog.resolve("missing").unwrap_err();
    let message = err.to_string();
    for key in catalog.example_keys() {
        assert!(message.contains(key), "missing {key} in {message}");
    }
    match err {
        CatalogError::UnknownKey {
            kind,
            key,
            valid,
        } => {
            assert_eq!(kind, EntryKind::Example);
            assert_eq!(key, "missing");
            assert_eq!(valid, vec!["submit".to_string(), "score".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// Category lookups search only the category registry.
#[test]
fn resolve_category_rejects_example_keys() {
    let catalog = parse(VALID_CATALOG).unwrap();
    let err = catalog.resolve_category("submit").unwrap_err();
    assert!(err.to_string().contains("review"));
    assert!(matches!(
        err,
        CatalogError::UnknownKey {
            kind: EntryKind::Category,
            ..
        }
    ));
}

/// Blank keys are rejected before lookup.
#[test]
fn empty_key_is_rejected() {
    let catalog = parse(VALID_CATALOG).unwrap();
    assert!(matches!(catalog.resolve(""), Err(CatalogError::EmptyKey)));
    assert!(matches!(catalog.resolve_category("  "), Err(CatalogError::EmptyKey)));
}

/// Category members resolve in declared order.
#[test]
fn category_members_follow_declared_order() {
    let catalog = parse(VALID_CATALOG).unwrap();
    let category = catalog.resolve_category("review").unwrap();
    let members = catalog.category_members(category).unwrap();
    let keys: Vec<&str> = members.iter().map(|member| member.key.as_str()).collect();
    assert_eq!(keys, vec!["submit", "score"]);
}

/// Duplicate example keys are rejected.
#[test]
fn duplicate_example_keys_are_rejected() {
    let duplicated = VALID_CATALOG.replace("key = \"score\"", "key = \"submit\"");
    assert_invalid(&duplicated);
}

/// Examples must have both a contract and a test.
#[test]
fn examples_require_contract_and_test() {
    let no_test = VALID_CATALOG.replace(
        "{ role = \"test\", path = \"test/Submit.test.ts\" },",
        "",
    );
    assert_invalid(&no_test);
}

/// Source paths may not escape the root.
#[test]
fn parent_traversal_in_sources_is_rejected() {
    let escaping = VALID_CATALOG.replace("contracts/Submit.sol", "../Submit.sol");
    assert_invalid(&escaping);
}

/// Undeclared categories are rejected.
#[test]
fn undeclared_category_is_rejected() {
    let orphan = VALID_CATALOG.replace("category = \"review\"\nconcepts", "category = \"x\"\nconcepts");
    assert_invalid(&orphan);
}

/// Category members must exist.
#[test]
fn unknown_category_member_is_rejected() {
    let dangling = VALID_CATALOG.replace("members = [\"submit\", \"score\"]", "members = [\"ghost\"]");
    assert_invalid(&dangling);
}

/// Keys must be kebab-case.
#[test]
fn non_kebab_keys_are_rejected() {
    let shouting = VALID_CATALOG.replace("key = \"submit\"", "key = \"Submit_Paper\"");
    assert_invalid(&shouting);
}

/// Unknown fields fail parsing.
#[test]
fn unknown_fields_are_rejected() {
    let extra = VALID_CATALOG.replace("[project]", "[project]\nflavor = \"vanilla\"");
    assert_invalid(&extra);
}

/// Project source directories must name a directory below the root.
#[test]
fn current_dir_as_source_target_is_rejected() {
    for field in ["contracts_dir", "tests_dir", "template_dir"] {
        for value in [".", "./."] {
            let setting = format!("[project]\n{field} = \"{value}\"");
            assert_invalid(&VALID_CATALOG.replace("[project]", &setting));
        }
    }
    let nested =
        VALID_CATALOG.replace("[project]", "[project]\ncontracts_dir = \"./src/contracts\"");
    assert!(parse(&nested).is_ok());
}

/// A page file may not collide with the navigation index.
#[test]
fn page_named_like_index_is_rejected() {
    for index_file in ["submit.md", "Submit.md", "SUBMIT.md"] {
        let clashing =
            VALID_CATALOG.replace("[project]", &format!("[project]\nindex_file = \"{index_file}\""));
        assert_invalid(&clashing);
    }
}

/// Source verification reports the missing path.
#[test]
fn verify_sources_reports_missing_file() {
    let temp = tempfile::tempdir().unwrap();
    let catalog = Catalog::from_toml_str(VALID_CATALOG, temp.path()).unwrap();
    fs::create_dir_all(temp.path().join("contracts")).unwrap();
    fs::write(temp.path().join("contracts/Submit.sol"), "contract Submit {}").unwrap();

    let example = catalog.resolve("submit").unwrap();
    match catalog.verify_sources(example) {
        Err(CatalogError::SourceFileMissing {
            key,
            path,
        }) => {
            assert_eq!(key, "submit");
            assert!(path.ends_with("test/Submit.test.ts"));
        }
        other => panic!("unexpected result: {other:?}"),
    }

    fs::create_dir_all(temp.path().join("test")).unwrap();
    fs::write(temp.path().join("test/Submit.test.ts"), "describe('x', () => {});").unwrap();
    catalog.verify_sources(example).unwrap();
}

/// Loading from disk roots relative paths at the catalog directory.
#[test]
fn load_uses_catalog_parent_as_root() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("catalog.toml");
    fs::write(&path, VALID_CATALOG).unwrap();
    let catalog = Catalog::load(Some(&path)).unwrap();
    assert_eq!(catalog.root(), temp.path());
    assert_eq!(catalog.docs_dir(), temp.path().join("docs"));
}

/// Oversized catalogs are refused.
#[test]
fn load_rejects_oversized_catalog() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("catalog.toml");
    let padding = "#".repeat(super::MAX_CATALOG_FILE_SIZE + 1);
    fs::write(&path, padding).unwrap();
    assert!(matches!(Catalog::load(Some(&path)), Err(CatalogError::Invalid(_))));
}

/// Key-derived titles capitalize each word.
#[test]
fn title_from_key_capitalizes_words() {
    assert_eq!(title_from_key("private-peer-review"), "Private Peer Review");
    assert_eq!(title_from_key("fhe_basics"), "Fhe Basics");
    assert_eq!(title_from_key(""), "");
}
