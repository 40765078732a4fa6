// crates/fhevm-scaffold-cli/tests/i18n.rs
// ============================================================================
// Module: CLI Message Catalog Tests
// Description: Exercises the message catalog and placeholder substitution.
// Purpose: Ensure CLI user-facing strings route through stable helpers.
// Dependencies: fhevm-scaffold-cli i18n module and the `t!` macro.
// ============================================================================

//! ## Overview
//! Validates the message catalog behavior:
//! - Message arguments capture key/value substitutions.
//! - Translation falls back to keys on misses.
//! - The [`t!`](fhevm_scaffold_cli::t) macro formats placeholders correctly.

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

use fhevm_scaffold_cli::i18n::MessageArg;
use fhevm_scaffold_cli::i18n::translate;
use fhevm_scaffold_cli::t;

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Confirms message arguments capture key/value pairs.
#[test]
fn message_arg_new_captures_key_and_value() {
    let arg = MessageArg::new("path", "/tmp/out1");
    assert_eq!(arg.key, "path");
    assert_eq!(arg.value, "/tmp/out1");
}

/// Confirms catalog entries resolve and replace placeholders.
#[test]
fn translate_substitutes_placeholders() {
    let args = vec![MessageArg::new("key", "demo"), MessageArg::new("path", "/tmp/out1")];
    assert_eq!(translate("example.ok", args), "Generated example demo at /tmp/out1");
}

/// Confirms missing keys fall back to the key string.
#[test]
fn translate_falls_back_to_key() {
    assert_eq!(translate("missing.key", Vec::new()), "missing.key");
}

/// Confirms the error line names the failure kind.
#[test]
fn t_macro_formats_error_line() {
    let rendered = t!("error.line", kind = "destination_exists", message = "destination already exists");
    assert_eq!(rendered, "error[destination_exists]: destination already exists");
}
