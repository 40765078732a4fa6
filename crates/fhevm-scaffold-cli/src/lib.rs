// crates/fhevm-scaffold-cli/src/lib.rs
// ============================================================================
// Module: fhevm-scaffold CLI Library
// Description: Shared helpers for the fhevm-scaffold command-line interface.
// Purpose: Provide the message catalog to the CLI binary and its tests.
// Dependencies: Standard library.
// ============================================================================

//! ## Overview
//! Houses the CLI message catalog. The binary entry point (`src/main.rs`)
//! routes every user-facing line through [`t!`] so wording stays in one place.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Message catalog and translation helpers.
pub mod i18n;
