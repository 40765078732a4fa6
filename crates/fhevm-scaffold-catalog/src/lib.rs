// crates/fhevm-scaffold-catalog/src/lib.rs
// ============================================================================
// Module: fhevm-scaffold Catalog Library
// Description: Canonical example/category registry for fhevm-scaffold.
// Purpose: Single source of truth for which sources belong to which example.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! `fhevm-scaffold-catalog` defines the static registry consumed by both the
//! project and documentation pipelines. The catalog is loaded once from a
//! TOML file, validated fail-closed, and is immutable afterwards.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod settings;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::*;
pub use settings::ProjectSettings;
