// crates/fhevm-scaffold-gen/src/metadata.rs
// ============================================================================
// Module: Package Metadata Rewriter
// Description: Patches identifying fields in a copied `package.json`.
// Purpose: Give each generated project its own name, description, and homepage.
// Dependencies: serde_json, tracing, std
// ============================================================================

//! ## Overview
//! Only `name`, `description`, and `homepage` change. Every other field,
//! including dependency tables, is written back untouched and in its original
//! key order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use serde_json::Value;
use tracing::info;

use crate::GenerateError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Package metadata file name relative to a project root.
pub const PACKAGE_METADATA_FILE: &str = "package.json";

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Overwrites `name`, `description`, and `homepage` in `<dest_root>/package.json`.
///
/// Returns the path of the rewritten file.
///
/// # Errors
///
/// Returns [`GenerateError::MetadataNotFound`] when the file is absent,
/// [`GenerateError::Serialization`] when it is not a JSON object, and
/// [`GenerateError::Io`] on read/write failures.
pub fn rewrite_package_metadata(
    dest_root: &Path,
    new_name: &str,
    new_description: &str,
    new_homepage: &str,
) -> Result<PathBuf, GenerateError> {
    let path = dest_root.join(PACKAGE_METADATA_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(GenerateError::MetadataNotFound(path));
        }
        Err(err) => return Err(GenerateError::io(&path, &err)),
    };
    let rendered = patch_metadata(&content, new_name, new_description, new_homepage)?;
    fs::write(&path, rendered.as_bytes()).map_err(|err| GenerateError::io(&path, &err))?;
    info!(path = %path.display(), name = new_name, "rewrote package metadata");
    Ok(path)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Applies the field overrides to JSON text and renders it back.
fn patch_metadata(
    content: &str,
    new_name: &str,
    new_description: &str,
    new_homepage: &str,
) -> Result<String, GenerateError> {
    let mut document: Value = serde_json::from_str(content)
        .map_err(|err| GenerateError::Serialization(format!("package.json: {err}")))?;
    let Some(fields) = document.as_object_mut() else {
        return Err(GenerateError::Serialization(
            "package.json must contain a JSON object".to_string(),
        ));
    };
    fields.insert("name".to_string(), Value::String(new_name.to_string()));
    fields.insert("description".to_string(), Value::String(new_description.to_string()));
    fields.insert("homepage".to_string(), Value::String(new_homepage.to_string()));
    let mut rendered = serde_json::to_string_pretty(&document)
        .map_err(|err| GenerateError::Serialization(err.to_string()))?;
    rendered.push('\n');
    Ok(rendered)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
