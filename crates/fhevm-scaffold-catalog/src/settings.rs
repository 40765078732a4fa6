// crates/fhevm-scaffold-catalog/src/settings.rs
// ============================================================================
// Module: Project Settings
// Description: Layout settings shared by the generation pipelines.
// Purpose: Describe where templates, outputs, and docs live under the root.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The `[project]` table of the catalog file. Every field has a default so a
//! catalog may omit the table entirely.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::catalog::CatalogError;
use crate::catalog::validate_key;
use crate::catalog::validate_relative_path;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Directory names skipped when copying the base template.
const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    "artifacts",
    "cache",
    "coverage",
    "types",
    "typechain-types",
    "dist",
    ".git",
    "fhevmTemp",
];

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Project layout settings loaded from the `[project]` catalog table.
///
/// # Invariants
/// - Relative paths are interpreted against the catalog root.
/// - `excluded_dirs` entries are bare directory names, never paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectSettings {
    /// Base template copied into every generated project.
    pub template_dir: PathBuf,
    /// Conventional parent directory for generated projects.
    pub output_dir: PathBuf,
    /// Output directory for documentation pages and the index.
    pub docs_dir: PathBuf,
    /// File name of the navigation index inside `docs_dir`.
    pub index_file: String,
    /// Directory names never copied from the template.
    pub excluded_dirs: Vec<String>,
    /// Destination for contract sources inside a generated project.
    pub contracts_dir: PathBuf,
    /// Destination for test sources inside a generated project.
    pub tests_dir: PathBuf,
    /// Deploy script regenerated inside a generated project (empty disables).
    pub deploy_script: String,
    /// Homepage written into generated package metadata.
    pub homepage: String,
    /// Prefix for generated package names.
    pub package_prefix: String,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from("project/base-template"),
            output_dir: PathBuf::from("output"),
            docs_dir: PathBuf::from("docs"),
            index_file: String::from("SUMMARY.md"),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|name| (*name).to_string()).collect(),
            contracts_dir: PathBuf::from("contracts"),
            tests_dir: PathBuf::from("test"),
            deploy_script: String::from("deploy/deploy.ts"),
            homepage: String::new(),
            package_prefix: String::from("fhevm-example"),
        }
    }
}

impl ProjectSettings {
    /// Returns the deploy script path when deploy generation is enabled.
    #[must_use]
    pub fn deploy_script(&self) -> Option<&Path> {
        let trimmed = self.deploy_script.trim();
        if trimmed.is_empty() { None } else { Some(Path::new(trimmed)) }
    }

    /// Validates the project settings.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Invalid`] when a setting is malformed.
    pub fn validate(&self) -> Result<(), CatalogError> {
        validate_relative_path("project.template_dir", &self.template_dir)?;
        validate_relative_path("project.docs_dir", &self.docs_dir)?;
        validate_relative_path("project.contracts_dir", &self.contracts_dir)?;
        validate_relative_path("project.tests_dir", &self.tests_dir)?;
        require_named_dir("project.template_dir", &self.template_dir)?;
        require_named_dir("project.contracts_dir", &self.contracts_dir)?;
        require_named_dir("project.tests_dir", &self.tests_dir)?;
        if self.output_dir.as_os_str().is_empty() {
            return Err(CatalogError::Invalid("project.output_dir must be non-empty".to_string()));
        }
        if let Some(deploy) = self.deploy_script() {
            validate_relative_path("project.deploy_script", deploy)?;
        }
        if !is_bare_name(&self.index_file) || !self.index_file.ends_with(".md") {
            return Err(CatalogError::Invalid(
                "project.index_file must be a bare markdown file name".to_string(),
            ));
        }
        for name in &self.excluded_dirs {
            if !is_bare_name(name) {
                return Err(CatalogError::Invalid(format!(
                    "project.excluded_dirs entry must be a bare directory name: {name}"
                )));
            }
        }
        validate_key("project.package_prefix", &self.package_prefix)
    }
}

/// Requires a directory that names something below the project root.
///
/// Generated projects clear `contracts_dir` and `tests_dir` before copying
/// sources, so `.` would wipe the whole project.
fn require_named_dir(field: &str, path: &Path) -> Result<(), CatalogError> {
    if path.components().any(|component| matches!(component, Component::Normal(_))) {
        return Ok(());
    }
    Err(CatalogError::Invalid(format!(
        "{field} must name a directory below the root: {}",
        path.display()
    )))
}

/// Returns true when the value is a single, normal path component.
fn is_bare_name(value: &str) -> bool {
    !value.is_empty()
        && value != "."
        && value != ".."
        && !value.contains('/')
        && !value.contains('\\')
}
