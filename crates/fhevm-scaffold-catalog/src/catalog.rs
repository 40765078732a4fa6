// crates/fhevm-scaffold-catalog/src/catalog.rs
// ============================================================================
// Module: Example Catalog
// Description: Catalog loading, validation, and key resolution.
// Purpose: Map example and category keys to their source files.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! The catalog is loaded from a TOML file with strict size and path limits and
//! validated before use. Declaration order is preserved for both examples and
//! categories; the navigation index relies on it.
//!
//! Resolution failures enumerate every valid key so callers can discover the
//! registry from the error alone.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fmt;
use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::settings::ProjectSettings;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default catalog filename when no path is specified.
pub const DEFAULT_CATALOG_NAME: &str = "fhevm-scaffold.toml";
/// Environment variable used to override the catalog path.
pub const CATALOG_ENV_VAR: &str = "FHEVM_SCAFFOLD_CATALOG";
/// Maximum catalog file size in bytes.
pub const MAX_CATALOG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of an example or category key.
const MAX_KEY_LENGTH: usize = 64;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Catalog loading, validation, or resolution errors.
///
/// # Invariants
/// - [`CatalogError::UnknownKey`] always carries the full list of valid keys.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// I/O failure while reading the catalog.
    #[error("catalog io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("catalog parse error: {0}")]
    Parse(String),
    /// Invalid catalog data.
    #[error("invalid catalog: {0}")]
    Invalid(String),
    /// Caller supplied an empty key.
    #[error("key must be non-empty")]
    EmptyKey,
    /// Caller supplied a key that is not in the catalog.
    #[error("unknown {kind} key `{key}` (valid keys: {})", .valid.join(", "))]
    UnknownKey {
        /// Which registry was searched.
        kind: EntryKind,
        /// The rejected key.
        key: String,
        /// Every valid key of `kind`, in declaration order.
        valid: Vec<String>,
    },
    /// A source file the catalog references is absent.
    #[error("source file missing for `{key}`: {}", .path.display())]
    SourceFileMissing {
        /// Example key owning the source.
        key: String,
        /// Resolved path that could not be found.
        path: PathBuf,
    },
}

// ============================================================================
// SECTION: Model
// ============================================================================

/// Registry searched by a resolution call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Single example.
    Example,
    /// Category of examples.
    Category,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Example => f.write_str("example"),
            Self::Category => f.write_str("category"),
        }
    }
}

/// Role a source file plays inside an example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceRole {
    /// Solidity contract source.
    Contract,
    /// Test suite exercising the contract.
    Test,
}

impl SourceRole {
    /// Returns the canonical role label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contract => "contract",
            Self::Test => "test",
        }
    }
}

/// A source file referenced by an example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceFile {
    /// Role of the file.
    pub role: SourceRole,
    /// Path relative to the catalog root.
    pub path: PathBuf,
}

impl SourceFile {
    /// Returns the file name component, or the full path when it has none.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.to_string_lossy().into_owned(),
            |name| name.to_string_lossy().into_owned(),
        )
    }
}

/// One example in the catalog.
///
/// # Invariants
/// - `sources` holds at least one contract and one test once validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExampleEntry {
    /// Unique short name; CLI argument and doc file stem.
    pub key: String,
    /// Optional display title; derived from `key` when absent.
    #[serde(default)]
    pub title: Option<String>,
    /// Human-readable summary.
    pub description: String,
    /// Category key used to group the example in the navigation index.
    pub category: String,
    /// Concept explanations rendered into docs and READMEs.
    #[serde(default)]
    pub concepts: Vec<String>,
    /// Ordered source files.
    pub sources: Vec<SourceFile>,
}

impl ExampleEntry {
    /// Returns the display title.
    #[must_use]
    pub fn display_title(&self) -> String {
        self.title.clone().unwrap_or_else(|| title_from_key(&self.key))
    }

    /// Iterates over contract sources in declaration order.
    pub fn contracts(&self) -> impl Iterator<Item = &SourceFile> {
        self.sources.iter().filter(|source| source.role == SourceRole::Contract)
    }

    /// Iterates over test sources in declaration order.
    pub fn tests(&self) -> impl Iterator<Item = &SourceFile> {
        self.sources.iter().filter(|source| source.role == SourceRole::Test)
    }
}

/// A named group of examples generated together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryEntry {
    /// Unique category key.
    pub key: String,
    /// Display name; also the navigation heading.
    pub name: String,
    /// Human-readable summary.
    pub description: String,
    /// Ordered example keys.
    pub members: Vec<String>,
}

/// On-disk catalog shape.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    /// Project layout settings.
    #[serde(default)]
    project: ProjectSettings,
    /// Example entries in declaration order.
    #[serde(default)]
    examples: Vec<ExampleEntry>,
    /// Category entries in declaration order.
    #[serde(default)]
    categories: Vec<CategoryEntry>,
}

/// Validated, immutable catalog.
///
/// # Invariants
/// - Keys are unique within examples and within categories.
/// - Every category member and every example category resolves.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Directory that relative catalog paths resolve against.
    root: PathBuf,
    /// Project layout settings.
    project: ProjectSettings,
    /// Examples in declaration order.
    examples: Vec<ExampleEntry>,
    /// Categories in declaration order.
    categories: Vec<CategoryEntry>,
}

impl Catalog {
    /// Loads the catalog from disk using the default resolution rules.
    ///
    /// Resolution order: explicit `path`, then [`CATALOG_ENV_VAR`], then
    /// [`DEFAULT_CATALOG_NAME`] in the working directory. The catalog root is
    /// the parent directory of the resolved file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved)
            .map_err(|err| CatalogError::Io(format!("{}: {err}", resolved.display())))?;
        if bytes.len() > MAX_CATALOG_FILE_SIZE {
            return Err(CatalogError::Invalid("catalog file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| CatalogError::Invalid("catalog file must be utf-8".to_string()))?;
        let root = resolved
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Self::from_toml_str(content, root)
    }

    /// Parses and validates a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str, root: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|err| CatalogError::Parse(err.to_string()))?;
        let catalog = Self {
            root: root.into(),
            project: file.project,
            examples: file.examples,
            categories: file.categories,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Validates the catalog for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Invalid`] when the catalog is inconsistent.
    pub fn validate(&self) -> Result<(), CatalogError> {
        self.project.validate()?;
        if self.examples.is_empty() {
            return Err(CatalogError::Invalid("catalog must declare at least one example".into()));
        }

        let mut category_keys = BTreeSet::new();
        for category in &self.categories {
            validate_key("categories.key", &category.key)?;
            if !category_keys.insert(category.key.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate category key: {}",
                    category.key
                )));
            }
        }

        let mut example_keys = BTreeSet::new();
        for example in &self.examples {
            validate_example(example)?;
            if !example_keys.insert(example.key.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate example key: {}",
                    example.key
                )));
            }
            if format!("{}.md", example.key).eq_ignore_ascii_case(&self.project.index_file) {
                return Err(CatalogError::Invalid(format!(
                    "example {} would be written over the index file {}",
                    example.key, self.project.index_file
                )));
            }
            if !category_keys.contains(example.category.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "example {} references undeclared category {}",
                    example.key, example.category
                )));
            }
        }

        for category in &self.categories {
            validate_category(category, &example_keys)?;
        }
        Ok(())
    }

    /// Resolves an example by key.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyKey`] for a blank key and
    /// [`CatalogError::UnknownKey`] listing every example key otherwise.
    pub fn resolve(&self, key: &str) -> Result<&ExampleEntry, CatalogError> {
        if key.trim().is_empty() {
            return Err(CatalogError::EmptyKey);
        }
        self.examples.iter().find(|example| example.key == key).ok_or_else(|| {
            CatalogError::UnknownKey {
                kind: EntryKind::Example,
                key: key.to_string(),
                valid: owned_keys(self.example_keys()),
            }
        })
    }

    /// Resolves a category by key.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyKey`] for a blank key and
    /// [`CatalogError::UnknownKey`] listing every category key otherwise.
    pub fn resolve_category(&self, key: &str) -> Result<&CategoryEntry, CatalogError> {
        if key.trim().is_empty() {
            return Err(CatalogError::EmptyKey);
        }
        self.categories.iter().find(|category| category.key == key).ok_or_else(|| {
            CatalogError::UnknownKey {
                kind: EntryKind::Category,
                key: key.to_string(),
                valid: owned_keys(self.category_keys()),
            }
        })
    }

    /// Returns the member examples of a category in declared order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownKey`] when a member does not resolve.
    pub fn category_members(
        &self,
        category: &CategoryEntry,
    ) -> Result<Vec<&ExampleEntry>, CatalogError> {
        category.members.iter().map(|member| self.resolve(member)).collect()
    }

    /// Checks that every source of `example` exists as a file under the root.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::SourceFileMissing`] for the first absent file.
    pub fn verify_sources(&self, example: &ExampleEntry) -> Result<(), CatalogError> {
        for source in &example.sources {
            let path = self.source_path(source);
            if !path.is_file() {
                return Err(CatalogError::SourceFileMissing {
                    key: example.key.clone(),
                    path,
                });
            }
        }
        Ok(())
    }

    /// Returns the catalog root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the project layout settings.
    #[must_use]
    pub const fn project(&self) -> &ProjectSettings {
        &self.project
    }

    /// Returns all examples in declaration order.
    #[must_use]
    pub fn examples(&self) -> &[ExampleEntry] {
        &self.examples
    }

    /// Returns all categories in declaration order.
    #[must_use]
    pub fn categories(&self) -> &[CategoryEntry] {
        &self.categories
    }

    /// Returns example keys in declaration order.
    #[must_use]
    pub fn example_keys(&self) -> Vec<&str> {
        self.examples.iter().map(|example| example.key.as_str()).collect()
    }

    /// Returns category keys in declaration order.
    #[must_use]
    pub fn category_keys(&self) -> Vec<&str> {
        self.categories.iter().map(|category| category.key.as_str()).collect()
    }

    /// Resolves a source path against the catalog root.
    #[must_use]
    pub fn source_path(&self, source: &SourceFile) -> PathBuf {
        self.root.join(&source.path)
    }

    /// Returns the resolved base template directory.
    #[must_use]
    pub fn template_dir(&self) -> PathBuf {
        self.root.join(&self.project.template_dir)
    }

    /// Returns the resolved default output directory for generated projects.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.project.output_dir)
    }

    /// Returns the resolved documentation directory.
    #[must_use]
    pub fn docs_dir(&self) -> PathBuf {
        self.root.join(&self.project.docs_dir)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Derives a display title from a kebab-case key (`peer-review` -> `Peer Review`).
#[must_use]
pub fn title_from_key(key: &str) -> String {
    key.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Validates an example or category key.
///
/// # Errors
///
/// Returns [`CatalogError::Invalid`] when the key is empty, too long, or uses
/// characters outside `[a-z0-9-]`.
pub(crate) fn validate_key(field: &str, key: &str) -> Result<(), CatalogError> {
    if key.is_empty() {
        return Err(CatalogError::Invalid(format!("{field} must be non-empty")));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CatalogError::Invalid(format!("{field} exceeds max length: {key}")));
    }
    let valid_chars =
        key.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-');
    if !valid_chars || key.starts_with('-') || key.ends_with('-') {
        return Err(CatalogError::Invalid(format!("{field} must be kebab-case: {key}")));
    }
    Ok(())
}

/// Validates that a catalog path is relative and free of traversal.
///
/// # Errors
///
/// Returns [`CatalogError::Invalid`] for empty, absolute, or escaping paths.
pub(crate) fn validate_relative_path(field: &str, path: &Path) -> Result<(), CatalogError> {
    if path.as_os_str().is_empty() {
        return Err(CatalogError::Invalid(format!("{field} must be non-empty")));
    }
    if path.is_absolute() {
        return Err(CatalogError::Invalid(format!(
            "{field} must be relative: {}",
            path.display()
        )));
    }
    for component in path.components() {
        if !matches!(component, Component::Normal(_) | Component::CurDir) {
            return Err(CatalogError::Invalid(format!(
                "{field} contains invalid component: {}",
                path.display()
            )));
        }
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(CatalogError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates one example entry in isolation.
fn validate_example(example: &ExampleEntry) -> Result<(), CatalogError> {
    validate_key("examples.key", &example.key)?;
    if example.description.trim().is_empty() {
        return Err(CatalogError::Invalid(format!(
            "example {} must have a description",
            example.key
        )));
    }
    if example.title.as_ref().is_some_and(|title| title.trim().is_empty()) {
        return Err(CatalogError::Invalid(format!("example {} has an empty title", example.key)));
    }
    if example.contracts().next().is_none() {
        return Err(CatalogError::Invalid(format!(
            "example {} must declare at least one contract source",
            example.key
        )));
    }
    if example.tests().next().is_none() {
        return Err(CatalogError::Invalid(format!(
            "example {} must declare at least one test source",
            example.key
        )));
    }
    for source in &example.sources {
        validate_relative_path(&format!("examples.{}.sources", example.key), &source.path)?;
        if source.path.file_name().is_none() {
            return Err(CatalogError::Invalid(format!(
                "example {} source has no file name: {}",
                example.key,
                source.path.display()
            )));
        }
    }
    Ok(())
}

/// Validates one category entry against the declared example keys.
fn validate_category(
    category: &CategoryEntry,
    example_keys: &BTreeSet<&str>,
) -> Result<(), CatalogError> {
    if category.name.trim().is_empty() {
        return Err(CatalogError::Invalid(format!("category {} must have a name", category.key)));
    }
    if category.members.is_empty() {
        return Err(CatalogError::Invalid(format!(
            "category {} must list at least one member",
            category.key
        )));
    }
    let mut seen = BTreeSet::new();
    for member in &category.members {
        if !seen.insert(member.as_str()) {
            return Err(CatalogError::Invalid(format!(
                "category {} lists member {member} twice",
                category.key
            )));
        }
        if !example_keys.contains(member.as_str()) {
            return Err(CatalogError::Invalid(format!(
                "category {} references unknown example {member}",
                category.key
            )));
        }
    }
    Ok(())
}

/// Converts borrowed keys into owned strings for error payloads.
fn owned_keys(keys: Vec<&str>) -> Vec<String> {
    keys.into_iter().map(str::to_string).collect()
}

/// Resolves the catalog path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, CatalogError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CATALOG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(CatalogError::Invalid("catalog path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CATALOG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), CatalogError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(CatalogError::Invalid("catalog path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(CatalogError::Invalid("catalog path component too long".to_string()));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
