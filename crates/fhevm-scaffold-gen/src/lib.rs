// crates/fhevm-scaffold-gen/src/lib.rs
// ============================================================================
// Module: fhevm-scaffold Generator Library
// Description: Project templating and documentation generators.
// Purpose: Turn catalog entries into standalone projects and GitBook pages.
// Dependencies: fhevm-scaffold-catalog, cap-std, regex, serde_json, thiserror, tracing, walkdir
// ============================================================================

//! ## Overview
//! Two pipelines share the catalog:
//! - Project pipeline: [`copier`] -> [`metadata`] -> [`readme`], orchestrated by
//!   [`pipeline::generate_example`] and [`pipeline::generate_category`].
//! - Documentation pipeline: [`docs`] -> [`index`], orchestrated by
//!   [`pipeline::generate_docs`] and [`pipeline::generate_all_docs`].
//!
//! Every operation fails fast. Source files are read before anything is
//! written so that a missing file never leaves a half-rendered page behind.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod copier;
pub mod docs;
pub mod index;
pub mod metadata;
mod output;
pub mod pipeline;
pub mod readme;

// ============================================================================
// SECTION: Errors
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use fhevm_scaffold_catalog::CatalogError;
use thiserror::Error;

/// Errors raised by the generation pipelines.
///
/// # Invariants
/// - Path-carrying variants always name the offending path.
/// - Variant meanings are stable for automation and tests.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Catalog resolution failed.
    #[error(transparent)]
    Catalog(CatalogError),
    /// Copy destination already exists.
    #[error("destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),
    /// A referenced source file could not be read.
    #[error("source file missing: {}", .0.display())]
    SourceFileMissing(PathBuf),
    /// The copied project has no package metadata file.
    #[error("package metadata not found: {}", .0.display())]
    MetadataNotFound(PathBuf),
    /// No contract declaration could be found in a source file.
    #[error("no contract declaration found in {}", .0.display())]
    NoDeclarationFound(PathBuf),
    /// Output path invalid or inaccessible.
    #[error("invalid output path: {}", .0.display())]
    OutputPath(PathBuf),
    /// File-system failure.
    #[error("io error at {}: {message}", .path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error text.
        message: String,
    },
    /// Caller or catalog supplied unusable input.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// JSON parsing or rendering failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl GenerateError {
    /// Wraps an I/O error with the path it occurred on.
    pub(crate) fn io(path: &Path, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Returns a stable snake-case label naming the failure kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Catalog(CatalogError::UnknownKey {
                ..
            }) => "unknown_key",
            Self::Catalog(CatalogError::SourceFileMissing {
                ..
            })
            | Self::SourceFileMissing(_) => "source_file_missing",
            Self::Catalog(_) => "catalog",
            Self::DestinationExists(_) => "destination_exists",
            Self::MetadataNotFound(_) => "metadata_not_found",
            Self::NoDeclarationFound(_) => "no_declaration_found",
            Self::OutputPath(_) | Self::Io {
                ..
            } => "io",
            Self::InvalidInput(_) => "invalid_input",
            Self::Serialization(_) => "serialization",
        }
    }
}

impl From<CatalogError> for GenerateError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::SourceFileMissing {
                path,
                ..
            } => Self::SourceFileMissing(path),
            other => Self::Catalog(other),
        }
    }
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use copier::CopyReport;
pub use copier::copy_tree;
pub use docs::DocsConfig;
pub use docs::DocumentationPage;
pub use docs::GENERATED_MARKER;
pub use docs::SourceSection;
pub use docs::build_documentation_page;
pub use docs::extract_contract_name;
pub use docs::render_documentation_page;
pub use index::rebuild_index;
pub use index::render_index;
pub use metadata::rewrite_package_metadata;
pub use pipeline::DocsReport;
pub use pipeline::ProjectReport;
pub use pipeline::generate_all_docs;
pub use pipeline::generate_category;
pub use pipeline::generate_docs;
pub use pipeline::generate_example;
pub use readme::ReadmeContract;
pub use readme::generate_category_readme;
pub use readme::generate_readme;
pub use readme::render_deploy_script;
