// crates/fhevm-scaffold-gen/src/index.rs
// ============================================================================
// Module: Navigation Index Builder
// Description: Renders the GitBook `SUMMARY.md` linking every generated page.
// Purpose: Keep one ordered navigation document in sync with generated pages.
// Dependencies: fhevm-scaffold-catalog, tracing, std
// ============================================================================

//! ## Overview
//! The index is always replaced in full. Pages are grouped under their
//! category heading in catalog declaration order; within a category, pages
//! keep the order they were supplied in. Categories without pages are left
//! out.
//!
//! # Invariants
//! - The rendered index holds exactly one link per supplied page.
//! - Stale pruning only removes files that carry the generated marker.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::Path;
use std::path::PathBuf;

use fhevm_scaffold_catalog::Catalog;
use tracing::info;
use tracing::warn;

use crate::GenerateError;
use crate::docs::DocumentationPage;
use crate::docs::GENERATED_MARKER;
use crate::output::DocsOutput;

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Renders the navigation index for `pages`.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidInput`] when two pages share an output
/// path, a page would overwrite the index file, or a page names an undeclared
/// category.
pub fn render_index(catalog: &Catalog, pages: &[DocumentationPage]) -> Result<String, GenerateError> {
    let index_file = catalog.project().index_file.as_str();
    let mut seen = BTreeSet::new();
    for page in pages {
        if link_target(&page.relative_path).eq_ignore_ascii_case(index_file) {
            return Err(GenerateError::InvalidInput(format!(
                "page `{}` would be written over the index file {index_file}",
                page.key
            )));
        }
        if !seen.insert(page.relative_path.as_path()) {
            return Err(GenerateError::InvalidInput(format!(
                "duplicate documentation page: {}",
                page.relative_path.display()
            )));
        }
        if catalog.categories().iter().all(|category| category.key != page.category) {
            return Err(GenerateError::InvalidInput(format!(
                "page `{}` names undeclared category `{}`",
                page.key, page.category
            )));
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "{GENERATED_MARKER}\n");
    out.push_str("# Summary\n");
    for category in catalog.categories() {
        let members: Vec<&DocumentationPage> =
            pages.iter().filter(|page| page.category == category.key).collect();
        if members.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n## {}\n", category.name);
        for page in members {
            let _ = writeln!(out, "* [{}]({})", page.title, link_target(&page.relative_path));
        }
    }
    Ok(out)
}

/// Replaces the index file in the catalog's documentation directory.
///
/// Returns the path of the written index.
///
/// # Errors
///
/// Returns [`GenerateError`] when rendering or writing fails.
pub fn rebuild_index(
    catalog: &Catalog,
    pages: &[DocumentationPage],
) -> Result<PathBuf, GenerateError> {
    let content = render_index(catalog, pages)?;
    let output = DocsOutput::open(&catalog.docs_dir())?;
    write_index(&output, &catalog.project().index_file, &content)
}

// ============================================================================
// SECTION: Crate API
// ============================================================================

/// Writes rendered index content into an open documentation directory.
pub(crate) fn write_index(
    output: &DocsOutput,
    index_file: &str,
    content: &str,
) -> Result<PathBuf, GenerateError> {
    let path = output.write(Path::new(index_file), content.as_bytes())?;
    info!(path = %path.display(), "rebuilt navigation index");
    Ok(path)
}

/// Deletes generated pages in `output` that are not part of `pages`.
///
/// Returns the removed file names, sorted.
pub(crate) fn prune_stale_pages(
    output: &DocsOutput,
    index_file: &str,
    pages: &[DocumentationPage],
) -> Result<Vec<String>, GenerateError> {
    let current: BTreeSet<String> =
        pages.iter().map(|page| link_target(&page.relative_path)).collect();
    let mut removed = Vec::new();
    for name in output.generated_pages(index_file)? {
        if current.contains(&name) {
            continue;
        }
        output.remove(&name)?;
        warn!(page = %name, docs_dir = %output.path().display(), "removed stale generated page");
        removed.push(name);
    }
    Ok(removed)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Renders a relative page path as a forward-slash link target.
fn link_target(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

// ============================================================================
// SECTION: Tests
// ============================================================================
