// crates/fhevm-scaffold-gen/src/docs.rs
// ============================================================================
// Module: Documentation Extractor and Formatter
// Description: Renders GitBook pages from verbatim contract and test sources.
// Purpose: Produce one complete documentation page per catalog example.
// Dependencies: fhevm-scaffold-catalog, regex, tracing, std
// ============================================================================

//! ## Overview
//! A page is rendered entirely in memory: every source file is read and the
//! primary contract name is extracted before any byte is written. Writing is
//! a separate step ([`build_documentation_page`]) so a missing source never
//! produces a page with some sections absent.
//!
//! Contract name extraction is a single regex scan, not a parser. It finds the
//! first line-leading `contract`, `abstract contract`, `library`, or
//! `interface` declaration followed by an inheritance list or an opening brace
//! and returns `None` rather than guessing when nothing matches.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::LazyLock;

use fhevm_scaffold_catalog::ExampleEntry;
use fhevm_scaffold_catalog::SourceFile;
use fhevm_scaffold_catalog::SourceRole;
use regex::Regex;
use tracing::debug;
use tracing::info;

use crate::GenerateError;
use crate::output::DocsOutput;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// First line of every generated page.
pub const GENERATED_MARKER: &str = "<!-- @generated by fhevm-scaffold. Do not edit by hand. -->";

/// Declaration pattern for the primary contract.
const DECLARATION_PATTERN: &str = r"(?m)^[ \t]*(?:abstract[ \t]+)?(?:contract|library|interface)[ \t]+([A-Za-z_$][A-Za-z0-9_$]*)\s*(?:is\b|\{)";

/// Compiled declaration pattern; `None` only if the literal fails to compile.
static DECLARATION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(DECLARATION_PATTERN).ok());

/// Shortest code fence.
const MIN_FENCE_LEN: usize = 3;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Inputs for rendering one documentation page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsConfig {
    /// Example key.
    pub key: String,
    /// Page title.
    pub title: String,
    /// Page description.
    pub description: String,
    /// Category key used by the navigation index.
    pub category: String,
    /// Concept explanations, in order.
    pub concepts: Vec<String>,
    /// Sources to embed, in order. Paths are relative to the project root.
    pub sources: Vec<SourceFile>,
    /// Output path relative to the documentation directory.
    pub output: PathBuf,
}

impl DocsConfig {
    /// Builds the page config for a catalog example; the page lands at `<key>.md`.
    #[must_use]
    pub fn from_entry(entry: &ExampleEntry) -> Self {
        Self {
            key: entry.key.clone(),
            title: entry.display_title(),
            description: entry.description.clone(),
            category: entry.category.clone(),
            concepts: entry.concepts.clone(),
            sources: entry.sources.clone(),
            output: PathBuf::from(format!("{}.md", entry.key)),
        }
    }
}

/// One embedded source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSection {
    /// Role of the file.
    pub role: SourceRole,
    /// Tab label (the file name).
    pub label: String,
    /// Fence language derived from the file extension.
    pub language: &'static str,
    /// Verbatim file content.
    pub text: String,
}

/// A fully rendered documentation page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentationPage {
    /// Example key.
    pub key: String,
    /// Page title.
    pub title: String,
    /// Page description.
    pub description: String,
    /// Category key.
    pub category: String,
    /// Concept explanations.
    pub concepts: Vec<String>,
    /// Primary contract name.
    pub contract_name: String,
    /// Embedded sources, in order.
    pub sections: Vec<SourceSection>,
    /// Output path relative to the documentation directory.
    pub relative_path: PathBuf,
    /// Rendered markdown.
    pub content: String,
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Returns the first declared contract name in `source_text`.
#[must_use]
pub fn extract_contract_name(source_text: &str) -> Option<String> {
    let pattern = DECLARATION.as_ref()?;
    pattern
        .captures(source_text)
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str().to_string())
}

/// Reads every source of `config` under `root` and renders the page.
///
/// Nothing is written.
///
/// # Errors
///
/// Returns [`GenerateError::SourceFileMissing`] when a source cannot be read,
/// [`GenerateError::NoDeclarationFound`] when the first contract source has no
/// declaration, and [`GenerateError::InvalidInput`] when `config` lists no
/// contract source.
pub fn render_documentation_page(
    config: &DocsConfig,
    root: &Path,
) -> Result<DocumentationPage, GenerateError> {
    let mut sections = Vec::with_capacity(config.sources.len());
    for source in &config.sources {
        let path = root.join(&source.path);
        let text =
            fs::read_to_string(&path).map_err(|_| GenerateError::SourceFileMissing(path.clone()))?;
        debug!(path = %path.display(), role = source.role.as_str(), "read documentation source");
        sections.push(SourceSection {
            role: source.role,
            label: source.file_name(),
            language: fence_language(&source.path),
            text,
        });
    }

    let Some((primary, primary_source)) = sections
        .iter()
        .zip(&config.sources)
        .find(|(section, _)| section.role == SourceRole::Contract)
    else {
        return Err(GenerateError::InvalidInput(format!(
            "example `{}` has no contract source",
            config.key
        )));
    };
    let contract_name = extract_contract_name(&primary.text)
        .ok_or_else(|| GenerateError::NoDeclarationFound(root.join(&primary_source.path)))?;

    let content = render_page(config, &contract_name, &sections);
    Ok(DocumentationPage {
        key: config.key.clone(),
        title: config.title.clone(),
        description: config.description.clone(),
        category: config.category.clone(),
        concepts: config.concepts.clone(),
        contract_name,
        sections,
        relative_path: config.output.clone(),
        content,
    })
}

/// Renders the page for `config` and writes it under `docs_dir`.
///
/// Any existing page at the output path is replaced.
///
/// # Errors
///
/// Returns [`GenerateError`] when rendering fails (nothing is written) or the
/// write fails.
pub fn build_documentation_page(
    config: &DocsConfig,
    root: &Path,
    docs_dir: &Path,
) -> Result<DocumentationPage, GenerateError> {
    let page = render_documentation_page(config, root)?;
    let output = DocsOutput::open(docs_dir)?;
    write_page(&output, &page)?;
    Ok(page)
}

// ============================================================================
// SECTION: Crate API
// ============================================================================

/// Writes a rendered page into an open documentation directory.
pub(crate) fn write_page(
    output: &DocsOutput,
    page: &DocumentationPage,
) -> Result<PathBuf, GenerateError> {
    let path = output.write(&page.relative_path, page.content.as_bytes())?;
    info!(key = %page.key, path = %path.display(), "wrote documentation page");
    Ok(path)
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Assembles the markdown body.
fn render_page(config: &DocsConfig, contract_name: &str, sections: &[SourceSection]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{GENERATED_MARKER}\n");
    let _ = writeln!(out, "# {}\n", config.title);
    let _ = writeln!(out, "{}\n", config.description);
    out.push_str("{% hint style=\"info\" %}\n");
    let _ = writeln!(
        out,
        "The primary contract of this example is `{contract_name}`. Generate a standalone \
         project with `fhevm-scaffold generate-example {}`.",
        config.key
    );
    out.push_str("{% endhint %}\n\n");

    if !config.concepts.is_empty() {
        out.push_str("## Key Concepts\n\n");
        for concept in &config.concepts {
            let _ = writeln!(out, "- {concept}");
        }
        out.push('\n');
    }

    out.push_str("## Source Code\n\n");
    out.push_str("{% tabs %}\n\n");
    for section in sections {
        let fence = "`".repeat(fence_len(&section.text));
        let _ = writeln!(out, "{{% tab title=\"{}\" %}}\n", section.label);
        let _ = writeln!(out, "{fence}{}", section.language);
        out.push_str(&section.text);
        if !section.text.ends_with('\n') {
            out.push('\n');
        }
        let _ = writeln!(out, "{fence}\n");
        out.push_str("{% endtab %}\n\n");
    }
    out.push_str("{% endtabs %}\n\n");

    out.push_str("## Quick Reference\n\n");
    out.push_str("```bash\n");
    let _ = writeln!(out, "fhevm-scaffold generate-example {}", config.key);
    out.push_str("npm install\nnpm run compile\nnpm run test\n```\n");
    out
}

/// Maps a source extension to a fence language.
fn fence_language(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("sol") => "solidity",
        Some("ts") => "typescript",
        Some("js") => "javascript",
        _ => "text",
    }
}

/// Returns a fence length longer than any backtick run in `text`.
fn fence_len(text: &str) -> usize {
    let mut longest = 0_usize;
    let mut current = 0_usize;
    for ch in text.chars() {
        if ch == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    (longest + 1).max(MIN_FENCE_LEN)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
