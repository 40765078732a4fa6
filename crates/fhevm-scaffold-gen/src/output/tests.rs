// crates/fhevm-scaffold-gen/src/output/tests.rs
// ============================================================================
// Module: Documentation Output Unit Tests
// Description: Unit coverage for the capability-scoped page writer.
// Purpose: Ensure atomic writes, marker detection, and symlink handling.
// Dependencies: fhevm-scaffold-gen, tempfile, std
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use super::DocsOutput;
use crate::GenerateError;
use crate::docs::GENERATED_MARKER;

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Missing directories are created and pages written in place.
#[test]
fn write_creates_directory_and_page() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let docs_dir = temp.path().join("site/docs");
    let output = DocsOutput::open(&docs_dir)?;
    let written = output.write(Path::new("page.md"), b"# Page\n")?;

    if written != docs_dir.join("page.md") || fs::read_to_string(&written)? != "# Page\n" {
        return Err("page not written where expected".into());
    }
    let leftovers: Vec<_> = fs::read_dir(&docs_dir)?
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(".tmp-"))
        .collect();
    if !leftovers.is_empty() {
        return Err("temporary files left behind".into());
    }
    Ok(())
}

/// Rewriting a page replaces its content.
#[test]
fn write_replaces_existing_page() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let output = DocsOutput::open(temp.path())?;
    output.write(Path::new("page.md"), b"first, and longer\n")?;
    output.write(Path::new("page.md"), b"second\n")?;
    if fs::read_to_string(temp.path().join("page.md"))? != "second\n" {
        return Err("page was not replaced".into());
    }
    Ok(())
}

/// Only marked pages other than the index are reported as generated.
#[test]
fn generated_pages_require_marker() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let marked = format!("{GENERATED_MARKER}\n# Title\n");
    fs::write(temp.path().join("b.md"), &marked)?;
    fs::write(temp.path().join("a.md"), &marked)?;
    fs::write(temp.path().join("SUMMARY.md"), &marked)?;
    fs::write(temp.path().join("handwritten.md"), "# Notes\n")?;
    fs::write(temp.path().join("notes.txt"), &marked)?;
    fs::create_dir(temp.path().join("nested.md"))?;

    let output = DocsOutput::open(temp.path())?;
    let pages = output.generated_pages("SUMMARY.md")?;
    if pages != vec!["a.md".to_string(), "b.md".to_string()] {
        return Err(format!("unexpected generated pages: {}", pages.join(", ")).into());
    }
    output.remove("a.md")?;
    if temp.path().join("a.md").exists() {
        return Err("page not removed".into());
    }
    Ok(())
}

/// Parent traversal in page paths is refused.
#[test]
fn write_rejects_parent_traversal() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let output = DocsOutput::open(&temp.path().join("docs"))?;
    let result = output.write(Path::new("../escape.md"), b"x");
    if !matches!(result, Err(GenerateError::OutputPath(_))) {
        return Err("expected traversal to be refused".into());
    }
    if temp.path().join("escape.md").exists() {
        return Err("file escaped the docs directory".into());
    }
    Ok(())
}

/// Existing symlinked ancestors are followed; missing components are created below them.
#[cfg(unix)]
#[test]
fn open_follows_symlinked_ancestors() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let real = temp.path().join("real");
    fs::create_dir(&real)?;
    let link = temp.path().join("link");
    std::os::unix::fs::symlink(&real, &link)?;

    let output = DocsOutput::open(&link.join("site/docs"))?;
    output.write(Path::new("page.md"), b"# Page\n")?;
    if fs::read_to_string(real.join("site/docs/page.md"))? != "# Page\n" {
        return Err("page not written through the symlinked root".into());
    }

    let linked_docs = temp.path().join("docs-link");
    std::os::unix::fs::symlink(real.join("site/docs"), &linked_docs)?;
    let output = DocsOutput::open(&linked_docs)?;
    if output.generated_pages("SUMMARY.md")? != Vec::<String>::new() {
        return Err("unmarked page reported as generated".into());
    }
    Ok(())
}

/// Symlinks inside page paths are refused.
#[cfg(unix)]
#[test]
fn write_rejects_symlinked_page_directory() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let outside = temp.path().join("outside");
    fs::create_dir(&outside)?;
    let docs_dir = temp.path().join("docs");
    fs::create_dir(&docs_dir)?;
    std::os::unix::fs::symlink(&outside, docs_dir.join("nested"))?;

    let output = DocsOutput::open(&docs_dir)?;
    let result = output.write(Path::new("nested/page.md"), b"x");
    if !matches!(result, Err(GenerateError::OutputPath(_))) {
        return Err("expected symlinked page directory to be refused".into());
    }
    if outside.join("page.md").exists() {
        return Err("page written through a symlink".into());
    }
    Ok(())
}
