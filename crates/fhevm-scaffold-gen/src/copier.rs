// crates/fhevm-scaffold-gen/src/copier.rs
// ============================================================================
// Module: Project Copier
// Description: Filtered recursive copy of a project template.
// Purpose: Duplicate a template tree while skipping build and cache folders.
// Dependencies: tracing, walkdir, std
// ============================================================================

//! ## Overview
//! [`copy_tree`] mirrors a source directory into a destination that must not
//! exist yet. Directories whose name appears in the exclusion list are pruned
//! at any depth, so not even an empty mirror is created for them. File bytes
//! are copied verbatim. Symlinks are refused rather than followed.
//!
//! A failure part-way through leaves the partially written destination in
//! place; cleanup is the caller's call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;
use tracing::info;
use walkdir::DirEntry;
use walkdir::WalkDir;

use crate::GenerateError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Summary of a completed copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// Files copied.
    pub files: usize,
    /// Directories created below the destination root.
    pub directories: usize,
    /// Excluded directories skipped.
    pub skipped: usize,
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Copies `source_root` into `dest_root`, skipping excluded directory names.
///
/// # Errors
///
/// Returns [`GenerateError::DestinationExists`] when `dest_root` is already
/// present, [`GenerateError::InvalidInput`] when `source_root` is not a
/// directory, and [`GenerateError::Io`] on any read/write failure or symlink.
pub fn copy_tree(
    source_root: &Path,
    dest_root: &Path,
    excluded_dir_names: &[String],
) -> Result<CopyReport, GenerateError> {
    if fs::symlink_metadata(dest_root).is_ok() {
        return Err(GenerateError::DestinationExists(dest_root.to_path_buf()));
    }
    let source_meta =
        fs::metadata(source_root).map_err(|err| GenerateError::io(source_root, &err))?;
    if !source_meta.is_dir() {
        return Err(GenerateError::InvalidInput(format!(
            "copy source is not a directory: {}",
            source_root.display()
        )));
    }
    create_destination_root(dest_root)?;

    let excluded: BTreeSet<&str> = excluded_dir_names.iter().map(String::as_str).collect();
    let mut skipped = 0_usize;
    let mut report = CopyReport::default();
    let walker = WalkDir::new(source_root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let keep = !is_excluded_dir(entry, &excluded);
            if !keep {
                skipped += 1;
                debug!(path = %entry.path().display(), "skipping excluded directory");
            }
            keep
        });

    for entry in walker {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(source_root).to_path_buf();
            GenerateError::Io {
                path,
                message: err.to_string(),
            }
        })?;
        let relative = entry.path().strip_prefix(source_root).map_err(|_| {
            GenerateError::InvalidInput(format!(
                "walked path escaped the copy source: {}",
                entry.path().display()
            ))
        })?;
        let target = dest_root.join(relative);
        let file_type = entry.file_type();
        if file_type.is_symlink() {
            return Err(GenerateError::Io {
                path: entry.path().to_path_buf(),
                message: "refusing to copy symlink".to_string(),
            });
        }
        if file_type.is_dir() {
            fs::create_dir(&target).map_err(|err| GenerateError::io(&target, &err))?;
            report.directories += 1;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target).map_err(|err| GenerateError::io(entry.path(), &err))?;
            debug!(path = %relative.display(), "copied file");
            report.files += 1;
        }
    }
    report.skipped = skipped;

    info!(
        source = %source_root.display(),
        destination = %dest_root.display(),
        files = report.files,
        directories = report.directories,
        skipped = report.skipped,
        "copied project tree"
    );
    Ok(report)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true when the entry is a directory named in the exclusion set.
fn is_excluded_dir(entry: &DirEntry, excluded: &BTreeSet<&str>) -> bool {
    entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(|name| excluded.contains(name))
}

/// Creates the destination root, refusing to reuse an existing directory.
fn create_destination_root(dest_root: &Path) -> Result<(), GenerateError> {
    if let Some(parent) = dest_root.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| GenerateError::io(parent, &err))?;
    }
    match fs::create_dir(dest_root) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            Err(GenerateError::DestinationExists(dest_root.to_path_buf()))
        }
        Err(err) => Err(GenerateError::io(dest_root, &err)),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
