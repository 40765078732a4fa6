// crates/fhevm-scaffold-gen/src/output.rs
// ============================================================================
// Module: Documentation Output Directory
// Description: Capability-scoped writer for generated documentation pages.
// Purpose: Write pages atomically without following symlinks.
// Dependencies: cap-std, cap-primitives, tracing, std
// ============================================================================

//! ## Overview
//! [`DocsOutput`] holds an open handle on the documentation directory. The
//! existing part of the path is opened as the operating system resolves it,
//! symlinked ancestors included. Components created below it and every page
//! path are opened with no-follow semantics, and pages land through a
//! temporary sibling plus rename so readers never observe a truncated page.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsString;
use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use cap_primitives::fs::FollowSymlinks;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use cap_std::fs::OpenOptions;
use tracing::debug;

use crate::GenerateError;
use crate::docs::GENERATED_MARKER;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum attempts when allocating a temporary sibling file.
const MAX_TEMP_ATTEMPTS: u32 = 64;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Open documentation directory.
pub(crate) struct DocsOutput {
    /// Capability handle on the directory.
    dir: Dir,
    /// Directory path used for reporting.
    path: PathBuf,
}

impl DocsOutput {
    /// Opens `docs_dir`, creating missing components.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::OutputPath`] when a created component turns
    /// out to be a symlink or a non-directory, or the path is otherwise
    /// unusable.
    pub(crate) fn open(docs_dir: &Path) -> Result<Self, GenerateError> {
        if docs_dir.as_os_str().is_empty() {
            return Err(GenerateError::OutputPath(docs_dir.to_path_buf()));
        }
        let normalized = normalize_dir(docs_dir)?;
        let (mut existing, components) = split_anchor_and_components(&normalized)?;
        if components.is_empty() {
            return Err(GenerateError::OutputPath(normalized));
        }
        let mut missing = components.into_iter().peekable();
        while let Some(component) = missing.peek() {
            let candidate = existing.join(component);
            if !candidate.is_dir() {
                break;
            }
            existing = candidate;
            missing.next();
        }
        let mut current = Dir::open_ambient_dir(&existing, ambient_authority())
            .map_err(|err| map_open_error(&err, docs_dir))?;
        for component in missing {
            current = open_or_create_child_dir_nofollow(&current, Path::new(&component))
                .map_err(|err| map_open_error(&err, docs_dir))?;
        }
        Ok(Self {
            dir: current,
            path: docs_dir.to_path_buf(),
        })
    }

    /// Atomically writes `bytes` to `relative` and returns the full path.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] when the path escapes the directory or the
    /// write fails.
    pub(crate) fn write(&self, relative: &Path, bytes: &[u8]) -> Result<PathBuf, GenerateError> {
        let (parent, file_name) = self.open_parent_dir(relative)?;
        let full_path = self.path.join(relative);
        write_file_atomic(&parent, Path::new(&file_name), &full_path, bytes)?;
        debug!(path = %full_path.display(), bytes = bytes.len(), "wrote documentation file");
        Ok(full_path)
    }

    /// Lists top-level generated pages other than `index_file`, sorted by name.
    ///
    /// A page counts as generated when it is a regular Markdown file whose
    /// content starts with [`GENERATED_MARKER`].
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Io`] when the directory cannot be listed.
    pub(crate) fn generated_pages(&self, index_file: &str) -> Result<Vec<String>, GenerateError> {
        let entries = self.dir.entries().map_err(|err| GenerateError::io(&self.path, &err))?;
        let mut pages = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| GenerateError::io(&self.path, &err))?;
            let file_type = entry.file_type().map_err(|err| GenerateError::io(&self.path, &err))?;
            if !file_type.is_file() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name == index_file || !name.ends_with(".md") || name.starts_with(".tmp-") {
                continue;
            }
            if self.starts_with_marker(&name)? {
                pages.push(name);
            }
        }
        pages.sort();
        Ok(pages)
    }

    /// Removes a top-level file.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Io`] when removal fails.
    pub(crate) fn remove(&self, name: &str) -> Result<(), GenerateError> {
        self.dir.remove_file(name).map_err(|err| GenerateError::io(&self.path.join(name), &err))
    }

    /// Returns the directory path.
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true when the named file begins with the generated marker.
    fn starts_with_marker(&self, name: &str) -> Result<bool, GenerateError> {
        let mut options = OpenOptions::new();
        options.read(true);
        options._cap_fs_ext_follow(FollowSymlinks::No);
        let full_path = self.path.join(name);
        let file =
            self.dir.open_with(name, &options).map_err(|err| GenerateError::io(&full_path, &err))?;
        let mut head = Vec::with_capacity(GENERATED_MARKER.len());
        let limit = u64::try_from(GENERATED_MARKER.len()).unwrap_or(u64::MAX);
        file.take(limit)
            .read_to_end(&mut head)
            .map_err(|err| GenerateError::io(&full_path, &err))?;
        Ok(head == GENERATED_MARKER.as_bytes())
    }

    /// Opens the parent directory of `relative`, creating missing components.
    fn open_parent_dir(&self, relative: &Path) -> Result<(Dir, OsString), GenerateError> {
        let mut current = self.dir.try_clone().map_err(|err| GenerateError::io(&self.path, &err))?;
        let mut components = relative.components().peekable();
        while let Some(component) = components.next() {
            let Component::Normal(name) = component else {
                return Err(GenerateError::OutputPath(relative.to_path_buf()));
            };
            if components.peek().is_none() {
                return Ok((current, name.to_os_string()));
            }
            current = open_or_create_child_dir_nofollow(&current, Path::new(name))
                .map_err(|err| map_open_error(&err, &self.path.join(relative)))?;
        }
        Err(GenerateError::OutputPath(relative.to_path_buf()))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Normalizes a directory into an absolute path.
fn normalize_dir(dir: &Path) -> Result<PathBuf, GenerateError> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    std::env::current_dir().map(|cwd| cwd.join(dir)).map_err(|err| GenerateError::io(dir, &err))
}

/// Splits an absolute path into an anchor root and normal child components.
///
/// Parent components are resolved lexically so catalog-relative paths such as
/// `../docs` remain usable.
fn split_anchor_and_components(path: &Path) -> Result<(PathBuf, Vec<OsString>), GenerateError> {
    let mut anchor = PathBuf::new();
    let mut components: Vec<OsString> = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => anchor.push(component.as_os_str()),
            Component::CurDir => {}
            Component::Normal(value) => components.push(value.to_os_string()),
            Component::ParentDir => {
                if components.pop().is_none() {
                    return Err(GenerateError::OutputPath(path.to_path_buf()));
                }
            }
        }
    }
    if anchor.as_os_str().is_empty() {
        return Err(GenerateError::OutputPath(path.to_path_buf()));
    }
    Ok((anchor, components))
}

/// Opens a child directory without following symlinks.
///
/// A symlinked child is reported as `InvalidInput`; the no-follow open only
/// guards against a swap between the check and the open.
fn open_child_dir_nofollow(parent: &Dir, child: &Path) -> std::io::Result<Dir> {
    if parent.symlink_metadata(child)?.file_type().is_symlink() {
        return Err(std::io::Error::new(ErrorKind::InvalidInput, "path component is a symlink"));
    }
    let mut options = OpenOptions::new();
    options.read(true);
    options._cap_fs_ext_follow(FollowSymlinks::No);
    let file = parent.open_with(child, &options)?;
    let metadata = file.metadata()?;
    if !metadata.is_dir() {
        return Err(std::io::Error::new(
            ErrorKind::InvalidInput,
            "path component is not a directory",
        ));
    }
    Ok(Dir::from_std_file(file.into_std()))
}

/// Opens or creates a child directory without following symlinks.
fn open_or_create_child_dir_nofollow(parent: &Dir, child: &Path) -> std::io::Result<Dir> {
    match open_child_dir_nofollow(parent, child) {
        Ok(dir) => Ok(dir),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            parent.create_dir(child)?;
            open_child_dir_nofollow(parent, child)
        }
        Err(err) => Err(err),
    }
}

/// Maps low-level open errors into output path errors.
fn map_open_error(err: &std::io::Error, path: &Path) -> GenerateError {
    if matches!(
        err.kind(),
        ErrorKind::NotFound
            | ErrorKind::InvalidInput
            | ErrorKind::PermissionDenied
            | ErrorKind::NotADirectory
            | ErrorKind::Unsupported
    ) {
        return GenerateError::OutputPath(path.to_path_buf());
    }
    GenerateError::io(path, err)
}

/// Writes file bytes using a temporary sibling and atomic rename.
fn write_file_atomic(
    parent: &Dir,
    file_name: &Path,
    full_path: &Path,
    bytes: &[u8],
) -> Result<(), GenerateError> {
    for attempt in 0 .. MAX_TEMP_ATTEMPTS {
        let temp_name = temp_file_name(file_name, attempt);
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        options._cap_fs_ext_follow(FollowSymlinks::No);
        match parent.open_with(&temp_name, &options) {
            Ok(mut temp_file) => {
                let written = temp_file
                    .write_all(bytes)
                    .and_then(|()| temp_file.sync_all())
                    .and_then(|()| parent.rename(&temp_name, parent, file_name));
                if let Err(err) = written {
                    let _ = parent.remove_file(&temp_name);
                    return Err(GenerateError::io(full_path, &err));
                }
                return Ok(());
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {}
            Err(err) => return Err(map_open_error(&err, full_path)),
        }
    }
    Err(GenerateError::Io {
        path: full_path.to_path_buf(),
        message: "unable to allocate temporary output file".to_string(),
    })
}

/// Builds a deterministic temporary file name for atomic writes.
fn temp_file_name(file_name: &Path, attempt: u32) -> PathBuf {
    let mut temp = OsString::from(".tmp-");
    temp.push(file_name.as_os_str());
    temp.push(format!(".{}.{}", std::process::id(), attempt));
    PathBuf::from(temp)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
