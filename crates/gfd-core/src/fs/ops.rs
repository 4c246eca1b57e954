//! Directory reading and file mutation primitives.
//!
//! These functions act on a single path and report failure through
//! [`CoreError`]; batching and error accumulation live one level up in
//! [`crate::clipboard`] and [`crate::browser`].

use std::fs::{FileTimes, Metadata};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::DirectoryEntry;

/// Reads the immediate contents of a directory.
///
/// The returned entries are **unsorted** and unfiltered. Entries that vanish
/// or cannot be inspected between `read_dir` and `stat` are skipped.
///
/// # Errors
///
/// - [`CoreError::NotFound`] — the path does not exist.
/// - [`CoreError::NotADirectory`] — the path is not a directory.
/// - [`CoreError::PermissionDenied`] — read access is denied.
/// - [`CoreError::Io`] — any other I/O error.
pub fn read_directory(path: &Path) -> CoreResult<Vec<DirectoryEntry>> {
    let meta = std::fs::metadata(path).map_err(|e| classify(e, path))?;
    if !meta.is_dir() {
        return Err(CoreError::NotADirectory(path.to_path_buf()));
    }

    let read_dir = std::fs::read_dir(path).map_err(|e| classify(e, path))?;

    let entries = read_dir
        .filter_map(Result::ok)
        .filter_map(|dir_entry| DirectoryEntry::from_path(&dir_entry.path()).ok())
        .collect();

    Ok(entries)
}

/// Copies a file or directory to `dest`.
///
/// Files keep their permissions and access/modification times. Directories
/// are copied recursively; symlinks inside them are recreated as symlinks
/// rather than followed.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `src` does not exist.
/// - [`CoreError::Io`] for any I/O failure during copy.
pub fn copy_path(src: &Path, dest: &Path) -> CoreResult<()> {
    let meta = std::fs::symlink_metadata(src).map_err(|e| classify(e, src))?;

    if meta.is_dir() {
        copy_dir_recursive(src, dest)
    } else if meta.is_symlink() && std::fs::metadata(src).is_ok_and(|m| m.is_dir()) {
        // A top-level link to a directory is copied as the directory it names.
        copy_dir_recursive(src, dest)
    } else {
        copy_file_with_times(src, dest)
    }
}

/// Maximum directory depth walked when copying, to bound symlink loops.
const MAX_COPY_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Dir,
    File,
    Symlink,
}

/// Copies the tree at `src` to `dest`.
///
/// The whole source tree is listed before anything is written, so a
/// destination inside the source (`d` into `d` or `d/x`) copies the tree as
/// it was and terminates.
fn copy_dir_recursive(src: &Path, dest: &Path) -> CoreResult<()> {
    let mut nodes = Vec::new();
    snapshot_tree(src, Path::new(""), 0, &mut nodes)?;

    std::fs::create_dir_all(dest)?;
    for (relative, kind) in nodes {
        let from = src.join(&relative);
        let to = dest.join(&relative);
        match kind {
            NodeKind::Dir => std::fs::create_dir_all(&to)?,
            NodeKind::Symlink => copy_symlink(&from, &to)?,
            NodeKind::File => copy_file_with_times(&from, &to)?,
        }
    }

    Ok(())
}

/// Lists `dir` depth-first, parents before children, as paths relative to
/// the copy root. Symlinks are recorded, never followed.
fn snapshot_tree(
    root: &Path,
    relative: &Path,
    depth: usize,
    nodes: &mut Vec<(PathBuf, NodeKind)>,
) -> CoreResult<()> {
    if depth > MAX_COPY_DEPTH {
        return Err(CoreError::Io(io::Error::other(format!(
            "maximum recursion depth ({MAX_COPY_DEPTH}) exceeded during copy"
        ))));
    }

    for entry in std::fs::read_dir(root.join(relative))? {
        let entry = entry?;
        let child = relative.join(entry.file_name());
        // file_type() does not follow symlinks
        let ft = entry.file_type()?;

        if ft.is_symlink() {
            nodes.push((child, NodeKind::Symlink));
        } else if ft.is_dir() {
            nodes.push((child.clone(), NodeKind::Dir));
            snapshot_tree(root, &child, depth + 1, nodes)?;
        } else {
            nodes.push((child, NodeKind::File));
        }
    }

    Ok(())
}

fn copy_symlink(src: &Path, dest: &Path) -> CoreResult<()> {
    #[cfg(unix)]
    {
        let link_target = std::fs::read_link(src)?;
        std::os::unix::fs::symlink(&link_target, dest)?;
    }
    #[cfg(not(unix))]
    {
        std::fs::copy(src, dest)?;
    }
    Ok(())
}

fn copy_file_with_times(src: &Path, dest: &Path) -> CoreResult<()> {
    std::fs::copy(src, dest)?;
    if let Ok(meta) = std::fs::metadata(src) {
        if let Err(e) = copy_times(&meta, dest) {
            tracing::debug!(dest = %dest.display(), "could not preserve timestamps: {e}");
        }
    }
    Ok(())
}

fn copy_times(src_meta: &Metadata, dest: &Path) -> io::Result<()> {
    let mut times = FileTimes::new();
    if let Ok(accessed) = src_meta.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = src_meta.modified() {
        times = times.set_modified(modified);
    }
    std::fs::File::open(dest)?.set_times(times)
}

/// Moves a file or directory to a new location as a unit.
///
/// Attempts a fast `rename` first. If rename fails (e.g. cross-device),
/// falls back to copy + delete.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `src` does not exist.
/// - [`CoreError::Io`] for any I/O failure.
pub fn move_path(src: &Path, dest: &Path) -> CoreResult<()> {
    // symlink_metadata so a dangling link can still be moved
    if std::fs::symlink_metadata(src).is_err() {
        return Err(CoreError::NotFound(src.to_path_buf()));
    }

    match std::fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::debug!(src = %src.display(), "rename failed ({e}), falling back to copy");
            copy_path(src, dest)?;
            delete_path(src)?;
            Ok(())
        }
    }
}

/// Deletes a file or directory (recursively). Symlinks are removed, never
/// followed.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `path` does not exist.
/// - [`CoreError::Io`] for any I/O failure during deletion.
pub fn delete_path(path: &Path) -> CoreResult<()> {
    let meta = std::fs::symlink_metadata(path).map_err(|e| classify(e, path))?;

    if meta.is_dir() {
        std::fs::remove_dir_all(path)?;
    } else {
        std::fs::remove_file(path)?;
    }

    Ok(())
}

/// Renames an entry within its parent directory and returns the new path.
///
/// An existing entry with the new name is never overwritten.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `path` does not exist.
/// - [`CoreError::RenameFailed`] if `new_name` is not a plain file name,
///   the target exists, or the rename fails.
pub fn rename_entry(path: &Path, new_name: &str) -> CoreResult<PathBuf> {
    if std::fs::symlink_metadata(path).is_err() {
        return Err(CoreError::NotFound(path.to_path_buf()));
    }

    if !is_valid_filename(new_name) {
        return Err(CoreError::RenameFailed {
            path: path.to_path_buf(),
            source: invalid_name(new_name),
        });
    }

    let parent = path.parent().ok_or_else(|| CoreError::RenameFailed {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "no parent directory"),
    })?;
    let new_path = parent.join(new_name);

    if new_path != path && std::fs::symlink_metadata(&new_path).is_ok() {
        return Err(CoreError::RenameFailed {
            path: path.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{new_name} already exists"),
            ),
        });
    }

    std::fs::rename(path, &new_path).map_err(|source| CoreError::RenameFailed {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(new_path)
}

/// Creates an empty file named `name` inside `dir`.
///
/// An existing file is left untouched (append-open semantics). An invalid
/// name is reported as [`CoreError::CreateFailed`].
pub fn create_file(dir: &Path, name: &str) -> CoreResult<PathBuf> {
    let path = dir.join(name);
    if !is_valid_filename(name) {
        return Err(CoreError::CreateFailed {
            path,
            source: invalid_name(name),
        });
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| CoreError::CreateFailed {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

/// Creates a directory named `name` inside `dir`.
pub fn create_dir(dir: &Path, name: &str) -> CoreResult<PathBuf> {
    let path = dir.join(name);
    if !is_valid_filename(name) {
        return Err(CoreError::CreateFailed {
            path,
            source: invalid_name(name),
        });
    }
    std::fs::create_dir(&path).map_err(|source| CoreError::CreateFailed {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Returns `true` if `name` is a single, non-special path component.
pub fn is_valid_filename(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }
    if name.contains('/') || name.contains('\0') {
        return false;
    }
    #[cfg(windows)]
    if name.contains('\\') || name.contains(':') {
        return false;
    }
    true
}

fn invalid_name(name: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, format!("invalid name: {name:?}"))
}

fn classify(e: io::Error, path: &Path) -> CoreError {
    match e.kind() {
        io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
        _ => CoreError::Io(e),
    }
}
