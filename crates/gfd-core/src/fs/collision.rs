//! Destination collision resolution for paste.

use std::path::{Path, PathBuf};

/// Returns a destination that does not exist yet.
///
/// An unused `dest` is returned unchanged. Otherwise the name is split into
/// stem and extension (directories have no extension) and the candidates
/// `stem_copy.ext`, `stem_copy1.ext`, `stem_copy2.ext`, … are probed in
/// order; the first free one wins.
///
/// Existence is checked without following symlinks, so a dangling link still
/// occupies its name. Nothing is locked: a concurrent writer can claim the
/// returned path before the caller uses it.
///
/// # Examples
///
/// ```no_run
/// use gfd_core::resolve_collision;
/// use std::path::Path;
///
/// // With `notes.txt` already present:
/// let free = resolve_collision(Path::new("/tmp/notes.txt"));
/// assert_eq!(free, Path::new("/tmp/notes_copy.txt"));
/// ```
pub fn resolve_collision(dest: &Path) -> PathBuf {
    if !occupied(dest) {
        return dest.to_path_buf();
    }

    let parent = dest.parent().unwrap_or_else(|| Path::new(""));
    let (stem, ext) = split_name(dest);

    let candidate = |suffix: &str| parent.join(format!("{stem}_copy{suffix}{ext}"));

    let first = candidate("");
    if !occupied(&first) {
        return first;
    }

    let mut n: u64 = 1;
    loop {
        let next = candidate(&n.to_string());
        if !occupied(&next) {
            tracing::debug!(from = %dest.display(), to = %next.display(), "resolved collision");
            return next;
        }
        n += 1;
    }
}

/// Splits the final component into `(stem, ".ext")`; `ext` is empty for
/// directories and for names without a real extension.
fn split_name(path: &Path) -> (String, String) {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if path.is_dir() {
        return (file_name, String::new());
    }

    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) => (
            stem.to_string_lossy().into_owned(),
            format!(".{}", ext.to_string_lossy()),
        ),
        _ => (file_name, String::new()),
    }
}

fn occupied(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}
