//! Directory entry representation.

use std::path::{Path, PathBuf};

use unicode_normalization::UnicodeNormalization;

/// Name of the parent-directory pseudo-entry. Never selectable or targetable.
pub const PARENT_NAME: &str = "..";

/// A single entry of a directory listing.
///
/// `DirectoryEntry` is immutable and derived fresh on every relist; nothing
/// about it is persisted.
///
/// # Examples
///
/// ```no_run
/// use gfd_core::DirectoryEntry;
/// use std::path::Path;
///
/// let entry = DirectoryEntry::from_path(Path::new("Cargo.toml")).unwrap();
/// assert_eq!(entry.name(), "Cargo.toml");
/// assert!(!entry.is_dir());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    path: PathBuf,
    name: String,
    is_dir: bool,
    is_symlink: bool,
    is_executable: bool,
}

impl DirectoryEntry {
    /// Builds an entry by inspecting `path` on disk.
    ///
    /// `is_dir` follows symlinks so that a link to a directory can be
    /// entered; `is_symlink` describes the link itself.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let link_meta = std::fs::symlink_metadata(path)?;
        let is_symlink = link_meta.file_type().is_symlink();
        let target_meta = if is_symlink {
            std::fs::metadata(path).ok()
        } else {
            Some(link_meta)
        };
        let is_dir = target_meta.as_ref().is_some_and(|m| m.is_dir());
        let is_executable = target_meta
            .as_ref()
            .is_some_and(|m| !m.is_dir() && has_exec_bit(m));

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().nfc().collect::<String>())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            name,
            is_dir,
            is_symlink,
            is_executable,
        })
    }

    /// Creates an entry from already-known attributes.
    pub fn new(path: PathBuf, is_dir: bool, is_symlink: bool, is_executable: bool) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().nfc().collect::<String>())
            .unwrap_or_else(|| PARENT_NAME.to_string());
        Self {
            path,
            name,
            is_dir,
            is_symlink,
            is_executable,
        }
    }

    /// Returns the full path of this entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the entry name (last component of the path).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn is_symlink(&self) -> bool {
        self.is_symlink
    }

    /// Returns `true` if any execute bit is set (always `false` off Unix).
    pub fn is_executable(&self) -> bool {
        self.is_executable
    }

    /// Returns `true` if the name starts with `.`.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    /// Returns `true` for the `..` pseudo-entry.
    pub fn is_parent_link(&self) -> bool {
        self.name == PARENT_NAME
    }
}

#[cfg(unix)]
fn has_exec_bit(meta: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn has_exec_bit(_meta: &std::fs::Metadata) -> bool {
    false
}
