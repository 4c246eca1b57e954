//! Error types for `gfd-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`. Batch operations (paste,
//! delete) never return early on a per-item failure; they collect
//! [`CoreError`] values alongside the name of the item that failed.

use std::path::PathBuf;

/// Unified error type for all core operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Neither a multi-selection nor a cursor entry is available to act on.
    #[error("nothing selected")]
    EmptySelection,

    /// Paste was requested while the clipboard holds nothing.
    #[error("clipboard is empty")]
    EmptyClipboard,

    /// A clipboard source no longer exists on disk.
    #[error("source not found: {0}")]
    SourceMissing(PathBuf),

    /// A move would place a directory inside itself.
    #[error("cannot move {0} into itself")]
    IllegalSelfMove(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The destination is already taken.
    ///
    /// Never produced: paste resolves collisions with a fresh `_copy` name
    /// and rename reports an occupied target as [`CoreError::RenameFailed`].
    #[error("already exists: {0}")]
    NameCollision(PathBuf),

    /// Creating a file or directory failed.
    #[error("cannot create {path}: {source}")]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Renaming an entry failed.
    #[error("cannot rename {path}: {source}")]
    RenameFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Deleting an entry failed.
    #[error("cannot delete {path}: {source}")]
    DeleteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Launching the external opener failed.
    #[error("cannot open {path}: {reason}")]
    OpenFailed { path: PathBuf, reason: String },

    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// A directory was expected but the path points to a file.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A file or directory name is invalid (empty, contains path separators, etc.).
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout `gfd-core`.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn empty_selection_displays_message() {
        assert_eq!(CoreError::EmptySelection.to_string(), "nothing selected");
    }

    #[test]
    fn empty_clipboard_displays_message() {
        assert_eq!(CoreError::EmptyClipboard.to_string(), "clipboard is empty");
    }

    #[test]
    fn source_missing_displays_path() {
        let err = CoreError::SourceMissing(PathBuf::from("/gone/a.txt"));
        assert_eq!(err.to_string(), "source not found: /gone/a.txt");
    }

    #[test]
    fn illegal_self_move_displays_path() {
        let err = CoreError::IllegalSelfMove(PathBuf::from("/tmp/d"));
        assert_eq!(err.to_string(), "cannot move /tmp/d into itself");
    }

    #[test]
    fn permission_denied_displays_path() {
        let err = CoreError::PermissionDenied(PathBuf::from("/secret"));
        assert_eq!(err.to_string(), "permission denied: /secret");
    }

    #[test]
    fn delete_failed_includes_source() {
        let err = CoreError::DeleteFailed {
            path: PathBuf::from("/x"),
            source: io::Error::new(io::ErrorKind::Other, "busy"),
        };
        assert_eq!(err.to_string(), "cannot delete /x: busy");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn open_failed_displays_reason() {
        let err = CoreError::OpenFailed {
            path: PathBuf::from("/x.txt"),
            reason: "no opener".to_string(),
        };
        assert_eq!(err.to_string(), "cannot open /x.txt: no opener");
    }

    #[test]
    fn invalid_name_displays_message() {
        let err = CoreError::InvalidName("bad/name".to_string());
        assert_eq!(err.to_string(), "invalid name: bad/name");
    }

    #[test]
    fn io_error_from_std() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let core_err: CoreError = io_err.into();
        assert!(matches!(core_err, CoreError::Io(_)));
        assert!(core_err.to_string().contains("gone"));
    }

    #[test]
    fn error_is_debug() {
        let err = CoreError::NotFound(PathBuf::from("/test"));
        let debug = format!("{:?}", err);
        assert!(debug.contains("NotFound"));
    }
}
