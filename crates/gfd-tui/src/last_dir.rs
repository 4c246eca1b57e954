//! The "cd on exit" file read by a shell wrapper after `gfd` quits.

use std::path::{Path, PathBuf};

const DEFAULT_FILE_NAME: &str = ".tui_fm_last_dir";

/// Where the final directory is written at shutdown.
#[derive(Debug, Clone)]
pub struct LastDirFile {
    path: PathBuf,
}

impl LastDirFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.tui_fm_last_dir`.
    pub fn default_in(home: &Path) -> Self {
        Self::new(home.join(DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `end` (no trailing newline) if it differs from `start`. Returns
    /// whether the file was written; failures are logged and swallowed.
    pub fn write_if_changed(&self, start: &Path, end: &Path) -> bool {
        if start == end {
            return false;
        }
        match std::fs::write(&self.path, end.to_string_lossy().as_bytes()) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), dir = %end.display(), "last dir written");
                true
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "failed to write last dir: {e}");
                false
            }
        }
    }
}
