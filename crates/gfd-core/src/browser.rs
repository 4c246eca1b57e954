//! Application state behind every key-level operation.
//!
//! [`Browser`] owns the [`Navigator`] and the [`Clipboard`] and turns user
//! intents (copy, cut, paste, delete, rename, create) into file-system
//! changes followed by a refresh of the listing.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::clipboard::{Clipboard, ClipboardAction, PasteReport};
use crate::error::{CoreError, CoreResult};
use crate::fs::entry::DirectoryEntry;
use crate::fs::ops::{create_dir, create_file, delete_path, rename_entry};
use crate::nav::controller::Navigator;

/// What [`Browser::create`] makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateKind {
    File,
    Directory,
}

/// One target that could not be deleted.
#[derive(Debug)]
pub struct DeleteFailure {
    pub name: String,
    pub error: CoreError,
}

impl fmt::Display for DeleteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.error)
    }
}

/// Outcome of a delete batch.
#[derive(Debug, Default)]
pub struct DeleteReport {
    pub deleted: Vec<PathBuf>,
    pub failures: Vec<DeleteFailure>,
}

impl DeleteReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Navigator plus clipboard.
#[derive(Debug, Clone)]
pub struct Browser {
    navigator: Navigator,
    clipboard: Clipboard,
}

impl Browser {
    pub fn new(navigator: Navigator) -> Self {
        Self {
            navigator,
            clipboard: Clipboard::new(),
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn current_dir(&self) -> &Path {
        self.navigator.current_dir()
    }

    /// Applies a navigator transition in place.
    pub fn navigate(&mut self, f: impl FnOnce(Navigator) -> Navigator) {
        self.navigator = f(self.navigator.clone());
    }

    /// Enters the directory under the cursor, or returns the file to open.
    pub fn activate(&mut self) -> Option<PathBuf> {
        let (navigator, file) = self.navigator.clone().activate();
        self.navigator = navigator;
        file
    }

    // --- clipboard ---

    /// Puts the current targets on the clipboard for copying. Returns how
    /// many paths were captured.
    pub fn copy_to_clipboard(&mut self) -> CoreResult<usize> {
        self.capture(ClipboardAction::Copy)
    }

    /// Puts the current targets on the clipboard for moving.
    pub fn cut_to_clipboard(&mut self) -> CoreResult<usize> {
        self.capture(ClipboardAction::Move)
    }

    fn capture(&mut self, action: ClipboardAction) -> CoreResult<usize> {
        let targets = self.navigator.resolve_targets();
        let count = targets.len();
        self.clipboard.set_sources(targets, action)?;
        self.navigate(Navigator::clear_selection);
        Ok(count)
    }

    /// Pastes the clipboard into the current directory and relists.
    pub fn paste(&mut self) -> CoreResult<PasteReport> {
        let target = self.current_dir().to_path_buf();
        let report = self.clipboard.paste(&target)?;
        self.navigate(Navigator::refresh);
        Ok(report)
    }

    pub fn clear_clipboard(&mut self) {
        self.clipboard.clear();
    }

    // --- delete ---

    /// Returns what a delete would remove, for confirmation.
    ///
    /// # Errors
    ///
    /// [`CoreError::EmptySelection`] if nothing is targetable.
    pub fn delete_targets(&self) -> CoreResult<Vec<PathBuf>> {
        let targets = self.navigator.resolve_targets();
        if targets.is_empty() {
            return Err(CoreError::EmptySelection);
        }
        Ok(targets)
    }

    /// Deletes every target, directories recursively. Failures are collected
    /// and the batch continues. The selection is cleared afterwards.
    pub fn delete(&mut self, targets: &[PathBuf]) -> DeleteReport {
        let mut report = DeleteReport::default();

        for path in targets {
            match delete_path(path) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "deleted");
                    report.deleted.push(path.clone());
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), "delete failed: {e}");
                    report.failures.push(DeleteFailure {
                        name: display_name(path),
                        error: CoreError::DeleteFailed {
                            path: path.clone(),
                            source: into_io(e),
                        },
                    });
                }
            }
        }

        self.navigate(|nav| nav.clear_selection().refresh());
        report
    }

    // --- rename / create ---

    /// The entry a rename would act on.
    pub fn rename_target(&self) -> Option<&DirectoryEntry> {
        self.navigator
            .cursor_entry()
            .filter(|e| !e.is_parent_link())
    }

    /// Renames the entry under the cursor; the cursor follows it.
    pub fn rename(&mut self, new_name: &str) -> CoreResult<PathBuf> {
        let path = self
            .rename_target()
            .map(|e| e.path().to_path_buf())
            .ok_or(CoreError::EmptySelection)?;

        let new_path = rename_entry(&path, new_name)?;
        tracing::info!(from = %path.display(), to = %new_path.display(), "renamed");

        self.navigate(|nav| nav.refresh().with_cursor_on(new_name));
        Ok(new_path)
    }

    /// Creates a file or directory in the current directory; the cursor
    /// moves to it.
    pub fn create(&mut self, name: &str, kind: CreateKind) -> CoreResult<PathBuf> {
        let dir = self.current_dir().to_path_buf();
        let path = match kind {
            CreateKind::File => create_file(&dir, name)?,
            CreateKind::Directory => create_dir(&dir, name)?,
        };
        tracing::info!(path = %path.display(), ?kind, "created");

        self.navigate(|nav| nav.refresh().with_cursor_on(name));
        Ok(path)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn into_io(err: CoreError) -> io::Error {
    match err {
        CoreError::Io(e) => e,
        CoreError::NotFound(_) => io::Error::new(io::ErrorKind::NotFound, err.to_string()),
        CoreError::PermissionDenied(_) => {
            io::Error::new(io::ErrorKind::PermissionDenied, err.to_string())
        }
        other => io::Error::other(other.to_string()),
    }
}
