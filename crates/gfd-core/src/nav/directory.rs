//! The current directory and its displayed listing.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::fs::entry::DirectoryEntry;
use crate::fs::ops::read_directory;
use crate::nav::filter::build_listing;

/// Reported when a directory could not be listed and an ancestor is shown
/// instead. Informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackNotice {
    pub requested: PathBuf,
    pub shown: PathBuf,
    pub reason: String,
}

impl fmt::Display for FallbackNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}; showing {}", self.reason, self.shown.display())
    }
}

/// A directory path plus the filtered, sorted entries shown for it.
///
/// Immutable: [`relist`](Self::relist) returns a new `DirectoryState`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryState {
    path: PathBuf,
    listing: Vec<DirectoryEntry>,
}

impl DirectoryState {
    /// Creates a state for `path` with an empty listing. Call
    /// [`relist`](Self::relist) to populate it.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            listing: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn listing(&self) -> &[DirectoryEntry] {
        &self.listing
    }

    pub fn len(&self) -> usize {
        self.listing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listing.is_empty()
    }

    /// Returns a copy pointing at `path`; the listing is stale until relisted.
    pub fn with_path(self, path: PathBuf) -> Self {
        Self { path, ..self }
    }

    /// Re-reads the directory and replaces the listing.
    ///
    /// If the directory cannot be read (permission denied, removed, or no
    /// longer a directory) the state walks up to the nearest readable
    /// ancestor and lists that instead, returning a [`FallbackNotice`]. At
    /// the filesystem root with nothing readable the listing is empty.
    pub fn relist(self, show_hidden: bool) -> (Self, Option<FallbackNotice>) {
        let requested = self.path;
        let mut path = requested.clone();
        let mut first_error: Option<CoreError> = None;

        loop {
            match read_directory(&path) {
                Ok(entries) => {
                    let listing = build_listing(&entries, show_hidden);
                    let notice = first_error.map(|e| FallbackNotice {
                        requested: requested.clone(),
                        shown: path.clone(),
                        reason: e.to_string(),
                    });
                    if let Some(n) = &notice {
                        tracing::warn!(
                            requested = %n.requested.display(),
                            shown = %n.shown.display(),
                            "listing fell back to ancestor: {}",
                            n.reason
                        );
                    }
                    return (Self { path, listing }, notice);
                }
                Err(e) => {
                    tracing::debug!(path = %path.display(), "cannot list directory: {e}");
                    let parent = path.parent().map(Path::to_path_buf);
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                    match parent {
                        Some(parent) if parent != path => path = parent,
                        _ => {
                            let notice = first_error.map(|e| FallbackNotice {
                                requested: requested.clone(),
                                shown: path.clone(),
                                reason: e.to_string(),
                            });
                            return (
                                Self {
                                    path,
                                    listing: Vec::new(),
                                },
                                notice,
                            );
                        }
                    }
                }
            }
        }
    }
}
