//! Clipboard-mediated copy and move.
//!
//! The clipboard holds an ordered list of source paths and the action to
//! apply on paste. Paste runs every source independently: a failing source
//! is recorded in the [`PasteReport`] and the loop moves on.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::fs::collision::resolve_collision;
use crate::fs::ops::{copy_path, move_path};

/// What a paste does with the clipboard sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardAction {
    Copy,
    Move,
}

impl ClipboardAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Move => "move",
        }
    }
}

impl fmt::Display for ClipboardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One source that could not be pasted.
#[derive(Debug)]
pub struct PasteFailure {
    /// Base name of the source, for display.
    pub source_name: String,
    pub error: CoreError,
}

impl fmt::Display for PasteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source_name, self.error)
    }
}

/// Outcome of a paste.
#[derive(Debug)]
pub struct PasteReport {
    pub action: ClipboardAction,
    /// Destination paths that were written.
    pub applied: Vec<PathBuf>,
    pub failures: Vec<PasteFailure>,
}

impl PasteReport {
    /// `true` when every source was pasted.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Pending sources plus the action to apply on paste.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
    sources: Vec<PathBuf>,
    action: Option<ClipboardAction>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn action(&self) -> Option<ClipboardAction> {
        self.action
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Replaces the contents wholesale.
    ///
    /// # Errors
    ///
    /// [`CoreError::EmptySelection`] if `paths` is empty; the clipboard is
    /// left as it was.
    pub fn set_sources(&mut self, paths: Vec<PathBuf>, action: ClipboardAction) -> CoreResult<()> {
        if paths.is_empty() {
            return Err(CoreError::EmptySelection);
        }
        tracing::debug!(count = paths.len(), %action, "clipboard set");
        self.sources = paths;
        self.action = Some(action);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.sources.clear();
        self.action = None;
    }

    /// Pastes every source into `target_dir`.
    ///
    /// Existing names are never overwritten; see [`resolve_collision`]. A
    /// move empties the clipboard afterwards even if some sources failed; a
    /// copy keeps it so it can be pasted again.
    ///
    /// # Errors
    ///
    /// [`CoreError::EmptyClipboard`] if there is nothing to paste. Per-source
    /// failures are reported in [`PasteReport::failures`], not here.
    pub fn paste(&mut self, target_dir: &Path) -> CoreResult<PasteReport> {
        let action = match self.action {
            Some(action) if !self.sources.is_empty() => action,
            _ => return Err(CoreError::EmptyClipboard),
        };

        let mut applied = Vec::new();
        let mut failures = Vec::new();

        for src in &self.sources {
            match paste_one(src, target_dir, action) {
                Ok(dest) => {
                    tracing::info!(%action, src = %src.display(), dest = %dest.display(), "pasted");
                    applied.push(dest);
                }
                Err(error) => {
                    tracing::warn!(%action, src = %src.display(), "paste failed: {error}");
                    failures.push(PasteFailure {
                        source_name: base_name(src),
                        error,
                    });
                }
            }
        }

        if action == ClipboardAction::Move {
            self.clear();
        }

        Ok(PasteReport {
            action,
            applied,
            failures,
        })
    }
}

fn paste_one(src: &Path, target_dir: &Path, action: ClipboardAction) -> CoreResult<PathBuf> {
    if !src.exists() {
        return Err(CoreError::SourceMissing(src.to_path_buf()));
    }

    let name = src
        .file_name()
        .ok_or_else(|| CoreError::InvalidName(src.display().to_string()))?;
    let dest = target_dir.join(name);

    if action == ClipboardAction::Move && is_self_move(src, target_dir, name) {
        return Err(CoreError::IllegalSelfMove(src.to_path_buf()));
    }

    let dest = resolve_collision(&dest);

    match action {
        ClipboardAction::Copy => copy_path(src, &dest)?,
        ClipboardAction::Move => move_path(src, &dest)?,
    }

    Ok(dest)
}

/// `true` if the destination equals or lies inside the source, comparing
/// canonical paths.
fn is_self_move(src: &Path, target_dir: &Path, name: &std::ffi::OsStr) -> bool {
    let (Ok(src_real), Ok(dir_real)) = (src.canonicalize(), target_dir.canonicalize()) else {
        return false;
    };
    dir_real.join(name).starts_with(&src_real)
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn new_clipboard_is_empty() {
        let clip = Clipboard::new();
        assert!(clip.is_empty());
        assert_eq!(clip.action(), None);
    }

    #[test]
    fn set_sources_replaces_wholesale() {
        let mut clip = Clipboard::new();
        clip.set_sources(vec![PathBuf::from("/a"), PathBuf::from("/b")], ClipboardAction::Copy)
            .unwrap();
        clip.set_sources(vec![PathBuf::from("/c")], ClipboardAction::Move)
            .unwrap();

        assert_eq!(clip.sources(), &[PathBuf::from("/c")]);
        assert_eq!(clip.action(), Some(ClipboardAction::Move));
    }

    #[test]
    fn set_sources_empty_is_rejected_and_keeps_state() {
        let mut clip = Clipboard::new();
        clip.set_sources(vec![PathBuf::from("/a")], ClipboardAction::Copy)
            .unwrap();

        let err = clip.set_sources(vec![], ClipboardAction::Move).unwrap_err();

        assert!(matches!(err, CoreError::EmptySelection));
        assert_eq!(clip.sources(), &[PathBuf::from("/a")]);
        assert_eq!(clip.action(), Some(ClipboardAction::Copy));
    }

    #[test]
    fn clear_resets() {
        let mut clip = Clipboard::new();
        clip.set_sources(vec![PathBuf::from("/a")], ClipboardAction::Copy)
            .unwrap();
        clip.clear();
        assert_eq!(clip, Clipboard::new());
    }

    #[test]
    fn paste_empty_clipboard_fails() {
        let tmp = TempDir::new().unwrap();
        let err = Clipboard::new().paste(tmp.path()).unwrap_err();
        assert!(matches!(err, CoreError::EmptyClipboard));
    }

    #[test]
    fn copy_paste_twice_keeps_clipboard() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("a.txt");
        fs::write(&src, "data").unwrap();
        let one = tmp.path().join("one");
        let two = tmp.path().join("two");
        fs::create_dir(&one).unwrap();
        fs::create_dir(&two).unwrap();

        let mut clip = Clipboard::new();
        clip.set_sources(vec![src.clone()], ClipboardAction::Copy)
            .unwrap();

        let first = clip.paste(&one).unwrap();
        let second = clip.paste(&two).unwrap();

        assert!(first.is_clean() && second.is_clean());
        assert_eq!(fs::read_to_string(one.join("a.txt")).unwrap(), "data");
        assert_eq!(fs::read_to_string(two.join("a.txt")).unwrap(), "data");
        assert!(src.exists());
        assert_eq!(clip.len(), 1);
    }

    #[test]
    fn copy_into_same_directory_gets_copy_suffix() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("a.txt");
        fs::write(&src, "x").unwrap();

        let mut clip = Clipboard::new();
        clip.set_sources(vec![src], ClipboardAction::Copy).unwrap();
        let first = clip.paste(tmp.path()).unwrap();
        let second = clip.paste(tmp.path()).unwrap();

        assert_eq!(first.applied, vec![tmp.path().join("a_copy.txt")]);
        assert_eq!(second.applied, vec![tmp.path().join("a_copy1.txt")]);
    }

    #[test]
    fn move_paste_relocates_and_clears() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("a.txt");
        fs::write(&src, "data").unwrap();
        let sub = tmp.path().join("sub");
        fs::create_dir(&sub).unwrap();

        let mut clip = Clipboard::new();
        clip.set_sources(vec![src.clone()], ClipboardAction::Move)
            .unwrap();
        let report = clip.paste(&sub).unwrap();

        assert!(report.is_clean());
        assert!(!src.exists());
        assert!(sub.join("a.txt").exists());
        assert!(clip.is_empty());
    }

    #[test]
    fn move_into_itself_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("d");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("inner.txt"), "").unwrap();

        let mut clip = Clipboard::new();
        clip.set_sources(vec![dir.clone()], ClipboardAction::Move)
            .unwrap();
        let report = clip.paste(&dir).unwrap();

        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0].error,
            CoreError::IllegalSelfMove(_)
        ));
        assert_eq!(report.failures[0].source_name, "d");
        assert!(dir.join("inner.txt").exists());
        assert!(!dir.join("d").exists());
        assert!(clip.is_empty());
    }

    #[test]
    fn move_into_descendant_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("d");
        let nested = dir.join("x").join("y");
        fs::create_dir_all(&nested).unwrap();

        let mut clip = Clipboard::new();
        clip.set_sources(vec![dir.clone()], ClipboardAction::Move)
            .unwrap();
        let report = clip.paste(&nested).unwrap();

        assert!(matches!(
            report.failures[0].error,
            CoreError::IllegalSelfMove(_)
        ));
        assert!(nested.exists());
    }

    #[test]
    fn move_into_sibling_with_shared_prefix_is_allowed() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("d");
        let sibling = tmp.path().join("d2");
        fs::create_dir(&dir).unwrap();
        fs::create_dir(&sibling).unwrap();

        let mut clip = Clipboard::new();
        clip.set_sources(vec![dir.clone()], ClipboardAction::Move)
            .unwrap();
        let report = clip.paste(&sibling).unwrap();

        assert!(report.is_clean());
        assert!(sibling.join("d").is_dir());
    }

    #[test]
    fn copy_directory_into_itself_terminates() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("d");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("f.txt"), "x").unwrap();

        let mut clip = Clipboard::new();
        clip.set_sources(vec![dir.clone()], ClipboardAction::Copy)
            .unwrap();
        let report = clip.paste(&dir).unwrap();

        assert!(report.is_clean());
        assert!(dir.join("d").join("f.txt").exists());
        assert!(!dir.join("d").join("d").exists());
    }

    #[test]
    fn copy_directory_into_descendant_terminates() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("d");
        let nested = dir.join("x");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.join("f.txt"), "x").unwrap();

        let mut clip = Clipboard::new();
        clip.set_sources(vec![dir.clone()], ClipboardAction::Copy)
            .unwrap();
        let report = clip.paste(&nested).unwrap();

        assert!(report.is_clean(), "{:?}", report.failures);
        let copy = nested.join("d");
        assert!(copy.join("f.txt").exists());
        assert!(copy.join("x").is_dir());
        assert_eq!(fs::read_dir(copy.join("x")).unwrap().count(), 0);
    }

    #[test]
    fn missing_source_is_recorded_and_rest_continue() {
        let tmp = TempDir::new().unwrap();
        let present = tmp.path().join("here.txt");
        fs::write(&present, "").unwrap();
        let missing = tmp.path().join("gone.txt");
        let out = tmp.path().join("out");
        fs::create_dir(&out).unwrap();

        let mut clip = Clipboard::new();
        clip.set_sources(vec![missing, present], ClipboardAction::Copy)
            .unwrap();
        let report = clip.paste(&out).unwrap();

        assert_eq!(report.applied, vec![out.join("here.txt")]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].source_name, "gone.txt");
        assert!(matches!(
            report.failures[0].error,
            CoreError::SourceMissing(_)
        ));
    }

    #[test]
    fn move_with_failure_still_clears() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        fs::create_dir(&out).unwrap();

        let mut clip = Clipboard::new();
        clip.set_sources(vec![tmp.path().join("nope")], ClipboardAction::Move)
            .unwrap();
        let report = clip.paste(&out).unwrap();

        assert!(!report.is_clean());
        assert!(clip.is_empty());
    }

    #[test]
    fn failure_display_names_source() {
        let failure = PasteFailure {
            source_name: "a.txt".to_string(),
            error: CoreError::SourceMissing(PathBuf::from("/x/a.txt")),
        };
        assert_eq!(failure.to_string(), "a.txt: source not found: /x/a.txt");
    }
}
