//! Directory-to-directory transitions.
//!
//! [`Navigator`] is the only thing that changes the current directory. Every
//! transition follows the same steps:
//!
//! 1. remember the current position for the directory being left;
//! 2. point at the new directory and relist it;
//! 3. restore the remembered position for the directory entered (or start
//!    at the top), clamped to the new listing.

use std::path::{Component, Path, PathBuf};

use crate::fs::entry::DirectoryEntry;
use crate::nav::directory::{DirectoryState, FallbackNotice};
use crate::nav::memory::CursorMemory;
use crate::nav::selection::Selection;

/// Browsing state: directory, listing, cursor and per-directory memory.
///
/// Immutable: all transitions consume `self` and return a new `Navigator`.
#[derive(Debug, Clone)]
pub struct Navigator {
    dir: DirectoryState,
    selection: Selection,
    memory: CursorMemory,
    show_hidden: bool,
    notice: Option<FallbackNotice>,
}

impl Navigator {
    /// Opens `start` and restores any remembered position for it.
    pub fn open(start: &Path, show_hidden: bool, memory: CursorMemory, page_size: usize) -> Self {
        let path = absolute(start);
        let (dir, notice) = DirectoryState::new(path).relist(show_hidden);
        let position = memory.recall(dir.path()).unwrap_or_default();
        let selection = Selection::new(page_size).with_position(position, dir.len());
        tracing::debug!(dir = %dir.path().display(), "navigator opened");
        Self {
            dir,
            selection,
            memory,
            show_hidden,
            notice,
        }
    }

    pub fn current_dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn listing(&self) -> &[DirectoryEntry] {
        self.dir.listing()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    /// The fallback notice produced by the most recent relist, if any.
    pub fn notice(&self) -> Option<&FallbackNotice> {
        self.notice.as_ref()
    }

    pub fn cursor_entry(&self) -> Option<&DirectoryEntry> {
        self.selection.cursor_entry(self.dir.listing())
    }

    /// Paths an operation should act on; see [`Selection::resolve_targets`].
    pub fn resolve_targets(&self) -> Vec<PathBuf> {
        self.selection.resolve_targets(self.dir.listing())
    }

    /// The memory including the position in the current directory, for
    /// persisting at shutdown.
    pub fn memory_snapshot(&self) -> CursorMemory {
        self.memory
            .clone()
            .remember(self.dir.path(), self.selection.position())
    }

    // --- transitions ---

    /// Enters `path`. The multi-selection is cleared when the directory
    /// actually changes.
    pub fn enter_directory(self, path: &Path) -> Self {
        let target = absolute(path);
        let show_hidden = self.show_hidden;
        self.transition(target, show_hidden)
    }

    /// Goes to the parent directory. No-op at the filesystem root.
    pub fn go_up(self) -> Self {
        match self.dir.path().parent() {
            Some(parent) => {
                let parent = parent.to_path_buf();
                let show_hidden = self.show_hidden;
                self.transition(parent, show_hidden)
            }
            None => self,
        }
    }

    /// Flips the hidden-file flag and relists.
    pub fn toggle_hidden(self) -> Self {
        let target = self.dir.path().to_path_buf();
        let show_hidden = !self.show_hidden;
        tracing::debug!(show_hidden, "toggled hidden files");
        self.transition(target, show_hidden)
    }

    /// Relists the current directory with the same flag.
    pub fn refresh(self) -> Self {
        let target = self.dir.path().to_path_buf();
        let show_hidden = self.show_hidden;
        self.transition(target, show_hidden)
    }

    /// Enters the directory under the cursor, or returns the file under the
    /// cursor for the caller to open.
    pub fn activate(self) -> (Self, Option<PathBuf>) {
        let Some(entry) = self.cursor_entry() else {
            return (self, None);
        };
        if entry.is_parent_link() {
            return (self.go_up(), None);
        }
        let path = entry.path().to_path_buf();
        let is_dir = entry.is_dir();
        if is_dir {
            (self.enter_directory(&path), None)
        } else {
            (self, Some(path))
        }
    }

    // --- cursor and selection ---

    pub fn move_cursor(self, delta: isize) -> Self {
        let len = self.dir.len();
        Self {
            selection: self.selection.move_cursor(delta, len),
            ..self
        }
    }

    pub fn jump_to_first(self) -> Self {
        let len = self.dir.len();
        Self {
            selection: self.selection.jump_to_first(len),
            ..self
        }
    }

    pub fn jump_to_last(self) -> Self {
        let len = self.dir.len();
        Self {
            selection: self.selection.jump_to_last(len),
            ..self
        }
    }

    /// Toggles selection of the entry under the cursor.
    pub fn toggle_selection(self) -> Self {
        let Some(name) = self.cursor_entry().map(|e| e.name().to_string()) else {
            return self;
        };
        Self {
            selection: self.selection.toggle(&name),
            ..self
        }
    }

    pub fn clear_selection(self) -> Self {
        Self {
            selection: self.selection.clear_selection(),
            ..self
        }
    }

    /// Moves the cursor to the entry called `name`, if listed.
    pub fn with_cursor_on(self, name: &str) -> Self {
        let selection = self.selection.with_cursor_on(name, self.dir.listing());
        Self { selection, ..self }
    }

    pub fn with_page_size(self, page_size: usize) -> Self {
        let len = self.dir.len();
        Self {
            selection: self.selection.with_page_size(page_size, len),
            ..self
        }
    }

    fn transition(self, target: PathBuf, show_hidden: bool) -> Self {
        let Self {
            dir,
            selection,
            memory,
            ..
        } = self;

        let leaving = dir.path().to_path_buf();
        let memory = memory.remember(&leaving, selection.position());

        let (dir, notice) = dir.with_path(target).relist(show_hidden);
        let selection = if dir.path() == leaving {
            selection
        } else {
            selection.clear_selection()
        };

        let position = memory.recall(dir.path()).unwrap_or_default();
        let selection = selection.with_position(position, dir.len());

        tracing::debug!(
            from = %leaving.display(),
            to = %dir.path().display(),
            cursor = selection.cursor(),
            "navigated"
        );

        Self {
            dir,
            selection,
            memory,
            show_hidden,
            notice,
        }
    }
}

/// Makes `path` absolute against the working directory and folds `.` and
/// `..` lexically. Symlinks are not resolved, so leaving a linked directory
/// returns to the directory that holds the link.
fn absolute(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::memory::Position;
    use std::fs;
    use tempfile::TempDir;

    /// Creates `root/{f00..f19}` plus `root/sub/{a,b,c}`.
    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        for i in 0..20 {
            fs::write(tmp.path().join(format!("f{i:02}")), "").unwrap();
        }
        let sub = tmp.path().join("sub");
        fs::create_dir(&sub).unwrap();
        for name in ["a", "b", "c"] {
            fs::write(sub.join(name), "").unwrap();
        }
        tmp
    }

    fn open(path: &Path) -> Navigator {
        Navigator::open(path, false, CursorMemory::default(), 5)
    }

    fn root(tmp: &TempDir) -> PathBuf {
        tmp.path().to_path_buf()
    }

    #[test]
    fn open_lists_directory() {
        let tmp = fixture();
        let nav = open(tmp.path());

        assert_eq!(nav.current_dir(), root(&tmp));
        assert_eq!(nav.listing().len(), 21);
        assert_eq!(nav.selection().cursor(), 0);
        assert!(nav.notice().is_none());
    }

    #[test]
    fn open_restores_remembered_position() {
        let tmp = fixture();
        let memory = CursorMemory::default().remember(&root(&tmp), Position::new(7, 3));

        let nav = Navigator::open(tmp.path(), false, memory, 5);

        assert_eq!(nav.selection().position(), Position::new(7, 3));
    }

    #[test]
    fn enter_then_go_up_restores_exact_position() {
        let tmp = fixture();
        let nav = open(tmp.path()).move_cursor(12);
        let before = nav.selection().position();
        assert_eq!(before, Position::new(12, 8));

        let nav = nav.enter_directory(&tmp.path().join("sub"));
        assert_eq!(nav.current_dir(), root(&tmp).join("sub"));
        assert_eq!(nav.selection().cursor(), 0);

        let nav = nav.move_cursor(2).go_up();
        assert_eq!(nav.current_dir(), root(&tmp));
        assert_eq!(nav.selection().position(), before);
    }

    #[cfg(unix)]
    #[test]
    fn go_up_from_symlinked_directory_returns_to_link_parent() {
        let tmp = fixture();
        let elsewhere = TempDir::new().unwrap();
        let real = elsewhere.path().join("real");
        fs::create_dir(&real).unwrap();
        fs::write(real.join("inside"), "").unwrap();
        std::os::unix::fs::symlink(&real, tmp.path().join("zlink")).unwrap();

        let nav = open(tmp.path()).move_cursor(3);
        let before = nav.selection().position();

        let nav = nav.enter_directory(&tmp.path().join("zlink"));
        assert_eq!(nav.current_dir(), root(&tmp).join("zlink"));
        assert_eq!(nav.listing().len(), 1);

        let nav = nav.go_up();
        assert_eq!(nav.current_dir(), root(&tmp));
        assert_eq!(nav.selection().position(), before);
    }

    #[test]
    fn absolute_folds_dot_components_lexically() {
        assert_eq!(
            absolute(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(absolute(Path::new("/..")), PathBuf::from("/"));

        let cwd = std::env::current_dir().unwrap();
        assert_eq!(absolute(Path::new("x/..")), absolute(&cwd));
    }

    #[test]
    fn revisiting_child_restores_its_position() {
        let tmp = fixture();
        let nav = open(tmp.path())
            .enter_directory(&tmp.path().join("sub"))
            .move_cursor(2)
            .go_up()
            .enter_directory(&tmp.path().join("sub"));

        assert_eq!(nav.selection().cursor(), 2);
    }

    #[test]
    fn restored_position_is_clamped_when_directory_shrank() {
        let tmp = fixture();
        let nav = open(tmp.path())
            .enter_directory(&tmp.path().join("sub"))
            .move_cursor(2)
            .go_up();
        fs::remove_file(tmp.path().join("sub").join("c")).unwrap();

        let nav = nav.enter_directory(&tmp.path().join("sub"));

        assert_eq!(nav.selection().cursor(), 1);
    }

    #[test]
    fn go_up_at_root_is_noop() {
        let nav = Navigator::open(Path::new("/"), false, CursorMemory::default(), 5);
        let nav = nav.go_up();
        assert_eq!(nav.current_dir(), Path::new("/"));
    }

    #[test]
    fn enter_directory_clears_selection() {
        let tmp = fixture();
        let nav = open(tmp.path()).toggle_selection();
        assert!(nav.selection().has_selection());

        let nav = nav.enter_directory(&tmp.path().join("sub"));
        assert!(!nav.selection().has_selection());
    }

    #[test]
    fn refresh_keeps_selection_and_cursor() {
        let tmp = fixture();
        let nav = open(tmp.path()).move_cursor(3).toggle_selection().refresh();

        assert_eq!(nav.selection().cursor(), 3);
        assert!(nav.selection().is_selected("f03"));
    }

    #[test]
    fn toggle_hidden_relists_and_restores_cursor() {
        let tmp = fixture();
        fs::write(tmp.path().join(".dot"), "").unwrap();
        let nav = open(tmp.path()).move_cursor(4);
        assert_eq!(nav.listing().len(), 21);

        let nav = nav.toggle_hidden();
        assert!(nav.show_hidden());
        assert_eq!(nav.listing().len(), 22);
        assert_eq!(nav.listing()[0].name(), ".dot");
        assert_eq!(nav.selection().cursor(), 4);

        let nav = nav.toggle_hidden();
        assert!(!nav.show_hidden());
        assert_eq!(nav.listing().len(), 21);
    }

    #[test]
    fn toggle_hidden_clamps_cursor() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".a"), "").unwrap();
        fs::write(tmp.path().join(".b"), "").unwrap();
        fs::write(tmp.path().join("c"), "").unwrap();
        let nav = Navigator::open(tmp.path(), true, CursorMemory::default(), 5).move_cursor(2);

        let nav = nav.toggle_hidden();

        assert_eq!(nav.selection().cursor(), 0);
        assert_eq!(nav.cursor_entry().unwrap().name(), "c");
    }

    #[test]
    fn enter_missing_directory_falls_back() {
        let tmp = fixture();
        let nav = open(tmp.path()).enter_directory(&root(&tmp).join("missing"));

        assert_eq!(nav.current_dir(), root(&tmp));
        assert!(nav.notice().is_some());
    }

    #[test]
    fn activate_directory_enters_it() {
        let tmp = fixture();
        let nav = open(tmp.path()).with_cursor_on("sub");

        let (nav, file) = nav.activate();

        assert!(file.is_none());
        assert_eq!(nav.current_dir(), root(&tmp).join("sub"));
    }

    #[test]
    fn activate_file_returns_path() {
        let tmp = fixture();
        let nav = open(tmp.path()).with_cursor_on("f05");

        let (nav, file) = nav.activate();

        assert_eq!(file, Some(root(&tmp).join("f05")));
        assert_eq!(nav.current_dir(), root(&tmp));
    }

    #[test]
    fn activate_on_empty_listing_does_nothing() {
        let tmp = TempDir::new().unwrap();
        let (nav, file) = open(tmp.path()).activate();
        assert!(file.is_none());
        assert_eq!(nav.current_dir(), root(&tmp));
    }

    #[test]
    fn memory_snapshot_includes_current_directory() {
        let tmp = fixture();
        let nav = open(tmp.path()).move_cursor(6);

        let snapshot = nav.memory_snapshot();

        assert_eq!(snapshot.recall(&root(&tmp)).map(|p| p.cursor_index), Some(6));
    }

    #[test]
    fn resolve_targets_uses_cursor_then_selection() {
        let tmp = fixture();
        let nav = open(tmp.path()).move_cursor(1);
        assert_eq!(nav.resolve_targets(), vec![root(&tmp).join("f01")]);

        let nav = nav.toggle_selection().move_cursor(1).toggle_selection();
        assert_eq!(
            nav.resolve_targets(),
            vec![root(&tmp).join("f01"), root(&tmp).join("f02")]
        );
    }
}
