//! Cursor, viewport and multi-selection over a listing.
//!
//! A [`Selection`] does not own the listing it points into; every operation
//! that depends on the listing takes its length (or the listing itself) as an
//! argument. After any call the following hold for a non-empty listing of
//! length `len`:
//!
//! - `cursor < len`
//! - `offset <= cursor < offset + page_size`
//!
//! For an empty listing both cursor and offset are `0`.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::fs::entry::{DirectoryEntry, PARENT_NAME};
use crate::nav::memory::Position;

/// Cursor position, viewport offset and the set of selected names.
///
/// Immutable: all state transitions return a new `Selection`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    cursor: usize,
    offset: usize,
    page_size: usize,
    selected: BTreeSet<String>,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Selection {
    /// Creates an empty selection with the cursor on row 0.
    pub fn new(page_size: usize) -> Self {
        Self {
            cursor: 0,
            offset: 0,
            page_size: page_size.max(1),
            selected: BTreeSet::new(),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// First visible row.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn position(&self) -> Position {
        Position::new(self.cursor, self.offset)
    }

    pub fn selected_names(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.contains(name)
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Returns the entry under the cursor, if the listing is non-empty.
    pub fn cursor_entry<'a>(&self, listing: &'a [DirectoryEntry]) -> Option<&'a DirectoryEntry> {
        listing.get(self.cursor)
    }

    /// Moves the cursor by `delta` rows, clamped to the listing.
    ///
    /// The cursor travels one row at a time and the viewport follows by at
    /// most one row per step, so scrolling is incremental and never
    /// re-centres.
    pub fn move_cursor(self, delta: isize, len: usize) -> Self {
        if len == 0 {
            return self.clamp(0);
        }

        let mut cursor = self.cursor;
        let mut offset = self.offset;
        let steps = delta.unsigned_abs().min(len);

        for _ in 0..steps {
            if delta < 0 {
                if cursor == 0 {
                    break;
                }
                cursor -= 1;
                if cursor < offset {
                    offset = offset.saturating_sub(1);
                }
            } else {
                if cursor + 1 >= len {
                    break;
                }
                cursor += 1;
                if cursor >= offset + self.page_size {
                    offset += 1;
                }
            }
        }

        Self {
            cursor,
            offset,
            ..self
        }
        .clamp(len)
    }

    /// Jumps to the first row.
    pub fn jump_to_first(self, len: usize) -> Self {
        Self {
            cursor: 0,
            offset: 0,
            ..self
        }
        .clamp(len)
    }

    /// Jumps to the last row, scrolling just far enough to show it.
    pub fn jump_to_last(self, len: usize) -> Self {
        let cursor = len.saturating_sub(1);
        let offset = (cursor + 1).saturating_sub(self.page_size);
        Self {
            cursor,
            offset,
            ..self
        }
        .clamp(len)
    }

    /// Adds `name` to the selection, or removes it if already present.
    /// The parent pseudo-entry can never be selected.
    pub fn toggle(mut self, name: &str) -> Self {
        if name == PARENT_NAME {
            return self;
        }
        if !self.selected.remove(name) {
            self.selected.insert(name.to_string());
        }
        self
    }

    /// Empties the multi-selection; cursor and viewport are untouched.
    pub fn clear_selection(self) -> Self {
        Self {
            selected: BTreeSet::new(),
            ..self
        }
    }

    /// Returns a copy with a new page size, re-clamped to `len`.
    pub fn with_page_size(self, page_size: usize, len: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..self
        }
        .clamp(len)
    }

    /// Replaces cursor and offset with a remembered position, clamped to
    /// `len`. The multi-selection is kept.
    pub fn with_position(self, position: Position, len: usize) -> Self {
        Self {
            cursor: position.cursor_index,
            offset: position.viewport_offset,
            ..self
        }
        .clamp(len)
    }

    /// Puts the cursor on the entry called `name`, if it is in the listing.
    pub fn with_cursor_on(self, name: &str, listing: &[DirectoryEntry]) -> Self {
        match listing.iter().position(|e| e.name() == name) {
            Some(index) => {
                let len = listing.len();
                let offset = if index < self.offset {
                    index
                } else if index >= self.offset + self.page_size {
                    index + 1 - self.page_size
                } else {
                    self.offset
                };
                Self {
                    cursor: index,
                    offset,
                    ..self
                }
                .clamp(len)
            }
            None => self,
        }
    }

    /// Re-establishes the cursor and viewport invariants for a listing of
    /// length `len`.
    pub fn clamp(self, len: usize) -> Self {
        if len == 0 {
            return Self {
                cursor: 0,
                offset: 0,
                ..self
            };
        }

        let cursor = self.cursor.min(len - 1);
        let mut offset = self.offset.min(cursor);
        if cursor >= offset + self.page_size {
            offset = cursor + 1 - self.page_size;
        }

        Self {
            cursor,
            offset,
            ..self
        }
    }

    /// Resolves what an operation acts on.
    ///
    /// While any names are selected, the selected entries still present in
    /// `listing` are returned in listing order; selected names that left the
    /// listing resolve to nothing and the cursor is not consulted. With no
    /// selection the entry under the cursor is returned. Paths are the
    /// entries' on-disk paths, never rebuilt from display names. The parent
    /// pseudo-entry is never part of the result, so the result may be empty.
    pub fn resolve_targets(&self, listing: &[DirectoryEntry]) -> Vec<PathBuf> {
        if self.has_selection() {
            return listing
                .iter()
                .filter(|e| !e.is_parent_link() && self.selected.contains(e.name()))
                .map(|e| e.path().to_path_buf())
                .collect();
        }

        self.cursor_entry(listing)
            .filter(|e| !e.is_parent_link())
            .map(|e| vec![e.path().to_path_buf()])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(names: &[&str]) -> Vec<DirectoryEntry> {
        names
            .iter()
            .map(|n| DirectoryEntry::new(PathBuf::from("/d").join(n), false, false, false))
            .collect()
    }

    fn assert_invariants(sel: &Selection, len: usize) {
        if len == 0 {
            assert_eq!(sel.cursor(), 0);
            assert_eq!(sel.offset(), 0);
            return;
        }
        assert!(sel.cursor() < len);
        assert!(sel.offset() <= sel.cursor());
        assert!(sel.cursor() < sel.offset() + sel.page_size());
    }

    #[test]
    fn new_starts_at_top() {
        let sel = Selection::new(10);
        assert_eq!(sel.cursor(), 0);
        assert_eq!(sel.offset(), 0);
        assert!(!sel.has_selection());
    }

    #[test]
    fn move_down_within_page_does_not_scroll() {
        let sel = Selection::new(5).move_cursor(3, 10);
        assert_eq!(sel.cursor(), 3);
        assert_eq!(sel.offset(), 0);
    }

    #[test]
    fn move_down_past_page_scrolls_one_row() {
        let sel = Selection::new(3).move_cursor(3, 10);
        assert_eq!(sel.cursor(), 3);
        assert_eq!(sel.offset(), 1);
    }

    #[test]
    fn move_up_above_viewport_scrolls_one_row() {
        let sel = Selection::new(3)
            .with_position(Position::new(5, 5), 10)
            .move_cursor(-1, 10);
        assert_eq!(sel.cursor(), 4);
        assert_eq!(sel.offset(), 4);
    }

    #[test]
    fn move_cursor_clamps_at_bounds() {
        let top = Selection::new(3).move_cursor(-4, 10);
        assert_eq!(top.cursor(), 0);

        let bottom = Selection::new(3).move_cursor(100, 10);
        assert_eq!(bottom.cursor(), 9);
        assert_eq!(bottom.offset(), 7);
    }

    #[test]
    fn move_cursor_on_empty_listing() {
        let sel = Selection::new(3).move_cursor(1, 0);
        assert_invariants(&sel, 0);
    }

    #[test]
    fn invariants_hold_over_a_walk() {
        let len = 17;
        let mut sel = Selection::new(4);
        for delta in [1, 1, 5, -2, 9, 3, -7, -1, -30, 12, 1, 1, -3] {
            sel = sel.move_cursor(delta, len);
            assert_invariants(&sel, len);
        }
    }

    #[test]
    fn jump_to_last_shows_last_page() {
        let sel = Selection::new(4).jump_to_last(10);
        assert_eq!(sel.cursor(), 9);
        assert_eq!(sel.offset(), 6);

        let back = sel.jump_to_first(10);
        assert_eq!(back.cursor(), 0);
        assert_eq!(back.offset(), 0);
    }

    #[test]
    fn toggle_adds_and_removes() {
        let sel = Selection::new(5).toggle("a.txt");
        assert!(sel.is_selected("a.txt"));
        let sel = sel.toggle("a.txt");
        assert!(!sel.is_selected("a.txt"));
    }

    #[test]
    fn toggle_parent_is_noop() {
        let sel = Selection::new(5).toggle("..");
        assert!(!sel.has_selection());
    }

    #[test]
    fn clear_selection_keeps_cursor() {
        let sel = Selection::new(5)
            .move_cursor(2, 5)
            .toggle("a")
            .toggle("b")
            .clear_selection();
        assert!(!sel.has_selection());
        assert_eq!(sel.cursor(), 2);
    }

    #[test]
    fn clamp_after_listing_shrinks() {
        let sel = Selection::new(3)
            .with_position(Position::new(8, 6), 10)
            .clamp(4);
        assert_eq!(sel.cursor(), 3);
        assert_invariants(&sel, 4);
    }

    #[test]
    fn with_page_size_keeps_cursor_visible() {
        let sel = Selection::new(10)
            .move_cursor(8, 20)
            .with_page_size(3, 20);
        assert_eq!(sel.cursor(), 8);
        assert_invariants(&sel, 20);
    }

    #[test]
    fn with_position_repairs_bad_offset() {
        let sel = Selection::new(3).with_position(Position::new(1, 9), 10);
        assert_eq!(sel.cursor(), 1);
        assert_eq!(sel.offset(), 1);
    }

    #[test]
    fn with_cursor_on_finds_name() {
        let items = listing(&["a", "b", "c", "d", "e"]);
        let sel = Selection::new(2).with_cursor_on("d", &items);
        assert_eq!(sel.cursor(), 3);
        assert_invariants(&sel, items.len());

        let unchanged = sel.clone().with_cursor_on("zzz", &items);
        assert_eq!(unchanged, sel);
    }

    #[test]
    fn resolve_targets_prefers_selection() {
        let items = listing(&["a", "b", "c"]);
        let sel = Selection::new(5).toggle("c").toggle("a");

        let targets = sel.resolve_targets(&items);

        assert_eq!(targets, vec![PathBuf::from("/d/a"), PathBuf::from("/d/c")]);
    }

    #[test]
    fn resolve_targets_falls_back_to_cursor() {
        let items = listing(&["a", "b", "c"]);
        let sel = Selection::new(5).move_cursor(1, items.len());

        let targets = sel.resolve_targets(&items);

        assert_eq!(targets, vec![PathBuf::from("/d/b")]);
    }

    #[test]
    fn resolve_targets_skips_stale_names() {
        let items = listing(&["a", "b"]);
        let sel = Selection::new(5).toggle("gone").toggle("b");

        let targets = sel.resolve_targets(&items);

        assert_eq!(targets, vec![PathBuf::from("/d/b")]);
    }

    #[test]
    fn resolve_targets_all_stale_never_falls_back_to_cursor() {
        let items = listing(&["a", "b"]);
        let sel = Selection::new(5).toggle("gone");

        assert!(sel.resolve_targets(&items).is_empty());
    }

    #[test]
    fn resolve_targets_uses_on_disk_path() {
        // Decomposed on disk, composed for display.
        let items = vec![DirectoryEntry::new(
            PathBuf::from("/d/e\u{0301}.txt"),
            false,
            false,
            false,
        )];
        let sel = Selection::new(5);
        assert_eq!(items[0].name(), "\u{e9}.txt");

        let targets = sel.resolve_targets(&items);
        assert_eq!(targets, vec![PathBuf::from("/d/e\u{0301}.txt")]);

        let sel = sel.toggle("\u{e9}.txt");
        assert_eq!(sel.resolve_targets(&items), vec![PathBuf::from("/d/e\u{0301}.txt")]);
    }

    #[test]
    fn resolve_targets_never_returns_parent() {
        let items = vec![DirectoryEntry::new(PathBuf::from("/d/.."), true, false, false)];
        let sel = Selection::new(5);

        assert!(sel.resolve_targets(&items).is_empty());
    }

    #[test]
    fn resolve_targets_empty_listing() {
        let sel = Selection::new(5);
        assert!(sel.resolve_targets(&[]).is_empty());
    }
}
