//! Hidden-file filtering and listing order.

use crate::fs::entry::DirectoryEntry;

/// Sorts entries by name in plain byte order.
///
/// Uppercase names sort before lowercase ones and directories are not
/// grouped. Returns a **new** `Vec`; the input slice is never mutated.
pub fn sort_by_name(entries: &[DirectoryEntry]) -> Vec<DirectoryEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| a.name().cmp(b.name()));
    sorted
}

/// Filters out hidden entries when `show_hidden` is `false`.
///
/// When `show_hidden` is `true` all entries are returned unchanged.
pub fn filter_hidden(entries: &[DirectoryEntry], show_hidden: bool) -> Vec<DirectoryEntry> {
    if show_hidden {
        return entries.to_vec();
    }
    entries.iter().filter(|e| !e.is_hidden()).cloned().collect()
}

/// Produces the displayed listing: hidden policy applied, then name order.
/// A `..` pseudo-entry is always dropped.
pub fn build_listing(entries: &[DirectoryEntry], show_hidden: bool) -> Vec<DirectoryEntry> {
    let visible: Vec<DirectoryEntry> = filter_hidden(entries, show_hidden)
        .into_iter()
        .filter(|e| !e.is_parent_link())
        .collect();
    sort_by_name(&visible)
}
