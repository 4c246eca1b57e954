//! File list panel rendering with theme support.
//!
//! Only the rows inside the selection's viewport (`offset .. offset +
//! page_size`) are drawn; scrolling is owned by the selection model.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
    Frame,
};
use gfd_core::config::theme::{parse_color, Theme};
use gfd_core::fs::entry::DirectoryEntry;
use gfd_core::nav::selection::Selection;

use crate::icons::{icon_for_entry, marker_for_entry};

/// Renders the visible window of `listing`.
///
/// The cursor row uses the cursor color, selected rows the selection color,
/// and every other row is colored by entry kind.
pub fn render_file_list(
    f: &mut Frame,
    area: Rect,
    listing: &[DirectoryEntry],
    selection: &Selection,
    theme: &Theme,
    show_icons: bool,
) {
    let start = selection.offset().min(listing.len());
    let end = (start + selection.page_size()).min(listing.len());

    let items: Vec<ListItem> = listing[start..end]
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let index = start + i;
            let prefix = if show_icons {
                icon_for_entry(entry)
            } else {
                marker_for_entry(entry)
            };
            let style = row_style(entry, index, selection, theme);
            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(entry.name().to_owned(), style),
            ]))
        })
        .collect();

    let list = List::new(items);

    let mut state = ListState::default();
    if !listing.is_empty() {
        state.select(Some(selection.cursor().saturating_sub(start)));
    }

    f.render_stateful_widget(list, area, &mut state);
}

fn row_style(entry: &DirectoryEntry, index: usize, selection: &Selection, theme: &Theme) -> Style {
    if index == selection.cursor() {
        Style::default()
            .fg(parse_color(&theme.panel.cursor_fg))
            .add_modifier(Modifier::BOLD)
    } else if selection.is_selected(entry.name()) {
        Style::default().fg(parse_color(&theme.panel.selected_fg))
    } else {
        entry_style(entry, theme)
    }
}

fn entry_style(entry: &DirectoryEntry, theme: &Theme) -> Style {
    if entry.is_dir() || entry.is_parent_link() {
        Style::default().fg(parse_color(&theme.panel.dir_fg))
    } else if entry.is_symlink() {
        Style::default().fg(parse_color(&theme.panel.symlink_fg))
    } else if entry.is_executable() {
        Style::default().fg(parse_color(&theme.panel.executable_fg))
    } else {
        Style::default().fg(parse_color(&theme.panel.file_fg))
    }
}
