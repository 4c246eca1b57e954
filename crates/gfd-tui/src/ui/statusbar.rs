//! Bottom two rows: key hints and the status bar.
//!
//! The status bar shows the cursor position, the multi-selection count, the
//! hidden-file indicator and the current status message.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use gfd_core::action::{Action, ActionRegistry};
use gfd_core::config::keymap::Keymap;
use gfd_core::config::theme::{parse_color, Theme};

use crate::app::{StatusKind, StatusMessage};

/// Actions advertised on the hint line, in display order.
const HINT_ACTIONS: &[Action] = &[
    Action::GoParent,
    Action::Open,
    Action::Quit,
    Action::Copy,
    Action::Cut,
    Action::Paste,
    Action::ClearClipboard,
    Action::Delete,
    Action::Rename,
    Action::Create,
    Action::ToggleHidden,
    Action::ToggleSelect,
    Action::Help,
];

/// Data needed to render the status bar.
pub struct StatusBarProps<'a> {
    pub entry_count: usize,
    pub cursor: usize,
    pub selected_count: usize,
    pub show_hidden: bool,
    pub status: Option<&'a StatusMessage>,
}

/// Renders the bottom status bar.
pub fn render_statusbar(f: &mut Frame, area: Rect, props: &StatusBarProps<'_>, theme: &Theme) {
    let bg = parse_color(&theme.statusbar.bg);
    let position_fg = parse_color(&theme.statusbar.position_fg);
    let hidden_fg = parse_color(&theme.statusbar.hidden_fg);

    let position = if props.entry_count > 0 {
        format!(" {}/{}", props.cursor + 1, props.entry_count)
    } else {
        " 0/0".to_owned()
    };

    let selected = if props.selected_count > 0 {
        format!("  {} selected", props.selected_count)
    } else {
        String::new()
    };

    let hidden_indicator = if props.show_hidden { " [H]" } else { "" };

    let status_span = props
        .status
        .map(|msg| status_span(msg, theme))
        .unwrap_or_default();

    let line = Line::from(vec![
        Span::styled(
            position,
            Style::default()
                .fg(position_fg)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(selected, Style::default().fg(position_fg).bg(bg)),
        Span::styled(
            hidden_indicator.to_owned(),
            Style::default()
                .fg(hidden_fg)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        status_span,
    ]);

    let bar = Paragraph::new(line).style(Style::default().bg(bg));
    f.render_widget(bar, area);
}

fn status_span(msg: &StatusMessage, theme: &Theme) -> Span<'static> {
    let bg = parse_color(&theme.statusbar.bg);
    let fg = match msg.kind {
        StatusKind::Info => parse_color(&theme.statusbar.message_fg),
        StatusKind::Success => parse_color(&theme.statusbar.success_fg),
        StatusKind::Error => parse_color(&theme.statusbar.error_fg),
    };
    Span::styled(
        format!("  {}", msg.text),
        Style::default().fg(fg).bg(bg).add_modifier(Modifier::ITALIC),
    )
}

/// Renders the key hint line, built from the live keymap.
pub fn render_hints(
    f: &mut Frame,
    area: Rect,
    keymap: &Keymap,
    registry: &ActionRegistry,
    theme: &Theme,
) {
    let fg = parse_color(&theme.statusbar.message_fg);
    let text = format!(" {}", hint_text(keymap, registry));
    f.render_widget(Paragraph::new(Span::styled(text, Style::default().fg(fg))), area);
}

/// `"h: Go Up | l: Open | ..."`; unbound actions are skipped.
pub fn hint_text(keymap: &Keymap, registry: &ActionRegistry) -> String {
    HINT_ACTIONS
        .iter()
        .filter_map(|&action| {
            let key = preferred_key(keymap.keys_for_action(action)?)?;
            let name = registry.descriptor_for(action)?.name;
            Some(format!("{key}: {name}"))
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// The shortest key name, so single characters win over `"Backspace"`.
pub fn preferred_key(keys: &[String]) -> Option<&str> {
    keys.iter().min_by_key(|k| k.chars().count()).map(String::as_str)
}
