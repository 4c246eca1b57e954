use std::path::Path;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use gfd_core::clipboard::{Clipboard, ClipboardAction};
use gfd_core::config::theme::{parse_color, Theme};

/// Renders the top line: current directory, then the clipboard summary.
/// Example: " GFD - /home/me/projects | Clipboard: 2 item(s) [move]"
pub fn render_header(
    f: &mut Frame,
    area: Rect,
    current_dir: &Path,
    clipboard: &Clipboard,
    theme: &Theme,
) {
    let path_fg = parse_color(&theme.header.path_fg);

    let mut parts = vec![Span::styled(
        format!(" GFD - {}", current_dir.display()),
        Style::default().fg(path_fg).add_modifier(Modifier::BOLD),
    )];
    if let Some(span) = clipboard_span(clipboard, theme) {
        parts.push(span);
    }

    f.render_widget(Paragraph::new(Line::from(parts)), area);
}

/// The clipboard summary, colored by pending action. `None` when empty.
fn clipboard_span(clipboard: &Clipboard, theme: &Theme) -> Option<Span<'static>> {
    let action = clipboard.action().filter(|_| !clipboard.is_empty())?;
    let color = match action {
        ClipboardAction::Copy => parse_color(&theme.header.copy_fg),
        ClipboardAction::Move => parse_color(&theme.header.move_fg),
    };
    Some(Span::styled(
        format!(" | Clipboard: {} item(s) [{action}]", clipboard.len()),
        Style::default().fg(color),
    ))
}
