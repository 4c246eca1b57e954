use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use gfd_core::action::{ActionCategory, ActionRegistry};
use gfd_core::config::keymap::Keymap;

/// Renders a centered popup dialog with the given title and message lines.
/// The popup grows with its content up to the full terminal height.
pub fn render_popup(f: &mut Frame, title: &str, lines: &[String], border_fg: Color) {
    let area = popup_rect(f.area(), lines.len());

    f.render_widget(Clear, area);

    let content: Vec<Line> = lines.iter().map(|l| Line::from(l.as_str())).collect();

    let popup = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_owned())
                .border_style(Style::default().fg(border_fg)),
        );

    f.render_widget(popup, area);
}

/// Help lines grouped by category, one per action with its bound keys.
pub fn help_lines(registry: &ActionRegistry, keymap: &Keymap) -> Vec<String> {
    const CATEGORIES: [ActionCategory; 6] = [
        ActionCategory::Navigation,
        ActionCategory::Selection,
        ActionCategory::Clipboard,
        ActionCategory::FileOps,
        ActionCategory::View,
        ActionCategory::System,
    ];

    let mut lines = Vec::new();
    for category in CATEGORIES {
        lines.push(format!("{}:", category.label()));
        for desc in registry.all().iter().filter(|d| d.category == category) {
            let keys = keymap
                .keys_for_action(desc.action)
                .map(|k| k.join("/"))
                .unwrap_or_else(|| "-".to_owned());
            lines.push(format!("  {keys:<20} {}", desc.description));
        }
    }
    lines.push(String::new());
    lines.push("Press Esc or ? to close".to_owned());
    lines
}

/// A centered rectangle 60% wide, tall enough for `line_count` lines plus
/// borders and never shorter than half the parent.
fn popup_rect(area: Rect, line_count: usize) -> Rect {
    let wanted = u16::try_from(line_count + 2).unwrap_or(u16::MAX);
    let height = wanted.max(area.height / 2).min(area.height);
    let width = centered_rect(60, 100, area).width;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Calculates a centered rectangle of the given percentage size within the parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
