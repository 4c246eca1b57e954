use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};
use gfd_core::config::theme::{parse_color, Theme};

use crate::app::{App, AppMode, ConfirmAction};
use crate::ui::header::render_header;
use crate::ui::panel::render_file_list;
use crate::ui::popup::{help_lines, render_popup};
use crate::ui::statusbar::{render_hints, render_statusbar, StatusBarProps};

/// Rows not available to the listing: header, spacer, padding, hints, status.
const CHROME_ROWS: u16 = 5;

/// Number of listing rows that fit in a terminal `height` rows tall.
pub fn page_size(height: u16) -> usize {
    usize::from(height.saturating_sub(CHROME_ROWS)).max(1)
}

/// Main render function — composes the full UI layout each frame.
pub fn render(f: &mut Frame, app: &App) {
    let theme = app.theme();
    let nav = app.navigator();
    let area = f.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(page_size(area.height) as u16),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, rows[0], nav.current_dir(), app.browser().clipboard(), theme);
    render_file_list(
        f,
        rows[2],
        nav.listing(),
        nav.selection(),
        theme,
        app.show_icons(),
    );
    render_hints(f, rows[4], app.keymap(), app.action_registry(), theme);

    let props = StatusBarProps {
        entry_count: nav.listing().len(),
        cursor: nav.selection().cursor(),
        selected_count: nav.selection().selected_names().len(),
        show_hidden: nav.show_hidden(),
        status: app.status(),
    };
    render_statusbar(f, rows[5], &props, theme);

    // Render modal overlays based on mode
    match app.mode() {
        AppMode::Help => {
            let lines = help_lines(app.action_registry(), app.keymap());
            render_popup(f, "Help", &lines, parse_color(&theme.popup.border_fg));
        }
        AppMode::Rename(buffer) => render_rename_popup(f, app, buffer, theme),
        AppMode::CreateName(buffer) => {
            let lines = prompt_lines("Name of new file/directory: ", buffer);
            render_popup(f, "New", &lines, parse_color(&theme.popup.border_fg));
        }
        AppMode::CreateKind(name) => {
            let lines = vec![
                format!("Create {name} as:"),
                String::new(),
                "f - File".to_owned(),
                "d - Directory".to_owned(),
                String::new(),
                "Any other key cancels".to_owned(),
            ];
            render_popup(f, "New", &lines, parse_color(&theme.popup.border_fg));
        }
        AppMode::Confirm(ConfirmAction::Delete(targets)) => {
            render_delete_popup(f, targets, theme)
        }
        AppMode::Message(lines) => {
            let mut lines = lines.clone();
            lines.push(String::new());
            lines.push("Press any key".to_owned());
            render_popup(f, "Error", &lines, parse_color(&theme.popup.danger_fg));
        }
        AppMode::Normal => {}
    }
}

fn prompt_lines(prompt: &str, buffer: &str) -> Vec<String> {
    vec![
        format!("{prompt}{buffer}_"),
        String::new(),
        "Enter to confirm, Esc to cancel".to_owned(),
    ]
}

fn render_rename_popup(f: &mut Frame, app: &App, buffer: &str, theme: &Theme) {
    let old_name = app
        .browser()
        .rename_target()
        .map(|e| e.name().to_owned())
        .unwrap_or_default();
    let lines = prompt_lines(&format!("Rename {old_name} to: "), buffer);
    render_popup(f, "Rename", &lines, parse_color(&theme.popup.border_fg));
}

fn render_delete_popup(f: &mut Frame, targets: &[std::path::PathBuf], theme: &Theme) {
    let names: Vec<String> = targets
        .iter()
        .map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string())
        })
        .collect();
    let lines = vec![
        format!("Delete {}?", names.join(", ")),
        String::new(),
        "y - Yes, delete".to_owned(),
        "any other key - Cancel".to_owned(),
    ];
    render_popup(f, "Confirm", &lines, parse_color(&theme.popup.danger_fg));
}
