use std::path::{Path, PathBuf};

use gfd_core::action::{Action, ActionRegistry};
use gfd_core::browser::{Browser, CreateKind, DeleteReport};
use gfd_core::clipboard::{ClipboardAction, PasteReport};
use gfd_core::config::keymap::Keymap;
use gfd_core::config::settings::Config;
use gfd_core::config::theme::Theme;
use gfd_core::error::{CoreError, CoreResult};
use gfd_core::nav::controller::Navigator;

use crate::input::InputAction;

/// Application mode — determines how input is routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    /// Typing the new name for the entry under the cursor.
    Rename(String),
    /// Typing the name of a new file or directory.
    CreateName(String),
    /// Asking whether the named entry is a file or a directory.
    CreateKind(String),
    Confirm(ConfirmAction),
    Help,
    /// Multi-line error report, dismissed by any key.
    Message(Vec<String>),
}

/// What action is pending user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    Delete(Vec<PathBuf>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// Side effects the event loop performs outside the app state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hand the file to the external opener.
    Open(PathBuf),
    /// Keep the success message on screen briefly, then clear it.
    Flash,
}

pub struct App {
    browser: Browser,
    mode: AppMode,
    should_quit: bool,
    status: Option<StatusMessage>,
    keymap: Keymap,
    action_registry: ActionRegistry,
    theme: Theme,
    show_icons: bool,
    confirm_delete: bool,
}

/// Returns the path to the config directory.
pub fn config_dir() -> PathBuf {
    // Check for project-local config directory first, then fall back
    let local = PathBuf::from("config");
    if local.exists() {
        return local;
    }
    home_dir().join(".config").join("gfd")
}

pub fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Unwraps a config load, using defaults when the file is absent. A file that
/// exists but cannot be used also yields defaults, plus a warning naming it.
pub fn config_or_default<T: Default>(path: &Path, loaded: CoreResult<T>) -> (T, Option<String>) {
    match loaded {
        Ok(value) => (value, None),
        Err(CoreError::NotFound(_)) => (T::default(), None),
        Err(e) => {
            let warning = format!("{} ignored: {e}", path.display());
            (T::default(), Some(warning))
        }
    }
}

impl App {
    pub fn new(browser: Browser, config: &Config, keymap: Keymap, theme: Theme) -> Self {
        let status = browser.navigator().notice().map(|n| StatusMessage {
            text: n.to_string(),
            kind: StatusKind::Error,
        });
        Self {
            browser,
            mode: AppMode::Normal,
            should_quit: false,
            status,
            keymap,
            action_registry: ActionRegistry::new(),
            theme,
            show_icons: config.ui.show_icons,
            confirm_delete: config.general.confirm_delete,
        }
    }

    pub fn mode(&self) -> &AppMode {
        &self.mode
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    pub fn navigator(&self) -> &Navigator {
        self.browser.navigator()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn action_registry(&self) -> &ActionRegistry {
        &self.action_registry
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn show_icons(&self) -> bool {
        self.show_icons
    }

    /// Transition to a new mode.
    pub fn with_mode(self, mode: AppMode) -> Self {
        Self { mode, ..self }
    }

    /// Mark the app for quitting.
    pub fn with_quit(self) -> Self {
        Self {
            should_quit: true,
            ..self
        }
    }

    pub fn with_status(self, text: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            status: Some(StatusMessage {
                text: text.into(),
                kind,
            }),
            ..self
        }
    }

    pub fn with_clear_status(self) -> Self {
        Self {
            status: None,
            ..self
        }
    }

    /// Resizes the viewport to `page_size` rows.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        if self.navigator().selection().page_size() != page_size {
            self.browser.navigate(|nav| nav.with_page_size(page_size));
        }
        self
    }

    /// Records the outcome of handing `path` to the external opener.
    pub fn with_open_result(self, path: &Path, result: CoreResult<()>) -> Self {
        match result {
            Ok(()) => self,
            Err(e) => {
                tracing::warn!(path = %path.display(), "open failed: {e}");
                self.with_status(e.to_string(), StatusKind::Error)
            }
        }
    }

    /// Applies one input action; returns the new state and any effect the
    /// event loop must carry out.
    pub fn apply(self, input: InputAction) -> (Self, Option<Effect>) {
        match input {
            InputAction::Action(action) => self.with_clear_status().handle_action(action),
            InputAction::EnterMode(mode) => (self.with_mode(mode), None),
            InputAction::Quit => (self.with_quit(), None),
            InputAction::PromptChar(c) => (self.with_prompt_edit(|buf| buf.push(c)), None),
            InputAction::PromptBackspace => (
                self.with_prompt_edit(|buf| {
                    buf.pop();
                }),
                None,
            ),
            InputAction::PromptConfirm => (self.confirm_prompt(), None),
            InputAction::CreateKind(kind) => (self.confirm_create(kind), None),
            InputAction::ConfirmApproved => (self.confirm_approved(), None),
            InputAction::None => (self, None),
        }
    }

    fn handle_action(mut self, action: Action) -> (Self, Option<Effect>) {
        let page = self.navigator().selection().page_size() as isize;
        let app = match action {
            Action::CursorUp => self.navigate(|nav| nav.move_cursor(-1)),
            Action::CursorDown => self.navigate(|nav| nav.move_cursor(1)),
            Action::PageUp => self.navigate(|nav| nav.move_cursor(-page)),
            Action::PageDown => self.navigate(|nav| nav.move_cursor(page)),
            Action::CursorTop => self.navigate(Navigator::jump_to_first),
            Action::CursorBottom => self.navigate(Navigator::jump_to_last),
            Action::ToggleSelect => self.navigate(Navigator::toggle_selection),
            Action::GoParent => self.navigate(Navigator::go_up).with_notice(),
            Action::Refresh => self.navigate(Navigator::refresh).with_notice(),
            Action::ToggleHidden => self.navigate(Navigator::toggle_hidden).with_notice(),
            Action::Open => {
                let file = self.browser.activate();
                let app = self.with_notice();
                return (app, file.map(Effect::Open));
            }
            Action::Copy => {
                let result = self.browser.copy_to_clipboard();
                self.with_capture_result(result, "copy", "Copied")
            }
            Action::Cut => {
                let result = self.browser.cut_to_clipboard();
                self.with_capture_result(result, "cut", "Cut")
            }
            Action::Paste => return self.paste(),
            Action::ClearClipboard => {
                self.browser.clear_clipboard();
                self.with_status("Clipboard cleared", StatusKind::Info)
            }
            Action::Delete => self.request_delete(),
            Action::Rename if self.browser.rename_target().is_some() => {
                self.with_mode(AppMode::Rename(String::new()))
            }
            Action::Rename => self.with_status("Nothing to rename", StatusKind::Error),
            Action::Create => self.with_mode(AppMode::CreateName(String::new())),
            Action::Help => self.with_mode(AppMode::Help),
            Action::Quit => self.with_quit(),
        };
        (app, None)
    }

    fn navigate(mut self, f: impl FnOnce(Navigator) -> Navigator) -> Self {
        self.browser.navigate(f);
        self
    }

    /// Surfaces the fallback notice of the last relist, if any.
    fn with_notice(self) -> Self {
        match self.navigator().notice().map(|n| n.to_string()) {
            Some(text) => self.with_status(text, StatusKind::Error),
            None => self,
        }
    }

    fn with_capture_result(self, result: CoreResult<usize>, verb: &str, done: &str) -> Self {
        match result {
            Ok(count) => self.with_status(
                format!("{done} {count} item(s) to clipboard"),
                StatusKind::Info,
            ),
            Err(CoreError::EmptySelection) => {
                self.with_status(format!("Nothing to {verb}"), StatusKind::Error)
            }
            Err(e) => self.with_status(e.to_string(), StatusKind::Error),
        }
    }

    fn paste(mut self) -> (Self, Option<Effect>) {
        match self.browser.paste() {
            Ok(report) if report.is_clean() => {
                let text = format!(
                    "{} {} item(s)",
                    paste_verb(&report),
                    report.applied.len()
                );
                let app = self.with_notice().with_status(text, StatusKind::Success);
                (app, Some(Effect::Flash))
            }
            Ok(report) => (self.with_notice().with_mode(paste_errors(&report)), None),
            Err(CoreError::EmptyClipboard) => (
                self.with_status("Clipboard is empty", StatusKind::Error),
                None,
            ),
            Err(e) => (self.with_status(e.to_string(), StatusKind::Error), None),
        }
    }

    fn request_delete(self) -> Self {
        match self.browser.delete_targets() {
            Ok(targets) if self.confirm_delete => {
                self.with_mode(AppMode::Confirm(ConfirmAction::Delete(targets)))
            }
            Ok(targets) => self.delete(&targets),
            Err(CoreError::EmptySelection) => {
                self.with_status("Nothing to delete", StatusKind::Error)
            }
            Err(e) => self.with_status(e.to_string(), StatusKind::Error),
        }
    }

    fn delete(mut self, targets: &[PathBuf]) -> Self {
        let report = self.browser.delete(targets);
        let app = self.with_notice();
        if report.is_clean() {
            let text = format!("Deleted {} item(s)", report.deleted.len());
            app.with_status(text, StatusKind::Success)
        } else {
            app.with_mode(delete_errors(&report))
        }
    }

    fn confirm_approved(self) -> Self {
        match self.mode.clone() {
            AppMode::Confirm(ConfirmAction::Delete(targets)) => {
                self.with_mode(AppMode::Normal).delete(&targets)
            }
            _ => self.with_mode(AppMode::Normal),
        }
    }

    fn with_prompt_edit(self, edit: impl FnOnce(&mut String)) -> Self {
        let mode = match self.mode.clone() {
            AppMode::Rename(mut buf) => {
                edit(&mut buf);
                AppMode::Rename(buf)
            }
            AppMode::CreateName(mut buf) => {
                edit(&mut buf);
                AppMode::CreateName(buf)
            }
            other => other,
        };
        self.with_mode(mode)
    }

    /// An empty buffer cancels the prompt.
    fn confirm_prompt(mut self) -> Self {
        match self.mode.clone() {
            AppMode::Rename(name) if name.is_empty() => self.with_mode(AppMode::Normal),
            AppMode::Rename(name) => {
                let result = self.browser.rename(&name);
                let app = self.with_mode(AppMode::Normal).with_notice();
                match result {
                    Ok(_) => app.with_status(format!("Renamed to {name}"), StatusKind::Success),
                    Err(e) => app.with_status(e.to_string(), StatusKind::Error),
                }
            }
            AppMode::CreateName(name) if name.is_empty() => self.with_mode(AppMode::Normal),
            AppMode::CreateName(name) => self.with_mode(AppMode::CreateKind(name)),
            _ => self,
        }
    }

    fn confirm_create(mut self, kind: CreateKind) -> Self {
        let AppMode::CreateKind(name) = self.mode.clone() else {
            return self;
        };
        let result = self.browser.create(&name, kind);
        let app = self.with_mode(AppMode::Normal).with_notice();
        match result {
            Ok(_) => app.with_status(format!("Created {name}"), StatusKind::Success),
            Err(e) => app.with_status(e.to_string(), StatusKind::Error),
        }
    }
}

fn paste_verb(report: &PasteReport) -> &'static str {
    match report.action {
        ClipboardAction::Copy => "Copied",
        ClipboardAction::Move => "Moved",
    }
}

fn paste_errors(report: &PasteReport) -> AppMode {
    let mut lines = vec!["Errors:".to_string()];
    lines.extend(report.failures.iter().map(|f| f.to_string()));
    AppMode::Message(lines)
}

fn delete_errors(report: &DeleteReport) -> AppMode {
    let mut lines = vec!["Errors:".to_string()];
    lines.extend(report.failures.iter().map(|f| f.to_string()));
    AppMode::Message(lines)
}
