use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gfd_core::action::Action;
use gfd_core::browser::CreateKind;
use gfd_core::config::keymap::Keymap;
use gfd_core::event::Key;

use crate::app::AppMode;

/// What a key press asks the app to do.
#[derive(Debug, PartialEq, Eq)]
pub enum InputAction {
    /// Dispatch a bound action.
    Action(Action),
    /// Enter a new AppMode.
    EnterMode(AppMode),
    /// Quit regardless of bindings (Ctrl+C).
    Quit,
    /// Append a character to the prompt buffer.
    PromptChar(char),
    /// Remove the last character from the prompt buffer.
    PromptBackspace,
    /// Submit the prompt buffer.
    PromptConfirm,
    /// Answer to the file-or-directory question.
    CreateKind(CreateKind),
    /// User confirmed the pending action.
    ConfirmApproved,
    /// No action for this key.
    None,
}

/// Decodes a crossterm key event into a [`Key`]. Keys outside the closed set
/// (function keys, media keys, Alt chords) yield `None`.
pub fn decode_key(event: KeyEvent) -> Option<Key> {
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let key = match event.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Char(c) if ctrl => Key::Ctrl(c.to_ascii_lowercase()),
        KeyCode::Char(c) if event.modifiers.contains(KeyModifiers::ALT) => {
            tracing::debug!(%c, "ignoring Alt chord");
            return None;
        }
        KeyCode::Char(c) => Key::Char(c),
        _ => return None,
    };
    Some(key)
}

/// Maps a key to an InputAction based on the current mode.
///
/// In Normal mode keys are resolved through the `Keymap`; Ctrl+C always
/// quits. Prompts and popups use fixed keys.
pub fn handle_key(key: Key, mode: &AppMode, keymap: &Keymap) -> InputAction {
    match mode {
        AppMode::Normal => handle_normal_key(key, keymap),
        AppMode::Rename(_) | AppMode::CreateName(_) => handle_prompt_key(key),
        AppMode::CreateKind(_) => handle_create_kind_key(key),
        AppMode::Confirm(_) => handle_confirm_key(key),
        AppMode::Help => handle_help_key(key),
        AppMode::Message(_) => InputAction::EnterMode(AppMode::Normal),
    }
}

fn handle_normal_key(key: Key, keymap: &Keymap) -> InputAction {
    if key == Key::Ctrl('c') {
        return InputAction::Quit;
    }
    match keymap.action_for(key) {
        Some(action) => InputAction::Action(action),
        None => InputAction::None,
    }
}

fn handle_prompt_key(key: Key) -> InputAction {
    match key {
        Key::Esc => InputAction::EnterMode(AppMode::Normal),
        Key::Enter => InputAction::PromptConfirm,
        Key::Backspace => InputAction::PromptBackspace,
        Key::Char(c) => InputAction::PromptChar(c),
        _ => InputAction::None,
    }
}

fn handle_create_kind_key(key: Key) -> InputAction {
    match key {
        Key::Char('f') | Key::Char('F') => InputAction::CreateKind(CreateKind::File),
        Key::Char('d') | Key::Char('D') => InputAction::CreateKind(CreateKind::Directory),
        Key::Esc | Key::Enter | Key::Char(_) => InputAction::EnterMode(AppMode::Normal),
        _ => InputAction::None,
    }
}

/// Only `y` approves; any other key cancels.
fn handle_confirm_key(key: Key) -> InputAction {
    match key {
        Key::Char('y') | Key::Char('Y') => InputAction::ConfirmApproved,
        _ => InputAction::EnterMode(AppMode::Normal),
    }
}

fn handle_help_key(key: Key) -> InputAction {
    match key {
        Key::Esc | Key::Enter | Key::Char('q') | Key::Char('?') => {
            InputAction::EnterMode(AppMode::Normal)
        }
        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ConfirmAction;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use std::path::PathBuf;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn key_with_mod(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn default_keymap() -> Keymap {
        Keymap::default()
    }

    // --- decode_key ---

    #[test]
    fn decode_named_keys() {
        assert_eq!(decode_key(key(KeyCode::Up)), Some(Key::Up));
        assert_eq!(decode_key(key(KeyCode::Enter)), Some(Key::Enter));
        assert_eq!(decode_key(key(KeyCode::PageDown)), Some(Key::PageDown));
        assert_eq!(decode_key(key(KeyCode::Backspace)), Some(Key::Backspace));
    }

    #[test]
    fn decode_chars_keep_case() {
        assert_eq!(decode_key(key(KeyCode::Char('G'))), Some(Key::Char('G')));
        assert_eq!(
            decode_key(key_with_mod(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(Key::Char('G'))
        );
        assert_eq!(decode_key(key(KeyCode::Char(' '))), Some(Key::Char(' ')));
    }

    #[test]
    fn decode_ctrl_chord() {
        assert_eq!(
            decode_key(key_with_mod(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            Some(Key::Ctrl('r'))
        );
    }

    #[test]
    fn decode_unsupported_keys_is_none() {
        assert_eq!(decode_key(key(KeyCode::F(5))), None);
        assert_eq!(
            decode_key(key_with_mod(KeyCode::Char('x'), KeyModifiers::ALT)),
            None
        );
    }

    // --- Normal mode ---

    #[test]
    fn normal_keys_resolve_through_keymap() {
        let km = default_keymap();
        assert_eq!(
            handle_key(Key::Char('j'), &AppMode::Normal, &km),
            InputAction::Action(Action::CursorDown)
        );
        assert_eq!(
            handle_key(Key::Left, &AppMode::Normal, &km),
            InputAction::Action(Action::GoParent)
        );
        assert_eq!(
            handle_key(Key::Char(' '), &AppMode::Normal, &km),
            InputAction::Action(Action::ToggleSelect)
        );
        assert_eq!(
            handle_key(Key::Char('p'), &AppMode::Normal, &km),
            InputAction::Action(Action::Paste)
        );
    }

    #[test]
    fn normal_ctrl_c_quits() {
        let km = default_keymap();
        assert_eq!(
            handle_key(Key::Ctrl('c'), &AppMode::Normal, &km),
            InputAction::Quit
        );
    }

    #[test]
    fn normal_unknown_key_none() {
        let km = default_keymap();
        assert_eq!(
            handle_key(Key::Char('z'), &AppMode::Normal, &km),
            InputAction::None
        );
    }

    // --- Prompts ---

    #[test]
    fn prompt_keys_edit_buffer() {
        let km = default_keymap();
        let mode = AppMode::Rename(String::new());
        assert_eq!(handle_key(Key::Char('q'), &mode, &km), InputAction::PromptChar('q'));
        assert_eq!(handle_key(Key::Backspace, &mode, &km), InputAction::PromptBackspace);
        assert_eq!(handle_key(Key::Enter, &mode, &km), InputAction::PromptConfirm);
        assert_eq!(
            handle_key(Key::Esc, &mode, &km),
            InputAction::EnterMode(AppMode::Normal)
        );
    }

    #[test]
    fn create_kind_accepts_f_and_d() {
        let km = default_keymap();
        let mode = AppMode::CreateKind("new".to_string());
        assert_eq!(
            handle_key(Key::Char('f'), &mode, &km),
            InputAction::CreateKind(CreateKind::File)
        );
        assert_eq!(
            handle_key(Key::Char('D'), &mode, &km),
            InputAction::CreateKind(CreateKind::Directory)
        );
        assert_eq!(
            handle_key(Key::Char('x'), &mode, &km),
            InputAction::EnterMode(AppMode::Normal)
        );
    }

    // --- Confirm mode ---

    #[test]
    fn confirm_y_approves() {
        let km = default_keymap();
        let mode = AppMode::Confirm(ConfirmAction::Delete(vec![PathBuf::from("/tmp/a")]));
        assert_eq!(handle_key(Key::Char('y'), &mode, &km), InputAction::ConfirmApproved);
        assert_eq!(handle_key(Key::Char('Y'), &mode, &km), InputAction::ConfirmApproved);
    }

    #[test]
    fn confirm_anything_else_cancels() {
        let km = default_keymap();
        let mode = AppMode::Confirm(ConfirmAction::Delete(vec![]));
        for k in [Key::Char('n'), Key::Esc, Key::Enter, Key::Char('d')] {
            assert_eq!(
                handle_key(k, &mode, &km),
                InputAction::EnterMode(AppMode::Normal)
            );
        }
    }

    // --- Help and message popups ---

    #[test]
    fn help_closes_on_esc_q_and_question() {
        let km = default_keymap();
        for k in [Key::Esc, Key::Char('q'), Key::Char('?')] {
            assert_eq!(
                handle_key(k, &AppMode::Help, &km),
                InputAction::EnterMode(AppMode::Normal)
            );
        }
        assert_eq!(handle_key(Key::Char('j'), &AppMode::Help, &km), InputAction::None);
    }

    #[test]
    fn message_closes_on_any_key() {
        let km = default_keymap();
        let mode = AppMode::Message(vec!["boom".to_string()]);
        assert_eq!(
            handle_key(Key::Char('j'), &mode, &km),
            InputAction::EnterMode(AppMode::Normal)
        );
    }
}
