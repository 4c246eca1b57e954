//! Key events as seen by the core.
//!
//! Frontends decode their raw terminal events into [`Key`] once, at the
//! boundary. Everything past that point (keymap lookup, prompt editing)
//! works on this closed set.

use std::fmt;

/// A decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Backspace,
    Tab,
    Home,
    End,
    PageUp,
    PageDown,
    /// A printable character, including space.
    Char(char),
    /// A character pressed with Control held.
    Ctrl(char),
}

impl Key {
    /// The name used for this key in `keymap.toml`.
    ///
    /// Named keys use their variant name (`"Enter"`, `"PageDown"`), space is
    /// `"Space"`, other characters are themselves, and control chords are
    /// `"Ctrl+<char>"`.
    pub fn name(&self) -> String {
        match self {
            Self::Up => "Up".to_string(),
            Self::Down => "Down".to_string(),
            Self::Left => "Left".to_string(),
            Self::Right => "Right".to_string(),
            Self::Enter => "Enter".to_string(),
            Self::Esc => "Esc".to_string(),
            Self::Backspace => "Backspace".to_string(),
            Self::Tab => "Tab".to_string(),
            Self::Home => "Home".to_string(),
            Self::End => "End".to_string(),
            Self::PageUp => "PageUp".to_string(),
            Self::PageDown => "PageDown".to_string(),
            Self::Char(' ') => "Space".to_string(),
            Self::Char(c) => c.to_string(),
            Self::Ctrl(c) => format!("Ctrl+{c}"),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
