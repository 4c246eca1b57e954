//! Key binding configuration.
//!
//! Key bindings map key names (see [`Key::name`](crate::event::Key::name),
//! e.g. `"j"`, `"Enter"`, `"Space"`) to [`Action`] values. The defaults pair
//! the arrow-key layout with vim-style letters.
//!
//! TOML files use string action identifiers (e.g. `"cursor_down"`); these
//! are resolved to [`Action`] via [`ActionRegistry::find_by_id`] at load time.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionRegistry};
use crate::error::{CoreError, CoreResult};
use crate::event::Key;

/// Raw TOML representation, deserialized first and then resolved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawKeymap {
    #[serde(default)]
    bindings: HashMap<String, String>,
}

/// Complete set of key bindings.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<String, Action>,
    /// Reverse map: Action → list of key strings (for the help screen).
    reverse: HashMap<Action, Vec<String>>,
}

const DEFAULT_BINDINGS: &[(&str, Action)] = &[
    // Navigation
    ("Up", Action::CursorUp),
    ("k", Action::CursorUp),
    ("Down", Action::CursorDown),
    ("j", Action::CursorDown),
    ("PageUp", Action::PageUp),
    ("PageDown", Action::PageDown),
    ("Home", Action::CursorTop),
    ("g", Action::CursorTop),
    ("End", Action::CursorBottom),
    ("G", Action::CursorBottom),
    ("Left", Action::GoParent),
    ("h", Action::GoParent),
    ("Backspace", Action::GoParent),
    ("Right", Action::Open),
    ("l", Action::Open),
    ("Enter", Action::Open),
    ("Ctrl+r", Action::Refresh),
    // Selection and view
    ("Space", Action::ToggleSelect),
    (".", Action::ToggleHidden),
    // Clipboard
    ("c", Action::Copy),
    ("m", Action::Cut),
    ("p", Action::Paste),
    ("x", Action::ClearClipboard),
    // File operations
    ("d", Action::Delete),
    ("r", Action::Rename),
    ("n", Action::Create),
    // System
    ("?", Action::Help),
    ("q", Action::Quit),
];

impl Default for Keymap {
    fn default() -> Self {
        let bindings: HashMap<String, Action> = DEFAULT_BINDINGS
            .iter()
            .map(|(key, action)| (key.to_string(), *action))
            .collect();
        let reverse = build_reverse(&bindings);
        Self { bindings, reverse }
    }
}

/// Builds the reverse mapping from Action → Vec<key string>.
fn build_reverse(bindings: &HashMap<String, Action>) -> HashMap<Action, Vec<String>> {
    let mut reverse: HashMap<Action, Vec<String>> = HashMap::new();
    for (key, action) in bindings {
        reverse.entry(*action).or_default().push(key.clone());
    }
    // Sort keys for deterministic display
    for keys in reverse.values_mut() {
        keys.sort();
    }
    reverse
}

impl Keymap {
    /// Loads key bindings from a TOML file at `path`, layered over the
    /// defaults.
    ///
    /// A binding to `"none"` removes the default for that key. Unknown action
    /// strings are logged and ignored.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        let raw: RawKeymap =
            toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))?;
        Ok(Self::default().with_overrides(raw))
    }

    fn with_overrides(self, raw: RawKeymap) -> Self {
        let registry = ActionRegistry::new();
        let mut bindings = self.bindings;

        for (key, action_id) in raw.bindings {
            if action_id == "none" {
                bindings.remove(&key);
                continue;
            }
            match registry.find_by_id(&action_id) {
                Some(action) => {
                    bindings.insert(key, action);
                }
                None => tracing::warn!(%key, %action_id, "unknown action in keymap"),
            }
        }

        let reverse = build_reverse(&bindings);
        Self { bindings, reverse }
    }

    /// Returns the action mapped to `key`, or `None` if unbound.
    pub fn action_for(&self, key: Key) -> Option<Action> {
        self.action_for_key(&key.name())
    }

    /// Returns the action mapped to the key name, or `None` if unbound.
    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Returns the key(s) bound to a given action.
    pub fn keys_for_action(&self, action: Action) -> Option<&[String]> {
        self.reverse.get(&action).map(|v| v.as_slice())
    }
}
