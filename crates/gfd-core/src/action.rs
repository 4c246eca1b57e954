//! Unified action system.
//!
//! Every user-triggerable operation is an [`Action`]. [`ActionRegistry`]
//! holds the metadata (id, name, description, category) used to resolve
//! `keymap.toml` identifiers and to render the help screen.

/// Every user-triggerable action.
///
/// Variants carry no parameters; context is determined at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Navigation
    CursorUp,
    CursorDown,
    PageUp,
    PageDown,
    CursorTop,
    CursorBottom,
    GoParent,
    Open,
    Refresh,
    // Selection
    ToggleSelect,
    // Clipboard
    Copy,
    Cut,
    Paste,
    ClearClipboard,
    // File operations
    Delete,
    Rename,
    Create,
    // View
    ToggleHidden,
    // System
    Help,
    Quit,
}

/// Broad category for grouping actions on the help screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    Selection,
    Clipboard,
    FileOps,
    View,
    System,
}

impl ActionCategory {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Selection => "Selection",
            Self::Clipboard => "Clipboard",
            Self::FileOps => "File",
            Self::View => "View",
            Self::System => "System",
        }
    }
}

/// Metadata for a single action.
#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    pub action: Action,
    /// Snake-case identifier used in `keymap.toml` (e.g. `"cursor_up"`).
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: ActionCategory,
}

const fn descriptor(
    action: Action,
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: ActionCategory,
) -> ActionDescriptor {
    ActionDescriptor {
        action,
        id,
        name,
        description,
        category,
    }
}

/// Registry of all available actions.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    descriptors: Vec<ActionDescriptor>,
}

impl ActionRegistry {
    /// Builds the registry containing every known action.
    pub fn new() -> Self {
        use Action as A;
        use ActionCategory as C;

        let descriptors = vec![
            descriptor(A::CursorUp, "cursor_up", "Cursor Up", "Move cursor up one entry", C::Navigation),
            descriptor(A::CursorDown, "cursor_down", "Cursor Down", "Move cursor down one entry", C::Navigation),
            descriptor(A::PageUp, "page_up", "Page Up", "Move cursor up one screen", C::Navigation),
            descriptor(A::PageDown, "page_down", "Page Down", "Move cursor down one screen", C::Navigation),
            descriptor(A::CursorTop, "cursor_top", "Go to Top", "Jump to the first entry", C::Navigation),
            descriptor(A::CursorBottom, "cursor_bottom", "Go to Bottom", "Jump to the last entry", C::Navigation),
            descriptor(A::GoParent, "go_parent", "Go Up", "Go to the parent directory", C::Navigation),
            descriptor(A::Open, "open", "Open", "Enter directory or open file", C::Navigation),
            descriptor(A::Refresh, "refresh", "Refresh", "Re-read the current directory", C::Navigation),
            descriptor(A::ToggleSelect, "toggle_select", "Select", "Toggle selection of the entry under the cursor", C::Selection),
            descriptor(A::Copy, "copy", "Copy", "Put targets on the clipboard for copying", C::Clipboard),
            descriptor(A::Cut, "cut", "Cut", "Put targets on the clipboard for moving", C::Clipboard),
            descriptor(A::Paste, "paste", "Paste", "Paste the clipboard here", C::Clipboard),
            descriptor(A::ClearClipboard, "clear_clipboard", "Clear Clipboard", "Empty the clipboard", C::Clipboard),
            descriptor(A::Delete, "delete", "Delete", "Delete targets after confirmation", C::FileOps),
            descriptor(A::Rename, "rename", "Rename", "Rename the entry under the cursor", C::FileOps),
            descriptor(A::Create, "create", "New", "Create a file or directory", C::FileOps),
            descriptor(A::ToggleHidden, "toggle_hidden", "Toggle Hidden", "Show or hide dotfiles", C::View),
            descriptor(A::Help, "help", "Help", "Show key bindings", C::System),
            descriptor(A::Quit, "quit", "Quit", "Exit the browser", C::System),
        ];

        Self { descriptors }
    }

    /// Returns all action descriptors.
    pub fn all(&self) -> &[ActionDescriptor] {
        &self.descriptors
    }

    /// Finds an action by its snake_case id (as used in `keymap.toml`).
    pub fn find_by_id(&self, id: &str) -> Option<Action> {
        self.descriptors
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.action)
    }

    /// Returns the descriptor for a given action.
    pub fn descriptor_for(&self, action: Action) -> Option<&ActionDescriptor> {
        self.descriptors.iter().find(|d| d.action == action)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
