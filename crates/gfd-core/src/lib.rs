//! GFD core library: UI-agnostic file browser logic.
//!
//! `gfd-core` owns everything that decides what is shown and what happens to
//! the file system. It knows nothing about terminals; the `gfd` binary
//! drives it with decoded [`Key`]s and renders the resulting state.
//!
//! # Modules
//!
//! - [`fs`]: [`DirectoryEntry`], directory reading, single-path mutations, collision resolution.
//! - [`nav`]: selection model, directory state, cursor memory, the [`Navigator`].
//! - [`clipboard`]: copy/move sources and paste execution.
//! - [`browser`]: the [`Browser`] application state tying navigation to file operations.
//! - [`config`]: TOML settings, keymap and theme.
//! - [`action`] / [`event`]: user-triggerable actions and decoded keys.
//! - [`error`]: unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod action;
pub mod browser;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod event;
pub mod fs;
pub mod nav;

pub use action::{Action, ActionCategory, ActionDescriptor, ActionRegistry};
pub use browser::{Browser, CreateKind, DeleteFailure, DeleteReport};
pub use clipboard::{Clipboard, ClipboardAction, PasteFailure, PasteReport};
pub use config::keymap::Keymap;
pub use config::settings::Config;
pub use config::theme::{parse_color, Theme};
pub use error::{CoreError, CoreResult};
pub use event::Key;
pub use fs::collision::resolve_collision;
pub use fs::entry::DirectoryEntry;
pub use fs::ops::{
    copy_path, create_dir, create_file, delete_path, is_valid_filename, move_path,
    read_directory, rename_entry,
};
pub use nav::controller::Navigator;
pub use nav::directory::{DirectoryState, FallbackNotice};
pub use nav::memory::{CursorMemory, CursorStore, JsonCursorStore, Position};
pub use nav::selection::Selection;
