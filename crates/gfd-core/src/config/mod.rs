//! Configuration management.
//!
//! User preferences ([`settings::Config`]), key bindings ([`keymap::Keymap`])
//! and colors ([`theme::Theme`]) are stored as TOML files and loaded at
//! startup. Every file is optional; missing ones fall back to defaults.

pub mod keymap;
pub mod settings;
pub mod theme;
