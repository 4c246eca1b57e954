//! Application configuration loaded from a TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::nav::memory::DEFAULT_CAPACITY;

/// Top-level application configuration.
///
/// All fields have sensible defaults so the browser works without a config
/// file. Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
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
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }
}

/// General browsing preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub show_hidden: bool,
    #[serde(default = "default_true")]
    pub confirm_delete: bool,
    /// Where the last directory is written on exit. `None` means
    /// `~/.tui_fm_last_dir`.
    #[serde(default)]
    pub cd_file: Option<PathBuf>,
    #[serde(default = "default_cursor_memory_capacity")]
    pub cursor_memory_capacity: usize,
    /// `tracing` level filter for the log file.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            confirm_delete: true,
            cd_file: None,
            cursor_memory_capacity: default_cursor_memory_capacity(),
            log_level: default_log_level(),
        }
    }
}

/// Display preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_icons: bool,
    /// How long the success flash after a clean paste stays up.
    #[serde(default = "default_flash_millis")]
    pub flash_millis: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_icons: true,
            flash_millis: default_flash_millis(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_cursor_memory_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_flash_millis() -> u64 {
    400
}
