//! GFD — a terminal file browser built with ratatui.
//!
//! This binary initialises the terminal, runs the main event loop,
//! and restores the terminal on exit or panic.

mod app;
mod icons;
mod input;
mod last_dir;
mod opener;
mod render;
mod ui;

use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gfd_core::browser::Browser;
use gfd_core::config::keymap::Keymap;
use gfd_core::config::settings::Config;
use gfd_core::config::theme::Theme;
use gfd_core::nav::controller::Navigator;
use gfd_core::nav::memory::{CursorStore, JsonCursorStore};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{config_dir, config_or_default, home_dir, App, Effect, StatusKind};
use crate::input::{decode_key, handle_key};
use crate::last_dir::LastDirFile;
use crate::opener::Tui;
use crate::render::{page_size, render};

const CURSOR_STORE_FILE: &str = "cursor_memory.json";

#[derive(Debug, Parser)]
#[command(name = "gfd", version, about = "Terminal file browser")]
struct Args {
    /// Directory to start in (defaults to the current directory)
    start_dir: Option<PathBuf>,

    /// File that receives the final directory on exit
    #[arg(long, value_name = "FILE")]
    cd_file: Option<PathBuf>,

    /// Directory holding config.toml, keymap.toml and theme.toml
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,
}

fn setup_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Logs go to a file (`GFD_LOG` or `$TMPDIR/gfd.log`) so they never
/// interfere with the terminal. An unopenable log file disables logging.
fn init_logging(level: &str) {
    let path = std::env::var_os("GFD_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("gfd.log"));
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("gfd: logging disabled, cannot open {}: {e}", path.display());
            return;
        }
    };
    let level = level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO);

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let cfg_dir = args.config_dir.clone().unwrap_or_else(config_dir);
    let config_path = cfg_dir.join("config.toml");
    let (config, config_warning) = config_or_default(&config_path, Config::load(&config_path));
    init_logging(&config.general.log_level);

    let keymap_path = cfg_dir.join("keymap.toml");
    let (keymap, keymap_warning) = config_or_default(&keymap_path, Keymap::load(&keymap_path));
    let theme_path = cfg_dir.join("theme.toml");
    let (theme, theme_warning) = config_or_default(&theme_path, Theme::load(&theme_path));

    let warnings: Vec<String> = [config_warning, keymap_warning, theme_warning]
        .into_iter()
        .flatten()
        .collect();
    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    let start_dir = match args.start_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let last_dir = args
        .cd_file
        .or_else(|| config.general.cd_file.clone())
        .map(LastDirFile::new)
        .unwrap_or_else(|| LastDirFile::default_in(&home_dir()));
    let store = JsonCursorStore::new(home_dir().join(".config").join("gfd").join(CURSOR_STORE_FILE));
    let flash = Duration::from_millis(config.ui.flash_millis);

    tracing::info!(
        start = %start_dir.display(),
        config = %cfg_dir.display(),
        last_dir = %last_dir.path().display(),
        "gfd starting"
    );

    install_panic_hook();

    let mut terminal = setup_terminal()?;

    let memory = store
        .load()
        .with_capacity(config.general.cursor_memory_capacity);
    tracing::debug!(
        entries = memory.len(),
        capacity = memory.capacity(),
        "cursor memory loaded"
    );
    let height = terminal.size().map(|s| s.height).unwrap_or(24);
    let navigator = Navigator::open(
        &start_dir,
        config.general.show_hidden,
        memory,
        page_size(height),
    );
    let initial_dir = navigator.current_dir().to_path_buf();
    let app = App::new(Browser::new(navigator), &config, keymap, theme);
    // A fallback notice from opening the start directory takes precedence.
    let app = match warnings.first() {
        Some(warning) if app.status().is_none() => {
            app.with_status(warning.clone(), StatusKind::Error)
        }
        _ => app,
    };

    let result = run_app(&mut terminal, app, flash);

    restore_terminal(&mut terminal)?;

    let app = match result {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("event loop failed: {e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    shutdown(&app, &store, &last_dir, &initial_dir);
    Ok(())
}

/// Persists cursor memory and the last directory after a clean exit.
fn shutdown(app: &App, store: &impl CursorStore, last_dir: &LastDirFile, initial_dir: &Path) {
    let navigator = app.navigator();
    store.save(&navigator.memory_snapshot());
    last_dir.write_if_changed(initial_dir, navigator.current_dir());
    tracing::info!(dir = %navigator.current_dir().display(), "gfd exiting");
}

/// One key event is fully processed and drawn before the next is read.
fn run_app(terminal: &mut Tui, app: App, flash: Duration) -> anyhow::Result<App> {
    let mut app = app;

    loop {
        let height = terminal.size()?.height;
        app = app.with_page_size(page_size(height));
        terminal.draw(|f| render(f, &app))?;

        if app.should_quit() {
            return Ok(app);
        }

        let Event::Key(key_event) = event::read()? else {
            // Resize and other events just trigger a redraw.
            continue;
        };
        if key_event.kind != KeyEventKind::Press {
            continue;
        }
        let Some(key) = decode_key(key_event) else {
            continue;
        };

        let action = handle_key(key, app.mode(), app.keymap());
        let (next, effect) = app.apply(action);
        app = next;

        match effect {
            Some(Effect::Open(path)) => {
                let result = opener::open_path(terminal, &path);
                app = app.with_open_result(&path, result);
            }
            Some(Effect::Flash) => {
                terminal.draw(|f| render(f, &app))?;
                std::thread::sleep(flash);
                app = app.with_clear_status();
            }
            None => {}
        }
    }
}
