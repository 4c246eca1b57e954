//! External opener handoff.
//!
//! Files are opened in a terminal editor when one is configured
//! (`GFD_EDITOR`, then `EDITOR`, then `micro` if installed), with the TUI
//! suspended for the duration. Otherwise the platform opener is launched
//! detached and the TUI keeps running.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gfd_core::error::{CoreError, CoreResult};
use ratatui::{backend::CrosstermBackend, Terminal};

pub type Tui = Terminal<CrosstermBackend<io::Stdout>>;

const FALLBACK_EDITOR: &str = "micro";

/// Suspends the TUI while alive; the alternate screen and raw mode come back
/// on drop, whichever way the child process ended.
pub struct TerminalGuard<'a> {
    terminal: &'a mut Tui,
}

impl<'a> TerminalGuard<'a> {
    pub fn suspend(terminal: &'a mut Tui) -> io::Result<Self> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        let resumed = execute!(self.terminal.backend_mut(), EnterAlternateScreen)
            .and_then(|_| enable_raw_mode())
            .and_then(|_| self.terminal.hide_cursor())
            .and_then(|_| self.terminal.clear());
        if let Err(e) = resumed {
            tracing::error!("failed to resume terminal: {e}");
        }
    }
}

/// Picks the editor command line: `GFD_EDITOR`, then `EDITOR` (split on
/// whitespace; the program must be found on `path_var`), then `micro`.
pub fn resolve_editor(
    gfd_editor: Option<String>,
    editor: Option<String>,
    path_var: Option<OsString>,
) -> Option<Vec<String>> {
    let configured = gfd_editor
        .filter(|s| !s.trim().is_empty())
        .or_else(|| editor.filter(|s| !s.trim().is_empty()));

    if let Some(cmd) = configured {
        let parts: Vec<String> = cmd.split_whitespace().map(str::to_string).collect();
        if parts
            .first()
            .is_some_and(|program| find_program(program, path_var.as_ref()).is_some())
        {
            return Some(parts);
        }
        tracing::debug!(%cmd, "configured editor not found on PATH");
    }

    find_program(FALLBACK_EDITOR, path_var.as_ref()).map(|_| vec![FALLBACK_EDITOR.to_string()])
}

/// Locates `program` on `path_var`. Names containing a separator are checked
/// as given.
fn find_program(program: &str, path_var: Option<&OsString>) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    std::env::split_paths(path_var?)
        .map(|dir| dir.join(program))
        .find(|p| p.is_file())
}

/// Opens `path` with the editor or the platform opener.
///
/// # Errors
///
/// [`CoreError::OpenFailed`] if the program cannot be launched or the editor
/// exits unsuccessfully.
pub fn open_path(terminal: &mut Tui, path: &Path) -> CoreResult<()> {
    let editor = resolve_editor(
        std::env::var("GFD_EDITOR").ok(),
        std::env::var("EDITOR").ok(),
        std::env::var_os("PATH"),
    );

    match editor {
        Some(cmd) => run_editor(terminal, &cmd, path),
        None => {
            tracing::info!(path = %path.display(), "opening with platform opener");
            open::that_detached(path).map_err(|e| open_failed(path, e.to_string()))
        }
    }
}

fn run_editor(terminal: &mut Tui, cmd: &[String], path: &Path) -> CoreResult<()> {
    let Some((program, args)) = cmd.split_first() else {
        return Err(open_failed(path, "empty editor command".to_string()));
    };
    tracing::info!(%program, path = %path.display(), "launching editor");

    let status = {
        let _guard = TerminalGuard::suspend(terminal).map_err(|e| open_failed(path, e.to_string()))?;
        std::process::Command::new(program).args(args).arg(path).status()
    };

    match status {
        Ok(s) if s.success() => Ok(()),
        Ok(s) => Err(open_failed(path, format!("{program} exited with {s}"))),
        Err(e) => Err(open_failed(path, format!("failed to launch {program}: {e}"))),
    }
}

fn open_failed(path: &Path, reason: String) -> CoreError {
    CoreError::OpenFailed {
        path: path.to_path_buf(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn bin_dir(programs: &[&str]) -> (TempDir, OsString) {
        let tmp = TempDir::new().unwrap();
        for name in programs {
            fs::write(tmp.path().join(name), "#!/bin/sh\n").unwrap();
        }
        let path_var = tmp.path().as_os_str().to_os_string();
        (tmp, path_var)
    }

    #[test]
    fn gfd_editor_wins_over_editor() {
        let (_tmp, path) = bin_dir(&["hx", "vim"]);
        let cmd = resolve_editor(Some("hx".into()), Some("vim".into()), Some(path));
        assert_eq!(cmd, Some(vec!["hx".to_string()]));
    }

    #[test]
    fn editor_with_arguments_is_split() {
        let (_tmp, path) = bin_dir(&["code"]);
        let cmd = resolve_editor(None, Some("code --wait".into()), Some(path));
        assert_eq!(cmd, Some(vec!["code".to_string(), "--wait".to_string()]));
    }

    #[test]
    fn missing_editor_falls_back_to_micro() {
        let (_tmp, path) = bin_dir(&["micro"]);
        let cmd = resolve_editor(Some("nonexistent-editor".into()), None, Some(path));
        assert_eq!(cmd, Some(vec!["micro".to_string()]));
    }

    #[test]
    fn blank_variables_are_ignored() {
        let (_tmp, path) = bin_dir(&["vim"]);
        let cmd = resolve_editor(Some("  ".into()), Some("vim".into()), Some(path));
        assert_eq!(cmd, Some(vec!["vim".to_string()]));
    }

    #[test]
    fn nothing_found_uses_platform_opener() {
        let (_tmp, path) = bin_dir(&[]);
        assert_eq!(resolve_editor(None, Some("vim".into()), Some(path)), None);
        assert_eq!(resolve_editor(None, None, None), None);
    }

    #[test]
    fn editor_given_as_path_is_checked_directly() {
        let (tmp, _path) = bin_dir(&["myedit"]);
        let full = tmp.path().join("myedit").display().to_string();
        let cmd = resolve_editor(Some(full.clone()), None, None);
        assert_eq!(cmd, Some(vec![full]));
    }
}
