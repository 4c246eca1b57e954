//! Nerd Font glyphs shown in front of entry names when `ui.show_icons` is on.

use gfd_core::fs::entry::DirectoryEntry;

const FOLDER: &str = "\u{f07b} ";
const FOLDER_LINK: &str = "\u{f482} ";
const FILE_LINK: &str = "\u{f481} ";
const EXECUTABLE: &str = "\u{f489} ";
const FILE: &str = "\u{f15b} ";

/// Returns the glyph (with trailing space) for `entry`.
///
/// Kind wins over extension: a symlinked `.rs` file shows the link glyph.
pub fn icon_for_entry(entry: &DirectoryEntry) -> &'static str {
    match (entry.is_dir(), entry.is_symlink()) {
        (true, true) => return FOLDER_LINK,
        (true, false) => return FOLDER,
        (false, true) => return FILE_LINK,
        (false, false) => {}
    }

    let ext = entry
        .path()
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    match icon_for_extension(ext) {
        Some(icon) => icon,
        None if entry.is_executable() => EXECUTABLE,
        None => FILE,
    }
}

/// ASCII marker used instead of a glyph when icons are off.
pub fn marker_for_entry(entry: &DirectoryEntry) -> &'static str {
    if entry.is_dir() {
        "/"
    } else if entry.is_symlink() {
        "@"
    } else if entry.is_executable() {
        "*"
    } else {
        " "
    }
}

fn icon_for_extension(ext: &str) -> Option<&'static str> {
    let icon = match ext.to_lowercase().as_str() {
        "rs" => "\u{e7a8} ",
        "py" | "pyw" | "pyi" => "\u{e73c} ",
        "js" | "mjs" | "cjs" => "\u{e74e} ",
        "ts" | "mts" | "cts" => "\u{e628} ",
        "go" => "\u{e724} ",
        "c" | "h" => "\u{e61e} ",
        "cpp" | "cc" | "cxx" | "hpp" => "\u{e61d} ",
        "sh" | "bash" | "zsh" | "fish" => "\u{f489} ",
        "toml" | "ini" | "cfg" | "conf" => "\u{e615} ",
        "yaml" | "yml" => "\u{e6a8} ",
        "json" => "\u{e60b} ",
        "md" | "markdown" => "\u{e73e} ",
        "txt" | "log" => "\u{f15c} ",
        "pdf" => "\u{f1c1} ",
        "zip" | "tar" | "gz" | "bz2" | "xz" | "7z" | "rar" => "\u{f410} ",
        "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "svg" => "\u{f1c5} ",
        "mp3" | "wav" | "flac" | "ogg" => "\u{f001} ",
        "mp4" | "mkv" | "mov" | "webm" => "\u{f03d} ",
        _ => return None,
    };
    Some(icon)
}
