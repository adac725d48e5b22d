//! Themed message helpers shared by the commands.
//!
//! Every function takes the writer and a `enable_colors` flag so callers can
//! decide from `is_terminal` and tests can capture plain text.

use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Applies the theme color for `entry` to `text` when colors are enabled.
pub fn styled(text: &str, entry: ThemeEntry, theme_map: &ThemeMap, enable_colors: bool) -> String {
    if !enable_colors {
        return text.to_string();
    }
    match theme_map.get(&entry).and_then(|style| style.fg.as_ref()) {
        Some(color) => text.color(color.to_ansi_color()).to_string(),
        None => text.to_string(),
    }
}

/// Writes one themed line.
pub fn print_message<W: Write>(
    writer: &mut W,
    message: &str,
    entry: ThemeEntry,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", styled(message, entry, theme_map, enable_colors))
}

pub fn print_info_message<W: Write>(writer: &mut W, message: &str, theme_map: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, message, ThemeEntry::Info, theme_map, enable_colors)
}

pub fn print_success_message<W: Write>(writer: &mut W, message: &str, theme_map: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, message, ThemeEntry::Success, theme_map, enable_colors)
}

/// Writes `Error: <message>`.
pub fn print_error_message<W: Write>(writer: &mut W, message: &str, theme_map: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, &format!("Error: {}", message), ThemeEntry::Error, theme_map, enable_colors)
}
