//! Unified diff preview for `--diff`.
//!
//! Highlights removed lines in the `diff_removed` color and added lines in
//! the `diff_added` color.

use anyhow::Result;
use diffy::{create_patch, Line as DiffLine};
use std::io::Write;

use crate::ui::output_format::styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Writes a diff of `original` → `rewritten` under a `--- label` header.
pub fn print_diff<W: Write>(
    label: &str,
    original: &str,
    rewritten: &str,
    writer: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    let patch = create_patch(original, rewritten);
    writeln!(
        writer,
        "{}",
        styled(&format!("--- Diff: {} ---", label), ThemeEntry::DiffHeader, theme_map, enable_colors)
    )?;

    let mut any_change = false;
    for hunk in patch.hunks() {
        writeln!(writer, "{}", styled("@@", ThemeEntry::DiffHeader, theme_map, enable_colors))?;
        for line_change in hunk.lines() {
            let (prefix, text, entry) = match line_change {
                DiffLine::Delete(s) => ("-", *s, Some(ThemeEntry::DiffRemoved)),
                DiffLine::Insert(s) => ("+", *s, Some(ThemeEntry::DiffAdded)),
                DiffLine::Context(s) => (" ", *s, None),
            };
            any_change |= entry.is_some();
            let line = format!("{}{}", prefix, text.trim_end_matches('\n'));
            match entry {
                Some(entry) => writeln!(writer, "{}", styled(&line, entry, theme_map, enable_colors))?,
                None => writeln!(writer, "{}", line)?,
            }
        }
    }

    if !any_change {
        writeln!(writer, "No changes detected.")?;
    }
    writeln!(writer, "{}", styled("--- End Diff ---", ThemeEntry::DiffHeader, theme_map, enable_colors))?;
    Ok(())
}
