//! Command implementations and their shared plumbing.

pub mod links;
pub mod static_refs;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::debug;
use std::io::{self, Write};
use std::path::Path;

use tagify_core::{merge_rules, FileOutcome, TagifyConfig};

use crate::cli::Commands;
use crate::ui::diff_viewer;
use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Runs the parsed subcommand, writing its report to stdout.
pub fn dispatch(command: Commands, theme_map: &ThemeMap) -> Result<()> {
    let stdout = io::stdout();
    let enable_colors = stdout.is_terminal();
    let mut out = stdout.lock();
    match command {
        Commands::Static(opts) => static_refs::run_static(&opts, &mut out, theme_map, enable_colors),
        Commands::Links(opts) => links::run_links(&opts, &mut out, theme_map, enable_colors),
    }
}

/// Builds the effective rule set: defaults, then the user file, then `disable`.
pub fn load_config(config_path: Option<&Path>, disable: &[String]) -> Result<TagifyConfig> {
    let defaults = TagifyConfig::load_default_rules()?;
    let user = match config_path {
        Some(path) => Some(
            TagifyConfig::load_from_file(path)
                .with_context(|| format!("Failed to load rules from {}", path.display()))?,
        ),
        None => None,
    };
    let mut config = merge_rules(defaults, user);
    if !disable.is_empty() {
        config.set_active_rules(disable);
    }
    debug!(
        "Effective rules: {} link(s), {} static rule(s).",
        config.links.len(),
        config.static_rules.len()
    );
    Ok(config)
}

/// Prints the diff of a changed outcome when `--diff` was given.
pub(crate) fn maybe_print_diff<W: Write>(
    show_diff: bool,
    outcome: &FileOutcome,
    out: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    if show_diff && outcome.is_changed() {
        let label = outcome.path.display().to_string();
        diff_viewer::print_diff(&label, &outcome.original, &outcome.rewritten, out, theme_map, enable_colors)?;
    }
    Ok(())
}
