//! `tagify links`: replace known page links with `{% url %}` tags.

use anyhow::Result;
use log::info;
use std::io::Write;

use tagify_core::{
    create_engine, find_template_files, parse_extensions, process_file, EngineKind, ProcessOptions,
    TagifyError,
};

use crate::cli::LinksCommand;
use crate::commands::{load_config, maybe_print_diff};
use crate::ui::output_format::{print_info_message, print_message, print_success_message};
use crate::ui::report::{print_file_error, print_outcome, ReportStyle};
use crate::ui::theme::{ThemeEntry, ThemeMap};

pub fn run_links<W: Write>(
    opts: &LinksCommand,
    out: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    if !opts.directory.is_dir() {
        return Err(TagifyError::InvalidPath(opts.directory.clone(), "directory").into());
    }

    let config = load_config(opts.config.as_deref(), &[])?;
    let engine = create_engine(EngineKind::Links, config)?;
    let options = ProcessOptions { backup: opts.backup, dry_run: opts.dry_run };

    let extensions = parse_extensions(&opts.extensions);
    let files = find_template_files(&opts.directory, &extensions, true);
    print_message(
        out,
        &format!("Found {} HTML file(s) in {}", files.len(), opts.directory.display()),
        ThemeEntry::Header,
        theme_map,
        enable_colors,
    )?;

    let mut updated = 0usize;
    for file in &files {
        match process_file(engine.as_ref(), file, &options) {
            Ok(outcome) => {
                if outcome.is_changed() {
                    updated += 1;
                }
                print_outcome(out, &outcome, ReportStyle::Links, theme_map, enable_colors)?;
                maybe_print_diff(opts.diff, &outcome, out, theme_map, enable_colors)?;
            }
            Err(e) => print_file_error(out, file, &e, theme_map, enable_colors)?,
        }
    }
    info!("Link rewrite finished: {} of {} file(s) changed", updated, files.len());

    writeln!(out)?;
    print_success_message(out, "URL replacement complete!", theme_map, enable_colors)?;
    print_info_message(
        out,
        "Note: Some URLs may still need manual review, especially for dynamic URLs with parameters.",
        theme_map,
        enable_colors,
    )?;
    Ok(())
}
