//! `tagify static`: wrap relative asset references in `{% static %}` tags.

use anyhow::Result;
use log::info;
use std::io::Write;
use std::path::Path;

use tagify_core::{
    create_engine, find_template_files, parse_extensions, process_file, EngineKind, FileOutcome,
    ProcessOptions, RewriteEngine, TagifyError,
};

use crate::cli::StaticCommand;
use crate::commands::{load_config, maybe_print_diff};
use crate::ui::output_format::{print_info_message, print_message, print_success_message};
use crate::ui::report::{print_file_error, print_outcome, ReportStyle};
use crate::ui::theme::{ThemeEntry, ThemeMap};

pub fn run_static<W: Write>(
    opts: &StaticCommand,
    out: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    let config = load_config(opts.config.as_deref(), &opts.disable)?;
    let engine = create_engine(EngineKind::Static, config)?;
    let options = ProcessOptions { backup: !opts.no_backup, dry_run: opts.dry_run };

    if opts.path.is_file() {
        info!("Converting single template {}", opts.path.display());
        let changed = convert_one(engine.as_ref(), &opts.path, &options, opts.diff, out, theme_map, enable_colors)?
            .is_some_and(|o| o.is_changed());
        let closing = match (changed, opts.dry_run) {
            (true, false) => "Successfully updated 1 file.",
            (true, true) => "1 file would be updated.",
            (false, _) => "No changes were needed for the file.",
        };
        writeln!(out)?;
        print_success_message(out, closing, theme_map, enable_colors)?;
        return Ok(());
    }

    if !opts.path.is_dir() {
        return Err(TagifyError::InvalidPath(opts.path.clone(), "file or directory").into());
    }

    print_message(
        out,
        &format!("Processing templates in {}...", opts.path.display()),
        ThemeEntry::Header,
        theme_map,
        enable_colors,
    )?;

    let extensions = parse_extensions(&opts.extensions);
    let files = find_template_files(&opts.path, &extensions, !opts.no_recursive);
    let mut updated = 0usize;
    for file in &files {
        let outcome = convert_one(engine.as_ref(), file, &options, opts.diff, out, theme_map, enable_colors)?;
        if outcome.is_some_and(|o| o.is_changed()) {
            updated += 1;
        }
    }
    info!("Static conversion finished: {} of {} file(s) changed", updated, files.len());

    writeln!(out)?;
    print_info_message(out, &format!("Processed {} template files.", files.len()), theme_map, enable_colors)?;
    let tally = if opts.dry_run {
        format!("{} files would be updated with static references.", updated)
    } else {
        format!("Updated {} files with static references.", updated)
    };
    print_info_message(out, &tally, theme_map, enable_colors)?;

    if updated == 0 {
        writeln!(out)?;
        print_info_message(out, "No files needed updates.", theme_map, enable_colors)?;
    } else if !opts.dry_run {
        writeln!(out)?;
        print_success_message(
            out,
            "Successfully converted static references to Django's static template tags!",
            theme_map,
            enable_colors,
        )?;
        if options.backup {
            print_info_message(
                out,
                "Backup files with .bak extension were created for modified files.",
                theme_map,
                enable_colors,
            )?;
        }
    }
    Ok(())
}

/// Processes one file and prints its report. A per-file failure is reported
/// and yields `None`; only a broken output stream is returned as an error.
fn convert_one<W: Write>(
    engine: &dyn RewriteEngine,
    path: &Path,
    options: &ProcessOptions,
    show_diff: bool,
    out: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> Result<Option<FileOutcome>> {
    match process_file(engine, path, options) {
        Ok(outcome) => {
            print_outcome(out, &outcome, ReportStyle::Static, theme_map, enable_colors)?;
            maybe_print_diff(show_diff, &outcome, out, theme_map, enable_colors)?;
            Ok(Some(outcome))
        }
        Err(e) => {
            print_file_error(out, path, &e, theme_map, enable_colors)?;
            Ok(None)
        }
    }
}
