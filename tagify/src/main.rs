// tagify/src/main.rs
//! tagify entry point.
//!
//! Parses the command line, sets up logging and the theme, and hands the
//! subcommand to `commands::dispatch`. Any command-level failure is printed as
//! `Error: ...` on stderr and exits with status 1.

use clap::Parser;
use log::{info, LevelFilter};
use std::process;

use tagify::cli::Cli;
use tagify::commands::{self, error_msg};
use tagify::logger;
use tagify::ui::theme::{build_theme_map, ThemeStyle};

fn main() {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);
    info!("tagify started. Version: {}", env!("CARGO_PKG_VERSION"));

    let theme_map = match build_theme_map(cli.theme.as_ref()) {
        Ok(theme) => theme,
        Err(e) => {
            let fallback = ThemeStyle::default_theme_map();
            error_msg(format!("{:#}", e), &fallback);
            process::exit(1);
        }
    };

    if let Err(e) = commands::dispatch(cli.command, &theme_map) {
        error_msg(format!("{:#}", e), &theme_map);
        process::exit(1);
    }
    info!("tagify finished.");
}
