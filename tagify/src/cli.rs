// tagify/src/cli.rs
//! This file defines the command-line interface (CLI) for the tagify
//! application, including all available commands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tagify_core::{DEFAULT_LINK_EXTENSIONS, DEFAULT_TEMPLATE_EXTENSIONS};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "tagify",
    version = env!("CARGO_PKG_VERSION"),
    about = "Rewrite static HTML templates into Django-style template tags",
    long_about = "tagify rewrites a tree of hand-written HTML files in place so they can be served as Django templates. The `static` command wraps relative asset references in {% static %} tags and adds {% load static %}; the `links` command replaces known page links with {% url %} tags.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all log output.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `tagify` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Converts static asset references to {% static %} template tags.
    #[command(about = "Convert static file references to {% static %} template tags.")]
    Static(StaticCommand),

    /// Rewrites internal page links to {% url %} template tags.
    #[command(about = "Update href links to {% url %} template tags.")]
    Links(LinksCommand),
}

/// Arguments for the `static` command.
#[derive(Parser, Debug)]
pub struct StaticCommand {
    /// Template file or directory containing templates.
    #[arg(value_name = "PATH", help = "Path to template file or directory containing templates.")]
    pub path: PathBuf,

    #[arg(long = "no-backup", help = "Do not create .bak backup files.")]
    pub no_backup: bool,

    #[arg(long = "no-recursive", help = "Do not process subdirectories.")]
    pub no_recursive: bool,

    /// Comma-separated list of extensions to process.
    #[arg(
        long = "extensions",
        value_name = "CSV",
        default_value = DEFAULT_TEMPLATE_EXTENSIONS,
        help = "Comma-separated list of file extensions to process."
    )]
    pub extensions: String,

    /// Path to a custom rule configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom rule configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Static rules to skip (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', help = "Disable these static rule names (comma-separated).")]
    pub disable: Vec<String>,

    #[arg(long = "dry-run", help = "Report what would change without writing any file.")]
    pub dry_run: bool,

    #[arg(long = "diff", help = "Show a unified diff for every changed file.")]
    pub diff: bool,
}

/// Arguments for the `links` command.
#[derive(Parser, Debug)]
pub struct LinksCommand {
    /// Directory containing HTML templates.
    #[arg(value_name = "DIRECTORY", help = "Directory containing HTML templates.")]
    pub directory: PathBuf,

    #[arg(
        long = "extensions",
        value_name = "CSV",
        default_value = DEFAULT_LINK_EXTENSIONS,
        help = "Comma-separated list of file extensions to process."
    )]
    pub extensions: String,

    /// Path to a custom rule configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom rule configuration file (YAML).")]
    pub config: Option<PathBuf>,

    #[arg(long = "backup", help = "Write a .bak copy of every file before changing it.")]
    pub backup: bool,

    #[arg(long = "dry-run", help = "Report what would change without writing any file.")]
    pub dry_run: bool,

    #[arg(long = "diff", help = "Show a unified diff for every changed file.")]
    pub diff: bool,
}
