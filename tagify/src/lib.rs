// tagify/src/lib.rs
//! # tagify CLI Application
//!
//! Command-line front end for `tagify-core`: argument parsing, logging,
//! themed terminal output and the `static` / `links` commands.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;

pub use commands::dispatch;
