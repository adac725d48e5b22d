// tagify-core/src/lib.rs
//! # tagify Core Library
//!
//! `tagify-core` turns hand-written static HTML into Django-style templates.
//! It owns the rule tables, compiles them, and applies them through a
//! pluggable `RewriteEngine` trait:
//!
//! * the static engine wraps relative asset paths (`<link href>`, `<script
//!   src>`, `<img src>`, inline `url(...)`, media, documents, favicons) in
//!   `{% static '...' %}` and makes sure `{% load static %}` is present;
//! * the link engine replaces known page links with `{% url "name" %}`.
//!
//! The library does no terminal output. File discovery and the per-file
//! read → rewrite → backup → write cycle live in `walker` and `processor`.
//!
//! ## Modules
//!
//! * `config`: `TagifyConfig`, `StaticRule`, `LinkRule`, loading and merging.
//! * `rules`: compilation and caching of rules.
//! * `engine`: the `RewriteEngine` trait and `create_engine`.
//! * `engines`: `StaticAssetEngine` and `LinkEngine`.
//! * `walker`: extension-filtered directory traversal.
//! * `processor`: per-file processing with optional backups and dry runs.
//! * `headless`: one-shot string rewriting.
//! * `errors`: the `TagifyError` enum.
//!
//! ## Usage Example
//!
//! ```rust
//! use tagify_core::{headless_rewrite_string, EngineKind, TagifyConfig};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let config = TagifyConfig::load_default_rules()?;
//!     let out = headless_rewrite_string(config, "<img src=\"photo.jpg\">", EngineKind::Static)?;
//!     assert_eq!(out, "{% load static %}\n<img src=\"{% static 'photo.jpg' %}\">");
//!     Ok(())
//! }
//! ```
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod processor;
pub mod rules;
pub mod walker;

/// Re-exports the public configuration types and functions for managing rules.
pub use config::{
    merge_rules,
    LinkRule,
    RewriteStrategy,
    RewriteSummaryItem,
    StaticRule,
    TagifyConfig,
    DEFAULT_MARKER,
    MAX_PATTERN_LENGTH,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::TagifyError;

/// Re-exports the engine trait and its concrete implementations.
pub use engine::{create_engine, EngineKind, Rewrite, RewriteEngine};
pub use engines::link_engine::LinkEngine;
pub use engines::static_engine::{insert_marker, StaticAssetEngine, MARKER_RULE_NAME};

pub use headless::headless_rewrite_string;
pub use processor::{backup_path_for, process_file, FileOutcome, FileStatus, ProcessOptions};
pub use rules::compiler::{compile_rules, get_or_compile_rules, CompiledRules};
pub use walker::{
    find_template_files,
    parse_extensions,
    DEFAULT_LINK_EXTENSIONS,
    DEFAULT_TEMPLATE_EXTENSIONS,
};
