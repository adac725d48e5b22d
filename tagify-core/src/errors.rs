//! errors.rs - Custom error types for the tagify-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use std::path::PathBuf;
use thiserror::Error;

/// This enum represents all possible error types in the `tagify-core` library.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TagifyError {
    #[error("Failed to compile static rule '{0}': {1}")]
    RuleCompilationError(String, fancy_regex::Error),

    #[error("Failed to compile link rule for '{0}': {1}")]
    LinkPatternError(String, regex::Error),

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Rule '{0}' failed while matching: {1}")]
    RuleExecutionError(String, fancy_regex::Error),

    #[error("{path} is not a valid {kind}", path = .0.display(), kind = .1)]
    InvalidPath(PathBuf, &'static str),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
