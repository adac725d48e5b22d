//! Terminal presentation: theme, message helpers, per-file reports, diffs.

pub mod diff_viewer;
pub mod output_format;
pub mod report;
pub mod theme;
