//! Per-file reports printed after each file is processed.

use std::io::{self, Write};

use tagify_core::{FileOutcome, FileStatus, MARKER_RULE_NAME};

use crate::ui::output_format::{print_info_message, print_success_message, styled};
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Which command is reporting; the two modes word their lines differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStyle {
    Static,
    Links,
}

/// Prints the outcome of one file.
pub fn print_outcome<W: Write>(
    writer: &mut W,
    outcome: &FileOutcome,
    style: ReportStyle,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    let path = outcome.path.display();
    match (&outcome.status, style) {
        (FileStatus::Unchanged, ReportStyle::Static) => {
            print_info_message(writer, &format!("No changes needed for {}", path), theme_map, enable_colors)?;
            return Ok(());
        }
        (FileStatus::Unchanged, ReportStyle::Links) => {
            print_info_message(writer, &format!("No changes made to {}", path), theme_map, enable_colors)?;
            return Ok(());
        }
        (FileStatus::Updated { backup_path }, _) => {
            if let Some(backup) = backup_path {
                print_info_message(
                    writer,
                    &format!("Created backup at {}", backup.display()),
                    theme_map,
                    enable_colors,
                )?;
            }
            print_success_message(writer, &format!("Updated {}", path), theme_map, enable_colors)?;
        }
        (FileStatus::WouldUpdate, _) => {
            print_success_message(writer, &format!("Would update {}", path), theme_map, enable_colors)?;
        }
    }

    for item in &outcome.summary {
        match style {
            ReportStyle::Links => {
                let replacement = item.rewritten_texts.first().map(String::as_str).unwrap_or_default();
                writeln!(
                    writer,
                    "  - {} → {}",
                    styled(&item.rule_name, ThemeEntry::SummaryRuleName, theme_map, enable_colors),
                    replacement
                )?;
            }
            ReportStyle::Static if item.rule_name == MARKER_RULE_NAME => {
                let marker = item.rewritten_texts.first().map(String::as_str).unwrap_or_default();
                writeln!(writer, "  - inserted {}", marker)?;
            }
            ReportStyle::Static => {
                let count = format!("{} reference(s)", item.occurrences);
                writeln!(
                    writer,
                    "  - {}: {}",
                    styled(&item.rule_name, ThemeEntry::SummaryRuleName, theme_map, enable_colors),
                    styled(&count, ThemeEntry::SummaryOccurrences, theme_map, enable_colors)
                )?;
            }
        }
    }
    Ok(())
}

/// Prints a per-file failure; processing of the remaining files continues.
pub fn print_file_error<W: Write>(
    writer: &mut W,
    path: &std::path::Path,
    error: &anyhow::Error,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    writeln!(
        writer,
        "{}",
        styled(
            &format!("Error processing {}: {:#}", path.display(), error),
            ThemeEntry::Error,
            theme_map,
            enable_colors
        )
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;
    use std::path::PathBuf;
    use tagify_core::RewriteSummaryItem;

    fn outcome(status: FileStatus, summary: Vec<RewriteSummaryItem>) -> FileOutcome {
        FileOutcome {
            path: PathBuf::from("t/index.html"),
            status,
            summary,
            original: String::new(),
            rewritten: String::new(),
        }
    }

    fn render(outcome: &FileOutcome, style: ReportStyle) -> String {
        let theme = ThemeStyle::default_theme_map();
        let mut buf = Vec::new();
        print_outcome(&mut buf, outcome, style, &theme, false).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn static_update_lists_backup_marker_and_rules() {
        let summary = vec![
            RewriteSummaryItem {
                rule_name: MARKER_RULE_NAME.to_string(),
                occurrences: 1,
                original_texts: vec![],
                rewritten_texts: vec!["{% load static %}".to_string()],
            },
            RewriteSummaryItem {
                rule_name: "img_src".to_string(),
                occurrences: 2,
                original_texts: vec![],
                rewritten_texts: vec![],
            },
        ];
        let out = render(
            &outcome(FileStatus::Updated { backup_path: Some(PathBuf::from("t/index.html.bak")) }, summary),
            ReportStyle::Static,
        );
        assert_eq!(
            out,
            "Created backup at t/index.html.bak\nUpdated t/index.html\n  - inserted {% load static %}\n  - img_src: 2 reference(s)\n"
        );
    }

    #[test]
    fn links_update_lists_old_and_new() {
        let summary = vec![RewriteSummaryItem {
            rule_name: "about.html".to_string(),
            occurrences: 1,
            original_texts: vec!["about.html".to_string()],
            rewritten_texts: vec![r#"{% url "about" %}"#.to_string()],
        }];
        let out = render(&outcome(FileStatus::Updated { backup_path: None }, summary), ReportStyle::Links);
        assert_eq!(out, "Updated t/index.html\n  - about.html → {% url \"about\" %}\n");
    }

    #[test]
    fn unchanged_wording_differs_by_mode() {
        let o = outcome(FileStatus::Unchanged, vec![]);
        assert_eq!(render(&o, ReportStyle::Static), "No changes needed for t/index.html\n");
        assert_eq!(render(&o, ReportStyle::Links), "No changes made to t/index.html\n");
    }

    #[test]
    fn file_error_includes_context_chain() {
        let theme = ThemeStyle::default_theme_map();
        let err = anyhow::anyhow!("stream did not contain valid UTF-8").context("Failed to read x.html");
        let mut buf = Vec::new();
        print_file_error(&mut buf, std::path::Path::new("x.html"), &err, &theme, false).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Error processing x.html: Failed to read x.html: stream did not contain valid UTF-8\n"
        );
    }
}
