//! Module for managing the application's command-line interface (CLI) theme.
//!
//! This module defines the structure for theme configuration, allowing users
//! to customize the colors of report lines, diffs and messages. It supports
//! 16-color ANSI named colors for foreground styling and can load themes from
//! YAML files.

use anyhow::{Context, Result};
use owo_colors::AnsiColors;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Type alias for the theme map, providing a consistent type definition.
pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The different logical parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    /// Section titles such as "Processing templates in ...".
    Header,
    /// Files that were updated and final success notes.
    Success,
    /// General informational lines.
    Info,
    Error,
    /// Lines added in a diff view.
    DiffAdded,
    /// Lines removed in a diff view.
    DiffRemoved,
    /// The header of a diff view.
    DiffHeader,
    /// The rule name (or old link) in a per-file summary line.
    SummaryRuleName,
    /// The occurrence count in a per-file summary line.
    SummaryOccurrences,
}

const ALL_ENTRIES: [ThemeEntry; 9] = [
    ThemeEntry::Header,
    ThemeEntry::Success,
    ThemeEntry::Info,
    ThemeEntry::Error,
    ThemeEntry::DiffAdded,
    ThemeEntry::DiffRemoved,
    ThemeEntry::DiffHeader,
    ThemeEntry::SummaryRuleName,
    ThemeEntry::SummaryOccurrences,
];

/// Represents an ANSI color that can be used in the theme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ThemeColor {
    /// A named ANSI color (e.g., "red", "brightgreen").
    Named(String),
}

/// Error type for parsing an invalid `ThemeColor` string.
#[derive(Debug, Clone)]
pub struct ParseThemeColorError;

impl fmt::Display for ParseThemeColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invalid theme color; expected one of: black, red, green, yellow, blue, \
            magenta, cyan, white, brightblack, brightred, brightgreen, brightyellow, \
            brightblue, brightmagenta, brightcyan, brightwhite."
        )
    }
}

impl std::error::Error for ParseThemeColorError {}

impl FromStr for ThemeColor {
    type Err = ParseThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "black" | "red" | "green" | "yellow" | "blue" | "magenta" | "cyan" | "white" |
            "brightblack" | "brightred" | "brightgreen" | "brightyellow" | "brightblue" |
            "brightmagenta" | "brightcyan" | "brightwhite" => Ok(ThemeColor::Named(lower)),
            _ => Err(ParseThemeColorError),
        }
    }
}

impl ThemeColor {
    /// Converts the `ThemeColor` into its `owo_colors::AnsiColors` counterpart.
    pub fn to_ansi_color(&self) -> AnsiColors {
        match self {
            ThemeColor::Named(name) => match name.to_lowercase().as_str() {
                "black" => AnsiColors::Black,
                "red" => AnsiColors::Red,
                "green" => AnsiColors::Green,
                "yellow" => AnsiColors::Yellow,
                "blue" => AnsiColors::Blue,
                "magenta" => AnsiColors::Magenta,
                "cyan" => AnsiColors::Cyan,
                "white" => AnsiColors::White,
                "brightblack" => AnsiColors::BrightBlack,
                "brightred" => AnsiColors::BrightRed,
                "brightgreen" => AnsiColors::BrightGreen,
                "brightyellow" => AnsiColors::BrightYellow,
                "brightblue" => AnsiColors::BrightBlue,
                "brightmagenta" => AnsiColors::BrightMagenta,
                "brightcyan" => AnsiColors::BrightCyan,
                "brightwhite" => AnsiColors::BrightWhite,
                _ => AnsiColors::White,
            },
        }
    }
}

/// Represents the style configuration for a specific `ThemeEntry`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeStyle {
    /// An optional `ThemeColor` to apply as the foreground color.
    pub fg: Option<ThemeColor>,
}

/// Loads a theme configuration from a YAML file or returns the default theme.
pub fn build_theme_map(theme_path: Option<&PathBuf>) -> Result<ThemeMap> {
    match theme_path {
        Some(path) => ThemeStyle::load_from_file(path),
        None => Ok(ThemeStyle::default_theme_map()),
    }
}

fn named(color: &str) -> ThemeStyle {
    ThemeStyle { fg: Some(ThemeColor::Named(color.to_string())) }
}

impl ThemeStyle {
    /// Loads a theme from disk; entries it does not mention keep their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ThemeMap> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file {}", path.display()))?;
        let custom: ThemeMap = serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse theme file {}", path.display()))?;

        let mut theme = Self::default_theme_map();
        theme.extend(custom);
        Ok(theme)
    }

    /// Returns a default theme map with predefined color mappings.
    pub fn default_theme_map() -> ThemeMap {
        let mut default_theme = HashMap::new();
        default_theme.insert(ThemeEntry::Header, named("cyan"));
        default_theme.insert(ThemeEntry::Success, named("green"));
        default_theme.insert(ThemeEntry::Error, named("red"));
        default_theme.insert(ThemeEntry::DiffAdded, named("green"));
        default_theme.insert(ThemeEntry::DiffRemoved, named("red"));
        default_theme.insert(ThemeEntry::DiffHeader, named("yellow"));
        default_theme.insert(ThemeEntry::SummaryRuleName, named("brightblue"));
        default_theme.insert(ThemeEntry::SummaryOccurrences, named("brightmagenta"));

        for entry in ALL_ENTRIES {
            default_theme.entry(entry).or_insert_with(|| named("white"));
        }
        default_theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parse_named_colors() {
        assert!("red".parse::<ThemeColor>().is_ok());
        assert!("BrightGreen".parse::<ThemeColor>().is_ok());
        assert!("unknown".parse::<ThemeColor>().is_err());
    }

    #[test]
    fn to_ansi_color_roundtrip() {
        let tc: ThemeColor = "blue".parse().unwrap();
        assert_eq!(tc.to_ansi_color(), AnsiColors::Blue);
        let tc: ThemeColor = "brightmagenta".parse().unwrap();
        assert_eq!(tc.to_ansi_color(), AnsiColors::BrightMagenta);
    }

    #[test]
    fn default_theme_covers_every_entry() {
        let theme = ThemeStyle::default_theme_map();
        for entry in ALL_ENTRIES {
            assert!(theme.contains_key(&entry), "missing {entry:?}");
        }
    }

    #[test]
    fn theme_file_overrides_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "success:\n  fg: magenta").unwrap();
        let theme = ThemeStyle::load_from_file(file.path()).unwrap();
        assert_eq!(theme[&ThemeEntry::Success], named("magenta"));
        assert_eq!(theme[&ThemeEntry::Error], named("red"));
    }
}
