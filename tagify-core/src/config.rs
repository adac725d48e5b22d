//! Configuration management for `tagify-core`.
//!
//! This module defines the rule tables used by both rewrite modes: the literal
//! link table for `tagify links` and the classified static-asset rules for
//! `tagify static`. It handles YAML (de)serialization and provides utilities
//! for loading, merging, filtering and validating these configs.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use fancy_regex::{Expander, Regex as FancyRegex};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Maximum allowed length for a static rule pattern string.
pub const MAX_PATTERN_LENGTH: usize = 1000;

/// Directive inserted at the top of every converted template.
pub const DEFAULT_MARKER: &str = "{% load static %}";

/// How a static rule turns a match into its replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteStrategy {
    /// Every occurrence of the capture text inside the whole match is replaced
    /// by the expanded `replace_with`; the rest of the tag is kept as is.
    #[default]
    InPlace,
    /// The whole match is replaced by the expanded `replace_with`.
    Substitute,
}

/// A single classified static-asset rule, keyed by HTML construct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticRule {
    /// Unique identifier for the rule (e.g., "img_src").
    pub name: String,
    /// Human-readable description of what the rule targets.
    pub description: Option<String>,
    /// The regex pattern string. Lookaround is allowed.
    pub pattern: Option<String>,
    /// Index of the group holding the asset path.
    pub capture_group: usize,
    /// Replacement template; `$N` expands to the text of group N.
    pub replace_with: String,
    pub strategy: RewriteStrategy,
    pub case_insensitive: bool,
}

impl Default for StaticRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            pattern: None,
            capture_group: 1,
            replace_with: "{% static '$1' %}".to_string(),
            strategy: RewriteStrategy::InPlace,
            case_insensitive: false,
        }
    }
}

/// An exact href rewrite: `href="<href>"` becomes `href="<replace_with>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct LinkRule {
    pub href: String,
    pub replace_with: String,
}

/// Top-level configuration structure for tagify.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TagifyConfig {
    /// Idempotency marker inserted by the static converter. `None` in a user
    /// file means "keep the default".
    pub marker: Option<String>,
    /// Ordered link table.
    pub links: Vec<LinkRule>,
    /// Ordered static-asset rules.
    pub static_rules: Vec<StaticRule>,
}

/// Represents a single item in the per-file change summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteSummaryItem {
    pub rule_name: String,
    pub occurrences: usize,
    pub original_texts: Vec<String>,
    pub rewritten_texts: Vec<String>,
}

impl TagifyConfig {
    /// Loads rules from a YAML file and validates them.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: TagifyConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_config(&config)?;
        info!(
            "Loaded {} link rule(s) and {} static rule(s) from file {}.",
            config.links.len(),
            config.static_rules.len(),
            path.display()
        );

        Ok(config)
    }

    /// Loads the built-in rule table from the embedded configuration.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config: TagifyConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default rules")?;

        debug!(
            "Loaded {} default link rule(s) and {} default static rule(s).",
            config.links.len(),
            config.static_rules.len()
        );
        Ok(config)
    }

    /// The marker to insert, falling back to `{% load static %}`.
    pub fn marker(&self) -> &str {
        self.marker.as_deref().unwrap_or(DEFAULT_MARKER)
    }

    /// Drops the named static rules, warning about names that do not exist.
    pub fn set_active_rules(&mut self, disable_rules: &[String]) {
        let disable_set: HashSet<&str> = disable_rules.iter().map(String::as_str).collect();
        let all_rule_names: HashSet<&str> =
            self.static_rules.iter().map(|r| r.name.as_str()).collect();

        for rule_name in disable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `disable_rules` list does not exist.", rule_name);
        }

        debug!("Initial static rules count before filtering: {}", self.static_rules.len());
        self.static_rules
            .retain(|rule| !disable_set.contains(rule.name.as_str()));
        debug!("Final active static rules count after filtering: {}", self.static_rules.len());
    }
}

/// Merges a user configuration over the defaults.
///
/// Rules with the same key (`href` for links, `name` for static rules) are
/// replaced where they stand; unknown keys are appended, so declared order is
/// kept.
pub fn merge_rules(default_config: TagifyConfig, user_config: Option<TagifyConfig>) -> TagifyConfig {
    let Some(user_cfg) = user_config else {
        debug!("merge_rules called without a user config.");
        return default_config;
    };

    debug!(
        "Merging {} user link rule(s) and {} user static rule(s).",
        user_cfg.links.len(),
        user_cfg.static_rules.len()
    );

    let mut links = default_config.links;
    for user_rule in user_cfg.links {
        match links.iter_mut().find(|r| r.href == user_rule.href) {
            Some(existing) => *existing = user_rule,
            None => links.push(user_rule),
        }
    }

    let mut static_rules = default_config.static_rules;
    for user_rule in user_cfg.static_rules {
        match static_rules.iter_mut().find(|r| r.name == user_rule.name) {
            Some(existing) => *existing = user_rule,
            None => static_rules.push(user_rule),
        }
    }

    let marker = user_cfg.marker.or(default_config.marker);
    debug!(
        "Final rules after merge: {} link(s), {} static rule(s).",
        links.len(),
        static_rules.len()
    );

    TagifyConfig { marker, links, static_rules }
}

/// Validates rule integrity (names, regex compilation, capture groups).
fn validate_config(config: &TagifyConfig) -> Result<()> {
    let mut errors = Vec::new();

    if let Some(marker) = &config.marker {
        if marker.trim().is_empty() {
            errors.push("The `marker` field is empty.".to_string());
        }
    }

    let mut hrefs = HashSet::new();
    for link in &config.links {
        if link.href.is_empty() {
            errors.push("A link rule has an empty `href` field.".to_string());
        } else if !hrefs.insert(link.href.as_str()) {
            errors.push(format!("Duplicate link href found: '{}'.", link.href));
        }
    }

    let mut rule_names = HashSet::new();
    for rule in &config.static_rules {
        if rule.name.is_empty() {
            errors.push("A static rule has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.as_str()) {
            errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
        }

        let pattern = match &rule.pattern {
            Some(p) if !p.is_empty() => p,
            _ => {
                errors.push(format!("Rule '{}' is missing the `pattern` field.", rule.name));
                continue;
            }
        };

        if pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Rule '{}': pattern length ({}) exceeds maximum allowed ({}).",
                rule.name,
                pattern.len(),
                MAX_PATTERN_LENGTH
            ));
            continue;
        }

        let regex = match FancyRegex::new(pattern) {
            Ok(regex) => regex,
            Err(e) => {
                errors.push(format!("Rule '{}' has an invalid regex pattern: {}", rule.name, e));
                continue;
            }
        };

        // captures_len counts the implicit whole-match group.
        let group_count = regex.captures_len().saturating_sub(1);
        if rule.capture_group == 0 || rule.capture_group > group_count {
            errors.push(format!(
                "Rule '{}': `capture_group` {} does not exist (pattern has {} group(s)).",
                rule.name, rule.capture_group, group_count
            ));
        }

        if let Err(e) = Expander::default().check(&rule.replace_with, &regex) {
            errors.push(format!(
                "Rule '{}': `replace_with` does not fit the pattern's groups: {}",
                rule.name, e
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("Rule validation failed:\n{}", errors.join("\n")))
    }
}
