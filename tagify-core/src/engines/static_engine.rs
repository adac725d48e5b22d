// tagify-core/src/engines/static_engine.rs
//! A `RewriteEngine` that wraps relative static-asset references in
//! `{% static %}` template tags.
//!
//! Each rule is a backtracking regex scoped to one HTML construct (`<link
//! href>`, `<img src>`, inline `url(...)`, ...). The engine first makes sure
//! the `{% load static %}` marker is present, then runs the rules in declared
//! order over an in-memory buffer.
//! License: MIT OR APACHE 2.0

use std::sync::Arc;

use anyhow::{Context, Result};
use fancy_regex::{Captures, Expander};
use log::debug;

use crate::config::{RewriteStrategy, RewriteSummaryItem, TagifyConfig};
use crate::engine::{Rewrite, RewriteEngine};
use crate::errors::TagifyError;
use crate::rules::compiler::{get_or_compile_rules, CompiledRules, CompiledStaticRule};

/// Summary name used when the marker directive was inserted.
pub const MARKER_RULE_NAME: &str = "load_marker";

/// Inserts `marker` unless it already appears somewhere in `content`.
///
/// Documents that open with a doctype or `<html>` tag get the marker as their
/// second line; everything else gets it as the first line. Returns `None` when
/// the marker is already present.
pub fn insert_marker(content: &str, marker: &str) -> Option<String> {
    if content.contains(marker) {
        return None;
    }

    let head = content.trim_start();
    if head.starts_with("<!DOCTYPE") || head.starts_with("<html") {
        let (first_line, rest) = content.split_once('\n').unwrap_or((content, ""));
        Some(format!("{first_line}\n{marker}\n{rest}"))
    } else {
        Some(format!("{marker}\n{content}"))
    }
}

/// Computes the replacement for one match of `rule`.
fn rewrite_match(rule: &CompiledStaticRule, caps: &Captures<'_>) -> String {
    let whole = caps.get(0).map_or("", |m| m.as_str());
    let value = caps.get(rule.capture_group).map_or("", |m| m.as_str());

    // An empty value would turn into a tag between every character.
    if value.is_empty() {
        return whole.to_string();
    }

    let tag = Expander::default().expansion(&rule.replace_with, caps);
    match rule.strategy {
        RewriteStrategy::InPlace => whole.replace(value, &tag),
        RewriteStrategy::Substitute => tag,
    }
}

#[derive(Debug)]
pub struct StaticAssetEngine {
    compiled_rules: Arc<CompiledRules>,
}

impl StaticAssetEngine {
    pub fn new(config: TagifyConfig) -> Result<Self> {
        let compiled_rules = get_or_compile_rules(&config)
            .context("Failed to compile static rules for StaticAssetEngine")?;

        Ok(Self { compiled_rules })
    }

    /// Runs one rule over `content`, returning the new text and, when the rule
    /// changed anything, its summary entry.
    fn apply_rule(
        &self,
        rule: &CompiledStaticRule,
        content: &str,
    ) -> Result<(String, Option<RewriteSummaryItem>), TagifyError> {
        let mut original_texts = Vec::new();
        let mut rewritten_texts = Vec::new();

        let rewritten = rule
            .regex
            .try_replacen(content, 0, |caps: &Captures<'_>| {
                let whole = caps.get(0).map_or("", |m| m.as_str());
                let replacement = rewrite_match(rule, caps);
                if replacement != whole {
                    original_texts.push(whole.to_string());
                    rewritten_texts.push(replacement.clone());
                }
                replacement
            })
            .map_err(|e| TagifyError::RuleExecutionError(rule.name.clone(), e))?
            .into_owned();

        if original_texts.is_empty() {
            return Ok((rewritten, None));
        }

        let item = RewriteSummaryItem {
            rule_name: rule.name.clone(),
            occurrences: original_texts.len(),
            original_texts,
            rewritten_texts,
        };
        Ok((rewritten, Some(item)))
    }
}

impl RewriteEngine for StaticAssetEngine {
    fn name(&self) -> &'static str {
        "static"
    }

    fn rewrite(&self, content: &str, source_id: &str) -> Result<Rewrite> {
        let marker = self.compiled_rules.marker.as_str();
        let mut summary = Vec::new();

        let mut current = match insert_marker(content, marker) {
            Some(with_marker) => {
                debug!("Inserted '{}' into {}", marker, source_id);
                summary.push(RewriteSummaryItem {
                    rule_name: MARKER_RULE_NAME.to_string(),
                    occurrences: 1,
                    original_texts: Vec::new(),
                    rewritten_texts: vec![marker.to_string()],
                });
                with_marker
            }
            None => content.to_string(),
        };

        for rule in &self.compiled_rules.static_rules {
            let (next, item) = self
                .apply_rule(rule, &current)
                .with_context(|| format!("Rule '{}' failed on {}", rule.name, source_id))?;
            if let Some(item) = item {
                debug!(
                    "Rule '{}' rewrote {} reference(s) in {}",
                    item.rule_name, item.occurrences, source_id
                );
                summary.push(item);
            }
            current = next;
        }

        Ok(Rewrite { content: current, summary })
    }
}
