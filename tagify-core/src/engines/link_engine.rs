// tagify-core/src/engines/link_engine.rs
//! A `RewriteEngine` that replaces known internal page links with named-route
//! `{% url %}` tags.
//! License: MIT OR APACHE 2.0

use std::sync::Arc;

use anyhow::{Context, Result};
use log::debug;
use regex::NoExpand;

use crate::config::{RewriteSummaryItem, TagifyConfig};
use crate::engine::{Rewrite, RewriteEngine};
use crate::rules::compiler::{get_or_compile_rules, CompiledRules};

#[derive(Debug)]
pub struct LinkEngine {
    compiled_rules: Arc<CompiledRules>,
}

impl LinkEngine {
    pub fn new(config: TagifyConfig) -> Result<Self> {
        let compiled_rules = get_or_compile_rules(&config)
            .context("Failed to compile link rules for LinkEngine")?;

        Ok(Self { compiled_rules })
    }
}

impl RewriteEngine for LinkEngine {
    fn name(&self) -> &'static str {
        "links"
    }

    fn rewrite(&self, content: &str, source_id: &str) -> Result<Rewrite> {
        let mut current = content.to_string();
        let mut summary = Vec::new();

        for rule in &self.compiled_rules.links {
            let occurrences = rule.regex.find_iter(&current).count();
            if occurrences == 0 {
                continue;
            }

            let attribute = format!(r#"href="{}""#, rule.replace_with);
            let next = rule.regex.replace_all(&current, NoExpand(&attribute));
            if next.as_ref() == current.as_str() {
                continue;
            }

            debug!(
                "Link '{}' rewrote {} occurrence(s) in {}",
                rule.href, occurrences, source_id
            );
            summary.push(RewriteSummaryItem {
                rule_name: rule.href.clone(),
                occurrences,
                original_texts: vec![rule.href.clone()],
                rewritten_texts: vec![rule.replace_with.clone()],
            });
            current = next.into_owned();
        }

        Ok(Rewrite { content: current, summary })
    }
}
