//! compiler.rs - Manages the compilation and caching of rewrite rules.
//!
//! This module converts a `TagifyConfig` into `CompiledRules`: static rules
//! become backtracking `fancy_regex` matchers (they rely on negative
//! lookahead), link rules become plain `regex` matchers over an escaped href.
//! A global, shared cache avoids recompiling the same configuration.
//!
//! License: MIT OR APACHE 2.0

use anyhow::{anyhow, Result};
use fancy_regex::{Regex as FancyRegex, RegexBuilder};
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::config::{LinkRule, RewriteStrategy, StaticRule, TagifyConfig, MAX_PATTERN_LENGTH};
use crate::errors::TagifyError;

/// Upper bound on backtracking steps per match attempt.
const BACKTRACK_LIMIT: usize = 1_000_000;

/// A single compiled static-asset rule.
#[derive(Debug)]
pub struct CompiledStaticRule {
    /// The compiled backtracking regular expression.
    pub regex: FancyRegex,
    /// The unique name of the rule.
    pub name: String,
    /// Group whose text is rewritten for `RewriteStrategy::InPlace`.
    pub capture_group: usize,
    /// Replacement template with `$N` references.
    pub replace_with: String,
    pub strategy: RewriteStrategy,
}

/// A single compiled link rule.
#[derive(Debug)]
pub struct CompiledLinkRule {
    /// Matches `href="<href>"` or `href='<href>'`.
    pub regex: Regex,
    pub href: String,
    pub replace_with: String,
}

/// Every compiled rule for one configuration, in declared order.
#[derive(Debug)]
pub struct CompiledRules {
    pub marker: String,
    pub static_rules: Vec<CompiledStaticRule>,
    pub links: Vec<CompiledLinkRule>,
}

lazy_static! {
    /// A thread-safe, global cache for compiled rules.
    /// The key is a hash of the `TagifyConfig`.
    static ref COMPILED_RULES_CACHE: RwLock<HashMap<u64, Arc<CompiledRules>>> = RwLock::new(HashMap::new());
}

/// Hashes the configuration to create the cache key.
///
/// Rules are hashed in declared order: the same rules in another order
/// rewrite differently and must not share an entry.
fn hash_config(config: &TagifyConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.hash(&mut hasher);
    hasher.finish()
}

/// Builds the attribute-scoped matcher for an exact href.
pub fn link_pattern(href: &str) -> String {
    format!(r#"href=["']({})["']"#, regex::escape(href))
}

/// Compiles static rules into backtracking matchers, collecting every failure.
pub fn compile_static_rules(rules_to_compile: Vec<StaticRule>) -> Result<Vec<CompiledStaticRule>, TagifyError> {
    debug!("Starting compilation of {} static rules.", rules_to_compile.len());

    let mut compiled_rules = Vec::new();
    let mut compilation_errors = Vec::new();

    for rule in rules_to_compile {
        let Some(pattern) = rule.pattern.as_ref() else {
            warn!("Skipping rule '{}' because its pattern is missing.", &rule.name);
            continue;
        };

        if pattern.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(TagifyError::PatternLengthExceeded(
                rule.name,
                pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        let source = if rule.case_insensitive {
            format!("(?i){}", pattern)
        } else {
            pattern.clone()
        };

        let regex_result = RegexBuilder::new(&source)
            .backtrack_limit(BACKTRACK_LIMIT)
            .delegate_size_limit(10 * (1 << 20)) // 10 MB limit for delegated regexes
            .build();

        match regex_result {
            Ok(regex) => {
                log::debug!(
                    target: "tagify_core::rules",
                    "Rule '{}' compiled successfully.",
                    &rule.name
                );
                compiled_rules.push(CompiledStaticRule {
                    regex,
                    name: rule.name,
                    capture_group: rule.capture_group,
                    replace_with: rule.replace_with,
                    strategy: rule.strategy,
                });
            }
            Err(e) => {
                compilation_errors.push(TagifyError::RuleCompilationError(rule.name, e));
            }
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(TagifyError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )));
    }

    debug!("Finished compiling static rules. Total compiled: {}.", compiled_rules.len());
    Ok(compiled_rules)
}

/// Compiles link rules. The href is escaped, so it only ever matches literally.
pub fn compile_link_rules(rules_to_compile: Vec<LinkRule>) -> Result<Vec<CompiledLinkRule>, TagifyError> {
    debug!("Starting compilation of {} link rules.", rules_to_compile.len());

    rules_to_compile
        .into_iter()
        .map(|rule| -> Result<CompiledLinkRule, TagifyError> {
            let regex = Regex::new(&link_pattern(&rule.href))
                .map_err(|e| TagifyError::LinkPatternError(rule.href.clone(), e))?;
            Ok(CompiledLinkRule {
                regex,
                href: rule.href,
                replace_with: rule.replace_with,
            })
        })
        .collect()
}

/// Compiles a whole configuration without touching the cache.
pub fn compile_rules(config: &TagifyConfig) -> Result<CompiledRules, TagifyError> {
    Ok(CompiledRules {
        marker: config.marker().to_string(),
        static_rules: compile_static_rules(config.static_rules.clone())?,
        links: compile_link_rules(config.links.clone())?,
    })
}

/// Gets a `CompiledRules` instance from the cache or compiles it if not found.
pub fn get_or_compile_rules(config: &TagifyConfig) -> Result<Arc<CompiledRules>> {
    let cache_key = hash_config(config);

    {
        let cache = COMPILED_RULES_CACHE
            .read()
            .map_err(|_| anyhow!("Compiled rules cache lock poisoned"))?;
        if let Some(rules) = cache.get(&cache_key) {
            debug!("Serving compiled rules from cache for key: {}", &cache_key);
            return Ok(Arc::clone(rules));
        }
    }

    debug!("Compiled rules not found in cache. Compiling now.");
    let compiled_arc = Arc::new(compile_rules(config)?);

    COMPILED_RULES_CACHE
        .write()
        .map_err(|_| anyhow!("Compiled rules cache lock poisoned"))?
        .insert(cache_key, Arc::clone(&compiled_arc));

    debug!("Successfully compiled and cached rules for key: {}", &cache_key);
    Ok(compiled_arc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_pattern_escapes_href() {
        let regex = Regex::new(&link_pattern("index.html")).unwrap();
        assert!(regex.is_match(r#"<a href="index.html">"#));
        assert!(regex.is_match("<a href='index.html'>"));
        assert!(!regex.is_match(r#"<a href="indexXhtml">"#));
        assert!(!regex.is_match(r#"<a href="/index.html">"#));
    }

    #[test]
    fn oversized_pattern_is_reported() {
        let rule = StaticRule {
            name: "huge".to_string(),
            pattern: Some("a".repeat(MAX_PATTERN_LENGTH + 1)),
            ..StaticRule::default()
        };
        let err = compile_static_rules(vec![rule]).unwrap_err().to_string();
        assert!(err.contains("Failed to compile 1 rule(s)"));
        assert!(err.contains("exceeds maximum allowed"));
    }

    #[test]
    fn rule_without_pattern_is_skipped() {
        let rule = StaticRule { name: "empty".to_string(), ..StaticRule::default() };
        let compiled = compile_static_rules(vec![rule]).unwrap();
        assert!(compiled.is_empty());
    }

    #[test]
    fn cache_returns_shared_instance() {
        let config = TagifyConfig::load_default_rules().unwrap();
        let first = get_or_compile_rules(&config).unwrap();
        let second = get_or_compile_rules(&config).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.static_rules.len(), 11);
        assert_eq!(first.links.len(), 25);
    }

    #[test]
    fn reordered_rules_do_not_share_cache_entry() {
        let config = TagifyConfig::load_default_rules().unwrap();
        let mut reversed = config.clone();
        reversed.links.reverse();
        let a = get_or_compile_rules(&config).unwrap();
        let b = get_or_compile_rules(&reversed).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(b.links[0].href, "https://holisticfostercare.org/blog.html");
    }
}
