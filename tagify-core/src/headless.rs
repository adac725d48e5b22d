// tagify-core/src/headless.rs

//! Convenience wrappers for using the engines without touching the
//! filesystem: one-shot rewriting of an in-memory string.

use anyhow::Result;

use crate::config::TagifyConfig;
use crate::engine::{create_engine, EngineKind};

/// Rewrites `content` with the engine selected by `kind`.
///
/// # Arguments
///
/// * `config` - The merged TagifyConfig (defaults + optional user overrides).
/// * `content` - The template text to rewrite.
/// * `kind` - Which engine to use (`Static` or `Links`).
pub fn headless_rewrite_string(config: TagifyConfig, content: &str, kind: EngineKind) -> Result<String> {
    let engine = create_engine(kind, config)?;
    let rewrite = engine.rewrite(content, "headless")?;
    Ok(rewrite.content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_static() -> Result<()> {
        let config = TagifyConfig::load_default_rules()?;
        let out = headless_rewrite_string(config, "<img src=\"photo.jpg\">", EngineKind::Static)?;
        assert_eq!(out, "{% load static %}\n<img src=\"{% static 'photo.jpg' %}\">");
        Ok(())
    }

    #[test]
    fn test_headless_links() -> Result<()> {
        let config = TagifyConfig::load_default_rules()?;
        let out = headless_rewrite_string(config, "<a href=\"contact.html\">", EngineKind::Links)?;
        assert_eq!(out, "<a href=\"{% url \"contact\" %}\">");
        Ok(())
    }
}
