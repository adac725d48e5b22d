// tagify-core/src/engine.rs
//! Defines the core `RewriteEngine` trait and related data structures.
//!
//! The `RewriteEngine` trait provides a pluggable interface for the two
//! rewrite modes (static assets and internal links). Callers such as the file
//! processor and the CLI only see this trait, so both modes share the same
//! read → rewrite → report → write pipeline.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;

use crate::config::{RewriteSummaryItem, TagifyConfig};
use crate::engines::link_engine::LinkEngine;
use crate::engines::static_engine::StaticAssetEngine;

/// The result of rewriting one file's content in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// The content after every rule has run.
    pub content: String,
    /// One entry per rule that actually changed something, in rule order.
    pub summary: Vec<RewriteSummaryItem>,
}

/// Selects which engine to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    /// Static-asset references become `{% static %}` tags.
    Static,
    /// Known internal links become `{% url %}` tags.
    Links,
}

/// A trait that defines the core functionality of a rewrite engine.
pub trait RewriteEngine: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Applies every rule, in declared order, to `content`.
    ///
    /// Each rule sees the output of the previous one. `source_id` is only used
    /// for logging.
    fn rewrite(&self, content: &str, source_id: &str) -> Result<Rewrite>;
}

/// Builds the engine for `kind` behind the trait object.
pub fn create_engine(kind: EngineKind, config: TagifyConfig) -> Result<Box<dyn RewriteEngine>> {
    let engine: Box<dyn RewriteEngine> = match kind {
        EngineKind::Static => Box::new(StaticAssetEngine::new(config)?),
        EngineKind::Links => Box::new(LinkEngine::new(config)?),
    };
    Ok(engine)
}
