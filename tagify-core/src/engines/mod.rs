// tagify-core/src/engines/mod.rs
//! Concrete implementations of the `RewriteEngine` trait.
//!
//! * `static_engine` wraps relative asset paths in `{% static %}` tags.
//! * `link_engine` replaces known page links with `{% url %}` tags.

pub mod link_engine;
pub mod static_engine;
