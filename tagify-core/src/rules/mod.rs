//! Rule compilation for both rewrite modes.
//!
//! Raw `StaticRule`s and `LinkRule`s from `config` are turned into compiled
//! matchers here, once per configuration, and shared with the engines.

pub mod compiler;
