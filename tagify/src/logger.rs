//! Logger setup for the tagify binary and its tests.

use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;

/// Initializes `env_logger` once; later calls are no-ops.
///
/// `RUST_LOG` is honoured unless `level_override` is given, in which case it
/// applies to every target. The default level is `warn`.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder.format(|buf, record| {
        writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args())
    });
    let _ = builder.try_init();
}
