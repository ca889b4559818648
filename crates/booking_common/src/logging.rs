//! Logging utilities for the booking service.
//!
//! Sets up the tracing subscriber shared by the backend binary and the tests, and a
//! couple of helpers for logging errors with context.

use std::str::FromStr;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Crate targets that receive the configured level.
const TARGETS: &[&str] = &[
    "booking_backend",
    "booking_gcal",
    "booking_config",
    "booking_common",
    "tower_http",
];

/// Initialize the tracing subscriber with the default level (INFO).
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize from a level name such as "debug"; unknown names fall back to INFO.
pub fn init_from_str(level: Option<&str>) {
    let level = level
        .and_then(|name| Level::from_str(name).ok())
        .unwrap_or(Level::INFO);
    init_with_level(level);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` directives are honoured on top of the per-crate level. Calling this
/// more than once is harmless; only the first subscriber is installed.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    for target in TARGETS {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}
