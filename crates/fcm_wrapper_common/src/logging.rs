//! Logging utilities for the FCM wrapper.
//!
//! The library crates only emit `tracing` events. Applications that do not
//! install their own subscriber can call [`init`] or [`init_with_level`] once
//! at startup to get formatted output on stderr.

use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO level.
///
/// # Examples
///
/// ```
/// use fcm_wrapper_common::logging;
///
/// // Initialize with default log level (INFO)
/// logging::init();
///
/// // A second call is a no-op
/// logging::init_with_level(tracing::Level::DEBUG);
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level for the
/// `fcm_wrapper` targets. `RUST_LOG` directives are honoured as well.
///
/// Returns `true` if this call installed the global subscriber.
pub fn init_with_level(level: Level) -> bool {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("fcm_wrapper={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    // try_init: a global default subscriber may already be set
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
    result.is_ok()
}

/// Log a result, with different messages for success and error cases.
///
/// Logs `success_message` at INFO if the result is Ok, or the error prefixed
/// with `error_context` at ERROR otherwise. The result is passed through
/// unchanged so the call can sit in a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}
