#![deny(missing_docs)]
//! Shared logging utilities for the phishguard workspace.
//!
//! This crate provides the `ctx_*` logging macros used across the codebase,
//! a task-local execution-context label (background, page, popup) that the
//! macros prepend to every line, and a minimal test initializer for the
//! global logger.

use std::future::Future;

tokio::task_local! {
    /// Label of the execution context the current task belongs to.
    static CONTEXT: &'static str;
}

/// Runs `fut` with the given context label attached to the task.
///
/// Nested calls shadow the outer label for the duration of the inner future.
pub async fn in_context<F>(label: &'static str, fut: F) -> F::Output
where
    F: Future,
{
    CONTEXT.scope(label, fut).await
}

/// Returns the context label of the current task, or `"main"` when the task
/// was not started through [`in_context`].
pub fn current_context() -> &'static str {
    CONTEXT.try_with(|label| *label).unwrap_or("main")
}

/// Logs a trace-level message, prefixed with the current context label.
#[macro_export]
macro_rules! ctx_trace {
    ($($arg:tt)*) => {{
        log::trace!("[{}] {}", $crate::current_context(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message, prefixed with the current context label.
#[macro_export]
macro_rules! ctx_debug {
    ($($arg:tt)*) => {{
        log::debug!("[{}] {}", $crate::current_context(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message, prefixed with the current context label.
#[macro_export]
macro_rules! ctx_info {
    ($($arg:tt)*) => {{
        log::info!("[{}] {}", $crate::current_context(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message, prefixed with the current context label.
#[macro_export]
macro_rules! ctx_warn {
    ($($arg:tt)*) => {{
        log::warn!("[{}] {}", $crate::current_context(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message, prefixed with the current context label.
#[macro_export]
macro_rules! ctx_error {
    ($($arg:tt)*) => {{
        log::error!("[{}] {}", $crate::current_context(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
