#![deny(missing_docs)]
//! Shared logging utilities for the polisher workspace.
//!
//! This crate provides the `app_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. When a request id
//! has been set on the current thread, every macro prefixes its message
//! with `[req N]` so one optimization run can be followed through the log.

use std::cell::Cell;

thread_local! {
    /// Thread-local storage for the id of the last dispatched request.
    static REQUEST_ID: Cell<u64> = const { Cell::new(0) };
}

/// Sets the request id for the current thread.
/// The effect runner calls this when it dispatches a request to the engine.
pub fn set_request_id(id: u64) {
    REQUEST_ID.with(|v| v.set(id));
}

/// Retrieves the request id for the current thread.
/// Returns 0 when no request has been dispatched yet.
pub fn get_request_id() -> u64 {
    REQUEST_ID.with(|v| v.get())
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! app_trace {
    ($($arg:tt)*) => {{
        match $crate::get_request_id() {
            0 => log::trace!($($arg)*),
            rid => log::trace!("[req {}] {}", rid, format_args!($($arg)*)),
        }
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! app_info {
    ($($arg:tt)*) => {{
        match $crate::get_request_id() {
            0 => log::info!($($arg)*),
            rid => log::info!("[req {}] {}", rid, format_args!($($arg)*)),
        }
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! app_debug {
    ($($arg:tt)*) => {{
        match $crate::get_request_id() {
            0 => log::debug!($($arg)*),
            rid => log::debug!("[req {}] {}", rid, format_args!($($arg)*)),
        }
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! app_warn {
    ($($arg:tt)*) => {{
        match $crate::get_request_id() {
            0 => log::warn!($($arg)*),
            rid => log::warn!("[req {}] {}", rid, format_args!($($arg)*)),
        }
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! app_error {
    ($($arg:tt)*) => {{
        match $crate::get_request_id() {
            0 => log::error!($($arg)*),
            rid => log::error!("[req {}] {}", rid, format_args!($($arg)*)),
        }
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

#[cfg(test)]
mod tests {
    use super::{get_request_id, set_request_id};

    #[test]
    fn request_id_is_thread_local() {
        set_request_id(7);
        assert_eq!(get_request_id(), 7);
        std::thread::spawn(|| assert_eq!(get_request_id(), 0))
            .join()
            .unwrap();
    }
}
