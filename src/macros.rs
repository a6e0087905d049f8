//! Logging macros for ergonomic log message formatting.
//!
//! These macros work with anything implementing
//! [`LeveledLog`](crate::LeveledLog): a [`Logger`](crate::Logger) or a
//! [`Channel`](crate::Channel). They format the message like `format!` and
//! return the `Result<bool>` of the underlying call.
//!
//! # Examples
//!
//! ```
//! use channel_logger::prelude::*;
//! use channel_logger::{info, warning};
//! use std::sync::Arc;
//!
//! let logger = Arc::new(Logger::builder("app").handler(StreamHandler::new()).build());
//!
//! // Basic logging
//! info!(logger, "Server started").unwrap();
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port).unwrap();
//!
//! // With structured context, on a channel
//! let jobs = logger.channel("jobs");
//! warning!(jobs, ctx: LogContext::new().with_field("queue", "mail"), "Queue {} is slow", "mail").unwrap();
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use channel_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use channel_logger::log;
/// log!(logger, LogLevel::Info, "Simple message").unwrap();
/// log!(logger, LogLevel::Error, "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, ctx: $ctx:expr, $($arg:tt)+) => {{
        use $crate::LeveledLog as _;
        ($logger).log($level, format!($($arg)+), $ctx)
    }};
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $crate::log!($logger, $level, ctx: $crate::LogContext::new(), $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use channel_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use channel_logger::info;
/// info!(logger, "Application started").unwrap();
/// info!(logger, "Processing {} items", 100).unwrap();
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Notice, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use channel_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use channel_logger::error;
/// error!(logger, "Failed to connect to database").unwrap();
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error").unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Alert, $($arg)+)
    };
}

/// Log an emergency-level message.
#[macro_export]
macro_rules! emergency {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Emergency, $($arg)+)
    };
}
