//! # Channel Logger
//!
//! Channel-aware logging with priority-ordered assembly.
//!
//! ## Features
//!
//! - **Priority assembly**: handlers and processors from configuration,
//!   pushed in ascending priority order
//! - **Channels**: lightweight named views over one shared [`Logger`]
//! - **Fallback files**: one file per level, or per channel, with locked appends
//! - **Exception reports**: records carrying an exception are linked to a
//!   rendered report file
//! - **Debugger bridge**: [`DebuggerAdapter`](debugger::DebuggerAdapter) maps
//!   priority strings such as `"exception"` onto the logger

pub mod config;
pub mod core;
pub mod debugger;
pub mod extension;
pub mod handlers;
pub mod macros;
pub mod processors;
pub mod registry;

pub mod prelude {
    pub use crate::config::LoggerConfig;
    pub use crate::core::{
        Channel, ExceptionInfo, FieldValue, Handler, LeveledLog, LogContext, LogLevel, LogRecord,
        Logger, LoggerBuilder, LoggerError, Processor, Result,
    };
    pub use crate::debugger::{DebugMessage, DebuggerAdapter, DebuggerLogger};
    pub use crate::extension::{LoggingContainer, LoggingExtension};
    pub use crate::handlers::{FallbackHandler, FileHandler, JsonHandler, StreamHandler};
    pub use crate::processors::{
        ExceptionProcessor, ExceptionUrlProcessor, PriorityProcessor, TagProcessor,
    };
}

pub use core::{
    Channel, ExceptionInfo, FieldValue, Handler, JsonFormatter, LeveledLog, LineFormatter,
    LogContext, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerError, LoggerMetrics, Processor,
    Result, TimestampFormat, CHANNEL_KEY,
};
pub use extension::{LoggingContainer, LoggingExtension};
pub use handlers::{FallbackHandler, StreamHandler};
pub use registry::PriorityRegistry;
