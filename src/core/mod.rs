//! Core logger types and traits

pub mod channel;
pub mod error;
pub mod exception;
pub mod formatter;
pub mod handler;
pub mod log_context;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod processor;
pub mod timestamp;

pub use channel::{Channel, CHANNEL_KEY};
pub use error::{LoggerError, Result};
pub use exception::ExceptionInfo;
pub use formatter::{JsonFormatter, LineFormatter};
pub use handler::Handler;
pub use log_context::{FieldValue, LogContext};
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use logger::{LeveledLog, Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use processor::Processor;
pub use timestamp::TimestampFormat;
