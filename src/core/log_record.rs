//! Log record structure

use super::log_context::{FieldValue, LogContext};
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One log event as it flows through processors and handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub channel: String,
    pub context: LogContext,
    pub extra: LogContext,
}

impl LogRecord {
    pub fn new(level: LogLevel, message: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            channel: channel.into(),
            context: LogContext::new(),
            extra: LogContext::new(),
        }
    }

    pub fn with_context(mut self, context: LogContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_extra(mut self, extra: LogContext) -> Self {
        self.extra = extra;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Shorthand for reading a context field
    pub fn context_value(&self, key: &str) -> Option<&FieldValue> {
        self.context.get(key)
    }
}
