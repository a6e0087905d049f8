//! Channel-tagging view over a shared logger

use super::{
    error::Result,
    log_context::LogContext,
    log_level::LogLevel,
    logger::{LeveledLog, Logger},
};
use std::sync::Arc;

/// Context key carrying a channel override
pub const CHANNEL_KEY: &str = "channel";

/// A named channel on top of a parent [`Logger`].
///
/// Every call adds `channel = <name>` to the context and forwards to the
/// parent, which owns the handlers and processors. A `channel` key already
/// present in the caller's context wins. The parent's
/// [`PriorityProcessor`](crate::processors::PriorityProcessor) turns the key
/// into the record channel.
///
/// # Example
///
/// ```
/// use channel_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Arc::new(Logger::builder("app").processor(PriorityProcessor::new()).build());
/// let billing = logger.channel("billing");
/// assert_eq!(billing.name(), "billing");
/// ```
#[derive(Clone)]
pub struct Channel {
    name: String,
    parent: Arc<Logger>,
}

impl Channel {
    pub fn new(name: impl Into<String>, parent: Arc<Logger>) -> Self {
        Self {
            name: name.into(),
            parent,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> &Arc<Logger> {
        &self.parent
    }

    pub fn is_handling(&self, level: LogLevel) -> bool {
        self.parent.is_handling(level)
    }
}

impl LeveledLog for Channel {
    fn log(&self, level: LogLevel, message: String, mut context: LogContext) -> Result<bool> {
        context.merge_missing(&LogContext::new().with_field(CHANNEL_KEY, self.name.as_str()));
        self.parent.add_record(level, message, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_context::FieldValue;
    use crate::core::logger::tests::MemoryHandler;

    #[test]
    fn test_channel_injects_name() {
        let (handler, records) = MemoryHandler::new(LogLevel::Debug);
        let logger = Arc::new(Logger::builder("app").handler(handler).build());

        let payments = logger.channel("payments");
        payments
            .warning("card declined", LogContext::new().with_field("order", 42))
            .unwrap();

        let records = records.read();
        assert_eq!(records[0].channel, "app");
        assert_eq!(
            records[0].context.get(CHANNEL_KEY),
            Some(&FieldValue::String("payments".to_string()))
        );
        assert_eq!(records[0].context.get("order"), Some(&FieldValue::Int(42)));
    }

    #[test]
    fn test_explicit_channel_in_context_wins() {
        let (handler, records) = MemoryHandler::new(LogLevel::Debug);
        let logger = Arc::new(Logger::builder("app").handler(handler).build());

        logger
            .channel("payments")
            .info("moved", LogContext::new().with_field(CHANNEL_KEY, "audit"))
            .unwrap();

        assert_eq!(
            records.read()[0].context.get(CHANNEL_KEY),
            Some(&FieldValue::String("audit".to_string()))
        );
    }

    #[test]
    fn test_channel_shares_parent_handlers() {
        let (handler, _records) = MemoryHandler::new(LogLevel::Warning);
        let logger = Arc::new(Logger::builder("app").handler(handler).build());
        let channel = logger.channel("jobs");

        assert!(!channel.is_handling(LogLevel::Info));
        assert!(channel.is_handling(LogLevel::Error));
        assert!(Arc::ptr_eq(channel.parent(), &logger));
    }
}
