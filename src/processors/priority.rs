//! Channel routing from context hints

use crate::core::{LogLevel, LogRecord, Processor, Result, CHANNEL_KEY};

/// Context key carrying an ad-hoc channel or a level name
pub const PRIORITY_KEY: &str = "priority";

/// Moves per-call channel hints from the context onto the record.
///
/// - `channel` in the context becomes the record channel.
/// - otherwise a `priority` hint that is not a level name becomes the
///   (lowercased) record channel; a level name is simply consumed.
///
/// This lets a call site send one message to a separate log file without
/// building a [`Channel`](crate::Channel).
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityProcessor;

impl PriorityProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Processor for PriorityProcessor {
    fn process(&self, record: &mut LogRecord) -> Result<()> {
        if record.context.is_set(CHANNEL_KEY) {
            if let Some(channel) = record.context.remove(CHANNEL_KEY) {
                record.channel = channel.to_string();
            }
        } else if record.context.is_set(PRIORITY_KEY) {
            if let Some(hint) = record.context.remove(PRIORITY_KEY) {
                let rename = hint.to_string().to_uppercase();
                if !LogLevel::is_level_name(&rename) {
                    record.channel = rename.to_lowercase();
                }
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "priority"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogContext;

    fn record_with(context: LogContext) -> LogRecord {
        LogRecord::new(LogLevel::Info, "message", "app").with_context(context)
    }

    #[test]
    fn test_channel_override_is_moved() {
        let mut record = record_with(LogContext::new().with_field("channel", "billing"));
        PriorityProcessor.process(&mut record).unwrap();

        assert_eq!(record.channel, "billing");
        assert!(record.context.get("channel").is_none());
    }

    #[test]
    fn test_channel_wins_over_priority() {
        let mut record = record_with(
            LogContext::new()
                .with_field("channel", "billing")
                .with_field("priority", "custom"),
        );
        PriorityProcessor.process(&mut record).unwrap();

        assert_eq!(record.channel, "billing");
        assert!(record.context.get("priority").is_some());
    }

    #[test]
    fn test_unknown_priority_becomes_channel() {
        let mut record = record_with(LogContext::new().with_field("priority", "Custom"));
        PriorityProcessor.process(&mut record).unwrap();

        assert_eq!(record.channel, "custom");
        assert!(record.context.is_empty());
    }

    #[test]
    fn test_level_priority_is_consumed_only() {
        let mut record = record_with(LogContext::new().with_field("priority", "error"));
        PriorityProcessor.process(&mut record).unwrap();

        assert_eq!(record.channel, "app");
        assert!(record.context.get("priority").is_none());
    }

    #[test]
    fn test_no_hint_leaves_record_alone() {
        let mut record = record_with(LogContext::new().with_field("user", 7));
        let before = record.clone();
        PriorityProcessor.process(&mut record).unwrap();

        assert_eq!(record, before);
    }
}
