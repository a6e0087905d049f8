//! Static fields added to every record

use crate::core::{FieldValue, LogContext, LogRecord, Processor, Result};

/// Adds a fixed set of fields (service name, host, version...) to the
/// `extra` mapping of every record. Fields already present in `extra` are
/// kept.
#[derive(Debug, Clone, Default)]
pub struct TagProcessor {
    tags: LogContext,
}

impl TagProcessor {
    pub fn new(tags: LogContext) -> Self {
        Self { tags }
    }

    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.tags.add_field(key, value);
        self
    }

    pub fn tags(&self) -> &LogContext {
        &self.tags
    }
}

impl Processor for TagProcessor {
    fn process(&self, record: &mut LogRecord) -> Result<()> {
        record.extra.merge_missing(&self.tags);
        Ok(())
    }

    fn name(&self) -> &str {
        "tag"
    }
}
