//! Processor trait for record transforms that run before handlers

use super::{error::Result, log_record::LogRecord};

/// Reshapes a record before it reaches the handlers.
///
/// Processors may add, rename or remove context and extra keys, or change
/// the channel. Closures of the right shape are processors too.
pub trait Processor: Send + Sync {
    fn process(&self, record: &mut LogRecord) -> Result<()>;

    fn name(&self) -> &str {
        "processor"
    }
}

impl<F> Processor for F
where
    F: Fn(&mut LogRecord) -> Result<()> + Send + Sync,
{
    fn process(&self, record: &mut LogRecord) -> Result<()> {
        self(record)
    }

    fn name(&self) -> &str {
        "closure"
    }
}
