//! Handler trait for log output destinations

use super::{error::Result, log_level::LogLevel, log_record::LogRecord};

pub trait Handler: Send + Sync {
    /// Whether a record at `level` would be written by this handler
    fn is_handling(&self, level: LogLevel) -> bool;
    fn handle(&mut self, record: &LogRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
