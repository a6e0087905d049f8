//! Main logger implementation

use super::{
    channel::Channel,
    error::Result,
    handler::Handler,
    log_context::LogContext,
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::LoggerMetrics,
    processor::Processor,
};
use parking_lot::RwLock;
use std::sync::Arc;

/// Leveled logging capability shared by [`Logger`] and [`Channel`].
///
/// Implementors provide [`log`](LeveledLog::log); the per-level helpers
/// delegate to it.
pub trait LeveledLog {
    /// Log a message with structured context.
    ///
    /// Returns `Ok(false)` when no handler accepts `level`.
    fn log(&self, level: LogLevel, message: String, context: LogContext) -> Result<bool>;

    #[inline]
    fn debug(&self, message: impl Into<String>, context: LogContext) -> Result<bool>
    where
        Self: Sized,
    {
        self.log(LogLevel::Debug, message.into(), context)
    }

    #[inline]
    fn info(&self, message: impl Into<String>, context: LogContext) -> Result<bool>
    where
        Self: Sized,
    {
        self.log(LogLevel::Info, message.into(), context)
    }

    #[inline]
    fn notice(&self, message: impl Into<String>, context: LogContext) -> Result<bool>
    where
        Self: Sized,
    {
        self.log(LogLevel::Notice, message.into(), context)
    }

    #[inline]
    fn warning(&self, message: impl Into<String>, context: LogContext) -> Result<bool>
    where
        Self: Sized,
    {
        self.log(LogLevel::Warning, message.into(), context)
    }

    #[inline]
    fn error(&self, message: impl Into<String>, context: LogContext) -> Result<bool>
    where
        Self: Sized,
    {
        self.log(LogLevel::Error, message.into(), context)
    }

    #[inline]
    fn critical(&self, message: impl Into<String>, context: LogContext) -> Result<bool>
    where
        Self: Sized,
    {
        self.log(LogLevel::Critical, message.into(), context)
    }

    #[inline]
    fn alert(&self, message: impl Into<String>, context: LogContext) -> Result<bool>
    where
        Self: Sized,
    {
        self.log(LogLevel::Alert, message.into(), context)
    }

    #[inline]
    fn emergency(&self, message: impl Into<String>, context: LogContext) -> Result<bool>
    where
        Self: Sized,
    {
        self.log(LogLevel::Emergency, message.into(), context)
    }
}

/// Named logger dispatching records through processors, then handlers.
///
/// Both lists run in the order they were pushed. The name is the default
/// channel of every record created here.
pub struct Logger {
    name: String,
    handlers: RwLock<Vec<Box<dyn Handler>>>,
    processors: Vec<Box<dyn Processor>>,
    metrics: LoggerMetrics,
}

impl Logger {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: RwLock::new(Vec::new()),
            processors: Vec::new(),
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn push_handler(&mut self, handler: Box<dyn Handler>) {
        self.handlers.get_mut().push(handler);
    }

    pub fn push_processor(&mut self, processor: Box<dyn Processor>) {
        self.processors.push(processor);
    }

    pub fn handlers_len(&self) -> usize {
        self.handlers.read().len()
    }

    pub fn processors_len(&self) -> usize {
        self.processors.len()
    }

    /// Names of the handlers, in execution order
    pub fn handler_names(&self) -> Vec<String> {
        self.handlers
            .read()
            .iter()
            .map(|h| h.name().to_string())
            .collect()
    }

    /// Names of the processors, in execution order
    pub fn processor_names(&self) -> Vec<String> {
        self.processors.iter().map(|p| p.name().to_string()).collect()
    }

    /// Whether any handler accepts records at `level`
    pub fn is_handling(&self, level: LogLevel) -> bool {
        self.handlers.read().iter().any(|h| h.is_handling(level))
    }

    /// Create a record on this logger's channel and dispatch it.
    ///
    /// Processors see the record first. The first processor or handler
    /// error aborts the call and is returned as-is.
    pub fn add_record(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: LogContext,
    ) -> Result<bool> {
        if !self.is_handling(level) {
            self.metrics.record_unhandled();
            return Ok(false);
        }

        let mut record = LogRecord::new(level, message, self.name.as_str()).with_context(context);
        self.dispatch(&mut record)
            .inspect_err(|_| {
                self.metrics.record_failure();
            })?;

        self.metrics.record_logged();
        Ok(true)
    }

    fn dispatch(&self, record: &mut LogRecord) -> Result<()> {
        for processor in &self.processors {
            processor.process(record)?;
        }

        let mut handlers = self.handlers.write();
        for handler in handlers.iter_mut() {
            if handler.is_handling(record.level) {
                handler.handle(record)?;
            }
        }
        Ok(())
    }

    /// Derive a channel that tags every record with `name`.
    pub fn channel(self: &Arc<Self>, name: impl Into<String>) -> Channel {
        Channel::new(name, Arc::clone(self))
    }

    /// Get the logger metrics
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        let mut handlers = self.handlers.write();
        for handler in handlers.iter_mut() {
            handler.flush()?;
        }
        Ok(())
    }
}

impl LeveledLog for Logger {
    fn log(&self, level: LogLevel, message: String, context: LogContext) -> Result<bool> {
        self.add_record(level, message, context)
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use channel_logger::prelude::*;
///
/// let logger = Logger::builder("app")
///     .handler(StreamHandler::new())
///     .processor(PriorityProcessor::new())
///     .build();
/// assert_eq!(logger.name(), "app");
/// ```
pub struct LoggerBuilder {
    name: String,
    handlers: Vec<Box<dyn Handler>>,
    processors: Vec<Box<dyn Processor>>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: Vec::new(),
            processors: Vec::new(),
        }
    }

    /// Add a handler
    #[must_use = "builder methods return a new value"]
    pub fn handler<H: Handler + 'static>(self, handler: H) -> Self {
        self.boxed_handler(Box::new(handler))
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_handler(mut self, handler: Box<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Add a processor
    #[must_use = "builder methods return a new value"]
    pub fn processor<P: Processor + 'static>(self, processor: P) -> Self {
        self.boxed_processor(Box::new(processor))
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_processor(mut self, processor: Box<dyn Processor>) -> Self {
        self.processors.push(processor);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let mut logger = Logger::new(self.name);
        for handler in self.handlers {
            logger.push_handler(handler);
        }
        for processor in self.processors {
            logger.push_processor(processor);
        }
        logger
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }
}
