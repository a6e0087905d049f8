//! Debugger logger backed by a [`Logger`]

use super::{priority, DebugMessage, DebuggerLogger, ExceptionRenderer};
use crate::core::{LogContext, LogLevel, Logger, Result};
use crate::processors::{EXCEPTION_KEY, PRIORITY_KEY};
use std::path::PathBuf;
use std::sync::Arc;

/// Context key for the request or command that produced the message
pub const SOURCE_KEY: &str = "at";

/// Forwards debugger log calls to the logger.
///
/// The debugger priority travels in the record context under `priority`,
/// so with a [`PriorityProcessor`](crate::processors::PriorityProcessor)
/// registered, `"exception"` and `"access"` messages land in their own
/// channels while level-named priorities stay on the default channel.
pub struct DebuggerAdapter {
    logger: Arc<Logger>,
    renderer: Arc<dyn ExceptionRenderer>,
    access_priority: String,
    source: Option<String>,
}

impl DebuggerAdapter {
    pub fn new(logger: Arc<Logger>, renderer: Arc<dyn ExceptionRenderer>) -> Self {
        Self {
            logger,
            renderer,
            access_priority: priority::INFO.to_string(),
            source: None,
        }
    }

    /// Priority used for the level of `access` messages
    #[must_use]
    pub fn with_access_priority(mut self, access_priority: impl Into<String>) -> Self {
        self.access_priority = access_priority.into();
        self
    }

    /// Fixed value for the `at` context key instead of the process command line
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// Report path for an exception, without rendering it
    pub fn exception_file(&self, exception: &crate::core::ExceptionInfo) -> PathBuf {
        self.renderer.exception_file(exception)
    }

    /// Map a debugger priority onto a level.
    ///
    /// Unknown priorities fall back to a case-insensitive level name, then
    /// to INFO.
    pub fn level_for(priority: &str) -> LogLevel {
        match priority {
            priority::DEBUG => LogLevel::Debug,
            priority::INFO => LogLevel::Info,
            priority::WARNING => LogLevel::Warning,
            priority::ERROR => LogLevel::Error,
            priority::EXCEPTION | priority::CRITICAL => LogLevel::Critical,
            other => LogLevel::from_name(other).unwrap_or(LogLevel::Info),
        }
    }

    fn source(&self) -> String {
        match &self.source {
            Some(source) => source.clone(),
            None => format!(
                "CLI (PID: {}): {}",
                std::process::id(),
                std::env::args().collect::<Vec<_>>().join(" ")
            ),
        }
    }
}

impl DebuggerLogger for DebuggerAdapter {
    fn log(&self, message: DebugMessage, priority: &str) -> Result<Option<PathBuf>> {
        let mut context = LogContext::new()
            .with_field(PRIORITY_KEY, priority)
            .with_field(SOURCE_KEY, self.source());

        if let Some(exception) = message.exception() {
            context.add_field(EXCEPTION_KEY, exception.clone());
        }

        let level_priority = if priority == priority::ACCESS {
            self.access_priority.as_str()
        } else {
            priority
        };

        self.logger
            .add_record(Self::level_for(level_priority), message.to_string(), context)?;

        // derived after dispatch so an already rendered report is found
        Ok(message
            .exception()
            .map(|exception| self.renderer.exception_file(exception)))
    }
}
