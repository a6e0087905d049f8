//! Bridge between a debugger-style logger interface and [`Logger`](crate::Logger)
//!
//! Debuggers and error screens report with a free-form priority string
//! (`"error"`, `"exception"`, `"access"`, ...) and expect back the path of
//! the rendered exception report, if any. [`DebuggerAdapter`] maps those
//! calls onto the logger; [`ExceptionFileRenderer`] produces the reports.

pub mod adapter;
pub mod renderer;

pub use adapter::DebuggerAdapter;
pub use renderer::{ExceptionFileRenderer, ExceptionRenderer};

use crate::core::{ExceptionInfo, Result};
use std::fmt;
use std::path::PathBuf;

/// Priority strings understood by debugger loggers
pub mod priority {
    pub const DEBUG: &str = "debug";
    pub const INFO: &str = "info";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
    pub const EXCEPTION: &str = "exception";
    pub const CRITICAL: &str = "critical";
    pub const ACCESS: &str = "access";
}

/// Something a debugger wants logged
#[derive(Debug, Clone, PartialEq)]
pub enum DebugMessage {
    Text(String),
    Exception(ExceptionInfo),
}

impl DebugMessage {
    pub fn exception(&self) -> Option<&ExceptionInfo> {
        match self {
            DebugMessage::Exception(e) => Some(e),
            DebugMessage::Text(_) => None,
        }
    }
}

impl fmt::Display for DebugMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebugMessage::Text(text) => write!(f, "{}", text),
            DebugMessage::Exception(e) => write!(f, "{}", e),
        }
    }
}

impl From<&str> for DebugMessage {
    fn from(s: &str) -> Self {
        DebugMessage::Text(s.to_string())
    }
}

impl From<String> for DebugMessage {
    fn from(s: String) -> Self {
        DebugMessage::Text(s)
    }
}

impl From<ExceptionInfo> for DebugMessage {
    fn from(e: ExceptionInfo) -> Self {
        DebugMessage::Exception(e)
    }
}

/// The logger interface a debugger talks to.
pub trait DebuggerLogger: Send + Sync {
    /// Log `message` under a debugger priority.
    ///
    /// Returns the exception report path when the message is an exception.
    fn log(&self, message: DebugMessage, priority: &str) -> Result<Option<PathBuf>>;
}
