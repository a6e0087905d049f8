//! Logger assembly configuration
//!
//! A [`LoggerConfig`] is usually read from JSON:
//!
//! ```
//! use channel_logger::config::LoggerConfig;
//!
//! let config = LoggerConfig::from_json_str(r#"{
//!     "name": "shop",
//!     "log_dir": "/var/log/shop",
//!     "handlers": {
//!         "10": { "type": "stream", "level": "warning" },
//!         "mailer": { "service": "mailer" }
//!     },
//!     "processors": {
//!         "5": { "type": "tag", "fields": { "host": "web-1" } }
//!     },
//!     "exception_base_url": "https://example.com/log/"
//! }"#).unwrap();
//!
//! assert_eq!(config.name, "shop");
//! assert!(config.use_priority_processor);
//! assert_eq!(config.register_fallback, None);
//! ```
//!
//! Handler and processor keys double as priorities: a numeric key is the
//! priority, any other key means 0.

use crate::core::{LogContext, LogLevel, LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Directory used when `log_dir` is not configured
pub const DEFAULT_LOG_DIR: &str = "log";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Logger name, also the application channel of the fallback handler
    pub name: String,

    pub log_dir: Option<PathBuf>,

    pub handlers: BTreeMap<String, HandlerDefinition>,

    pub processors: BTreeMap<String, ProcessorDefinition>,

    /// Register the channel-routing processor at priority 20
    pub use_priority_processor: bool,

    /// `None` registers the fallback handler only when no handlers are configured
    pub register_fallback: Option<bool>,

    /// Base URL for exception report links; enables the URL processor
    pub exception_base_url: Option<String>,

    /// Debugger priority used for the level of `access` messages
    pub access_priority: String,

    /// Fallback handler writes each message line as its own entry
    pub expand_newlines: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: "app".to_string(),
            log_dir: None,
            handlers: BTreeMap::new(),
            processors: BTreeMap::new(),
            use_priority_processor: true,
            register_fallback: None,
            exception_base_url: None,
            access_priority: "info".to_string(),
            expand_newlines: false,
        }
    }
}

impl LoggerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading configuration",
                path.display().to_string(),
                e,
            )
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::config("name", "logger name must not be empty"));
        }
        if self.access_priority.trim().is_empty() {
            return Err(LoggerError::config(
                "access_priority",
                "access priority must not be empty",
            ));
        }
        if let Some(url) = &self.exception_base_url {
            if url.trim().is_empty() {
                return Err(LoggerError::config(
                    "exception_base_url",
                    "base URL must not be empty",
                ));
            }
        }
        Ok(())
    }

    /// Configured log directory, or [`DEFAULT_LOG_DIR`]
    pub fn resolved_log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
    }
}

/// A handler entry: either a built-in handler or a named service
/// registered on the [`LoggingExtension`](crate::extension::LoggingExtension).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HandlerDefinition {
    Service { service: String },
    Builtin(BuiltinHandler),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BuiltinHandler {
    Stream {
        #[serde(default)]
        level: Option<LogLevel>,
        #[serde(default)]
        colors: Option<bool>,
    },
    /// Relative paths are resolved against the log directory
    File {
        path: PathBuf,
        #[serde(default)]
        level: Option<LogLevel>,
    },
    Json {
        path: PathBuf,
        #[serde(default)]
        level: Option<LogLevel>,
    },
    Fallback {
        #[serde(default)]
        level: Option<LogLevel>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProcessorDefinition {
    Service { service: String },
    Builtin(BuiltinProcessor),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BuiltinProcessor {
    Priority,
    Tag {
        #[serde(default)]
        fields: LogContext,
    },
}
