//! Assembly of a logger from [`LoggerConfig`]
//!
//! [`LoggingExtension`] turns a configuration plus any named components
//! into a [`LoggingContainer`]: the logger with its handlers and processors
//! pushed in priority order, the debugger adapter, and the exception
//! renderer they share.
//!
//! Built-in processors run at fixed priorities: the channel router at 20,
//! the exception processor at 100 and the exception URL processor at 110
//! (only with `exception_base_url`). The URL processor comes last so it
//! links the report the exception processor just named.

use crate::config::{
    BuiltinHandler, BuiltinProcessor, HandlerDefinition, LoggerConfig, ProcessorDefinition,
};
use crate::core::{Channel, Handler, Logger, LoggerError, Processor, Result};
use crate::debugger::{DebuggerAdapter, ExceptionFileRenderer, ExceptionRenderer};
use crate::handlers::{FallbackHandler, FileHandler, JsonHandler, StreamHandler};
use crate::processors::{
    ExceptionProcessor, ExceptionUrlProcessor, PriorityProcessor, TagProcessor,
};
use crate::registry::{parse_priority, PriorityRegistry};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const PRIORITY_PROCESSOR_PRIORITY: i64 = 20;
pub const EXCEPTION_PROCESSOR_PRIORITY: i64 = 100;
pub const URL_PROCESSOR_PRIORITY: i64 = 110;

/// Builder for a fully wired [`LoggingContainer`].
///
/// # Example
///
/// ```no_run
/// use channel_logger::config::LoggerConfig;
/// use channel_logger::extension::LoggingExtension;
/// use channel_logger::prelude::*;
///
/// let config = LoggerConfig::from_json_str(r#"{ "name": "shop", "log_dir": "/var/log/shop" }"#)?;
/// let container = LoggingExtension::new(config).build()?;
///
/// container.channel("billing").error("card declined", LogContext::new())?;
/// # Ok::<(), channel_logger::LoggerError>(())
/// ```
pub struct LoggingExtension {
    config: LoggerConfig,
    handler_services: HashMap<String, Box<dyn Handler>>,
    processor_services: HashMap<String, Box<dyn Processor>>,
    renderer: Option<Arc<dyn ExceptionRenderer>>,
}

impl LoggingExtension {
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            config,
            handler_services: HashMap::new(),
            processor_services: HashMap::new(),
            renderer: None,
        }
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Make a handler available to `{"service": name}` handler entries
    #[must_use = "builder methods return a new value"]
    pub fn register_handler_service<H: Handler + 'static>(
        mut self,
        name: impl Into<String>,
        handler: H,
    ) -> Self {
        self.handler_services.insert(name.into(), Box::new(handler));
        self
    }

    /// Make a processor available to `{"service": name}` processor entries
    #[must_use = "builder methods return a new value"]
    pub fn register_processor_service<P: Processor + 'static>(
        mut self,
        name: impl Into<String>,
        processor: P,
    ) -> Self {
        self.processor_services
            .insert(name.into(), Box::new(processor));
        self
    }

    /// Replace the default [`ExceptionFileRenderer`] rooted at the log directory
    #[must_use = "builder methods return a new value"]
    pub fn with_renderer(mut self, renderer: Arc<dyn ExceptionRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Create the log directory and wire everything together.
    ///
    /// # Errors
    ///
    /// [`LoggerError::LogDirectory`] when the directory cannot be created,
    /// [`LoggerError::LogDirectoryNotWritable`] when it is read-only,
    /// [`LoggerError::InvalidConfiguration`] for a reference to an
    /// unregistered service, and any error raised opening a file handler.
    pub fn build(mut self) -> Result<LoggingContainer> {
        self.config.validate()?;
        let log_dir = self.config.resolved_log_dir();
        ensure_log_dir(&log_dir)?;

        let renderer = self
            .renderer
            .take()
            .unwrap_or_else(|| Arc::new(ExceptionFileRenderer::new(&log_dir)));

        let handlers = self.collect_handlers(&log_dir)?;
        let processors = self.collect_processors(&renderer)?;

        for name in self.handler_services.keys() {
            eprintln!("[LOGGER WARNING] Handler service '{}' is never referenced", name);
        }
        for name in self.processor_services.keys() {
            eprintln!("[LOGGER WARNING] Processor service '{}' is never referenced", name);
        }

        let register_fallback = self
            .config
            .register_fallback
            .unwrap_or(handlers.is_empty());

        let mut logger = Logger::new(self.config.name.as_str());
        for handler in handlers.into_sorted() {
            logger.push_handler(handler);
        }
        if register_fallback {
            logger.push_handler(Box::new(self.fallback_handler(&log_dir)));
        }
        for processor in processors.into_sorted() {
            logger.push_processor(processor);
        }

        let logger = Arc::new(logger);
        let adapter = DebuggerAdapter::new(Arc::clone(&logger), Arc::clone(&renderer))
            .with_access_priority(self.config.access_priority.as_str());

        Ok(LoggingContainer {
            logger,
            adapter,
            renderer,
            log_dir,
        })
    }

    fn fallback_handler(&self, log_dir: &Path) -> FallbackHandler {
        FallbackHandler::new(self.config.name.as_str(), log_dir)
            .with_expand_newlines(self.config.expand_newlines)
    }

    fn collect_handlers(&mut self, log_dir: &Path) -> Result<PriorityRegistry<Box<dyn Handler>>> {
        let mut registry = PriorityRegistry::new();
        let definitions = std::mem::take(&mut self.config.handlers);

        for (key, definition) in definitions {
            warn_on_malformed_priority("handler", &key);
            let handler: Box<dyn Handler> = match definition {
                HandlerDefinition::Service { service } => {
                    self.handler_services.remove(&service).ok_or_else(|| {
                        LoggerError::config(
                            format!("handlers.{}", key),
                            format!("unknown handler service '{}'", service),
                        )
                    })?
                }
                HandlerDefinition::Builtin(builtin) => self.builtin_handler(builtin, log_dir)?,
            };
            registry.register_keyed(&key, handler);
        }
        Ok(registry)
    }

    fn builtin_handler(&self, builtin: BuiltinHandler, log_dir: &Path) -> Result<Box<dyn Handler>> {
        let handler: Box<dyn Handler> = match builtin {
            BuiltinHandler::Stream { level, colors } => {
                let handler = match colors {
                    Some(colors) => StreamHandler::with_colors(colors),
                    None => StreamHandler::new(),
                };
                Box::new(handler.with_level(level.unwrap_or_default()))
            }
            BuiltinHandler::File { path, level } => Box::new(
                FileHandler::new(log_dir.join(path))?.with_level(level.unwrap_or_default()),
            ),
            BuiltinHandler::Json { path, level } => Box::new(
                JsonHandler::new(log_dir.join(path))?.with_level(level.unwrap_or_default()),
            ),
            BuiltinHandler::Fallback { level } => Box::new(
                self.fallback_handler(log_dir)
                    .with_level(level.unwrap_or_default()),
            ),
        };
        Ok(handler)
    }

    fn collect_processors(
        &mut self,
        renderer: &Arc<dyn ExceptionRenderer>,
    ) -> Result<PriorityRegistry<Box<dyn Processor>>> {
        let mut registry: PriorityRegistry<Box<dyn Processor>> = PriorityRegistry::new();

        if let Some(base_url) = &self.config.exception_base_url {
            registry.register(
                Box::new(ExceptionUrlProcessor::new(base_url, Arc::clone(renderer))),
                URL_PROCESSOR_PRIORITY,
            );
        }
        if self.config.use_priority_processor {
            registry.register(Box::new(PriorityProcessor::new()), PRIORITY_PROCESSOR_PRIORITY);
        }
        registry.register(
            Box::new(ExceptionProcessor::new(Arc::clone(renderer))),
            EXCEPTION_PROCESSOR_PRIORITY,
        );

        let definitions = std::mem::take(&mut self.config.processors);
        for (key, definition) in definitions {
            warn_on_malformed_priority("processor", &key);
            let processor: Box<dyn Processor> = match definition {
                ProcessorDefinition::Service { service } => {
                    self.processor_services.remove(&service).ok_or_else(|| {
                        LoggerError::config(
                            format!("processors.{}", key),
                            format!("unknown processor service '{}'", service),
                        )
                    })?
                }
                ProcessorDefinition::Builtin(BuiltinProcessor::Priority) => {
                    Box::new(PriorityProcessor::new())
                }
                ProcessorDefinition::Builtin(BuiltinProcessor::Tag { fields }) => {
                    Box::new(TagProcessor::new(fields))
                }
            };
            registry.register_keyed(&key, processor);
        }
        Ok(registry)
    }
}

/// Create `dir` if needed and make sure it accepts new files.
fn ensure_log_dir(dir: &Path) -> Result<()> {
    let display = dir.display().to_string();
    fs::create_dir_all(dir).map_err(|e| LoggerError::log_directory(display.as_str(), e))?;

    let metadata = fs::metadata(dir).map_err(|e| LoggerError::log_directory(display.as_str(), e))?;
    if metadata.permissions().readonly() {
        return Err(LoggerError::log_directory_not_writable(
            display,
            io::Error::new(io::ErrorKind::PermissionDenied, "directory is read-only"),
        ));
    }
    Ok(())
}

/// Keys that look like numbers but do not parse silently get priority 0
fn warn_on_malformed_priority(kind: &str, key: &str) {
    let looks_numeric = key
        .trim_start_matches(['-', '+'])
        .starts_with(|c: char| c.is_ascii_digit());
    if looks_numeric && parse_priority(key) == 0 && key.trim().parse::<f64>().is_err() {
        eprintln!(
            "[LOGGER WARNING] {} key '{}' is not a valid priority, using 0",
            kind, key
        );
    }
}

/// The assembled logging services.
pub struct LoggingContainer {
    logger: Arc<Logger>,
    adapter: DebuggerAdapter,
    renderer: Arc<dyn ExceptionRenderer>,
    log_dir: PathBuf,
}

impl LoggingContainer {
    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// Debugger logger to hand to an error screen or debugger
    pub fn adapter(&self) -> &DebuggerAdapter {
        &self.adapter
    }

    pub fn renderer(&self) -> &Arc<dyn ExceptionRenderer> {
        &self.renderer
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn channel(&self, name: impl Into<String>) -> Channel {
        self.logger.channel(name)
    }
}
