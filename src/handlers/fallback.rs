//! Fallback handler writing one file per level or channel

use crate::core::{Handler, LineFormatter, LogLevel, LogRecord, LoggerError, Result};
use fs2::FileExt;
use regex::Regex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+").expect("valid line break pattern"));
static WRAPPED_LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\r?\n\s*").expect("valid line break pattern"));

/// Writes records to plain-text files in a log directory.
///
/// Records on the application channel go to `<level>.log` (for example
/// `error.log`) using [`DEFAULT_FORMAT`](Self::DEFAULT_FORMAT). Records on
/// any other channel go to `<channel>.log` using
/// [`PRIORITY_FORMAT`](Self::PRIORITY_FORMAT), which keeps the level name.
///
/// Every entry is appended under an exclusive file lock, so concurrent
/// writers never interleave within one entry. A failed append is returned
/// to the caller.
///
/// # Example
///
/// ```no_run
/// use channel_logger::prelude::*;
///
/// let logger = Logger::builder("app")
///     .processor(PriorityProcessor::new())
///     .handler(FallbackHandler::new("app", "/var/log/app"))
///     .build();
/// logger.error("payment failed", LogContext::new()).unwrap();
/// ```
pub struct FallbackHandler {
    app_name: String,
    log_dir: PathBuf,
    expand_newlines: bool,
    level: LogLevel,
    default_formatter: LineFormatter,
    priority_formatter: LineFormatter,
}

impl FallbackHandler {
    pub const DEFAULT_FORMAT: &'static str = "[%datetime%] %message% %context% %extra%";
    pub const PRIORITY_FORMAT: &'static str =
        "[%datetime%] %level_name%: %message% %context% %extra%";

    pub fn new(app_name: impl Into<String>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            app_name: app_name.into(),
            log_dir: log_dir.into(),
            expand_newlines: false,
            level: LogLevel::Debug,
            default_formatter: LineFormatter::new(Self::DEFAULT_FORMAT).with_inline_line_breaks(true),
            priority_formatter: LineFormatter::new(Self::PRIORITY_FORMAT)
                .with_inline_line_breaks(true),
        }
    }

    /// Write each line of a multi-line message as its own entry
    #[must_use]
    pub fn with_expand_newlines(mut self, expand: bool) -> Self {
        self.expand_newlines = expand;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Target file and formatter for a record
    fn route(&self, record: &LogRecord) -> (PathBuf, &LineFormatter) {
        let (name, formatter) = if record.channel == self.app_name {
            (record.level.to_str().to_lowercase(), &self.default_formatter)
        } else {
            (record.channel.clone(), &self.priority_formatter)
        };
        (
            self.log_dir.join(format!("{}.log", sanitize_file_name(&name))),
            formatter,
        )
    }

    /// The exact bytes appended for `record`
    pub fn format_entry(&self, record: &LogRecord) -> String {
        let (_, formatter) = self.route(record);

        if self.expand_newlines {
            let mut entry = String::new();
            let mut line_record = record.clone();
            for line in LINE_BREAKS.split(&record.message) {
                line_record.message = line.to_string();
                entry.push_str(formatter.format(&line_record).trim());
                entry.push('\n');
            }
            entry
        } else {
            let formatted = formatter.format(record);
            let mut entry = WRAPPED_LINE_BREAK
                .replace_all(formatted.trim(), " ")
                .into_owned();
            entry.push('\n');
            entry
        }
    }

    /// Path the record would be written to
    pub fn target_file(&self, record: &LogRecord) -> PathBuf {
        self.route(record).0
    }
}

impl Handler for FallbackHandler {
    fn is_handling(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    fn handle(&mut self, record: &LogRecord) -> Result<()> {
        let file = self.target_file(record);
        let entry = self.format_entry(record);
        append_locked(&file, entry.as_bytes())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "fallback"
    }
}

/// Append `bytes` to `path` in one write while holding an exclusive lock.
pub(crate) fn append_locked(path: &Path, bytes: &[u8]) -> Result<()> {
    let display = || path.display().to_string();

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LoggerError::write_failed(display(), e))?;

    FileExt::lock_exclusive(&file)
        .map_err(|e| LoggerError::file_lock(display(), e))?;
    let written = file.write_all(bytes);
    let unlocked = FileExt::unlock(&file);

    written.map_err(|e| LoggerError::write_failed(display(), e))?;
    unlocked.map_err(|e| LoggerError::file_lock(display(), e))
}

/// Lowercased file stem safe to join onto the log directory.
///
/// Characters outside `[a-z0-9._-]` become `_`; empty, `.` and `..` fall back
/// to `info`.
pub fn sanitize_file_name(name: &str) -> String {
    let sanitized: String = name
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    match sanitized.as_str() {
        "" | "." | ".." => "info".to_string(),
        _ => sanitized,
    }
}
