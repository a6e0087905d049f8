//! Console handler implementation

use crate::core::{Handler, LineFormatter, LogLevel, LogRecord, Result};
#[cfg(feature = "console")]
use colored::Colorize;

/// Writes formatted lines to the terminal.
///
/// ERROR and above go to stderr, everything else to stdout.
pub struct StreamHandler {
    use_colors: bool,
    level: LogLevel,
    formatter: LineFormatter,
}

impl StreamHandler {
    pub fn new() -> Self {
        Self {
            use_colors: cfg!(feature = "console"),
            level: LogLevel::Debug,
            formatter: LineFormatter::default(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the line template for this handler
    ///
    /// # Example
    ///
    /// ```
    /// use channel_logger::handlers::StreamHandler;
    /// use channel_logger::core::LineFormatter;
    ///
    /// let handler = StreamHandler::new()
    ///     .with_formatter(LineFormatter::new("%level_name% %message%"));
    /// ```
    #[must_use]
    pub fn with_formatter(mut self, formatter: LineFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    fn format_line(&self, record: &LogRecord) -> String {
        let line = self.formatter.format(record);
        if !self.use_colors {
            return line;
        }
        self.colorize(record, line)
    }

    #[cfg(feature = "console")]
    fn colorize(&self, record: &LogRecord, line: String) -> String {
        line.color(record.level.color_code()).to_string()
    }

    #[cfg(not(feature = "console"))]
    fn colorize(&self, _record: &LogRecord, line: String) -> String {
        line
    }
}

impl Default for StreamHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for StreamHandler {
    fn is_handling(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    fn handle(&mut self, record: &LogRecord) -> Result<()> {
        let output = self.format_line(record);

        if record.level >= LogLevel::Error {
            eprintln!("{}", output);
        } else {
            println!("{}", output);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "stream"
    }
}
