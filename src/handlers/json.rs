//! JSON handler for structured logging

use crate::core::{Handler, JsonFormatter, LogLevel, LogRecord, LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// JSON file handler for structured logging
///
/// Writes each record as a single-line JSON object (JSONL format).
/// Compatible with log aggregation tools like ELK, Loki, etc.
pub struct JsonHandler {
    writer: BufWriter<File>,
    level: LogLevel,
    formatter: JsonFormatter,
}

impl JsonHandler {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| LoggerError::write_failed(path.display().to_string(), e))?;

        Ok(Self {
            writer: BufWriter::new(file),
            level: LogLevel::Debug,
            formatter: JsonFormatter::new(),
        })
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }
}

impl Handler for JsonHandler {
    fn is_handling(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    fn handle(&mut self, record: &LogRecord) -> Result<()> {
        let json = self.formatter.format(record)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "json"
    }
}

impl Drop for JsonHandler {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}
