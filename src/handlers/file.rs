//! Single-file handler implementation

use crate::core::{Handler, LineFormatter, LogLevel, LogRecord, LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends every record to one file, buffered.
pub struct FileHandler {
    path: PathBuf,
    writer: BufWriter<File>,
    level: LogLevel,
    formatter: LineFormatter,
}

impl FileHandler {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::write_failed(path.display().to_string(), e))?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            level: LogLevel::Debug,
            formatter: LineFormatter::default(),
        })
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: LineFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Handler for FileHandler {
    fn is_handling(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    fn handle(&mut self, record: &LogRecord) -> Result<()> {
        let mut output = self.formatter.format(record);
        output.push('\n');

        self.writer
            .write_all(output.as_bytes())
            .map_err(|e| LoggerError::write_failed(self.path.display().to_string(), e))
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileHandler {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.writer.flush();
    }
}
