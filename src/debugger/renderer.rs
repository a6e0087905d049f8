//! Exception report files

use super::{DebugMessage, DebuggerLogger};
use crate::core::{ExceptionInfo, LoggerError, Result};
use chrono::{DateTime, Utc};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Derives report file names for exceptions and renders reports to them.
pub trait ExceptionRenderer: Send + Sync {
    /// Deterministic report path for `exception`
    fn exception_file(&self, exception: &ExceptionInfo) -> PathBuf;

    /// Write the report for `exception` to `file`, returning the path written
    fn render_to_file(&self, exception: &ExceptionInfo, file: &Path) -> Result<PathBuf>;
}

/// Plain-text exception reports stored in one directory.
///
/// Report names look like `exception--2025-01-08--10-30--<hash>.txt`, where
/// the hash identifies the exception. An existing report with the same hash
/// is reused regardless of its timestamp part, so one failure yields one
/// report.
///
/// This type only renders. Using it as a general [`DebuggerLogger`] fails
/// with [`LoggerError::NotSupported`].
#[derive(Debug, Clone)]
pub struct ExceptionFileRenderer {
    directory: PathBuf,
}

impl ExceptionFileRenderer {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn find_existing(&self, hash: &str) -> Option<PathBuf> {
        let entries = fs::read_dir(&self.directory).ok()?;
        entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .find(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with("exception--") && name.contains(hash))
            })
    }

    fn file_name(now: &DateTime<Utc>, hash: &str) -> String {
        format!("exception--{}--{}.txt", now.format("%Y-%m-%d--%H-%M"), hash)
    }

    fn report(exception: &ExceptionInfo, now: &DateTime<Utc>) -> String {
        let mut report = format!("{}: {}\n", exception.kind, exception.message);
        if let Some(location) = exception.location() {
            report.push_str(&format!("in {}\n", location));
        }
        report.push_str(&format!("rendered at {}\n", now.to_rfc3339()));
        for (depth, cause) in exception.causes.iter().enumerate() {
            report.push_str(&format!("caused by #{}: {}\n", depth + 1, cause));
        }
        report
    }
}

impl ExceptionRenderer for ExceptionFileRenderer {
    fn exception_file(&self, exception: &ExceptionInfo) -> PathBuf {
        let hash = exception.identity_hash();
        self.find_existing(&hash)
            .unwrap_or_else(|| self.directory.join(Self::file_name(&Utc::now(), &hash)))
    }

    fn render_to_file(&self, exception: &ExceptionInfo, file: &Path) -> Result<PathBuf> {
        let mut handle = match OpenOptions::new().write(true).create_new(true).open(file) {
            Ok(handle) => handle,
            // another process rendered it first
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(file.to_path_buf()),
            Err(e) => {
                return Err(LoggerError::render(file.display().to_string(), e.to_string()));
            }
        };

        handle
            .write_all(Self::report(exception, &Utc::now()).as_bytes())
            .map_err(|e| LoggerError::render(file.display().to_string(), e.to_string()))?;
        Ok(file.to_path_buf())
    }
}

impl DebuggerLogger for ExceptionFileRenderer {
    fn log(&self, _message: DebugMessage, _priority: &str) -> Result<Option<PathBuf>> {
        Err(LoggerError::not_supported(
            "ExceptionFileRenderer only renders exceptions",
        ))
    }
}
