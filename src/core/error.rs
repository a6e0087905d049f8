//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Log directory missing and not creatable
    #[error("Log dir {path} cannot be created")]
    LogDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Log directory exists but does not accept new files
    #[error("Log dir {path} is not writable")]
    LogDirectoryNotWritable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Appending a formatted entry to a log file failed
    #[error("Unable to write to log file {path}. Is directory writable?")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File lock error
    #[error("Failed to lock or unlock '{path}'")]
    FileLockError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Rendering an exception report failed
    #[error("Failed to render exception report to '{path}': {message}")]
    RenderError { path: String, message: String },

    /// Operation not supported by this component
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a log directory error
    pub fn log_directory(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::LogDirectory {
            path: path.into(),
            source,
        }
    }

    /// Create a not-writable log directory error
    pub fn log_directory_not_writable(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::LogDirectoryNotWritable {
            path: path.into(),
            source,
        }
    }

    /// Create a write failure error
    pub fn write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::WriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a file lock error
    pub fn file_lock(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::FileLockError {
            path: path.into(),
            source,
        }
    }

    /// Create a render error
    pub fn render(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::RenderError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a not-supported error
    pub fn not_supported<S: Into<String>>(msg: S) -> Self {
        LoggerError::NotSupported(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("handlers", "unknown service 'mailer'");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = LoggerError::write_failed("/var/log/app/error.log", io_err);
        assert!(matches!(err, LoggerError::WriteFailed { .. }));

        let err = LoggerError::not_supported("render only");
        assert!(matches!(err, LoggerError::NotSupported(_)));
    }

    #[test]
    fn test_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = LoggerError::write_failed("/var/log/app/error.log", io_err);
        assert_eq!(
            err.to_string(),
            "Unable to write to log file /var/log/app/error.log. Is directory writable?"
        );

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = LoggerError::log_directory("/var/log/app", io_err);
        assert_eq!(err.to_string(), "Log dir /var/log/app cannot be created");

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = LoggerError::log_directory_not_writable("/var/log/app", io_err);
        assert_eq!(err.to_string(), "Log dir /var/log/app is not writable");

        let err = LoggerError::config("processors", "unknown service 'audit'");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for processors: unknown service 'audit'"
        );
    }

    #[test]
    fn test_file_lock_keeps_source() {
        use std::error::Error;

        let io_err = std::io::Error::new(std::io::ErrorKind::WouldBlock, "lock held elsewhere");
        let err = LoggerError::file_lock("/var/log/app/info.log", io_err);

        assert_eq!(err.to_string(), "Failed to lock or unlock '/var/log/app/info.log'");
        let source = err.source().expect("io source");
        assert_eq!(source.to_string(), "lock held elsewhere");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("creating log directory", "cannot create", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("creating log directory"));
        assert!(err.to_string().contains("cannot create"));
    }
}
