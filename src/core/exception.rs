//! Captured exceptions carried in record context

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// A throwable captured at the log call site.
///
/// Holds the error's type name, message, optional source location and the
/// rendered chain of its causes, so it can travel inside a record context
/// and be rendered to a report file later.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExceptionInfo {
    pub kind: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
}

impl ExceptionInfo {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            file: None,
            line: None,
            causes: Vec::new(),
        }
    }

    /// Capture a concrete error, walking its `source()` chain.
    pub fn from_error<E: Error + 'static>(error: &E) -> Self {
        let mut info = Self::new(std::any::type_name::<E>(), error.to_string());
        let mut source = error.source();
        while let Some(cause) = source {
            info.causes.push(cause.to_string());
            source = cause.source();
        }
        info
    }

    pub fn with_location(mut self, file: &str, line: u32) -> Self {
        self.file = Some(file.to_string());
        self.line = Some(line);
        self
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    /// Stable identity hash of this exception, as 16 lowercase hex digits.
    ///
    /// 64-bit FNV-1a over the kind, the message, the `file:line` location
    /// (empty when unknown) and each cause, every part followed by a `0xFF`
    /// byte. The value is the same across builds and platforms, so report
    /// names written by one release are found again by the next.
    pub fn identity_hash(&self) -> String {
        const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

        let location = self.location().unwrap_or_default();
        let parts = [self.kind.as_str(), self.message.as_str(), location.as_str()]
            .into_iter()
            .chain(self.causes.iter().map(String::as_str));

        let mut hash = FNV_OFFSET;
        for part in parts {
            for byte in part.bytes().chain(std::iter::once(0xFF)) {
                hash ^= u64::from(byte);
                hash = hash.wrapping_mul(FNV_PRIME);
            }
        }
        format!("{:016x}", hash)
    }

    /// `file:line` when a location is known
    pub fn location(&self) -> Option<String> {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => Some(format!("{}:{}", file, line)),
            (Some(file), None) => Some(file.clone()),
            _ => None,
        }
    }

    /// Normalized JSON shape used when the exception is printed in a context
    pub fn to_json_value(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        obj.insert("class".to_string(), self.kind.clone().into());
        obj.insert("message".to_string(), self.message.clone().into());
        if let Some(location) = self.location() {
            obj.insert("file".to_string(), location.into());
        }
        if !self.causes.is_empty() {
            obj.insert("previous".to_string(), self.causes.clone().into());
        }
        serde_json::Value::Object(obj)
    }
}

impl fmt::Display for ExceptionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(location) = self.location() {
            write!(f, " in {}", location)?;
        }
        for cause in &self.causes {
            write!(f, "  caused by {}", cause)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "payment gateway unreachable")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_from_error_collects_causes() {
        let err = Outer(std::io::Error::new(std::io::ErrorKind::TimedOut, "connect timed out"));
        let info = ExceptionInfo::from_error(&err);

        assert!(info.kind.ends_with("Outer"));
        assert_eq!(info.message, "payment gateway unreachable");
        assert_eq!(info.causes, vec!["connect timed out".to_string()]);
    }

    #[test]
    fn test_identity_hash_is_deterministic() {
        let a = ExceptionInfo::new("RuntimeError", "boom").with_location("src/main.rs", 10);
        let b = ExceptionInfo::new("RuntimeError", "boom").with_location("src/main.rs", 10);
        let c = ExceptionInfo::new("RuntimeError", "boom").with_location("src/main.rs", 11);

        assert_eq!(a.identity_hash(), b.identity_hash());
        assert_ne!(a.identity_hash(), c.identity_hash());
        assert_eq!(a.identity_hash().len(), 16);
    }

    #[test]
    fn test_identity_hash_known_value() {
        // fixed value: report names must survive toolchain upgrades
        let info = ExceptionInfo::new("RuntimeError", "boom").with_location("src/jobs.rs", 88);
        assert_eq!(info.identity_hash(), "090c3d2d967448cf");

        let with_cause = info.clone().with_cause("disk full");
        assert_ne!(with_cause.identity_hash(), info.identity_hash());
    }

    #[test]
    fn test_display() {
        let info = ExceptionInfo::new("RuntimeError", "boom")
            .with_location("src/main.rs", 10)
            .with_cause("disk full");
        assert_eq!(
            info.to_string(),
            "RuntimeError: boom in src/main.rs:10  caused by disk full"
        );
    }
}
