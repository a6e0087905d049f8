//! Record formatters
//!
//! - `LineFormatter`: `%placeholder%` templates, one line per record
//! - `JsonFormatter`: one JSON object per record

use super::log_record::LogRecord;
use super::timestamp::TimestampFormat;

/// Template-driven line formatter.
///
/// Recognized placeholders: `%datetime%`, `%channel%`, `%level_name%`,
/// `%level%`, `%message%`, `%context%` and `%extra%`. Context and extra are
/// rendered as compact JSON, `[]` when empty. Unknown placeholders are left
/// untouched.
///
/// # Example
///
/// ```
/// use channel_logger::core::{LineFormatter, LogLevel, LogRecord};
///
/// let formatter = LineFormatter::new("%level_name%: %message% %context%");
/// let record = LogRecord::new(LogLevel::Error, "disk full", "app");
/// assert_eq!(formatter.format(&record), "ERROR: disk full []");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFormatter {
    template: String,
    timestamp_format: TimestampFormat,
    allow_inline_line_breaks: bool,
}

impl LineFormatter {
    pub const DEFAULT_FORMAT: &'static str =
        "[%datetime%] %channel%.%level_name%: %message% %context% %extra%";

    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            timestamp_format: TimestampFormat::default(),
            allow_inline_line_breaks: false,
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Keep line breaks of the message instead of replacing them with spaces
    #[must_use]
    pub fn with_inline_line_breaks(mut self, allow: bool) -> Self {
        self.allow_inline_line_breaks = allow;
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn format(&self, record: &LogRecord) -> String {
        let mut output = String::with_capacity(self.template.len() + record.message.len() + 32);
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find('%') {
            output.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let replaced = after
                .find('%')
                .and_then(|end| self.placeholder(&after[..end], record).map(|v| (v, end)));

            match replaced {
                Some((value, end)) => {
                    output.push_str(&value);
                    rest = &after[end + 1..];
                }
                None => {
                    output.push('%');
                    rest = after;
                }
            }
        }

        output.push_str(rest);
        output
    }

    fn placeholder(&self, name: &str, record: &LogRecord) -> Option<String> {
        let value = match name {
            "datetime" => self.timestamp_format.format(&record.timestamp),
            "channel" => record.channel.clone(),
            "level_name" => record.level.to_str().to_string(),
            "level" => (record.level as u16).to_string(),
            "message" => self.message(&record.message),
            "context" => record.context.to_json_string(),
            "extra" => record.extra.to_json_string(),
            _ => return None,
        };
        Some(value)
    }

    fn message(&self, message: &str) -> String {
        if self.allow_inline_line_breaks {
            message.to_string()
        } else {
            message.replace("\r\n", " ").replace(['\r', '\n'], " ")
        }
    }
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FORMAT)
    }
}

/// Formats records as single-line JSON objects (JSONL).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonFormatter {
    timestamp_format: TimestampFormat,
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn to_json_value(&self, record: &LogRecord) -> serde_json::Value {
        let mut json_obj = serde_json::Map::new();
        json_obj.insert(
            "datetime".to_string(),
            serde_json::Value::String(self.timestamp_format.format(&record.timestamp)),
        );
        json_obj.insert(
            "channel".to_string(),
            serde_json::Value::String(record.channel.clone()),
        );
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::Number((record.level as u16).into()),
        );
        json_obj.insert(
            "level_name".to_string(),
            serde_json::Value::String(record.level.to_str().to_string()),
        );
        json_obj.insert(
            "message".to_string(),
            serde_json::Value::String(record.message.clone()),
        );
        json_obj.insert("context".to_string(), record.context.to_json_value());
        json_obj.insert("extra".to_string(), record.extra.to_json_value());
        serde_json::Value::Object(json_obj)
    }

    pub fn format(&self, record: &LogRecord) -> serde_json::Result<String> {
        let value = self.to_json_value(record);
        if self.pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        }
    }
}
