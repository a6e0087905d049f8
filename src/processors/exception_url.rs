//! Public URL of exception reports

use super::exception::{annotatable_exception, base_name, TRACY_FILENAME_KEY};
use crate::core::{FieldValue, LogRecord, Processor, Result};
use crate::debugger::ExceptionRenderer;
use std::sync::Arc;

/// Context key for the report URL
pub const TRACY_URL_KEY: &str = "tracy_url";

/// Adds the public URL of a record's exception report.
///
/// Applies to the same records as
/// [`ExceptionProcessor`](super::ExceptionProcessor) apart from the
/// `tracy_filename` check: when that key is already set the URL is built
/// from it, otherwise the report name is derived from the renderer.
///
/// Register it after the exception processor so the URL names the report
/// that processor rendered.
pub struct ExceptionUrlProcessor {
    base_url: String,
    renderer: Arc<dyn ExceptionRenderer>,
}

impl ExceptionUrlProcessor {
    pub fn new(base_url: impl AsRef<str>, renderer: Arc<dyn ExceptionRenderer>) -> Self {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            renderer,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_handling(&self, record: &LogRecord) -> bool {
        annotatable_exception(record).is_some()
    }
}

impl Processor for ExceptionUrlProcessor {
    fn process(&self, record: &mut LogRecord) -> Result<()> {
        let Some(exception) = annotatable_exception(record) else {
            return Ok(());
        };

        let file_name = match record.context.get(TRACY_FILENAME_KEY).and_then(FieldValue::as_str) {
            Some(name) => name.to_string(),
            None => base_name(&self.renderer.exception_file(exception)),
        };

        record
            .context
            .add_field(TRACY_URL_KEY, format!("{}/{}", self.base_url, file_name));
        Ok(())
    }

    fn name(&self) -> &str {
        "exception_url"
    }
}
