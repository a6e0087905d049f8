//! Exception report annotation

use crate::core::{ExceptionInfo, FieldValue, LogRecord, Processor, Result};
use crate::debugger::ExceptionRenderer;
use std::path::Path;
use std::sync::Arc;

/// Context key holding the captured exception
pub const EXCEPTION_KEY: &str = "exception";
/// Opt-out marker: records carrying it are never annotated
pub const TRACY_KEY: &str = "tracy";
/// Base name of the exception report
pub const TRACY_FILENAME_KEY: &str = "tracy_filename";
/// Set to `true` when this call rendered the report
pub const TRACY_CREATED_KEY: &str = "tracy_created";

/// The exception both annotating processors act on, if any.
///
/// `None` when the context has no exception value or carries the `tracy`
/// opt-out marker.
pub(crate) fn annotatable_exception(record: &LogRecord) -> Option<&ExceptionInfo> {
    if record.context.is_set(TRACY_KEY) {
        return None;
    }
    record
        .context
        .get(EXCEPTION_KEY)
        .and_then(FieldValue::as_exception)
}

pub(crate) fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Renders the exception in a record's context to a report file and
/// records the report name in the context.
///
/// Rendering happens at most once per report: when the file already exists
/// only `tracy_filename` is set.
pub struct ExceptionProcessor {
    renderer: Arc<dyn ExceptionRenderer>,
}

impl ExceptionProcessor {
    pub fn new(renderer: Arc<dyn ExceptionRenderer>) -> Self {
        Self { renderer }
    }

    pub fn is_handling(&self, record: &LogRecord) -> bool {
        annotatable_exception(record).is_some() && !record.context.is_set(TRACY_FILENAME_KEY)
    }
}

impl Processor for ExceptionProcessor {
    fn process(&self, record: &mut LogRecord) -> Result<()> {
        if !self.is_handling(record) {
            return Ok(());
        }
        let Some(exception) = annotatable_exception(record).cloned() else {
            return Ok(());
        };

        let file = self.renderer.exception_file(&exception);
        record
            .context
            .add_field(TRACY_FILENAME_KEY, base_name(&file));

        if !file.exists() {
            self.renderer.render_to_file(&exception, &file)?;
            record.context.add_field(TRACY_CREATED_KEY, true);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "exception"
    }
}
