//! Processor implementations

pub mod exception;
pub mod exception_url;
pub mod priority;
pub mod tag;

pub use exception::{
    ExceptionProcessor, EXCEPTION_KEY, TRACY_CREATED_KEY, TRACY_FILENAME_KEY, TRACY_KEY,
};
pub use exception_url::{ExceptionUrlProcessor, TRACY_URL_KEY};
pub use priority::{PriorityProcessor, PRIORITY_KEY};
pub use tag::TagProcessor;

// Re-export trait for convenience
pub use crate::core::Processor;
