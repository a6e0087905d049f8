//! Handler implementations

pub mod fallback;
pub mod file;
pub mod json;
pub mod stream;

pub use fallback::{sanitize_file_name, FallbackHandler};
pub use file::FileHandler;
pub use json::JsonHandler;
pub use stream::StreamHandler;

// Re-export trait for convenience
pub use crate::core::Handler;
