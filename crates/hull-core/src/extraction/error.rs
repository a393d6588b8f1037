//! Errors raised by the content extraction pipeline.
//!
//! Only the main descriptor is load-bearing: a malformed or unreadable
//! include degrades to "absent" and is reported through the error sink
//! instead of surfacing here.

use crate::descriptor::DescriptorError;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("main descriptor '{path}' could not be parsed: {source}")]
    MainDescriptor {
        path: String,
        #[source]
        source: DescriptorError,
    },

    #[error("include '{path}' not found in any source")]
    IncludeNotFound { path: String },

    #[error("failed to read include '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("include resolution task failed: {0}")]
    Task(String),
}
