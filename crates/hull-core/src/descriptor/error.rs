//! Errors raised while reading or parsing descriptor files.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("descriptor is malformed: {message}")]
    Malformed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("failed to read descriptor for '{module}': {source}")]
    Io {
        module: String,
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },
}

impl DescriptorError {
    pub fn malformed(message: impl Into<String>) -> Self {
        DescriptorError::Malformed {
            message: message.into(),
            source: None,
        }
    }
}
