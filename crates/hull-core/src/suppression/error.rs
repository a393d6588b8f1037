//! Errors raised while loading or saving suppression files.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SuppressionError {
    #[error("failed to read suppression file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("suppression file '{path}' is malformed: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
