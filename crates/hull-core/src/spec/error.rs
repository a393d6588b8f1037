//! Errors raised while loading request spec files.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("failed to read spec file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown or unsupported spec format for path: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("spec file '{path}' is malformed: {message}")]
    Parse { path: PathBuf, message: String },
}
