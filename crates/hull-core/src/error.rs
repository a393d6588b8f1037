//! # Hull Core Errors
//!
//! Crate-level error type aggregating the per-subsystem errors. Library
//! code raises the specific subsystem error; binaries and integrations that
//! mix subsystems convert into [`Error`] through the `From` impls.

use thiserror::Error as ThisError;

use crate::descriptor::DescriptorError;
use crate::extraction::ExtractionError;
use crate::graph::error::GraphError;
use crate::resolver::ResolverError;
use crate::spec::SpecError;
use crate::suppression::SuppressionError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// Graph snapshot loading error
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    /// Descriptor reading or parsing error
    #[error("descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),

    /// Suppression file error
    #[error("suppression error: {0}")]
    Suppression(#[from] SuppressionError),

    /// Fatal resolution error
    #[error("resolver error: {0}")]
    Resolver(#[from] ResolverError),

    /// Content extraction error
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Request spec file error
    #[error("spec error: {0}")]
    Spec(#[from] SpecError),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

/// Result type alias for hull-core operations
pub type Result<T> = std::result::Result<T, Error>;
