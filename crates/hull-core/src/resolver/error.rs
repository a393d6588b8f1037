//! Fatal resolver errors.
//!
//! Everything here aborts the whole resolution before or during traversal.
//! Non-fatal, per-dependency problems are reported through the error sink
//! and never surface as `Err` from the engine.

use crate::descriptor::DescriptorError;
use crate::graph::ModuleName;

#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    /// The graph has no descriptor flag for explicitly declared modules.
    /// This is a configuration error in the graph build, not a property of
    /// the plugin being resolved.
    #[error(
        "dependency graph is missing descriptor flags for declared modules: {}",
        .modules.iter().map(ModuleName::as_str).collect::<Vec<_>>().join(", ")
    )]
    DescriptorFlagsIncomplete { modules: Vec<ModuleName> },

    /// The target product is not present in the graph.
    #[error("product '{0}' is not present in the dependency graph")]
    UnknownProduct(String),

    /// The descriptor side channel failed while analyzing a test
    /// descriptor module.
    #[error("descriptor side channel failed: {0}")]
    Descriptor(#[from] DescriptorError),
}
