//! # Hull Core
//!
//! Computes the complete set of content modules a declaratively specified
//! test plugin must bundle. Starting from the modules a plugin spec
//! declares, the closure resolver walks the build-dependency graph
//! breadth-first, classifies every discovered module and either skips it,
//! auto-adds it to the plugin's content, or validates its plugin ownership
//! against bundling state, allow-lists and suppression rules.

pub mod descriptor;
pub mod error;
pub mod extraction;
pub mod graph;
pub mod report;
pub mod resolver;
pub mod spec;
pub mod suppression;

// Re-export key public types for easier use by the binary and integrations
pub use error::{Error, Result};
pub use extraction::{ContentExtractionPipeline, ExtractedContent};
pub use graph::{ContentModuleInfo, GraphQuery, LoadingRule, MemoryGraph, ModuleName};
pub use report::{CollectingErrorSink, ErrorSink, ResolutionError};
pub use resolver::{ClosureResolver, ResolveOutcome, ResolveRequest};
pub use spec::{load_request_spec, RequestSpec};
pub use suppression::{CollectingUsageSink, SuppressionPolicy, SuppressionUsage};

// Cross-subsystem test module declaration
#[cfg(test)]
mod tests;
