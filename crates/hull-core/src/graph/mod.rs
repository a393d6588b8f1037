//! # Hull Core Dependency Graph
//!
//! Read-only view over the plugin/module dependency graph that the closure
//! resolver traverses. The graph itself is produced elsewhere (by the build
//! system's registry loader); this module only defines what can be asked of
//! it.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`name`]**: Content module naming: slash-notation virtual modules,
//!   test-descriptor suffix handling, and build-target derivation.
//! - **[`node`]**: Value types handed out by graph queries: content module
//!   nodes, build targets, owning plugins, dependency edges and loading
//!   rules.
//! - **[`query`]**: The [`GraphQuery`] trait, every read the resolver
//!   performs, expressed as a pure function of graph plus arguments.
//! - **[`memory`]**: A serde-backed in-memory [`MemoryGraph`] used by the
//!   CLI and by tests.
//! - **[`error`]**: Graph loading errors ([`GraphError`](error::GraphError)).

pub mod error;
pub mod memory;
pub mod name;
pub mod node;
pub mod query;

pub use memory::MemoryGraph;
pub use name::{ModuleName, TEST_DESCRIPTOR_SUFFIX};
pub use node::{
    ContentModuleInfo, ContentModuleNode, DependencyEdge, DependencyScope, EdgeKind, LoadingRule,
    OwningPlugin, TargetNode,
};
pub use query::GraphQuery;

// Test module declaration
#[cfg(test)]
mod tests;
