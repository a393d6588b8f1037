//! # Hull Core Closure Resolver
//!
//! The dependency-closure engine. Starting from a test plugin's declared
//! content modules, it walks the build-dependency graph breadth-first,
//! classifies every discovered module, and decides whether to skip it, add
//! it to the plugin's content, or hand it to the ownership validator.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`request`]**: The declarative input (declared modules, product,
//!   allow-lists, deny-list, mode flags) and the resolution outcome.
//! - **[`context`]**: Mutable traversal state (visited set, parent map,
//!   root map, inherited allow-lists, FIFO queue) grouped into one value so
//!   the engine stays a function of (request, collaborators) -> outcome.
//! - **[`classify`]**: The ordered classification rules, evaluated with
//!   first-match-wins precedence, producing a tagged decision.
//! - **[`ownership`]**: Adjudicates discoveries owned by production
//!   plugins against bundling state and allow-lists.
//! - **[`engine`]**: The BFS loop tying everything together.
//! - **[`error`]**: Fatal precondition violations
//!   ([`ResolverError`](error::ResolverError)); non-fatal errors flow
//!   through the [`report`](crate::report) sinks instead.

pub mod classify;
pub mod context;
pub mod engine;
pub mod error;
pub mod ownership;
pub mod request;

pub use engine::ClosureResolver;
pub use error::ResolverError;
pub use ownership::{OwnershipOutcome, OwnershipValidator};
pub use request::{DeclaredModule, DependencyChain, ResolveOutcome, ResolveRequest};

// Test module declaration
#[cfg(test)]
mod tests;
