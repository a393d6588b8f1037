use std::collections::HashSet;

use crate::graph::node::{ContentModuleNode, EdgeKind, TargetNode};

/// Read-only query facade over the plugin/module dependency graph.
///
/// The resolver never mutates the graph and the caller must not mutate it
/// while a resolution is running. Every method is a pure function of the
/// graph plus its arguments; nothing here captures traversal state.
pub trait GraphQuery: Send + Sync {
    /// Look up a content module node by name.
    fn content_module(&self, name: &str) -> Option<ContentModuleNode>;

    /// Look up a build target and its declared dependency edges. All scopes
    /// the graph exposes are returned; scope filtering, if any, happens
    /// inside the graph, not in callers.
    fn target(&self, name: &str) -> Option<TargetNode>;

    /// Whether a product node with this name exists.
    fn has_product(&self, name: &str) -> bool;

    /// Build targets of the plugins bundled into the given product.
    fn bundled_plugins(&self, product: &str) -> HashSet<String>;

    /// Whether a plugin-kind node with this name exists.
    fn is_plugin(&self, name: &str) -> bool;

    /// Whether an edge of the given kind exists between two graph nodes.
    fn has_edge(&self, kind: EdgeKind, from: &str, to: &str) -> bool;

    /// Whether the named module has any content source at all.
    ///
    /// This is a boundary predicate owned by the graph; the resolver treats
    /// it as opaque and never re-derives it from other queries.
    fn has_content_source(&self, name: &str) -> bool;
}
