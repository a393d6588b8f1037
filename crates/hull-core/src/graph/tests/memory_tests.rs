// crates/hull-core/src/graph/tests/memory_tests.rs
#![cfg(test)]

use crate::graph::memory::MemoryGraph;
use crate::graph::node::{DependencyEdge, DependencyScope, EdgeKind, LoadingRule, OwningPlugin};
use crate::graph::query::GraphQuery;

fn sample_graph() -> MemoryGraph {
    let mut graph = MemoryGraph::new();
    graph
        .add_module("app.core", LoadingRule::Required, true)
        .add_module("app.extras", LoadingRule::Optional, true)
        .add_owner("app.extras", OwningPlugin::new("extras.plugin", "com.example.extras"))
        .add_target(
            "app.core",
            vec![
                DependencyEdge::scoped("app.extras", DependencyScope::Compile),
                DependencyEdge::scoped("app.util", DependencyScope::Provided),
            ],
        )
        .add_plugin("extras.plugin")
        .add_product("DemoProduct", ["extras.plugin"]);
    graph
}

#[test]
fn test_content_module_lookup() {
    let graph = sample_graph();

    let node = graph.content_module("app.extras").unwrap();
    assert_eq!(node.loading_rule, LoadingRule::Optional);
    assert!(node.has_descriptor);
    assert_eq!(node.owning_plugins.len(), 1);
    assert_eq!(node.owning_plugins[0].plugin_id, "com.example.extras");

    assert!(graph.content_module("missing").is_none());
}

#[test]
fn test_target_exposes_all_scopes() {
    let graph = sample_graph();

    let target = graph.target("app.core").unwrap();
    assert_eq!(target.dependencies.len(), 2);
    assert_eq!(target.dependencies[0].scope, Some(DependencyScope::Compile));
    assert_eq!(target.dependencies[1].scope, Some(DependencyScope::Provided));
}

#[test]
fn test_bundles_edge() {
    let graph = sample_graph();

    assert!(graph.has_product("DemoProduct"));
    assert!(graph.has_edge(EdgeKind::Bundles, "DemoProduct", "extras.plugin"));
    assert!(!graph.has_edge(EdgeKind::Bundles, "DemoProduct", "other.plugin"));
    assert!(!graph.has_edge(EdgeKind::Bundles, "OtherProduct", "extras.plugin"));

    let bundled = graph.bundled_plugins("DemoProduct");
    assert!(bundled.contains("extras.plugin"));
}

#[test]
fn test_content_edge_matches_owner_by_id_or_target() {
    let graph = sample_graph();

    assert!(graph.has_edge(EdgeKind::Content, "com.example.extras", "app.extras"));
    assert!(graph.has_edge(EdgeKind::Content, "extras.plugin", "app.extras"));
    assert!(!graph.has_edge(EdgeKind::Content, "com.example.extras", "app.core"));
}

#[test]
fn test_content_source_predicate() {
    let mut graph = sample_graph();

    // Owned modules have a content source implicitly.
    assert!(graph.has_content_source("app.extras"));
    // Unowned modules do not, until marked.
    assert!(!graph.has_content_source("app.core"));
    graph.add_content_source("app.core");
    assert!(graph.has_content_source("app.core"));
}

#[test]
fn test_snapshot_deserialization() {
    let json = r#"{
        "modules": {
            "app.core": {"loading": "required", "has_descriptor": true},
            "app.extras": {
                "loading": "optional",
                "has_descriptor": true,
                "owners": [{"target": "extras.plugin", "plugin_id": "com.example.extras"}]
            }
        },
        "targets": {
            "app.core": [{"target": "app.extras", "scope": "compile"}]
        },
        "plugins": ["extras.plugin"],
        "products": {"DemoProduct": ["extras.plugin"]}
    }"#;

    let graph: MemoryGraph = serde_json::from_str(json).unwrap();
    assert!(graph.content_module("app.core").unwrap().loading_rule.is_strict());
    assert_eq!(graph.target("app.core").unwrap().dependencies.len(), 1);
    assert!(graph.has_edge(EdgeKind::Bundles, "DemoProduct", "extras.plugin"));
}
