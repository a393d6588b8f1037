// crates/hull-core/src/tests/integration/resolve_flow_tests.rs
//! End-to-end flows across subsystems: extraction output seeding the
//! resolver, and update-mode runs regenerating a suppression file.
#![cfg(test)]

use std::sync::Arc;

use crate::descriptor::JsonDescriptorParser;
use crate::extraction::{ContentExtractionPipeline, IncludeSource, StaticIncludeSource};
use crate::graph::{DependencyEdge, LoadingRule, MemoryGraph, OwningPlugin};
use crate::report::CollectingErrorSink;
use crate::resolver::{ClosureResolver, ResolveRequest};
use crate::suppression::{load_suppressions, save_suppressions, CollectingUsageSink, SuppressionPolicy};

const PRODUCT: &str = "DemoProduct";
const PLUGIN: &str = "com.example.tests";

#[tokio::test]
async fn test_extraction_feeds_resolution() {
    // The plugin's descriptor declares app.core and, via an include,
    // app.extras. The graph then pulls in lib.orphan transitively.
    let main = br#"{
        "content": [{"name": "app.core", "loading": "required"}],
        "includes": ["extras.json"]
    }"#;
    let mut files = StaticIncludeSource::new();
    files.insert(
        "extras.json",
        br#"{"content": [{"name": "app.extras"}]}"#.to_vec(),
    );

    let sources: Vec<Arc<dyn IncludeSource>> = vec![Arc::new(files)];
    let pipeline =
        ContentExtractionPipeline::new(Arc::new(JsonDescriptorParser::new()), sources);
    let errors = Arc::new(CollectingErrorSink::new());
    let extracted = pipeline
        .extract("plugin.json", main, errors.clone())
        .await
        .unwrap();
    assert!(errors.is_empty());

    let mut graph = MemoryGraph::new();
    graph
        .add_module("app.core", LoadingRule::Required, true)
        .add_module("app.extras", LoadingRule::Optional, true)
        .add_module("lib.orphan", LoadingRule::Optional, true)
        .add_target("app.core", vec![DependencyEdge::new("lib.orphan")])
        .add_target("app.extras", vec![])
        .add_target("lib.orphan", vec![])
        .add_product(PRODUCT, Vec::<String>::new());

    let mut request = ResolveRequest::new(PRODUCT, PLUGIN);
    request.declared = extracted.to_declared_modules();

    let policy = SuppressionPolicy::new();
    let usages = CollectingUsageSink::new();
    let resolve_errors = CollectingErrorSink::new();
    let outcome = ClosureResolver::new(&graph, &policy)
        .resolve(&request, &usages, &resolve_errors)
        .await
        .unwrap();

    assert!(resolve_errors.is_empty());
    let names: Vec<&str> = outcome.modules.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["app.core", "app.extras", "lib.orphan"]);
    assert_eq!(outcome.declared_count, 2);
}

#[tokio::test]
async fn test_update_mode_regenerates_suppression_file() {
    let mut graph = MemoryGraph::new();
    graph
        .add_module("app.core", LoadingRule::Required, true)
        .add_module("lib.owned", LoadingRule::Optional, true)
        .add_owner("lib.owned", OwningPlugin::new("owner.plugin", "com.example.owner"))
        .add_target("app.core", vec![DependencyEdge::new("lib.owned")])
        .add_target("lib.owned", vec![])
        .add_product(PRODUCT, Vec::<String>::new());

    let mut request = ResolveRequest::new(PRODUCT, PLUGIN);
    request = request.declare(crate::resolver::DeclaredModule::new(
        "app.core",
        LoadingRule::Required,
    ));
    request.update_suppressions = true;

    let policy = SuppressionPolicy::new();
    let usages = CollectingUsageSink::new();
    let errors = CollectingErrorSink::new();
    ClosureResolver::new(&graph, &policy)
        .resolve(&request, &usages, &errors)
        .await
        .unwrap();
    assert!(errors.is_empty());

    // Fold the recorded usages into a fresh policy and round-trip it.
    let mut regenerated = SuppressionPolicy::new();
    let entries = usages.entries();
    regenerated.merge_usages(&entries);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("suppressions.json");
    save_suppressions(&path, &regenerated).await.unwrap();
    let reloaded = load_suppressions(&path).await.unwrap();
    assert!(reloaded.is_suppressed("app.core", None, "lib.owned"));

    // A re-run with the regenerated policy skips the dependency without
    // reporting an ownership error.
    request.update_suppressions = false;
    let usages2 = CollectingUsageSink::new();
    let errors2 = CollectingErrorSink::new();
    let outcome = ClosureResolver::new(&graph, &reloaded)
        .resolve(&request, &usages2, &errors2)
        .await
        .unwrap();
    assert!(errors2.is_empty());
    let names: Vec<&str> = outcome.modules.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["app.core"]);
    assert_eq!(usages2.entries().len(), 1);
}
