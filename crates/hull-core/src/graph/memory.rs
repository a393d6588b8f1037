use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::graph::error::GraphError;
use crate::graph::name::ModuleName;
use crate::graph::node::{
    ContentModuleNode, DependencyEdge, EdgeKind, LoadingRule, OwningPlugin, TargetNode,
};
use crate::graph::query::GraphQuery;

/// Per-module data stored in a [`MemoryGraph`].
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRecord {
    #[serde(default)]
    pub loading: LoadingRule,
    #[serde(default)]
    pub has_descriptor: bool,
    #[serde(default)]
    pub owners: Vec<OwningPlugin>,
}

/// In-memory dependency graph.
///
/// The production registry loader is a separate concern; this implementation
/// backs the CLI (via JSON snapshots) and tests (via the builder methods).
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemoryGraph {
    #[serde(default)]
    modules: HashMap<String, ModuleRecord>,
    #[serde(default)]
    targets: HashMap<String, Vec<DependencyEdge>>,
    #[serde(default)]
    plugins: HashSet<String>,
    /// Product name -> build targets of its bundled plugins.
    #[serde(default)]
    products: HashMap<String, HashSet<String>>,
    /// Modules known to have a content source beyond what the owner index
    /// records.
    #[serde(default)]
    content_sources: HashSet<String>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a graph snapshot from a JSON file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let path = path.as_ref();
        let bytes = fs::read(path).await.map_err(|source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| GraphError::Format {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Add a content module node.
    pub fn add_module(
        &mut self,
        name: impl Into<String>,
        loading: LoadingRule,
        has_descriptor: bool,
    ) -> &mut Self {
        let record = self.modules.entry(name.into()).or_default();
        record.loading = loading;
        record.has_descriptor = has_descriptor;
        self
    }

    /// Register a plugin as an owner of a content module. The module record
    /// is created if it does not exist yet.
    pub fn add_owner(&mut self, module: impl Into<String>, owner: OwningPlugin) -> &mut Self {
        self.modules.entry(module.into()).or_default().owners.push(owner);
        self
    }

    /// Add a build target with its declared dependency edges.
    pub fn add_target(
        &mut self,
        name: impl Into<String>,
        dependencies: Vec<DependencyEdge>,
    ) -> &mut Self {
        self.targets.insert(name.into(), dependencies);
        self
    }

    /// Add a plugin-kind node.
    pub fn add_plugin(&mut self, name: impl Into<String>) -> &mut Self {
        self.plugins.insert(name.into());
        self
    }

    /// Add a product and the build targets of its bundled plugins.
    pub fn add_product<I, S>(&mut self, name: impl Into<String>, bundled: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.products
            .insert(name.into(), bundled.into_iter().map(Into::into).collect());
        self
    }

    /// Mark a module as having a content source even though no owner is
    /// recorded for it.
    pub fn add_content_source(&mut self, name: impl Into<String>) -> &mut Self {
        self.content_sources.insert(name.into());
        self
    }
}

impl GraphQuery for MemoryGraph {
    fn content_module(&self, name: &str) -> Option<ContentModuleNode> {
        self.modules.get(name).map(|record| ContentModuleNode {
            name: ModuleName::new(name),
            loading_rule: record.loading,
            has_descriptor: record.has_descriptor,
            owning_plugins: record.owners.clone(),
        })
    }

    fn target(&self, name: &str) -> Option<TargetNode> {
        self.targets.get(name).map(|dependencies| TargetNode {
            name: name.to_string(),
            dependencies: dependencies.clone(),
        })
    }

    fn has_product(&self, name: &str) -> bool {
        self.products.contains_key(name)
    }

    fn bundled_plugins(&self, product: &str) -> HashSet<String> {
        self.products.get(product).cloned().unwrap_or_default()
    }

    fn is_plugin(&self, name: &str) -> bool {
        self.plugins.contains(name)
    }

    fn has_edge(&self, kind: EdgeKind, from: &str, to: &str) -> bool {
        match kind {
            EdgeKind::Bundles => self
                .products
                .get(from)
                .is_some_and(|bundled| bundled.contains(to)),
            EdgeKind::Content => self.modules.get(to).is_some_and(|record| {
                record
                    .owners
                    .iter()
                    .any(|owner| owner.plugin_id == from || owner.target == from)
            }),
        }
    }

    fn has_content_source(&self, name: &str) -> bool {
        self.content_sources.contains(name)
            || self
                .modules
                .get(name)
                .is_some_and(|record| !record.owners.is_empty())
    }
}
