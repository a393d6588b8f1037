use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::name::ModuleName;

/// How a content module is loaded by the plugin it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadingRule {
    /// The plugin cannot work without this module.
    Required,
    /// Like [`Required`](LoadingRule::Required), but the module is also
    /// merged into the plugin's own classloader.
    Embedded,
    /// Loaded when its dependencies are available, silently skipped
    /// otherwise.
    Optional,
    /// Loaded only when explicitly requested.
    OnDemand,
}

impl LoadingRule {
    /// Strict modules (required or embedded) cannot be silently dropped;
    /// suppression-driven skips never apply to them.
    pub fn is_strict(&self) -> bool {
        matches!(self, LoadingRule::Required | LoadingRule::Embedded)
    }
}

impl Default for LoadingRule {
    fn default() -> Self {
        LoadingRule::Optional
    }
}

impl fmt::Display for LoadingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoadingRule::Required => "required",
            LoadingRule::Embedded => "embedded",
            LoadingRule::Optional => "optional",
            LoadingRule::OnDemand => "on-demand",
        };
        f.write_str(s)
    }
}

/// A content module paired with its loading rule: the final output unit of
/// resolution and the declaration unit of descriptor content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentModuleInfo {
    pub name: ModuleName,
    pub loading_rule: LoadingRule,
}

impl ContentModuleInfo {
    pub fn new(name: impl Into<ModuleName>, loading_rule: LoadingRule) -> Self {
        Self {
            name: name.into(),
            loading_rule,
        }
    }
}

/// A plugin owning a content module, found via the graph's reverse index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwningPlugin {
    /// Build target the plugin's main module compiles from.
    pub target: String,
    /// Plugin identity, distinct from any module name.
    pub plugin_id: String,
    /// Whether the owner is itself a test plugin.
    #[serde(default)]
    pub is_test: bool,
}

impl OwningPlugin {
    pub fn new(target: impl Into<String>, plugin_id: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            plugin_id: plugin_id.into(),
            is_test: false,
        }
    }

    pub fn test(target: impl Into<String>, plugin_id: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            plugin_id: plugin_id.into(),
            is_test: true,
        }
    }
}

/// Dependency scope declared on a build-target edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyScope {
    Compile,
    Runtime,
    Provided,
    Test,
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DependencyScope::Compile => "compile",
            DependencyScope::Runtime => "runtime",
            DependencyScope::Provided => "provided",
            DependencyScope::Test => "test",
        };
        f.write_str(s)
    }
}

/// An outgoing dependency discovered from a build target's declared
/// dependency list (scoped) or a test descriptor's own declarations
/// (scope-less).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub target: ModuleName,
    #[serde(default)]
    pub scope: Option<DependencyScope>,
}

impl DependencyEdge {
    pub fn new(target: impl Into<ModuleName>) -> Self {
        Self {
            target: target.into(),
            scope: None,
        }
    }

    pub fn scoped(target: impl Into<ModuleName>, scope: DependencyScope) -> Self {
        Self {
            target: target.into(),
            scope: Some(scope),
        }
    }
}

/// Snapshot of a content module node returned by graph queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentModuleNode {
    pub name: ModuleName,
    /// Effective loading rule recorded in the graph.
    pub loading_rule: LoadingRule,
    /// Whether an on-disk descriptor exists for this module.
    pub has_descriptor: bool,
    /// Plugins owning this module, per the graph's reverse index.
    pub owning_plugins: Vec<OwningPlugin>,
}

/// Snapshot of a build target (JPS-module equivalent) and its declared
/// dependency edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetNode {
    pub name: String,
    pub dependencies: Vec<DependencyEdge>,
}

/// Kinds of edges the graph can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Product bundles a plugin into its distribution.
    Bundles,
    /// Plugin carries a content module.
    Content,
}
