use std::collections::{HashMap, HashSet};

use crate::graph::{ContentModuleInfo, LoadingRule, ModuleName};

/// A content module the plugin spec declares explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredModule {
    pub name: ModuleName,
    pub loading_rule: LoadingRule,
    /// Plugin ids this module is explicitly allowed to be missing; inherited
    /// by everything discovered underneath it.
    pub allowed_missing_plugin_ids: HashSet<String>,
}

impl DeclaredModule {
    pub fn new(name: impl Into<ModuleName>, loading_rule: LoadingRule) -> Self {
        Self {
            name: name.into(),
            loading_rule,
            allowed_missing_plugin_ids: HashSet::new(),
        }
    }

    pub fn allow_missing(mut self, plugin_id: impl Into<String>) -> Self {
        self.allowed_missing_plugin_ids.insert(plugin_id.into());
        self
    }
}

/// Everything a single resolution run needs to know about the plugin being
/// built and the product it targets.
#[derive(Debug, Clone, Default)]
pub struct ResolveRequest {
    /// Target product name; must exist in the graph.
    pub product: String,
    /// Identity of the plugin under construction. Self-ownership of a
    /// discovered module is never an ownership error.
    pub plugin_id: String,
    /// Explicitly declared content modules, in declaration order.
    pub declared: Vec<DeclaredModule>,
    /// Names already resolvable via other mechanisms (module sets, bundled
    /// production-plugin content, explicit extra bundles). Never auto-added,
    /// never traversed.
    pub resolvable_elsewhere: HashSet<String>,
    /// Build targets treated as bundled in addition to what the graph
    /// records for the product.
    pub additional_bundled_targets: HashSet<String>,
    /// Per-dependency allowed-missing-plugin-id overrides, keyed by the
    /// dependency's module name.
    pub allowed_missing_overrides: HashMap<String, HashSet<String>>,
    /// Globally allowed-missing plugin ids.
    pub allowed_missing_global: HashSet<String>,
    /// Names that must never be auto-added, whatever else holds.
    pub deny_list: HashSet<String>,
    /// Loading rule assigned to auto-added modules.
    pub default_rule: LoadingRule,
    /// Record suppression usages instead of reporting ownership errors.
    pub update_suppressions: bool,
}

impl ResolveRequest {
    pub fn new(product: impl Into<String>, plugin_id: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            plugin_id: plugin_id.into(),
            default_rule: LoadingRule::Optional,
            ..Self::default()
        }
    }

    pub fn declare(mut self, module: DeclaredModule) -> Self {
        self.declared.push(module);
        self
    }
}

/// Root-first provenance chain of an auto-added module: the declared root
/// first, the module itself last, with every parent link in between.
pub type DependencyChain = Vec<ModuleName>;

/// Result of a resolution run.
///
/// `modules` holds the declared modules in declaration order followed by
/// the auto-added ones in discovery order; every name appears at most once.
/// Suppression usages and structured errors are delivered through the sinks
/// passed to [`ClosureResolver::resolve`](super::ClosureResolver::resolve).
#[derive(Debug, Clone, Default)]
pub struct ResolveOutcome {
    pub modules: Vec<ContentModuleInfo>,
    /// Provenance chains of auto-added modules, keyed by module name.
    pub chains: HashMap<ModuleName, DependencyChain>,
    /// Length of the declared prefix of `modules`.
    pub declared_count: usize,
}

impl ResolveOutcome {
    /// The auto-added subset of `modules`, i.e. everything past the
    /// declared prefix.
    pub fn auto_added(&self) -> &[ContentModuleInfo] {
        &self.modules[self.declared_count.min(self.modules.len())..]
    }
}
