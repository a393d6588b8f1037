//! Dependency classification.
//!
//! Every dependency discovered during traversal runs through an ordered
//! rule list; the first matching rule wins and the remaining rules are not
//! evaluated. Keeping the rules in one flat function (instead of scattered
//! early returns inside the BFS loop) makes the precedence order testable
//! rule by rule.

use crate::graph::{EdgeKind, GraphQuery, ModuleName, OwningPlugin};
use crate::resolver::request::ResolveRequest;

/// Why a dependency was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Suppressed at the declaring module (or its root) while having a
    /// content source elsewhere; a usage record is emitted.
    SuppressedContent,
    /// Already processed under this traversal; nothing is re-recorded.
    AlreadyVisited,
    /// On the deny-list of names that must never be auto-added.
    Denied,
    /// Already resolvable via module sets, bundled production content or
    /// explicit additional bundled targets.
    ResolvableElsewhere,
    /// Content of a production plugin bundled into the target product.
    BundledContent,
    /// Slash-notation module, or its target is absent from the graph.
    NoBuildTarget,
    /// The name denotes a plugin, not a content module. Test plugins are
    /// self-contained and never depend on other plugins' content this way.
    PluginModule,
    /// No descriptor is present in the graph for this module.
    MissingDescriptor,
}

/// Decision for one discovered dependency.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Skip(SkipReason),
    /// Add to the plugin's content with the default loading rule and keep
    /// expanding.
    AutoAdd,
    /// Owned by the given production plugins; the ownership validator
    /// decides. Never traversed further, whatever the validator says.
    Validate(Vec<OwningPlugin>),
}

/// Facts about the dependency under classification that only the engine
/// knows (traversal state and suppression resolution happen there).
#[derive(Debug, Clone, Copy)]
pub struct ClassifyInput {
    /// Dependency is suppressed for the declaring module or its root.
    pub suppressed: bool,
    /// Dependency was already visited by this traversal.
    pub visited: bool,
}

/// Classify one discovered dependency. Rules apply in this exact order;
/// first match wins.
pub fn classify(
    dependency: &ModuleName,
    input: ClassifyInput,
    graph: &dyn GraphQuery,
    request: &ResolveRequest,
) -> Classification {
    let node = graph.content_module(dependency.as_str());

    // (a) Suppressed with a content source elsewhere. Strict modules are
    // always processed regardless of suppression.
    if input.suppressed && graph.has_content_source(dependency.as_str()) {
        let strict = node
            .as_ref()
            .is_some_and(|n| n.loading_rule.is_strict());
        if !strict {
            return Classification::Skip(SkipReason::SuppressedContent);
        }
    }

    // (b) Already visited.
    if input.visited {
        return Classification::Skip(SkipReason::AlreadyVisited);
    }

    // (c) Forbidden by policy.
    if request.deny_list.contains(dependency.as_str()) {
        return Classification::Skip(SkipReason::Denied);
    }

    // (d) Already resolvable via other mechanisms.
    if request.resolvable_elsewhere.contains(dependency.as_str()) {
        return Classification::Skip(SkipReason::ResolvableElsewhere);
    }

    // (e) Content of a plugin bundled into the target product.
    if let Some(node) = &node {
        let bundled = node.owning_plugins.iter().any(|owner| {
            !owner.is_test
                && graph.has_edge(EdgeKind::Bundles, &request.product, &owner.target)
        });
        if bundled {
            return Classification::Skip(SkipReason::BundledContent);
        }
    }

    // (f) No resolvable build target.
    let has_target = dependency
        .target_name()
        .is_some_and(|target| graph.target(target).is_some());
    if !has_target {
        return Classification::Skip(SkipReason::NoBuildTarget);
    }

    // (g) The name is a plugin, not a content module.
    if graph.is_plugin(dependency.as_str()) {
        return Classification::Skip(SkipReason::PluginModule);
    }

    // (h) Owned by production plugins: hand over to ownership validation.
    if let Some(node) = &node {
        let production_owners: Vec<OwningPlugin> = node
            .owning_plugins
            .iter()
            .filter(|owner| !owner.is_test)
            .cloned()
            .collect();
        if !production_owners.is_empty() {
            return Classification::Validate(production_owners);
        }
    }

    // (i) Orphan without a descriptor.
    let has_descriptor = node.as_ref().is_some_and(|n| n.has_descriptor);
    if !has_descriptor {
        return Classification::Skip(SkipReason::MissingDescriptor);
    }

    // (j) Orphan with a descriptor: bundle it.
    Classification::AutoAdd
}
