use std::collections::{HashMap, HashSet};

use crate::descriptor::TestDescriptorSource;
use crate::graph::{ContentModuleInfo, DependencyEdge, GraphQuery, ModuleName};
use crate::report::ErrorSink;
use crate::resolver::classify::{classify, Classification, ClassifyInput, SkipReason};
use crate::resolver::context::TraversalContext;
use crate::resolver::error::ResolverError;
use crate::resolver::ownership::{OwnershipContext, OwnershipValidator};
use crate::resolver::request::{DependencyChain, ResolveOutcome, ResolveRequest};
use crate::suppression::{SuppressionKind, SuppressionPolicy, SuppressionUsage, UsageSink};

/// The dependency-closure engine.
///
/// Breadth-first expansion of the declared content modules: every popped
/// module contributes the dependency edges of its build target plus, for
/// test descriptor modules, whatever its own descriptor declares. Each
/// discovered dependency is classified (see
/// [`classify`](crate::resolver::classify)) and either skipped, auto-added
/// and expanded further, or handed to the [`OwnershipValidator`].
///
/// The engine is sequential by contract: traversal state is mutated in
/// processing order, and that order decides which parent a twice-reachable
/// module is attributed to. Final set membership does not depend on it.
pub struct ClosureResolver<'a> {
    graph: &'a dyn GraphQuery,
    suppressions: &'a SuppressionPolicy,
    descriptors: Option<&'a dyn TestDescriptorSource>,
}

impl<'a> ClosureResolver<'a> {
    pub fn new(graph: &'a dyn GraphQuery, suppressions: &'a SuppressionPolicy) -> Self {
        Self {
            graph,
            suppressions,
            descriptors: None,
        }
    }

    /// Attach the descriptor side channel. Without one, test descriptor
    /// modules contribute only their build-target edges.
    pub fn with_descriptor_source(mut self, descriptors: &'a dyn TestDescriptorSource) -> Self {
        self.descriptors = Some(descriptors);
        self
    }

    /// Resolve the complete content-module set for the request.
    ///
    /// Fatal configuration problems return `Err`; per-dependency ownership
    /// violations flow through `errors` while traversal continues, and
    /// suppression rule firings flow through `usages`.
    pub async fn resolve(
        &self,
        request: &ResolveRequest,
        usages: &dyn UsageSink,
        errors: &dyn ErrorSink,
    ) -> Result<ResolveOutcome, ResolverError> {
        if !self.graph.has_product(&request.product) {
            return Err(ResolverError::UnknownProduct(request.product.clone()));
        }
        self.check_descriptor_flags(request)?;

        let bundled = self.graph.bundled_plugins(&request.product);
        // Either side may select update mode: the request flag or a policy
        // loaded from an update-mode run.
        let update = request.update_suppressions || self.suppressions.update_mode();
        let validator = OwnershipValidator::new(update);

        let mut ctx = TraversalContext::new();
        let mut modules: Vec<ContentModuleInfo> = Vec::new();
        for declared in &request.declared {
            if ctx.seed(&declared.name, declared.allowed_missing_plugin_ids.clone()) {
                modules.push(ContentModuleInfo::new(
                    declared.name.clone(),
                    declared.loading_rule,
                ));
            } else {
                log::warn!("module '{}' declared more than once", declared.name);
            }
        }
        let declared_count = modules.len();

        let mut chains: HashMap<ModuleName, DependencyChain> = HashMap::new();
        while let Some(module) = ctx.pop() {
            let root = ctx.root_of(module.as_str()).cloned();
            for edge in self.collect_edges(&module).await? {
                let dependency = edge.target.clone();
                let input = ClassifyInput {
                    suppressed: self.suppressions.is_suppressed(
                        module.as_str(),
                        root.as_ref().map(ModuleName::as_str),
                        dependency.as_str(),
                    ),
                    visited: ctx.is_visited(dependency.as_str()),
                };

                match classify(&dependency, input, self.graph, request) {
                    Classification::Skip(SkipReason::SuppressedContent) => {
                        log::debug!(
                            "suppressed dependency '{}' of '{}' skipped",
                            dependency,
                            module
                        );
                        usages.record(SuppressionUsage::new(
                            module.clone(),
                            dependency,
                            SuppressionKind::SkippedContent,
                        ));
                    }
                    Classification::Skip(reason) => {
                        log::debug!(
                            "dependency '{}' of '{}' skipped: {:?}",
                            dependency,
                            module,
                            reason
                        );
                    }
                    Classification::Validate(owners) => {
                        let allowed = self.effective_allowed_missing(
                            &ctx,
                            &module,
                            dependency.as_str(),
                            request,
                        );
                        validator.validate(
                            &OwnershipContext {
                                dependency: &dependency,
                                declaring_module: &module,
                                scope: edge.scope,
                                declared_in_spec: ctx.parent_of(module.as_str()).is_none(),
                                root_module: root.as_ref(),
                            },
                            &owners,
                            &request.plugin_id,
                            &bundled,
                            &request.additional_bundled_targets,
                            &allowed,
                            usages,
                            errors,
                        );
                    }
                    Classification::AutoAdd => {
                        ctx.inherit_allowed_missing(
                            &dependency,
                            &module,
                            request.allowed_missing_overrides.get(dependency.as_str()),
                        );
                        if ctx.admit(&dependency, &module) {
                            log::debug!(
                                "auto-adding '{}' discovered via '{}'",
                                dependency,
                                module
                            );
                            chains.insert(dependency.clone(), ctx.chain(&dependency));
                            modules.push(ContentModuleInfo::new(dependency, request.default_rule));
                        }
                    }
                }
            }
        }

        log::info!(
            "resolved {} content modules for '{}' ({} declared, {} auto-added)",
            modules.len(),
            request.plugin_id,
            declared_count,
            modules.len() - declared_count
        );
        Ok(ResolveOutcome {
            modules,
            chains,
            declared_count,
        })
    }

    /// Descriptor-flag completeness is a precondition of traversal: every
    /// explicitly declared module that is not slash-notation must be a
    /// graph content node with its descriptor flag set. Violations abort
    /// the run before BFS begins.
    fn check_descriptor_flags(&self, request: &ResolveRequest) -> Result<(), ResolverError> {
        let missing: Vec<ModuleName> = request
            .declared
            .iter()
            .map(|declared| &declared.name)
            .filter(|name| !name.is_slash_notation())
            .filter(|name| {
                !self
                    .graph
                    .content_module(name.as_str())
                    .is_some_and(|node| node.has_descriptor)
            })
            .cloned()
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ResolverError::DescriptorFlagsIncomplete { modules: missing })
        }
    }

    /// Outgoing dependency edges of a module: the build target's declared
    /// dependencies (all scopes the graph exposes), plus the descriptor's
    /// own scope-less declarations for test descriptor modules.
    async fn collect_edges(&self, module: &ModuleName) -> Result<Vec<DependencyEdge>, ResolverError> {
        let mut edges = Vec::new();
        if let Some(target) = module.target_name() {
            if let Some(node) = self.graph.target(target) {
                edges.extend(node.dependencies);
            }
        }
        if module.is_test_descriptor() {
            if let Some(source) = self.descriptors {
                if let Some(descriptor) = source.get_or_analyze(module.base_name()).await? {
                    edges.extend(
                        descriptor
                            .module_dependencies
                            .into_iter()
                            .map(DependencyEdge::new),
                    );
                }
            }
        }
        Ok(edges)
    }

    /// Effective allowed-missing plugin ids for a dependency: the set
    /// inherited by its declaring module, any per-dependency override, and
    /// the global allow-list.
    fn effective_allowed_missing(
        &self,
        ctx: &TraversalContext,
        module: &ModuleName,
        dependency: &str,
        request: &ResolveRequest,
    ) -> HashSet<String> {
        let mut allowed: HashSet<String> = ctx
            .allowed_missing_of(module.as_str())
            .map(|set| (**set).clone())
            .unwrap_or_default();
        if let Some(extra) = request.allowed_missing_overrides.get(dependency) {
            allowed.extend(extra.iter().cloned());
        }
        allowed.extend(request.allowed_missing_global.iter().cloned());
        allowed
    }
}
