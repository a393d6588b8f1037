//! Ownership validation.
//!
//! A discovered dependency owned by production plugins is resolvable only
//! if one of its owners ships with the target product (bundled, or treated
//! as bundled by the caller). Otherwise every non-allow-listed owner is a
//! violation: reported as a structured error, or, in update mode, recorded
//! as a suppression usage.

use std::collections::HashSet;

use crate::graph::{DependencyScope, ModuleName, OwningPlugin};
use crate::report::{ErrorSink, ResolutionError};
use crate::suppression::{SuppressionKind, SuppressionUsage, UsageSink};

/// Provenance of the dependency being validated.
#[derive(Debug, Clone, Copy)]
pub struct OwnershipContext<'a> {
    pub dependency: &'a ModuleName,
    pub declaring_module: &'a ModuleName,
    pub scope: Option<DependencyScope>,
    /// Whether the declaring module is itself part of the declared set.
    pub declared_in_spec: bool,
    /// The declared root whose expansion reached the declaring module.
    pub root_module: Option<&'a ModuleName>,
}

/// How a validation call was settled. Sinks carry the payload; the outcome
/// exists so callers and tests can branch without inspecting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipOutcome {
    /// An owner is bundled (or treated as bundled): nothing to do.
    Resolved,
    /// Every unresolved owner is allow-listed or is the plugin itself.
    Allowed,
    /// Update mode recorded a suppression usage instead of failing.
    Recorded,
    /// A structured ownership error was reported.
    Reported,
}

/// Decides whether production-plugin ownership of a discovered dependency
/// is acceptable for the plugin being built.
#[derive(Debug, Clone, Copy)]
pub struct OwnershipValidator {
    update_suppressions: bool,
}

impl OwnershipValidator {
    pub fn new(update_suppressions: bool) -> Self {
        Self {
            update_suppressions,
        }
    }

    /// Validate one dependency against its owning production plugins.
    ///
    /// `bundled` is the product's bundled-plugin target set,
    /// `additional_bundled` the caller's explicit extra bundles, and
    /// `allowed_missing` the effective allow-list already merged from the
    /// inherited, per-module and global sets.
    #[allow(clippy::too_many_arguments)]
    pub fn validate(
        &self,
        ctx: &OwnershipContext<'_>,
        owners: &[OwningPlugin],
        self_plugin_id: &str,
        bundled: &HashSet<String>,
        additional_bundled: &HashSet<String>,
        allowed_missing: &HashSet<String>,
        usages: &dyn UsageSink,
        errors: &dyn ErrorSink,
    ) -> OwnershipOutcome {
        let resolvable = owners
            .iter()
            .any(|o| bundled.contains(&o.target) || additional_bundled.contains(&o.target));
        if resolvable {
            return OwnershipOutcome::Resolved;
        }

        // Self-ownership is never an error.
        let disallowed: Vec<OwningPlugin> = owners
            .iter()
            .filter(|o| o.plugin_id != self_plugin_id)
            .filter(|o| !allowed_missing.contains(&o.plugin_id))
            .cloned()
            .collect();
        if disallowed.is_empty() {
            return OwnershipOutcome::Allowed;
        }

        if self.update_suppressions {
            let source = ctx.root_module.unwrap_or(ctx.declaring_module);
            usages.record(SuppressionUsage::new(
                source.clone(),
                ctx.dependency.clone(),
                SuppressionKind::MissingPluginOwner,
            ));
            return OwnershipOutcome::Recorded;
        }

        errors.report(ResolutionError::DependencyOwnership {
            dependency: ctx.dependency.clone(),
            declaring_module: ctx.declaring_module.clone(),
            scope: ctx.scope,
            declared_in_spec: ctx.declared_in_spec,
            root_module: ctx.root_module.cloned(),
            disallowed_owners: disallowed,
        });
        OwnershipOutcome::Reported
    }
}
