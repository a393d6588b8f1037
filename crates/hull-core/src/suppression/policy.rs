use std::collections::{HashMap, HashSet};

use crate::suppression::usage::SuppressionUsage;

/// Per-module sets of dependency names that are intentionally ignored.
///
/// During traversal the effective set for a module `m` expanded under the
/// declared root `r` is `suppressed(m)` when `m` is itself the root, and
/// `suppressed(m) ∪ suppressed(r)` otherwise.
#[derive(Debug, Clone, Default)]
pub struct SuppressionPolicy {
    by_module: HashMap<String, HashSet<String>>,
    update: bool,
}

impl SuppressionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// A policy in update mode: newly observed violations are recorded as
    /// suppression usages instead of failing the run.
    pub fn with_update(update: bool) -> Self {
        Self {
            by_module: HashMap::new(),
            update,
        }
    }

    pub fn update_mode(&self) -> bool {
        self.update
    }

    pub fn set_update_mode(&mut self, update: bool) {
        self.update = update;
    }

    /// Add a suppressed dependency for a module.
    pub fn insert(&mut self, module: impl Into<String>, dependency: impl Into<String>) -> &mut Self {
        self.by_module
            .entry(module.into())
            .or_default()
            .insert(dependency.into());
        self
    }

    /// Suppressed dependency names declared for a module, if any.
    pub fn suppressed_for(&self, module: &str) -> Option<&HashSet<String>> {
        self.by_module.get(module)
    }

    /// Whether `dependency` is suppressed for `module` expanded under
    /// `root`. The root's suppressions apply to every module of its chain;
    /// a root module consults only its own set.
    pub fn is_suppressed(&self, module: &str, root: Option<&str>, dependency: &str) -> bool {
        if self
            .suppressed_for(module)
            .is_some_and(|set| set.contains(dependency))
        {
            return true;
        }
        match root {
            Some(root) if root != module => self
                .suppressed_for(root)
                .is_some_and(|set| set.contains(dependency)),
            _ => false,
        }
    }

    /// Fold recorded usages back into the policy. Used to regenerate a
    /// suppression file after an update-mode run.
    pub fn merge_usages<'a>(&mut self, usages: impl IntoIterator<Item = &'a SuppressionUsage>) {
        for usage in usages {
            self.insert(usage.source.as_str(), usage.dependency.as_str());
        }
    }

    /// Iterate over all (module, suppressed dependencies) entries.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &HashSet<String>)> {
        self.by_module.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.by_module.is_empty()
    }
}
