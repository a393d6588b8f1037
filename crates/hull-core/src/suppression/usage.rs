use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::graph::ModuleName;

/// Why a suppression rule fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuppressionKind {
    /// A suppressed dependency with a content source elsewhere was skipped
    /// during traversal.
    SkippedContent,
    /// Update mode accepted a dependency owned by a plugin that is neither
    /// bundled nor allow-listed.
    MissingPluginOwner,
}

/// Record of a suppression rule firing. Accumulated, never consumed
/// destructively; records outlive the resolution call that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppressionUsage {
    /// Module whose suppression entry (or whose chain root's entry) matched.
    pub source: ModuleName,
    /// The dependency that was skipped or accepted.
    pub dependency: ModuleName,
    pub kind: SuppressionKind,
}

impl SuppressionUsage {
    pub fn new(
        source: impl Into<ModuleName>,
        dependency: impl Into<ModuleName>,
        kind: SuppressionKind,
    ) -> Self {
        Self {
            source: source.into(),
            dependency: dependency.into(),
            kind,
        }
    }
}

/// Append-only sink for suppression usages. Implementations must tolerate
/// being shared across tasks.
pub trait UsageSink: Send + Sync {
    fn record(&self, usage: SuppressionUsage);
}

/// Sink collecting usages into memory.
#[derive(Debug, Default)]
pub struct CollectingUsageSink {
    entries: Mutex<Vec<SuppressionUsage>>,
}

impl CollectingUsageSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn entries(&self) -> Vec<SuppressionUsage> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).is_empty()
    }
}

impl UsageSink for CollectingUsageSink {
    fn record(&self, usage: SuppressionUsage) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).push(usage);
    }
}
