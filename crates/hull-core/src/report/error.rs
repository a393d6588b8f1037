use crate::graph::{DependencyScope, ModuleName, OwningPlugin};

/// Structured, non-fatal errors reported through an [`ErrorSink`](super::ErrorSink)
/// while a resolution or extraction run continues.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolutionError {
    /// A discovered dependency is owned by production plugins that are
    /// neither bundled in the target product nor allow-listed.
    #[error(
        "module '{dependency}' (declared by '{declaring_module}'{scope_suffix}) is owned by non-bundled plugins: {owners}",
        scope_suffix = .scope.map(|s| format!(", scope {s}")).unwrap_or_default(),
        owners = .disallowed_owners
            .iter()
            .map(|o| format!("{} ({})", o.plugin_id, o.target))
            .collect::<Vec<_>>()
            .join(", "),
    )]
    DependencyOwnership {
        dependency: ModuleName,
        declaring_module: ModuleName,
        scope: Option<DependencyScope>,
        /// Whether the declaring module was itself part of the original
        /// declared set (as opposed to auto-added).
        declared_in_spec: bool,
        /// The declared root whose expansion reached the declaring module.
        root_module: Option<ModuleName>,
        /// Owning plugins that are neither bundled nor allow-listed.
        disallowed_owners: Vec<OwningPlugin>,
    },

    /// An include path failed every fallback source during extraction.
    #[error("failed to resolve include '{path}' (referenced from '{referenced_from}'): {message}")]
    IncludeResolution {
        path: String,
        referenced_from: String,
        message: String,
    },
}
