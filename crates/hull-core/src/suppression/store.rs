//! Suppression file persistence.
//!
//! The on-disk format is a JSON object mapping module names to sorted lists
//! of suppressed dependency names. Sorting keeps regenerated files stable
//! under version control.

use std::collections::BTreeMap;
use std::path::Path;

use tokio::fs;

use crate::suppression::error::SuppressionError;
use crate::suppression::policy::SuppressionPolicy;

/// Load a suppression policy from a JSON file.
pub async fn load_suppressions(path: impl AsRef<Path>) -> Result<SuppressionPolicy, SuppressionError> {
    let path = path.as_ref();
    let bytes = fs::read(path).await.map_err(|source| SuppressionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: BTreeMap<String, Vec<String>> =
        serde_json::from_slice(&bytes).map_err(|source| SuppressionError::Format {
            path: path.to_path_buf(),
            source,
        })?;

    let mut policy = SuppressionPolicy::new();
    for (module, dependencies) in raw {
        for dependency in dependencies {
            policy.insert(module.as_str(), dependency);
        }
    }
    Ok(policy)
}

/// Save a suppression policy as pretty-printed JSON with stable ordering.
pub async fn save_suppressions(
    path: impl AsRef<Path>,
    policy: &SuppressionPolicy,
) -> Result<(), SuppressionError> {
    let path = path.as_ref();
    let mut raw: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (module, dependencies) in policy.entries() {
        let mut sorted: Vec<&str> = dependencies.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        raw.insert(module.as_str(), sorted);
    }

    let json = serde_json::to_vec_pretty(&raw).map_err(|source| SuppressionError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).await.map_err(|source| SuppressionError::Io {
        path: path.to_path_buf(),
        source,
    })
}
