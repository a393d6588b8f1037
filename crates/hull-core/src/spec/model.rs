use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::graph::{LoadingRule, ModuleName};
use crate::resolver::request::{DeclaredModule, ResolveRequest};
use crate::spec::error::SpecError;
use crate::spec::format::SpecFormat;

/// One declared content module in a spec file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredModuleSpec {
    pub name: ModuleName,
    #[serde(default)]
    pub loading: LoadingRule,
    #[serde(default)]
    pub allowed_missing_plugin_ids: Vec<String>,
}

/// On-disk shape of a resolve request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Target product name.
    pub product: String,
    /// Identity of the plugin being built.
    pub plugin_id: String,
    #[serde(default)]
    pub modules: Vec<DeclaredModuleSpec>,
    #[serde(default)]
    pub resolvable_elsewhere: Vec<String>,
    #[serde(default)]
    pub additional_bundled_targets: Vec<String>,
    #[serde(default)]
    pub allowed_missing_plugin_ids: Vec<String>,
    #[serde(default)]
    pub allowed_missing_overrides: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub deny_list: Vec<String>,
    #[serde(default)]
    pub default_loading: LoadingRule,
    #[serde(default)]
    pub update_suppressions: bool,
}

impl RequestSpec {
    /// Convert the on-disk shape into a resolve request.
    pub fn into_request(self) -> ResolveRequest {
        ResolveRequest {
            product: self.product,
            plugin_id: self.plugin_id,
            declared: self
                .modules
                .into_iter()
                .map(|spec| DeclaredModule {
                    name: spec.name,
                    loading_rule: spec.loading,
                    allowed_missing_plugin_ids: spec
                        .allowed_missing_plugin_ids
                        .into_iter()
                        .collect(),
                })
                .collect(),
            resolvable_elsewhere: self.resolvable_elsewhere.into_iter().collect(),
            additional_bundled_targets: self.additional_bundled_targets.into_iter().collect(),
            allowed_missing_overrides: self
                .allowed_missing_overrides
                .into_iter()
                .map(|(name, ids)| (name, ids.into_iter().collect()))
                .collect(),
            allowed_missing_global: self.allowed_missing_plugin_ids.into_iter().collect(),
            deny_list: self.deny_list.into_iter().collect(),
            default_rule: self.default_loading,
            update_suppressions: self.update_suppressions,
        }
    }
}

/// Load a request spec from disk, picking the format by file extension.
pub async fn load_request_spec(path: impl AsRef<Path>) -> Result<RequestSpec, SpecError> {
    let path = path.as_ref();
    let format = SpecFormat::from_path(path).ok_or_else(|| SpecError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let text = fs::read_to_string(path)
        .await
        .map_err(|source| SpecError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let parse_error = |message: String| SpecError::Parse {
        path: path.to_path_buf(),
        message,
    };
    match format {
        SpecFormat::Json => serde_json::from_str(&text).map_err(|e| parse_error(e.to_string())),
        #[cfg(feature = "yaml-spec")]
        SpecFormat::Yaml => serde_yaml::from_str(&text).map_err(|e| parse_error(e.to_string())),
        #[cfg(feature = "toml-spec")]
        SpecFormat::Toml => toml::from_str(&text).map_err(|e| parse_error(e.to_string())),
    }
}
