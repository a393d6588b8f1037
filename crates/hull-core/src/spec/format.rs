use std::path::Path;

/// Supported request spec file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-spec" feature
    #[cfg(feature = "yaml-spec")]
    Yaml,
    /// TOML format (.toml) - requires "toml-spec" feature
    #[cfg(feature = "toml-spec")]
    Toml,
}

impl SpecFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            SpecFormat::Json => "json",
            #[cfg(feature = "yaml-spec")]
            SpecFormat::Yaml => "yaml",
            #[cfg(feature = "toml-spec")]
            SpecFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(SpecFormat::Json),
                #[cfg(feature = "yaml-spec")]
                "yaml" | "yml" => Some(SpecFormat::Yaml),
                #[cfg(feature = "toml-spec")]
                "toml" => Some(SpecFormat::Toml),
                _ => None,
            })
    }
}
