use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use crate::descriptor::error::DescriptorError;
use crate::descriptor::model::TestDescriptor;
use crate::descriptor::parser::DescriptorParser;

/// Side channel answering "what does this test descriptor module's own
/// descriptor file declare as dependencies?".
///
/// The resolver holds this optionally: a resolution run without disk access
/// configured simply has no side channel, and test descriptor modules then
/// contribute only their build-target edges.
#[async_trait]
pub trait TestDescriptorSource: Send + Sync {
    /// Return the analyzed descriptor for the given base module, or `None`
    /// if no descriptor file exists for it.
    async fn get_or_analyze(
        &self,
        base_module: &str,
    ) -> Result<Option<TestDescriptor>, DescriptorError>;
}

/// Prebuilt descriptor map, for callers that analyzed descriptors up front
/// and for tests.
#[derive(Debug, Default)]
pub struct StaticDescriptorSource {
    descriptors: HashMap<String, TestDescriptor>,
}

impl StaticDescriptorSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        base_module: impl Into<String>,
        descriptor: TestDescriptor,
    ) -> &mut Self {
        self.descriptors.insert(base_module.into(), descriptor);
        self
    }
}

#[async_trait]
impl TestDescriptorSource for StaticDescriptorSource {
    async fn get_or_analyze(
        &self,
        base_module: &str,
    ) -> Result<Option<TestDescriptor>, DescriptorError> {
        Ok(self.descriptors.get(base_module).cloned())
    }
}

/// Descriptor source that reads `<root>/<base_module>.json` on first access
/// and memoizes the result, including misses.
pub struct AnalyzingDescriptorSource {
    root: PathBuf,
    parser: Arc<dyn DescriptorParser>,
    cache: Mutex<HashMap<String, Option<TestDescriptor>>>,
}

impl AnalyzingDescriptorSource {
    pub fn new(root: impl Into<PathBuf>, parser: Arc<dyn DescriptorParser>) -> Self {
        Self {
            root: root.into(),
            parser,
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn descriptor_path(&self, base_module: &str) -> PathBuf {
        self.root.join(format!("{base_module}.json"))
    }
}

#[async_trait]
impl TestDescriptorSource for AnalyzingDescriptorSource {
    async fn get_or_analyze(
        &self,
        base_module: &str,
    ) -> Result<Option<TestDescriptor>, DescriptorError> {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.get(base_module) {
            return Ok(cached.clone());
        }

        let path = self.descriptor_path(base_module);
        let analyzed = match fs::read(&path).await {
            Ok(bytes) => {
                let parsed = self.parser.parse(&bytes)?;
                Some(TestDescriptor::from(&parsed))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(source) => {
                return Err(DescriptorError::Io {
                    module: base_module.to_string(),
                    path: Some(path),
                    source,
                });
            }
        };

        log::debug!(
            "analyzed test descriptor for '{}': {}",
            base_module,
            if analyzed.is_some() { "found" } else { "absent" }
        );
        cache.insert(base_module.to_string(), analyzed.clone());
        Ok(analyzed)
    }
}
