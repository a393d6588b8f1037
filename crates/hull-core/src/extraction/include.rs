use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::OnceCell;

use crate::extraction::error::ExtractionError;
use crate::report::{ErrorSink, ResolutionError};

/// One place include fragments can be loaded from.
///
/// `Ok(None)` means "not here, try the next source"; `Err` means the source
/// was reachable but failed.
#[async_trait]
pub trait IncludeSource: Send + Sync {
    async fn load(&self, path: &str) -> Result<Option<Vec<u8>>, ExtractionError>;
}

/// Loads includes from a directory root.
#[derive(Debug, Clone)]
pub struct DirectoryIncludeSource {
    root: PathBuf,
}

impl DirectoryIncludeSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl IncludeSource for DirectoryIncludeSource {
    async fn load(&self, path: &str) -> Result<Option<Vec<u8>>, ExtractionError> {
        match fs::read(self.root.join(path)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ExtractionError::Io {
                path: path.to_string(),
                source,
            }),
        }
    }
}

/// In-memory include source for prebuilt outputs and tests.
#[derive(Debug, Default, Clone)]
pub struct StaticIncludeSource {
    files: HashMap<String, Vec<u8>>,
}

impl StaticIncludeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> &mut Self {
        self.files.insert(path.into(), bytes.into());
        self
    }
}

#[async_trait]
impl IncludeSource for StaticIncludeSource {
    async fn load(&self, path: &str) -> Result<Option<Vec<u8>>, ExtractionError> {
        Ok(self.files.get(path).cloned())
    }
}

/// Tries a fixed priority list of sources; the first hit wins.
///
/// The intended order mirrors how plugin layouts look things up: local
/// module output first, then transitive module-dependency outputs, module
/// libraries, and finally a full-scan fallback.
pub struct ChainIncludeResolver {
    sources: Vec<Arc<dyn IncludeSource>>,
}

impl ChainIncludeResolver {
    pub fn new(sources: Vec<Arc<dyn IncludeSource>>) -> Self {
        Self { sources }
    }

    /// Resolve a path to its bytes. A path no source can provide is an
    /// error: extraction reports it and treats the include as absent.
    pub async fn resolve(&self, path: &str) -> Result<Vec<u8>, ExtractionError> {
        let mut failure: Option<ExtractionError> = None;
        for source in &self.sources {
            match source.load(path).await {
                Ok(Some(bytes)) => return Ok(bytes),
                Ok(None) => {}
                Err(e) => {
                    log::warn!("include source failed for '{path}': {e}");
                    failure = Some(e);
                }
            }
        }
        Err(failure.unwrap_or_else(|| ExtractionError::IncludeNotFound {
            path: path.to_string(),
        }))
    }
}

type CachedBytes = Option<Arc<[u8]>>;

/// Memoizes include resolution for one extraction run.
///
/// Safe under concurrent first access: requesters for the same path share
/// one cell, a single winner performs the resolution, and everyone else
/// awaits its result. Failures are cached as absent so a path is never
/// retried within a run.
#[derive(Default)]
pub struct IncludeCache {
    entries: Mutex<HashMap<String, Arc<OnceCell<CachedBytes>>>>,
}

impl IncludeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `path` through `resolver`, or reuse the memoized result.
    /// On failure the error is reported through `errors` (once, by the
    /// winning task) and `None` is returned now and on every later access.
    pub async fn get_or_resolve(
        &self,
        path: &str,
        referenced_from: &str,
        resolver: &ChainIncludeResolver,
        errors: &dyn ErrorSink,
    ) -> CachedBytes {
        let cell = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            entries.entry(path.to_string()).or_default().clone()
        };
        cell.get_or_init(|| async {
            match resolver.resolve(path).await {
                Ok(bytes) => Some(Arc::from(bytes)),
                Err(e) => {
                    errors.report(ResolutionError::IncludeResolution {
                        path: path.to_string(),
                        referenced_from: referenced_from.to_string(),
                        message: e.to_string(),
                    });
                    None
                }
            }
        })
        .await
        .clone()
    }
}
