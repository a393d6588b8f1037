use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::descriptor::DescriptorParser;
use crate::extraction::error::ExtractionError;
use crate::extraction::include::{ChainIncludeResolver, IncludeCache, IncludeSource};
use crate::graph::{ContentModuleInfo, ModuleName};
use crate::report::{ErrorSink, ResolutionError};
use crate::resolver::request::DeclaredModule;

/// What one descriptor file contributed, in processing order: the main
/// file first, then each transitively included file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContribution {
    pub path: String,
    pub module_dependencies: Vec<ModuleName>,
    pub plugin_dependencies: Vec<String>,
}

/// Aggregated output of one extraction run.
#[derive(Debug, Default, Clone)]
pub struct ExtractedContent {
    /// Declared content modules with loading rules, first declaration wins.
    pub content_modules: Vec<ContentModuleInfo>,
    /// Union of module dependencies across all processed files.
    pub module_dependencies: BTreeSet<ModuleName>,
    /// Union of plugin dependencies across all processed files.
    pub plugin_dependencies: BTreeSet<String>,
    /// Plugin aliases in declaration order.
    pub aliases: Vec<String>,
    /// Per-file dependency breakdown.
    pub files: Vec<FileContribution>,
}

impl ExtractedContent {
    /// The content modules as declared modules, ready to seed a resolve
    /// request.
    pub fn to_declared_modules(&self) -> Vec<DeclaredModule> {
        self.content_modules
            .iter()
            .map(|info| DeclaredModule::new(info.name.clone(), info.loading_rule))
            .collect()
    }
}

struct PendingFile {
    path: String,
    referenced_from: String,
    buffer: Arc<[u8]>,
}

/// Breadth-first, level-parallel extraction over include directives.
///
/// Each level is parsed synchronously, then all not-yet-seen include paths
/// referenced at that level are resolved concurrently behind a single
/// barrier. A failing include is reported and treated as absent without
/// cancelling its siblings. Traversal stops at the first level that yields
/// no new paths.
pub struct ContentExtractionPipeline {
    parser: Arc<dyn DescriptorParser>,
    resolver: Arc<ChainIncludeResolver>,
}

impl ContentExtractionPipeline {
    pub fn new(parser: Arc<dyn DescriptorParser>, sources: Vec<Arc<dyn IncludeSource>>) -> Self {
        Self {
            parser,
            resolver: Arc::new(ChainIncludeResolver::new(sources)),
        }
    }

    /// Extract content from a plugin's main descriptor.
    ///
    /// Only a malformed main descriptor is fatal; include problems flow
    /// through `errors` and degrade the affected file to absent.
    pub async fn extract(
        &self,
        main_path: &str,
        main_bytes: &[u8],
        errors: Arc<dyn ErrorSink>,
    ) -> Result<ExtractedContent, ExtractionError> {
        let cache = Arc::new(IncludeCache::new());
        let mut extracted = ExtractedContent::default();
        let mut seen_modules: HashSet<ModuleName> = HashSet::new();
        let mut seen_aliases: HashSet<String> = HashSet::new();
        // Paths already resolved or scheduled; the main path counts so a
        // fragment referencing it back does not re-parse it.
        let mut requested: HashSet<String> = HashSet::new();
        requested.insert(main_path.to_string());

        let mut level = vec![PendingFile {
            path: main_path.to_string(),
            referenced_from: main_path.to_string(),
            buffer: Arc::from(main_bytes.to_vec()),
        }];
        let mut depth = 0usize;

        while !level.is_empty() {
            // Parse the whole level synchronously; parsing is pure and
            // order-independent.
            let mut discovered: Vec<(String, String)> = Vec::new();
            for file in level.drain(..) {
                let parsed = match self.parser.parse(&file.buffer) {
                    Ok(parsed) => parsed,
                    Err(source) => {
                        if depth == 0 {
                            return Err(ExtractionError::MainDescriptor {
                                path: file.path,
                                source,
                            });
                        }
                        errors.report(ResolutionError::IncludeResolution {
                            path: file.path.clone(),
                            referenced_from: file.referenced_from.clone(),
                            message: source.to_string(),
                        });
                        continue;
                    }
                };

                for entry in parsed.content {
                    if seen_modules.insert(entry.name.clone()) {
                        extracted
                            .content_modules
                            .push(ContentModuleInfo::new(entry.name, entry.loading));
                    }
                }
                extracted
                    .module_dependencies
                    .extend(parsed.dependencies.modules.iter().cloned());
                extracted
                    .plugin_dependencies
                    .extend(parsed.dependencies.plugins.iter().cloned());
                for alias in parsed.aliases {
                    if seen_aliases.insert(alias.clone()) {
                        extracted.aliases.push(alias);
                    }
                }
                extracted.files.push(FileContribution {
                    path: file.path.clone(),
                    module_dependencies: parsed.dependencies.modules,
                    plugin_dependencies: parsed.dependencies.plugins,
                });

                for include in parsed.includes {
                    if requested.insert(include.clone()) {
                        discovered.push((include, file.path.clone()));
                    }
                }
            }

            // Fan out: resolve all new includes of this level concurrently,
            // then wait for the whole level before parsing again.
            let mut handles = Vec::with_capacity(discovered.len());
            for (include, referenced_from) in discovered {
                let cache = Arc::clone(&cache);
                let resolver = Arc::clone(&self.resolver);
                let errors = Arc::clone(&errors);
                let task_include = include.clone();
                let task_referer = referenced_from.clone();
                handles.push((
                    include,
                    referenced_from,
                    tokio::spawn(async move {
                        cache
                            .get_or_resolve(&task_include, &task_referer, &resolver, &*errors)
                            .await
                    }),
                ));
            }
            for (include, referenced_from, handle) in handles {
                match handle.await {
                    Ok(Some(buffer)) => level.push(PendingFile {
                        path: include,
                        referenced_from,
                        buffer,
                    }),
                    // Failure was reported by the resolving task already.
                    Ok(None) => {}
                    Err(e) => return Err(ExtractionError::Task(e.to_string())),
                }
            }
            depth += 1;
        }

        log::debug!(
            "extracted {} content modules from '{}' across {} files",
            extracted.content_modules.len(),
            main_path,
            extracted.files.len()
        );
        Ok(extracted)
    }
}
