use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::{error, info};

use hull_core::descriptor::JsonDescriptorParser;
use hull_core::extraction::{ContentExtractionPipeline, DirectoryIncludeSource, IncludeSource};
use hull_core::graph::MemoryGraph;
use hull_core::report::CollectingErrorSink;
use hull_core::resolver::ClosureResolver;
use hull_core::spec::load_request_spec;
use hull_core::suppression::{
    load_suppressions, save_suppressions, CollectingUsageSink, SuppressionPolicy,
};
use hull_core::{Error, Result};

/// Hull: content-module closure resolution for test plugins
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Verbose logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve the content-module closure of a plugin spec
    Resolve {
        /// Path to the dependency graph snapshot (JSON)
        #[arg(long)]
        graph: PathBuf,
        /// Path to the request spec (json/toml/yaml)
        #[arg(long)]
        spec: PathBuf,
        /// Path to a suppression file (JSON)
        #[arg(long)]
        suppressions: Option<PathBuf>,
        /// Record new suppressions instead of failing on unresolved owners
        #[arg(long)]
        update_suppressions: bool,
        /// Print the provenance chain of every auto-added module
        #[arg(long)]
        chains: bool,
    },
    /// Extract declared content from a plugin descriptor
    Extract {
        /// Path to the plugin's main descriptor (JSON)
        #[arg(long)]
        descriptor: PathBuf,
        /// Directories include fragments are resolved from, in priority order
        #[arg(long = "include-dir")]
        include_dirs: Vec<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    // Bridge the `log` macros used by hull-core into tracing.
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize log bridge: {e}");
    }
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new(if verbose { "debug" } else { "info" })
        });
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install tracing subscriber: {e}");
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let result = match args.command {
        Commands::Resolve {
            graph,
            spec,
            suppressions,
            update_suppressions,
            chains,
        } => run_resolve(graph, spec, suppressions, update_suppressions, chains).await,
        Commands::Extract {
            descriptor,
            include_dirs,
        } => run_extract(descriptor, include_dirs).await,
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run_resolve(
    graph_path: PathBuf,
    spec_path: PathBuf,
    suppressions_path: Option<PathBuf>,
    update_suppressions: bool,
    chains: bool,
) -> Result<ExitCode> {
    let graph = MemoryGraph::load(&graph_path).await?;
    let spec = load_request_spec(&spec_path).await?;
    let policy = match &suppressions_path {
        Some(path) => load_suppressions(path).await?,
        None => SuppressionPolicy::new(),
    };

    let mut request = spec.into_request();
    if update_suppressions {
        request.update_suppressions = true;
    }
    info!(
        "resolving '{}' for product '{}' ({} declared modules)",
        request.plugin_id,
        request.product,
        request.declared.len()
    );

    let usages = CollectingUsageSink::new();
    let errors = CollectingErrorSink::new();
    let outcome = ClosureResolver::new(&graph, &policy)
        .resolve(&request, &usages, &errors)
        .await?;

    println!(
        "{} content modules ({} declared, {} auto-added)",
        outcome.modules.len(),
        outcome.declared_count,
        outcome.modules.len() - outcome.declared_count
    );
    for (index, module) in outcome.modules.iter().enumerate() {
        let marker = if index < outcome.declared_count { ' ' } else { '+' };
        println!("{marker} {} ({})", module.name, module.loading_rule);
    }

    if chains {
        for module in outcome.auto_added() {
            if let Some(chain) = outcome.chains.get(&module.name) {
                let rendered: Vec<&str> = chain.iter().map(|name| name.as_str()).collect();
                println!("chain: {}", rendered.join(" -> "));
            }
        }
    }

    let recorded = usages.entries();
    if !recorded.is_empty() {
        println!("{} suppression usages recorded", recorded.len());
        for usage in &recorded {
            println!("  {} suppresses {}", usage.source, usage.dependency);
        }
        if update_suppressions {
            if let Some(path) = &suppressions_path {
                let mut updated = policy.clone();
                updated.merge_usages(&recorded);
                save_suppressions(path, &updated).await?;
                println!("suppression file updated: {}", path.display());
            }
        }
    }

    let reported = errors.entries();
    if reported.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        for e in &reported {
            eprintln!("error: {e}");
        }
        eprintln!("{} dependency errors", reported.len());
        Ok(ExitCode::from(2))
    }
}

async fn run_extract(descriptor: PathBuf, include_dirs: Vec<PathBuf>) -> Result<ExitCode> {
    let bytes = tokio::fs::read(&descriptor)
        .await
        .map_err(|e| Error::Other(format!("failed to read '{}': {e}", descriptor.display())))?;
    let main_path = descriptor
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| descriptor.display().to_string());

    let sources: Vec<Arc<dyn IncludeSource>> = include_dirs
        .into_iter()
        .map(|dir| Arc::new(DirectoryIncludeSource::new(dir)) as Arc<dyn IncludeSource>)
        .collect();
    let pipeline = ContentExtractionPipeline::new(Arc::new(JsonDescriptorParser::new()), sources);

    let errors = Arc::new(CollectingErrorSink::new());
    let extracted = pipeline.extract(&main_path, &bytes, errors.clone()).await?;

    println!(
        "{} content modules across {} files",
        extracted.content_modules.len(),
        extracted.files.len()
    );
    for module in &extracted.content_modules {
        println!("  {} ({})", module.name, module.loading_rule);
    }
    if !extracted.module_dependencies.is_empty() {
        let deps: Vec<&str> = extracted
            .module_dependencies
            .iter()
            .map(|name| name.as_str())
            .collect();
        println!("module dependencies: {}", deps.join(", "));
    }
    if !extracted.plugin_dependencies.is_empty() {
        let deps: Vec<&str> = extracted
            .plugin_dependencies
            .iter()
            .map(String::as_str)
            .collect();
        println!("plugin dependencies: {}", deps.join(", "));
    }
    if !extracted.aliases.is_empty() {
        println!("aliases: {}", extracted.aliases.join(", "));
    }

    let reported = errors.entries();
    if reported.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        for e in &reported {
            eprintln!("error: {e}");
        }
        Ok(ExitCode::from(2))
    }
}
