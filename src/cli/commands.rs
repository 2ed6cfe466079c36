use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::config::GenerationConfig;
use crate::engine::Engine;
use crate::render::JinjaRenderer;
use crate::storage::{FsStorage, RecordingStorage, Storage};
use crate::templates::TemplateStore;
use crate::transform::DefaultTransformer;

/// Command-line interface for tplforge
///
/// Provides commands for generating a file tree from a raw model plus a
/// named configuration, and for checking a configuration's template set.
#[derive(Parser)]
#[command(name = "tplforge")]
#[command(about = "tplforge CLI", long_about = None)]
pub struct Cli {
    /// Enable debug-level diagnostics
    #[arg(long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands for tplforge
#[derive(Subcommand)]
pub enum Commands {
    /// Generate the output tree for one configuration
    Generate {
        /// Path to the raw model document (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Path to the generation configuration file (YAML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Configuration name: selects the template set and the output
        /// subdirectory
        #[arg(short, long)]
        name: String,

        /// Template root directory
        #[arg(long, default_value = "./templates")]
        templates: PathBuf,

        /// Override the configuration's output root
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Perform a dry run: show what would be written without touching
        /// the filesystem
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Check that every template a configuration references can be loaded
    Check {
        /// Path to the generation configuration file (YAML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Configuration name: selects the template set
        #[arg(short, long)]
        name: String,

        /// Template root directory
        #[arg(long, default_value = "./templates")]
        templates: PathBuf,
    },
}

fn load_raw_model(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    if is_yaml {
        Ok(serde_yaml::from_str(&content)?)
    } else {
        Ok(serde_json::from_str(&content)?)
    }
}

fn engine_with(storage: Arc<dyn Storage>, templates: &Path) -> Engine {
    Engine::new(
        storage,
        Box::new(JinjaRenderer::new()),
        Box::new(DefaultTransformer),
    )
    .with_template_root(templates)
}

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "info" }));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Commands::Generate {
            input,
            config,
            name,
            templates,
            output,
            dry_run,
        } => {
            let raw = load_raw_model(input)?;
            let mut config = GenerationConfig::from_file(config)?;
            if let Some(output) = output {
                config.output_dir = output.display().to_string();
            }
            if *dry_run {
                let recording = Arc::new(RecordingStorage::new(FsStorage));
                let dyn_storage: Arc<dyn Storage> = recording.clone();
                engine_with(dyn_storage, templates).generate(&raw, &config, name)?;
                for path in recording.writes().keys() {
                    println!("would write {}", path.display());
                }
            } else {
                let summary =
                    engine_with(Arc::new(FsStorage), templates).generate(&raw, &config, name)?;
                println!(
                    "✅ Generated {} files ({} touched, {} preserved) → {}",
                    summary.written.len(),
                    summary.touched.len(),
                    summary.preserved.len(),
                    summary.output_root.display()
                );
            }
            Ok(())
        }
        Commands::Check {
            config,
            name,
            templates,
        } => {
            let config = GenerationConfig::from_file(config)?;
            let store = TemplateStore::new(Arc::new(FsStorage), templates, name);
            let mut checked = 0usize;
            for file in config.partials.values() {
                store.load_template(file)?;
                checked += 1;
            }
            for tx in &config.transformations {
                if let Some(input) = &tx.input {
                    store.load_template(input)?;
                    checked += 1;
                }
            }
            for rule in config
                .per_api
                .iter()
                .chain(&config.per_model)
                .chain(&config.per_operation)
            {
                store.load_template(&rule.input)?;
                checked += 1;
            }
            store.load_common(if config.apache { "LICENSE" } else { "UNLICENSE" })?;
            checked += 1;
            println!("✅ {checked} templates OK for configuration '{name}'");
            Ok(())
        }
    }
}
