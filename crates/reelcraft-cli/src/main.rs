//! Reelcraft command-line entry point.

mod logging;

use clap::{Parser, Subcommand};
use reelcraft_agent::ModelConfig;
use reelcraft_core::BrandProfile;
use reelcraft_pipeline::{
    build_plan, default_agents, load_agents, LlmExecutionBackend, Pipeline, PlanOptions,
};
use reelcraft_tools::{register_builtins, register_web_search, ToolRegistry};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "reelcraft", about = "Reelcraft — brand-to-video prompt pipeline")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "reelcraft.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline for a brand
    Run {
        /// Brand profile JSON
        #[arg(long, default_value = "input/brand.json")]
        brand: PathBuf,
        /// Agent role definitions overriding the built-in set
        #[arg(long)]
        roles: Option<PathBuf>,
        /// Root of the output tree
        #[arg(long, default_value = "output")]
        output: PathBuf,
        /// Also write a per-agent summary file for each step
        #[arg(long)]
        test_mode: bool,
    },
    /// Inspect the registered tools
    Tools {
        #[command(subcommand)]
        action: ToolsAction,
    },
}

#[derive(Subcommand)]
enum ToolsAction {
    /// List registered tools
    List,
}

#[derive(Deserialize)]
struct ReelcraftConfig {
    model: ModelConfig,
    /// Env var consulted when `model.api_key` is empty.
    #[serde(default = "default_model_key_env")]
    model_api_key_env: String,
    #[serde(default)]
    search: SearchConfig,
}

#[derive(Deserialize)]
struct SearchConfig {
    /// Env var holding the Serper.dev API key.
    #[serde(default = "default_search_key_env")]
    api_key_env: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_search_key_env(),
        }
    }
}

fn default_model_key_env() -> String {
    "REELCRAFT_API_KEY".to_string()
}

fn default_search_key_env() -> String {
    "SERPER_API_KEY".to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up API keys from a local .env, if present.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            brand,
            roles,
            output,
            test_mode,
        } => run_pipeline(&cli.config, &brand, roles.as_deref(), output, test_mode).await,
        Commands::Tools {
            action: ToolsAction::List,
        } => {
            logging::init_stdout_logging();
            list_tools();
            Ok(())
        }
    }
}

async fn run_pipeline(
    config_path: &Path,
    brand_path: &Path,
    roles_path: Option<&Path>,
    output: PathBuf,
    test_mode: bool,
) -> anyhow::Result<()> {
    // The brand name decides where the run folder (and its log) lives, so the
    // profile loads before logging is up.
    let brand = BrandProfile::load(brand_path);
    let options = PlanOptions {
        output_root: output,
        test_mode,
    };
    let brand_dir = options.brand_dir(&brand);
    tokio::fs::create_dir_all(&brand_dir).await?;

    logging::init_run_logging(&brand_dir.join("run.log"))?;
    info!(brand = %brand.name, dir = %brand_dir.display(), "Starting Reelcraft run");

    let config = load_config(config_path).await?;
    let model = resolve_model_key(config.model, &config.model_api_key_env)?;

    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry);
    match std::env::var(&config.search.api_key_env) {
        Ok(key) if !key.is_empty() => register_web_search(&mut registry, key),
        _ => info!(
            env = %config.search.api_key_env,
            "No search API key found; web_search tool disabled"
        ),
    }
    let registry = Arc::new(registry);

    let agents = match roles_path {
        Some(path) => load_agents(path)?,
        None => default_agents(),
    };
    let tasks = build_plan(&brand, &options);

    let backend = Arc::new(LlmExecutionBackend::new(model, registry));
    let mut pipeline = Pipeline::new(agents, tasks, backend, brand_dir);
    let report = pipeline.kickoff().await?;

    println!("\nFinal output:");
    println!(
        "{}",
        report.final_output.as_deref().unwrap_or(&report.summary)
    );

    if report.failed_tasks > 0 {
        anyhow::bail!("{}", report.summary);
    }
    Ok(())
}

async fn load_config(path: &Path) -> anyhow::Result<ReelcraftConfig> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
    Ok(toml::from_str(&raw)?)
}

/// Fill in `model.api_key` from the configured env var when the config file
/// leaves it empty.
fn resolve_model_key(mut model: ModelConfig, env_var: &str) -> anyhow::Result<ModelConfig> {
    if model.api_key.is_empty() {
        model.api_key = std::env::var(env_var).map_err(|_| {
            anyhow::anyhow!("No model API key: set 'model.api_key' in the config or export {env_var}")
        })?;
    }
    Ok(model)
}

fn list_tools() {
    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry);
    register_web_search(
        &mut registry,
        std::env::var(default_search_key_env()).unwrap_or_default(),
    );

    let mut descriptors = registry.list_descriptors();
    descriptors.sort_by(|a, b| a.name.cmp(&b.name));
    for descriptor in descriptors {
        println!("{:<18} {}", descriptor.name, descriptor.description);
    }
}
