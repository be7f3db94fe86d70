use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use sme_advisor_core::{
    load_profiles, process_profiles, report, HfChatClient, ModelSettings, ReferenceLibrary,
    RunConfig,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "sme-advisor",
    author,
    version,
    about = "SME managed-security package recommender"
)]
struct Cli {
    /// Run configuration file (YAML)
    #[arg(
        long = "config",
        value_name = "FILE",
        default_value = "configs/config.yaml"
    )]
    config: PathBuf,

    /// Root directory for per-run output folders
    #[arg(long = "runs-dir", value_name = "DIR", default_value = "runs")]
    runs_dir: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let run_config = load_config(&cli.config)?;
    run(&run_config, &cli.runs_dir).await
}

async fn run(run_config: &RunConfig, runs_dir: &Path) -> Result<()> {
    let settings = ModelSettings::from_env(run_config.api_url.clone(), run_config.model.clone())?;
    let library = ReferenceLibrary::load(
        &run_config.package_definitions,
        &run_config.vendor_components,
    )?;
    let profiles = load_profiles(&run_config.input_profiles)?;
    info!(
        profiles = profiles.len(),
        vendors = library.vendor_components.len(),
        "inputs loaded"
    );

    let out_dir = prepare_run_dir(run_config.save_runs, runs_dir)?;

    let client = HfChatClient::new(settings)?;
    let outcome = process_profiles(&client, &library, &profiles).await;
    if outcome.failures.is_empty() {
        info!(succeeded = outcome.records.len(), "batch complete");
    } else {
        // Failed profiles are absent from all three artifacts; the tally is
        // the only trace they leave.
        warn!(
            succeeded = outcome.records.len(),
            failed = outcome.failures.len(),
            "batch complete with failures"
        );
    }

    report::pdf::write_pdf(&outcome.records, &out_dir.join("SME_Recommendations.pdf"))?;
    report::write_summary_json(&outcome.records, &out_dir.join("SME_Summary_Table.json"))?;
    report::write_condensed_json(&outcome.records, &out_dir.join("Concise_SME_Summary.json"))?;
    info!(dir = %out_dir.display(), "reports written");
    Ok(())
}

fn load_config(path: &Path) -> Result<RunConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .build()
        .with_context(|| format!("failed to load config from {}", path.display()))?;
    settings
        .try_deserialize()
        .with_context(|| format!("invalid run configuration in {}", path.display()))
}

/// Create the timestamp-named output directory for this run, or fall back to
/// the current directory when run saving is disabled.
fn prepare_run_dir(save_runs: bool, runs_dir: &Path) -> Result<PathBuf> {
    if !save_runs {
        return Ok(PathBuf::from("."));
    }
    let dir = runs_dir.join(format!("run_{}", Local::now().format("%Y-%m-%d_%H-%M-%S")));
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create run directory {}", dir.display()))?;
    Ok(dir)
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tokio=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init();
}
