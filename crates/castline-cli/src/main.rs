use std::path::{Path, PathBuf};
use std::process::ExitCode;

use castline_core::config::PipelineConfig;
use castline_core::pipeline::{build_dataset, Dataset, DatasetSource};
use castline_core::CastlineError;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Link movie dialogue lines to the performers who spoke them.
#[derive(Debug, Parser)]
#[command(name = "castline", version)]
struct Cli {
    /// Config file (defaults to the user config, then built-in defaults).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dialogue table (TSV).
    #[arg(long)]
    dialogue: Option<PathBuf>,

    /// Cast table (TSV).
    #[arg(long)]
    cast: Option<PathBuf>,

    /// Dataset cache to read instead of recomputing.
    #[arg(long, conflicts_with = "no_cache")]
    cache: Option<PathBuf>,

    /// Where to write the resolved dataset.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Ignore any configured cache and always recompute.
    #[arg(long)]
    no_cache: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("castline=info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(dataset) => {
            report(&dataset);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Pipeline failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<Dataset, CastlineError> {
    let config = match &cli.config {
        Some(path) => PipelineConfig::load_from(path)?,
        None => PipelineConfig::load()?,
    };
    let config = effective_config(config, cli, &PipelineConfig::data_dir());
    tracing::debug!(?config, "Configuration loaded");
    build_dataset(&config)
}

/// Resolve config-file paths against `data_dir`, then apply flags. Paths
/// given on the command line stay relative to the working directory.
fn effective_config(config: PipelineConfig, cli: Cli, data_dir: &Path) -> PipelineConfig {
    apply_overrides(config.resolved_against(data_dir), cli)
}

/// Command-line flags win over the config file.
fn apply_overrides(mut config: PipelineConfig, cli: Cli) -> PipelineConfig {
    if let Some(dialogue) = cli.dialogue {
        config.sources.dialogue = dialogue;
    }
    if let Some(cast) = cli.cast {
        config.sources.cast = cast;
    }
    if cli.no_cache {
        config.dataset.cache = None;
    } else if let Some(cache) = cli.cache {
        config.dataset.cache = Some(cache);
    }
    if let Some(export) = cli.export {
        config.dataset.export = Some(export);
    }
    config
}

fn report(dataset: &Dataset) {
    let source = match dataset.source {
        DatasetSource::Cache => "cache",
        DatasetSource::Computed => "computed",
    };
    println!("{} lines ({source})", dataset.len());

    if let Some(stats) = &dataset.stats {
        println!("dialogue lines:  {}", stats.dialogue_lines);
        println!("cast records:    {}", stats.cast_records);
        for pass in &stats.passes {
            println!(
                "  {:<22} considered {:>8}  rows {:>8}  claimed {:>8}",
                pass.key.to_string(),
                pass.lines_considered,
                pass.rows_matched,
                pass.lines_claimed
            );
        }
        println!("ambiguous rows:  {}", stats.ambiguous_rows);
        println!(
            "resolved lines:  {} ({:.2} %)",
            stats.resolved_lines,
            stats.coverage()
        );
    }
}
