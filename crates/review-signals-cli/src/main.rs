//! Batch entry point: load a run configuration, process the dataset,
//! write the output tables.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use review_signals_core::config::RunConfig;
use review_signals_core::pipeline::Pipeline;

#[derive(Parser, Debug)]
#[command(name = "review-signals", about = "Extract structured signal from patient medication reviews")]
struct Args {
    /// Path to the run configuration
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override the configured fuzzy-match threshold (0-100)
    #[arg(long)]
    threshold: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let mut config = RunConfig::load(&args.config)
        .with_context(|| format!("loading config from {}", args.config.display()))?;
    if let Some(threshold) = args.threshold {
        config.fuzzy_threshold = threshold;
        config.validate().context("applying --threshold override")?;
    }

    let pipeline = Pipeline::new(config);
    let output = pipeline.execute().context("running pipeline")?;

    info!(
        reviews = output.reviews.len(),
        marker_events = output.marker_events.len(),
        change_events = output.change_events.len(),
        "run complete"
    );

    Ok(())
}
