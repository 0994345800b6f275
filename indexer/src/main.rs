use anyhow::Result;
use clap::Parser;
use letterindex_core::{run, PipelineConfig};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build a per-letter inverted word index with parallel mappers and reducers", long_about = None)]
struct Cli {
    /// Number of mapper threads
    mappers: NonZeroUsize,
    /// Number of reducer threads
    reducers: NonZeroUsize,
    /// Manifest: a file count followed by that many paths
    manifest: PathBuf,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let config = PipelineConfig::new(cli.mappers, cli.reducers, cli.manifest);
    let summary = run(&config)?;
    tracing::info!(files = summary.files, words = summary.words, artifacts = summary.artifacts, "done");
    Ok(())
}
