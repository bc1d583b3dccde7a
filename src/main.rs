//! Review Insights - command line entry point

use anyhow::Result;
use clap::Parser;
use review_insights::config::{PipelineConfig, DEFAULT_INPUT, DEFAULT_OUTPUT_DIR};
use review_insights::pipeline;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "review_insights")]
#[command(about = "Analyze product reviews and render static chart grids")]
struct Cli {
    /// Review CSV to analyze
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Directory the chart grids are written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Open the written images with the system viewer
    #[arg(long)]
    show: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let config = PipelineConfig {
        input: cli.input,
        output_dir: cli.output_dir,
        show: cli.show,
    };

    let written = pipeline::run(&config)?;
    for path in &written {
        info!("chart grid: {}", path.display());
    }
    Ok(())
}
