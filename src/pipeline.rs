//! End-to-end run: load, enrich, aggregate, render.

use crate::charts::GridRenderer;
use crate::config::PipelineConfig;
use crate::data::{ReviewEnricher, ReviewLoader};
use crate::stats::ReviewAggregator;
use crate::text::SentimentClassifier;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

/// Run every stage once and return the paths of the written grids.
pub fn run(config: &PipelineConfig) -> Result<Vec<PathBuf>> {
    let records = ReviewLoader::load_csv(&config.input)
        .with_context(|| format!("Failed to load reviews from {}", config.input.display()))?;
    if records.is_empty() {
        bail!("No reviews found in {}", config.input.display());
    }

    let classifier = SentimentClassifier::lexicon();
    let reviews = ReviewEnricher::new(&classifier).enrich(records);
    let aggregates = ReviewAggregator::aggregate(&reviews);

    let written = GridRenderer::new(&config.output_dir)
        .render_all(&aggregates)
        .with_context(|| format!("Failed to render charts into {}", config.output_dir.display()))?;
    info!(
        "wrote {} chart grids to {}",
        written.len(),
        config.output_dir.display()
    );

    if config.show {
        for path in &written {
            if let Err(e) = open::that(path) {
                warn!("could not open {}: {}", path.display(), e);
            }
        }
    }

    Ok(written)
}
