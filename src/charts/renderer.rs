//! Static Grid Renderer
//! Writes the three 2x2 chart grids as PNG images.
//!
//! Layout:
//! 1. Grid 1 - basic distributions: ratings, helpful votes, category means,
//!    votes by rating
//! 2. Grid 2 - trends & sentiment: monthly rating, length vs votes,
//!    sentiment counts, ratings by sentiment
//! 3. Grid 3 - deep dive: sentiment by category, monthly sentiment,
//!    correlation heatmap, top words

use crate::charts::palette::{Colormap, Qualitative};
use crate::charts::plotter::{ChartPlotter, GroupedBars, LineData, Panel};
use crate::config::{GRID_SIZE, TOP_N_WORDS};
use crate::stats::ReviewAggregates;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

pub const GRID1_FILE: &str = "grid1_basic_distributions.png";
pub const GRID2_FILE: &str = "grid2_trends_sentiment.png";
pub const GRID3_FILE: &str = "grid3_deep_dive.png";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Drawing(err.to_string())
    }
}

/// Renders the chart grids into an output directory.
pub struct GridRenderer {
    output_dir: PathBuf,
}

impl GridRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Render all three grids and return the written paths in order.
    pub fn render_all(&self, agg: &ReviewAggregates) -> Result<Vec<PathBuf>, RenderError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| RenderError::OutputDir {
            path: self.output_dir.clone(),
            source,
        })?;

        let grids: [(&str, &str, GridFn); 3] = [
            (GRID1_FILE, "Amazon Reviews - Grid 1", Self::draw_basic_distributions),
            (GRID2_FILE, "Amazon Reviews - Grid 2", Self::draw_trends_sentiment),
            (GRID3_FILE, "Amazon Reviews - Grid 3", Self::draw_deep_dive),
        ];

        let mut written = Vec::with_capacity(grids.len());
        for (file, title, draw) in grids {
            let path = self.output_dir.join(file);
            Self::render_grid(&path, title, agg, draw)?;
            info!("saved {}", path.display());
            written.push(path);
        }
        Ok(written)
    }

    /// One image: white canvas, centered title, four panels.
    fn render_grid(
        path: &Path,
        title: &str,
        agg: &ReviewAggregates,
        draw: GridFn,
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, GRID_SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        let body = root.titled(title, ("sans-serif", 28))?;
        let panels = body.split_evenly((2, 2));

        draw(&panels, agg)?;

        root.present()?;
        Ok(())
    }

    fn draw_basic_distributions(panels: &[Panel], agg: &ReviewAggregates) -> Result<(), RenderError> {
        let rating_labels: Vec<String> = agg.rating_counts.iter().map(|(r, _)| r.to_string()).collect();
        let rating_values: Vec<f64> = agg.rating_counts.iter().map(|(_, c)| *c as f64).collect();
        ChartPlotter::draw_bar_chart(
            &panels[0],
            "Distribution of Ratings",
            &rating_labels,
            &rating_values,
            &Colormap::Viridis.colors(rating_labels.len()),
            ("rating", "count"),
        )?;

        match &agg.helpful_votes_histogram {
            Some(hist) => ChartPlotter::draw_histogram(
                &panels[1],
                "Helpful Votes Distribution",
                hist,
                &agg.helpful_votes_kde,
                Qualitative::Tab10.color(0),
                "helpful_votes",
            )?,
            None => ChartPlotter::draw_empty_panel(&panels[1], "Helpful Votes Distribution", "No data")?,
        }

        let categories: Vec<String> = agg.category_ratings.iter().map(|c| c.category.clone()).collect();
        let means: Vec<f64> = agg.category_ratings.iter().map(|c| c.mean).collect();
        ChartPlotter::draw_bar_chart(
            &panels[2],
            "Average Rating by Category",
            &categories,
            &means,
            &Qualitative::Set2.colors(categories.len()),
            ("product_category", "rating"),
        )?;

        let box_labels: Vec<String> = agg.votes_by_rating.iter().map(|(r, _)| r.to_string()).collect();
        let boxes: Vec<_> = agg.votes_by_rating.iter().map(|(_, b)| b.clone()).collect();
        ChartPlotter::draw_box_chart(
            &panels[3],
            "Helpful Votes by Rating",
            &box_labels,
            &boxes,
            &Colormap::Coolwarm.colors(boxes.len()),
            ("rating", "helpful_votes"),
        )
    }

    fn draw_trends_sentiment(panels: &[Panel], agg: &ReviewAggregates) -> Result<(), RenderError> {
        let months: Vec<String> = agg.monthly_ratings.iter().map(|m| m.month.to_string()).collect();
        ChartPlotter::draw_line_chart(
            &panels[0],
            "Monthly Avg Rating Trend",
            &months,
            &[LineData {
                name: "rating".to_string(),
                values: agg.monthly_ratings.iter().map(|m| m.mean).collect(),
                color: Qualitative::Tab10.color(0),
            }],
            "Average Rating",
            false,
        )?;

        // hue is continuous over the observed rating range
        let (lo, hi) = agg
            .rating_counts
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (r, _)| (lo.min(*r), hi.max(*r)));
        let hue = |rating: f64| {
            if hi > lo {
                Colormap::Plasma.sample((rating - lo) / (hi - lo))
            } else {
                Colormap::Plasma.sample(0.5)
            }
        };
        let points: Vec<(f64, f64, RGBColor)> = agg
            .scatter
            .iter()
            .map(|p| (p.review_length as f64, p.helpful_votes as f64, hue(p.rating)))
            .collect();
        let legend: Vec<(String, RGBColor)> = agg
            .rating_counts
            .iter()
            .map(|(r, _)| (r.to_string(), hue(*r)))
            .collect();
        ChartPlotter::draw_scatter(
            &panels[1],
            "Review Length vs Helpful Votes",
            &points,
            &legend,
            ("review_length", "helpful_votes"),
        )?;

        let sentiments: Vec<String> = agg.sentiment_counts.iter().map(|(s, _)| s.to_string()).collect();
        let counts: Vec<f64> = agg.sentiment_counts.iter().map(|(_, c)| *c as f64).collect();
        ChartPlotter::draw_bar_chart(
            &panels[2],
            "Sentiment Distribution",
            &sentiments,
            &counts,
            &Qualitative::Set1.colors(sentiments.len()),
            ("sentiment", "count"),
        )?;

        let box_labels: Vec<String> = agg.rating_by_sentiment.iter().map(|(s, _)| s.to_string()).collect();
        let boxes: Vec<_> = agg.rating_by_sentiment.iter().map(|(_, b)| b.clone()).collect();
        ChartPlotter::draw_box_chart(
            &panels[3],
            "Ratings by Sentiment",
            &box_labels,
            &boxes,
            &Colormap::Coolwarm.colors(boxes.len()),
            ("sentiment", "rating"),
        )
    }

    fn draw_deep_dive(panels: &[Panel], agg: &ReviewAggregates) -> Result<(), RenderError> {
        let table = &agg.category_sentiment;
        let series: Vec<String> = table.columns.iter().map(|s| s.to_string()).collect();
        let colors = Colormap::Viridis.colors(series.len());
        ChartPlotter::draw_grouped_bar_chart(
            &panels[0],
            "Sentiment Across Categories",
            &GroupedBars {
                groups: &table.rows,
                series: &series,
                counts: &table.counts,
                colors: &colors,
            },
            ("product_category", "count"),
        )?;

        let monthly = &agg.monthly_sentiment;
        let months: Vec<String> = monthly.rows.iter().map(|m| m.to_string()).collect();
        let lines: Vec<LineData> = monthly
            .columns
            .iter()
            .enumerate()
            .map(|(j, sentiment)| LineData {
                name: sentiment.to_string(),
                values: monthly.column_series(j).into_iter().map(|c| c as f64).collect(),
                color: Qualitative::Tab10.color(j),
            })
            .collect();
        ChartPlotter::draw_line_chart(
            &panels[1],
            "Monthly Sentiment Trend",
            &months,
            &lines,
            "Review Count",
            true,
        )?;

        ChartPlotter::draw_heatmap(&panels[2], "Correlation Heatmap", &agg.correlation, Colormap::Coolwarm)?;

        let title = format!("Top {} Most Common Words in Reviews", TOP_N_WORDS);
        if agg.top_words.is_empty() {
            warn!("no words to rank; drawing an empty word frequency panel");
            return ChartPlotter::draw_empty_panel(&panels[3], &title, "No words found");
        }
        let words: Vec<String> = agg.top_words.iter().map(|w| w.word.clone()).collect();
        let counts: Vec<f64> = agg.top_words.iter().map(|w| w.count as f64).collect();
        ChartPlotter::draw_horizontal_bar_chart(
            &panels[3],
            &title,
            &words,
            &counts,
            &Colormap::Magma.colors(words.len()),
            "count",
        )
    }
}

type GridFn = fn(&[Panel], &ReviewAggregates) -> Result<(), RenderError>;
