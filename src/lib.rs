//! Review Insights - product review analysis and static chart report
//!
//! Loads a review CSV, labels each review with a month bucket, length and
//! sentiment, aggregates the views and writes three 2x2 PNG chart grids.

pub mod charts;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod stats;
pub mod text;
