//! Stats module - descriptive statistics and aggregate views

mod aggregator;
mod calculator;
mod word_freq;

pub use aggregator::{
    CategoryRating, CountTable, MonthlyRating, ReviewAggregates, ReviewAggregator, ScatterPoint,
};
pub use calculator::{BoxSummary, CorrelationMatrix, Histogram, StatsCalculator};
pub use word_freq::{WordCount, WordCounter};
