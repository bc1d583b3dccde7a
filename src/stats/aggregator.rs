//! Review Aggregator Module
//! Builds every read-only view the chart grids consume from the enriched rows.

use crate::config::{HISTOGRAM_BINS, KDE_POINTS, TOP_N_WORDS};
use crate::data::{EnrichedReview, MonthBucket};
use crate::stats::{
    BoxSummary, CorrelationMatrix, Histogram, StatsCalculator, WordCount, WordCounter,
};
use crate::text::{tokenize, Sentiment};
use std::collections::BTreeMap;
use tracing::debug;

/// Mean rating of one product category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRating {
    pub category: String,
    pub mean: f64,
    pub count: usize,
}

/// Mean rating of one month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRating {
    pub month: MonthBucket,
    pub mean: f64,
    pub count: usize,
}

/// One point of the length vs votes scatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub review_length: usize,
    pub helpful_votes: u32,
    pub rating: f64,
}

/// Zero-filled count table over fixed row and column keys.
#[derive(Debug, Clone, PartialEq)]
pub struct CountTable<R, C> {
    pub rows: Vec<R>,
    pub columns: Vec<C>,
    pub counts: Vec<Vec<usize>>,
}

impl<R: PartialEq, C: PartialEq> CountTable<R, C> {
    /// Count `pairs` into a rows x columns grid. Pairs whose keys are not
    /// listed are ignored; every listed cell starts at 0.
    pub fn build<I>(rows: Vec<R>, columns: Vec<C>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (R, C)>,
    {
        let mut counts = vec![vec![0usize; columns.len()]; rows.len()];
        for (r, c) in pairs {
            let (Some(ri), Some(ci)) = (
                rows.iter().position(|x| *x == r),
                columns.iter().position(|x| *x == c),
            ) else {
                continue;
            };
            counts[ri][ci] += 1;
        }
        Self {
            rows,
            columns,
            counts,
        }
    }

    pub fn get(&self, row: &R, column: &C) -> Option<usize> {
        let ri = self.rows.iter().position(|x| x == row)?;
        let ci = self.columns.iter().position(|x| x == column)?;
        Some(self.counts[ri][ci])
    }

    /// Counts of one column, in row order.
    pub fn column_series(&self, column: usize) -> Vec<usize> {
        self.counts.iter().map(|row| row[column]).collect()
    }
}

/// Every aggregate view of one run.
#[derive(Debug, Clone)]
pub struct ReviewAggregates {
    pub review_count: usize,
    /// Reviews per rating value, ascending by rating.
    pub rating_counts: Vec<(f64, usize)>,
    pub helpful_votes_histogram: Option<Histogram>,
    /// KDE of helpful votes, scaled to histogram counts.
    pub helpful_votes_kde: Vec<(f64, f64)>,
    /// Categories in first-seen order.
    pub category_ratings: Vec<CategoryRating>,
    /// Ascending by rating.
    pub votes_by_rating: Vec<(f64, BoxSummary)>,
    /// Observed months only, chronological.
    pub monthly_ratings: Vec<MonthlyRating>,
    pub scatter: Vec<ScatterPoint>,
    /// Sentiments in first-seen order.
    pub sentiment_counts: Vec<(Sentiment, usize)>,
    pub rating_by_sentiment: Vec<(Sentiment, BoxSummary)>,
    pub category_sentiment: CountTable<String, Sentiment>,
    /// Months chronological, sentiments in label order.
    pub monthly_sentiment: CountTable<MonthBucket, Sentiment>,
    /// rating, helpful_votes, review_length.
    pub correlation: CorrelationMatrix,
    pub top_words: Vec<WordCount>,
}

/// Computes aggregate views from enriched reviews.
pub struct ReviewAggregator;

impl ReviewAggregator {
    pub fn aggregate(reviews: &[EnrichedReview]) -> ReviewAggregates {
        let votes: Vec<f64> = reviews
            .iter()
            .map(|r| r.record.helpful_votes as f64)
            .collect();
        let ratings: Vec<f64> = reviews.iter().map(|r| r.record.rating).collect();
        let lengths: Vec<f64> = reviews.iter().map(|r| r.review_length as f64).collect();

        let helpful_votes_histogram = StatsCalculator::histogram(&votes, HISTOGRAM_BINS);
        let helpful_votes_kde = match &helpful_votes_histogram {
            Some(hist) => {
                let scale = votes.len() as f64 * hist.bin_width();
                StatsCalculator::gaussian_kde(&votes, KDE_POINTS)
                    .into_iter()
                    .map(|(x, d)| (x, d * scale))
                    .collect()
            }
            None => Vec::new(),
        };

        let top_words = Self::top_words(reviews, TOP_N_WORDS);

        let aggregates = ReviewAggregates {
            review_count: reviews.len(),
            rating_counts: Self::rating_counts(reviews),
            helpful_votes_histogram,
            helpful_votes_kde,
            category_ratings: Self::category_mean_rating(reviews),
            votes_by_rating: Self::votes_by_rating(reviews),
            monthly_ratings: Self::monthly_mean_rating(reviews),
            scatter: reviews
                .iter()
                .map(|r| ScatterPoint {
                    review_length: r.review_length,
                    helpful_votes: r.record.helpful_votes,
                    rating: r.record.rating,
                })
                .collect(),
            sentiment_counts: Self::sentiment_counts(reviews),
            rating_by_sentiment: Self::rating_by_sentiment(reviews),
            category_sentiment: Self::category_sentiment_counts(reviews),
            monthly_sentiment: Self::monthly_sentiment_counts(reviews),
            correlation: StatsCalculator::correlation_matrix(&[
                ("rating", &ratings[..]),
                ("helpful_votes", &votes[..]),
                ("review_length", &lengths[..]),
            ]),
            top_words,
        };

        debug!(
            months = aggregates.monthly_ratings.len(),
            categories = aggregates.category_ratings.len(),
            "aggregated {} reviews",
            aggregates.review_count
        );
        aggregates
    }

    /// Mean rating per category, categories in first-seen order.
    pub fn category_mean_rating(reviews: &[EnrichedReview]) -> Vec<CategoryRating> {
        let categories = first_seen(reviews.iter().map(|r| r.record.product_category.clone()));
        categories
            .into_iter()
            .filter_map(|category| {
                let values: Vec<f64> = reviews
                    .iter()
                    .filter(|r| r.record.product_category == category)
                    .map(|r| r.record.rating)
                    .collect();
                let mean = StatsCalculator::mean(&values)?;
                Some(CategoryRating {
                    category,
                    mean,
                    count: values.len(),
                })
            })
            .collect()
    }

    /// Mean rating per observed month, chronological. Months without
    /// reviews are absent.
    pub fn monthly_mean_rating(reviews: &[EnrichedReview]) -> Vec<MonthlyRating> {
        let mut groups: BTreeMap<MonthBucket, (f64, usize)> = BTreeMap::new();
        for r in reviews {
            let entry = groups.entry(r.month).or_insert((0.0, 0));
            entry.0 += r.record.rating;
            entry.1 += 1;
        }

        groups
            .into_iter()
            .map(|(month, (sum, count))| MonthlyRating {
                month,
                mean: sum / count as f64,
                count,
            })
            .collect()
    }

    /// Review counts per (month, sentiment) over every observed month and
    /// every observed sentiment, missing combinations filled with 0.
    pub fn monthly_sentiment_counts(
        reviews: &[EnrichedReview],
    ) -> CountTable<MonthBucket, Sentiment> {
        let mut months: Vec<MonthBucket> = reviews.iter().map(|r| r.month).collect();
        months.sort();
        months.dedup();
        let mut sentiments: Vec<Sentiment> = reviews.iter().map(|r| r.sentiment).collect();
        sentiments.sort();
        sentiments.dedup();

        CountTable::build(
            months,
            sentiments,
            reviews.iter().map(|r| (r.month, r.sentiment)),
        )
    }

    pub fn category_sentiment_counts(reviews: &[EnrichedReview]) -> CountTable<String, Sentiment> {
        CountTable::build(
            first_seen(reviews.iter().map(|r| r.record.product_category.clone())),
            first_seen(reviews.iter().map(|r| r.sentiment)),
            reviews
                .iter()
                .map(|r| (r.record.product_category.clone(), r.sentiment)),
        )
    }

    /// The `n` most common tokens across all review texts in record order.
    pub fn top_words(reviews: &[EnrichedReview], n: usize) -> Vec<WordCount> {
        let mut counter = WordCounter::new();
        for r in reviews {
            counter.extend(tokenize(&r.record.review_text));
        }
        debug!(distinct = counter.distinct(), "counted review tokens");
        counter.most_common(n)
    }

    fn rating_counts(reviews: &[EnrichedReview]) -> Vec<(f64, usize)> {
        distinct_ratings(reviews)
            .into_iter()
            .map(|rating| (rating, with_rating(reviews, rating).count()))
            .collect()
    }

    fn votes_by_rating(reviews: &[EnrichedReview]) -> Vec<(f64, BoxSummary)> {
        distinct_ratings(reviews)
            .into_iter()
            .filter_map(|rating| {
                let values: Vec<f64> = with_rating(reviews, rating)
                    .map(|r| r.record.helpful_votes as f64)
                    .collect();
                StatsCalculator::box_summary(&values).map(|summary| (rating, summary))
            })
            .collect()
    }

    fn sentiment_counts(reviews: &[EnrichedReview]) -> Vec<(Sentiment, usize)> {
        first_seen(reviews.iter().map(|r| r.sentiment))
            .into_iter()
            .map(|s| (s, reviews.iter().filter(|r| r.sentiment == s).count()))
            .collect()
    }

    fn rating_by_sentiment(reviews: &[EnrichedReview]) -> Vec<(Sentiment, BoxSummary)> {
        first_seen(reviews.iter().map(|r| r.sentiment))
            .into_iter()
            .filter_map(|s| {
                let values: Vec<f64> = reviews
                    .iter()
                    .filter(|r| r.sentiment == s)
                    .map(|r| r.record.rating)
                    .collect();
                StatsCalculator::box_summary(&values).map(|summary| (s, summary))
            })
            .collect()
    }
}

/// Observed rating values, ascending.
fn distinct_ratings(reviews: &[EnrichedReview]) -> Vec<f64> {
    let mut ratings: Vec<f64> = reviews.iter().map(|r| r.record.rating).collect();
    ratings.sort_by(f64::total_cmp);
    ratings.dedup_by(|a, b| a.total_cmp(b).is_eq());
    ratings
}

fn with_rating(reviews: &[EnrichedReview], rating: f64) -> impl Iterator<Item = &EnrichedReview> {
    reviews
        .iter()
        .filter(move |r| r.record.rating.total_cmp(&rating).is_eq())
}

/// Distinct values in order of first appearance.
fn first_seen<T: PartialEq, I: IntoIterator<Item = T>>(values: I) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}
