//! Review Enricher Module
//! Appends derived fields (month bucket, text length, sentiment) to each record.

use crate::data::{EnrichedReview, MonthBucket, ReviewRecord};
use crate::text::{PolarityScorer, Sentiment, SentimentClassifier};
use tracing::info;

/// Derives per-row fields without touching the source records.
pub struct ReviewEnricher<'a, S: PolarityScorer> {
    classifier: &'a SentimentClassifier<S>,
}

impl<'a, S: PolarityScorer> ReviewEnricher<'a, S> {
    pub fn new(classifier: &'a SentimentClassifier<S>) -> Self {
        Self { classifier }
    }

    /// Enrich a single record.
    pub fn enrich_one(&self, record: ReviewRecord) -> EnrichedReview {
        let month = MonthBucket::from_date(record.review_date);
        let review_length = record.review_text.chars().count();
        let sentiment = self.classifier.classify(&record.review_text);

        EnrichedReview {
            record,
            month,
            review_length,
            sentiment,
        }
    }

    /// Enrich every record, preserving input order.
    pub fn enrich(&self, records: Vec<ReviewRecord>) -> Vec<EnrichedReview> {
        let enriched: Vec<EnrichedReview> =
            records.into_iter().map(|r| self.enrich_one(r)).collect();

        let count = |label: Sentiment| enriched.iter().filter(|r| r.sentiment == label).count();
        info!(
            rows = enriched.len(),
            positive = count(Sentiment::Positive),
            neutral = count(Sentiment::Neutral),
            negative = count(Sentiment::Negative),
            "enriched reviews"
        );

        enriched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: usize, date: (i32, u32, u32), text: &str) -> ReviewRecord {
        ReviewRecord {
            id,
            review_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            review_text: text.to_string(),
            rating: 4.0,
            helpful_votes: 0,
            product_category: "Books".to_string(),
        }
    }

    #[test]
    fn derives_month_length_and_sentiment() {
        let classifier = SentimentClassifier::lexicon();
        let enricher = ReviewEnricher::new(&classifier);

        let out = enricher.enrich_one(record(0, (2024, 3, 17), "I love this, it is great!"));
        assert_eq!(out.month, MonthBucket::new(2024, 3));
        assert_eq!(out.review_length, 25);
        assert_eq!(out.sentiment, Sentiment::Positive);
        assert_eq!(out.record.review_text, "I love this, it is great!");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let classifier = SentimentClassifier::lexicon();
        let enricher = ReviewEnricher::new(&classifier);

        let out = enricher.enrich_one(record(0, (2024, 1, 1), "Très bien ☕"));
        assert_eq!(out.review_length, 11);
    }

    #[test]
    fn empty_text_is_neutral_with_zero_length() {
        let classifier = SentimentClassifier::lexicon();
        let enricher = ReviewEnricher::new(&classifier);

        let out = enricher.enrich_one(record(0, (2024, 1, 1), ""));
        assert_eq!(out.review_length, 0);
        assert_eq!(out.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn keeps_record_order() {
        let classifier = SentimentClassifier::lexicon();
        let enricher = ReviewEnricher::new(&classifier);

        let out = enricher.enrich(vec![
            record(7, (2024, 2, 1), "Terrible, I hate it."),
            record(3, (2023, 12, 9), "Fine"),
        ]);
        let ids: Vec<usize> = out.iter().map(|r| r.record.id).collect();
        assert_eq!(ids, vec![7, 3]);
        assert_eq!(out[0].sentiment, Sentiment::Negative);
    }
}
