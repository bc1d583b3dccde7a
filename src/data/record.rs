//! Review Record Types
//! Typed rows produced by the loader and the enricher.

use crate::text::Sentiment;
use chrono::{Datelike, NaiveDate};
use std::fmt;

/// One review as read from the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRecord {
    /// Row position in the source file (0-based, header excluded).
    pub id: usize,
    pub review_date: NaiveDate,
    pub review_text: String,
    pub rating: f64,
    pub helpful_votes: u32,
    pub product_category: String,
}

/// Calendar (year, month) grouping key. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
}

impl MonthBucket {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A review together with its derived fields.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedReview {
    pub record: ReviewRecord,
    pub month: MonthBucket,
    pub review_length: usize,
    pub sentiment: Sentiment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_bucket_ignores_day() {
        let a = MonthBucket::from_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let b = MonthBucket::from_date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "2024-01");
    }

    #[test]
    fn month_bucket_orders_chronologically() {
        let mut months = vec![
            MonthBucket::new(2024, 2),
            MonthBucket::new(2023, 12),
            MonthBucket::new(2024, 1),
        ];
        months.sort();
        assert_eq!(
            months,
            vec![
                MonthBucket::new(2023, 12),
                MonthBucket::new(2024, 1),
                MonthBucket::new(2024, 2),
            ]
        );
    }
}
