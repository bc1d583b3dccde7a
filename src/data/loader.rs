//! CSV Review Loader Module
//! Reads the review file with Polars and converts it into typed records.

use crate::data::ReviewRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Columns every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "review_date",
    "review_text",
    "rating",
    "helpful_votes",
    "product_category",
];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Input file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("Row {row}: missing value in column '{column}'")]
    MissingValue { row: usize, column: &'static str },
    #[error("Row {row}: cannot parse review_date '{value}'")]
    InvalidDate { row: usize, value: String },
    #[error("Row {row}: helpful_votes {value} is not a non-negative count")]
    InvalidVotes { row: usize, value: i64 },
}

/// Loads review files into typed records.
pub struct ReviewLoader;

impl ReviewLoader {
    /// Load a CSV file, validate it and drop exact duplicate rows.
    pub fn load_csv(path: &Path) -> Result<Vec<ReviewRecord>, LoadError> {
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;
        debug!(
            rows = df.height(),
            columns = df.width(),
            "read {}",
            path.display()
        );

        let records = Self::records_from_frame(&df)?;
        let total = records.len();
        let records = Self::drop_duplicates(records);
        info!(
            rows = records.len(),
            duplicates = total - records.len(),
            "loaded reviews from {}",
            path.display()
        );

        Ok(records)
    }

    /// Convert a DataFrame into review records, checking every row.
    pub fn records_from_frame(df: &DataFrame) -> Result<Vec<ReviewRecord>, LoadError> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        for required in REQUIRED_COLUMNS {
            if !names.iter().any(|n| n == required) {
                return Err(LoadError::MissingColumn(required));
            }
        }

        let dates = Self::string_values(df, "review_date")?;
        let texts = Self::string_values(df, "review_text")?;
        let categories = Self::string_values(df, "product_category")?;

        let rating_col = df.column("rating")?.cast(&DataType::Float64)?;
        let ratings = rating_col.f64()?;
        let votes_col = df.column("helpful_votes")?.cast(&DataType::Int64)?;
        let votes = votes_col.i64()?;

        let mut records = Vec::with_capacity(df.height());
        for (row, ((raw_date, review_text), product_category)) in
            dates.into_iter().zip(texts).zip(categories).enumerate()
        {
            let review_date =
                parse_review_date(&raw_date).ok_or_else(|| LoadError::InvalidDate {
                    row,
                    value: raw_date.clone(),
                })?;

            let rating = ratings.get(row).ok_or(LoadError::MissingValue {
                row,
                column: "rating",
            })?;

            let raw_votes = votes.get(row).ok_or(LoadError::MissingValue {
                row,
                column: "helpful_votes",
            })?;
            let helpful_votes = u32::try_from(raw_votes)
                .map_err(|_| LoadError::InvalidVotes { row, value: raw_votes })?;

            records.push(ReviewRecord {
                id: row,
                review_date,
                review_text,
                rating,
                helpful_votes,
                product_category,
            });
        }

        Ok(records)
    }

    /// Drop rows identical in every field, keeping the first occurrence.
    pub fn drop_duplicates(records: Vec<ReviewRecord>) -> Vec<ReviewRecord> {
        let mut seen = HashSet::new();
        records
            .into_iter()
            .filter(|r| {
                seen.insert((
                    r.review_date,
                    r.review_text.clone(),
                    r.rating.to_bits(),
                    r.helpful_votes,
                    r.product_category.clone(),
                ))
            })
            .collect()
    }

    fn string_values(df: &DataFrame, column: &'static str) -> Result<Vec<String>, LoadError> {
        let col = df.column(column)?.cast(&DataType::String)?;
        let ca = col.str()?;
        (0..df.height())
            .map(|row| {
                ca.get(row)
                    .map(str::to_string)
                    .ok_or(LoadError::MissingValue { row, column })
            })
            .collect()
    }
}

/// Parse a review date written either as a date or as a timestamp.
pub fn parse_review_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn parses_common_date_shapes() {
        let jan_15 = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_review_date("2024-01-15"), Some(jan_15));
        assert_eq!(parse_review_date(" 2024/01/15 "), Some(jan_15));
        assert_eq!(parse_review_date("01/15/2024"), Some(jan_15));
        assert_eq!(parse_review_date("2024-01-15 08:30:00"), Some(jan_15));
        assert_eq!(parse_review_date("2024-01-15T08:30:00Z"), Some(jan_15));
        assert_eq!(parse_review_date("2024-13-40"), None);
        assert_eq!(parse_review_date("yesterday"), None);
    }

    #[test]
    fn loads_typed_records() {
        let file = write_csv(
            "review_date,review_text,rating,helpful_votes,product_category\n\
             2024-01-05,\"Great phone, love it\",5,12,Electronics\n\
             2024-02-10,Broke after a week,1,3,Electronics\n\
             2024-02-11,It is a book,3,0,Books\n",
        );

        let records = ReviewLoader::load_csv(file.path()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].review_text, "Great phone, love it");
        assert_eq!(records[0].rating, 5.0);
        assert_eq!(records[0].helpful_votes, 12);
        assert_eq!(records[1].review_date, NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
        assert_eq!(records[2].product_category, "Books");
        assert_eq!(records[2].id, 2);
    }

    #[test]
    fn drops_exact_duplicates_keeping_first() {
        let file = write_csv(
            "review_date,review_text,rating,helpful_votes,product_category\n\
             2024-01-05,Fine,4,1,Toys\n\
             2024-01-06,Other,2,0,Toys\n\
             2024-01-05,Fine,4,1,Toys\n",
        );

        let records = ReviewLoader::load_csv(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 0);
        assert_eq!(records[1].id, 1);
    }

    #[test]
    fn missing_column_is_fatal() {
        let file = write_csv(
            "review_date,review_text,rating,product_category\n\
             2024-01-05,Fine,4,Toys\n",
        );

        let err = ReviewLoader::load_csv(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("helpful_votes")));
    }

    #[test]
    fn unparseable_date_is_fatal() {
        let file = write_csv(
            "review_date,review_text,rating,helpful_votes,product_category\n\
             2024-01-05,Fine,4,1,Toys\n\
             not-a-date,Fine,4,1,Toys\n",
        );

        let err = ReviewLoader::load_csv(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidDate { row: 1, .. }));
    }

    #[test]
    fn fractional_and_out_of_range_ratings_load_as_is() {
        let file = write_csv(
            "review_date,review_text,rating,helpful_votes,product_category\n\
             2024-01-05,good,4.5,1,Toys\n\
             2024-01-06,meh,0,2,Toys\n\
             2024-01-07,wow,7,0,Toys\n",
        );

        let records = ReviewLoader::load_csv(file.path()).unwrap();
        let ratings: Vec<f64> = records.iter().map(|r| r.rating).collect();
        assert_eq!(ratings, vec![4.5, 0.0, 7.0]);
    }

    #[test]
    fn non_numeric_rating_is_fatal() {
        let file = write_csv(
            "review_date,review_text,rating,helpful_votes,product_category\n\
             2024-01-05,Fine,4,1,Toys\n\
             2024-01-06,Fine,great,1,Toys\n",
        );

        assert!(ReviewLoader::load_csv(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_reported() {
        let err = ReviewLoader::load_csv(Path::new("/nonexistent/reviews.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }
}
