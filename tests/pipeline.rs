use approx::assert_relative_eq;
use review_insights::charts::{GRID1_FILE, GRID2_FILE, GRID3_FILE};
use review_insights::config::PipelineConfig;
use review_insights::data::{MonthBucket, ReviewEnricher, ReviewLoader};
use review_insights::pipeline;
use review_insights::stats::ReviewAggregator;
use review_insights::text::{Sentiment, SentimentClassifier};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const REVIEWS: &str = "\
review_date,review_text,rating,helpful_votes,product_category
2024-01-05,\"I love this, it is great!\",5,3,Electronics
2024-01-20,\"Great value, love the color\",4,1,Books
2024-01-28,\"Terrible, I hate it.\",3,0,Electronics
2024-03-02,It arrived on Tuesday,2,7,Books
2024-01-05,\"I love this, it is great!\",5,3,Electronics
";

fn write_csv(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("reviews.csv");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn load_enrich_aggregate() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, REVIEWS);

    let records = ReviewLoader::load_csv(&path).unwrap();
    assert_eq!(records.len(), 4, "exact duplicate row is dropped");

    let classifier = SentimentClassifier::lexicon();
    let reviews = ReviewEnricher::new(&classifier).enrich(records);
    let sentiments: Vec<Sentiment> = reviews.iter().map(|r| r.sentiment).collect();
    assert_eq!(
        sentiments,
        vec![
            Sentiment::Positive,
            Sentiment::Positive,
            Sentiment::Negative,
            Sentiment::Neutral
        ]
    );

    let agg = ReviewAggregator::aggregate(&reviews);
    assert_eq!(agg.review_count, 4);

    // February has no reviews and is absent
    let months: Vec<MonthBucket> = agg.monthly_ratings.iter().map(|m| m.month).collect();
    assert_eq!(months, vec![MonthBucket::new(2024, 1), MonthBucket::new(2024, 3)]);
    assert_relative_eq!(agg.monthly_ratings[0].mean, 4.0);
    assert_relative_eq!(agg.monthly_ratings[1].mean, 2.0);

    let categories: Vec<(&str, f64)> = agg
        .category_ratings
        .iter()
        .map(|c| (c.category.as_str(), c.mean))
        .collect();
    assert_eq!(categories, vec![("Electronics", 4.0), ("Books", 3.0)]);

    let table = &agg.monthly_sentiment;
    assert_eq!(
        table.columns,
        vec![Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive]
    );
    assert_eq!(table.get(&MonthBucket::new(2024, 1), &Sentiment::Positive), Some(2));
    assert_eq!(table.get(&MonthBucket::new(2024, 1), &Sentiment::Neutral), Some(0));
    assert_eq!(table.get(&MonthBucket::new(2024, 3), &Sentiment::Positive), Some(0));
    assert!(table.counts.iter().all(|row| row.len() == table.columns.len()));

    let top: Vec<(&str, usize)> = agg
        .top_words
        .iter()
        .take(4)
        .map(|w| (w.word.as_str(), w.count))
        .collect();
    assert_eq!(top, vec![("it", 3), ("i", 2), ("love", 2), ("great", 2)]);

    assert_eq!(agg.correlation.labels, vec!["rating", "helpful_votes", "review_length"]);
    assert_relative_eq!(agg.correlation.get(0, 0), 1.0, epsilon = 1e-12);
}

fn assert_grids_written(dir: &TempDir, written: &[PathBuf]) {
    let out = dir.path().join("out");
    assert_eq!(
        written,
        &[out.join(GRID1_FILE), out.join(GRID2_FILE), out.join(GRID3_FILE)]
    );
    for path in written {
        let size = fs::metadata(path).unwrap().len();
        assert!(size > 0, "{} is empty", path.display());
    }
}

#[test]
fn run_writes_three_grids_in_order() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig {
        input: write_csv(&dir, REVIEWS),
        output_dir: dir.path().join("out"),
        show: false,
    };

    let written = pipeline::run(&config).unwrap();
    assert_grids_written(&dir, &written);
}

#[test]
fn run_renders_when_no_text_has_words() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(
        &dir,
        "review_date,review_text,rating,helpful_votes,product_category\n\
         2024-01-05,123,5,3,Toys\n\
         2024-02-06,?!,4.5,0,Toys\n",
    );
    let config = PipelineConfig {
        input,
        output_dir: dir.path().join("out"),
        show: false,
    };

    let written = pipeline::run(&config).unwrap();
    assert_grids_written(&dir, &written);
}

#[test]
fn run_fails_on_missing_input() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig {
        input: dir.path().join("absent.csv"),
        output_dir: dir.path().join("out"),
        show: false,
    };

    assert!(pipeline::run(&config).is_err());
    assert!(!config.output_dir.exists());
}

#[test]
fn run_fails_on_empty_dataset() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(
        &dir,
        "review_date,review_text,rating,helpful_votes,product_category\n",
    );
    let config = PipelineConfig {
        input,
        output_dir: dir.path().join("out"),
        show: false,
    };

    assert!(pipeline::run(&config).is_err());
    assert!(!config.output_dir.exists());
}
