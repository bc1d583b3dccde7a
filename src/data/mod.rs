//! Data module - review loading and enrichment

mod enricher;
mod loader;
mod record;

pub use enricher::ReviewEnricher;
pub use loader::{parse_review_date, LoadError, ReviewLoader, REQUIRED_COLUMNS};
pub use record::{EnrichedReview, MonthBucket, ReviewRecord};
