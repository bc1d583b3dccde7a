//! Run configuration and fixed analysis constants.

use std::path::PathBuf;

/// Input file read when no path is given.
pub const DEFAULT_INPUT: &str = "data/amazon_reviews.csv";
/// Directory the chart grids are written to when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

/// Length of the most-common-words list.
pub const TOP_N_WORDS: usize = 10;
/// Bins of the helpful votes histogram.
pub const HISTOGRAM_BINS: usize = 10;
/// Sample points of the helpful votes density curve.
pub const KDE_POINTS: usize = 200;

/// Pixel size of one 2x2 grid image (9x6 inches at 150 DPI).
pub const GRID_SIZE: (u32, u32) = (1350, 900);

/// Where to read reviews from and where the grids go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Open the written images with the system viewer.
    pub show: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            show: false,
        }
    }
}
