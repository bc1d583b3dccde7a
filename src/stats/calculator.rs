//! Statistics Calculator Module
//! Descriptive statistics used by the aggregate views: quartile boxes,
//! histograms, kernel density curves and Pearson correlation.

use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;

/// Box-and-whisker summary of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub count: usize,
    pub mean: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest value within 1.5 IQR below q1.
    pub whisker_low: f64,
    /// Largest value within 1.5 IQR above q3.
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

/// Equal-width histogram. `edges` has one more entry than `counts`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(lo), Some(hi)) if !self.counts.is_empty() => (hi - lo) / self.counts.len() as f64,
            _ => 0.0,
        }
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Square correlation matrix with its variable labels.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub labels: Vec<&'static str>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Arithmetic mean, `None` for an empty slice.
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Quartiles, Tukey whiskers and outliers of a group.
    pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
        let mean = Self::mean(values)?;

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < low_fence || v > high_fence)
            .collect();

        Some(BoxSummary {
            count: sorted.len(),
            mean,
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        })
    }

    /// Equal-width histogram over the data range; the last bin is closed.
    pub fn histogram(values: &[f64], bins: usize) -> Option<Histogram> {
        if values.is_empty() || bins == 0 {
            return None;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        // A single distinct value gets a unit-wide range around it.
        let (lo, hi) = if min == max { (min - 0.5, max + 0.5) } else { (min, max) };

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Histogram { edges, counts })
    }

    /// Gaussian kernel density estimate with Scott's bandwidth, evaluated on
    /// `points` evenly spaced positions over the data range.
    ///
    /// Returns an empty curve when the bandwidth is undefined (fewer than two
    /// values or zero spread).
    pub fn gaussian_kde(values: &[f64], points: usize) -> Vec<(f64, f64)> {
        let n = values.len();
        if n < 2 || points < 2 {
            return Vec::new();
        }

        let std_dev = values.iter().std_dev();
        let bandwidth = std_dev * (n as f64).powf(-0.2);
        let Ok(kernel) = Normal::new(0.0, bandwidth) else {
            return Vec::new();
        };

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let step = (max - min) / (points - 1) as f64;

        (0..points)
            .map(|i| {
                let x = min + step * i as f64;
                let density = values.iter().map(|&v| kernel.pdf(x - v)).sum::<f64>() / n as f64;
                (x, density)
            })
            .collect()
    }

    /// Pearson correlation; NaN when either variable has no spread.
    pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
        if x.len() != y.len() || x.len() < 2 {
            return f64::NAN;
        }

        let sx = x.iter().std_dev();
        let sy = y.iter().std_dev();
        if sx == 0.0 || sy == 0.0 {
            return f64::NAN;
        }

        let cov = x.iter().covariance(y.iter());
        (cov / (sx * sy)).clamp(-1.0, 1.0)
    }

    /// Pairwise Pearson correlation of named columns.
    pub fn correlation_matrix(columns: &[(&'static str, &[f64])]) -> CorrelationMatrix {
        let values = columns
            .iter()
            .map(|(_, a)| {
                columns
                    .iter()
                    .map(|(_, b)| Self::pearson(a, b))
                    .collect()
            })
            .collect();

        CorrelationMatrix {
            labels: columns.iter().map(|(name, _)| *name).collect(),
            values,
        }
    }
}
