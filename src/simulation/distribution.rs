//! Empirical distribution of simulated league medians

use serde::Serialize;

use super::stats;

/// Default histogram resolution for the median chart
pub const DEFAULT_HISTOGRAM_BINS: usize = 30;

/// One simulated median per trial, in trial order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedianDistribution {
    samples: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistributionSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub p05: f64,
    pub p50: f64,
    pub p95: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

impl MedianDistribution {
    pub fn from_samples(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn summary(&self) -> Option<DistributionSummary> {
        let mut sorted = self.samples.clone();
        sorted.sort_unstable_by(|a, b| a.total_cmp(b));

        Some(DistributionSummary {
            min: *sorted.first()?,
            max: *sorted.last()?,
            mean: stats::mean(&sorted)?,
            std_dev: stats::std_dev(&sorted)?,
            p05: stats::percentile_sorted(&sorted, 0.05)?,
            p50: stats::percentile_sorted(&sorted, 0.50)?,
            p95: stats::percentile_sorted(&sorted, 0.95)?,
        })
    }

    /// Equal-width bins spanning the sample range.
    ///
    /// A degenerate range (every sample identical) is widened to one unit
    /// around the value. The last bin is closed on the right.
    pub fn histogram(&self, bins: usize) -> Vec<HistogramBin> {
        if bins == 0 || self.samples.is_empty() {
            return Vec::new();
        }

        let (mut lo, mut hi) = self
            .samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if hi - lo <= f64::EPSILON {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let mut out: Vec<HistogramBin> = (0..bins)
            .map(|i| HistogramBin {
                lower: lo + width * i as f64,
                upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
                count: 0,
            })
            .collect();

        for &v in &self.samples {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            out[idx].count += 1;
        }

        out
    }
}
