//! Median-win simulation engine

pub mod distribution;
pub mod normalize;
pub mod simulator;
pub mod stats;

pub use distribution::{DistributionSummary, HistogramBin, MedianDistribution, DEFAULT_HISTOGRAM_BINS};
pub use normalize::{normalize, round1, MedianTarget, Normalized};
pub use simulator::{MedianSimulator, SimulationParams, DEFAULT_NOISE_RATIO, DEFAULT_TRIALS};
