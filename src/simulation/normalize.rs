//! Scaling raw median-win probabilities onto a fixed total

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::Normalization;

/// Total the normalized probabilities should add up to.
///
/// A league where half the teams earn a median win has `teams / 2` winner
/// slots, so a 12-team league sums to 600%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedianTarget {
    /// Fixed total in percent
    Fixed(f64),
    /// 100% per median-winner slot, `max(1, teams / 2)` slots
    PerSlot,
}

impl Default for MedianTarget {
    fn default() -> Self {
        Self::PerSlot
    }
}

impl MedianTarget {
    pub fn from_option(target_percent: Option<f64>) -> Self {
        target_percent.map_or(Self::PerSlot, Self::Fixed)
    }

    pub fn resolve(&self, team_count: usize) -> f64 {
        match *self {
            MedianTarget::Fixed(total) => total,
            MedianTarget::PerSlot => 100.0 * (team_count / 2).max(1) as f64,
        }
    }
}

/// Normalized probabilities and how they were obtained
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub values: Vec<f64>,
    pub method: Normalization,
}

/// Round to one decimal place for reporting
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rescale `raw` so it sums to `target`, rounding each value to one decimal.
///
/// When every raw value is zero the proportional formula is undefined, so
/// the target is split evenly instead.
pub fn normalize(raw: &[f64], target: f64) -> Normalized {
    if raw.is_empty() {
        return Normalized {
            values: Vec::new(),
            method: Normalization::Empty,
        };
    }

    let total: f64 = raw.iter().sum();
    if total <= 0.0 {
        let share = round1(target / raw.len() as f64);
        warn!(
            teams = raw.len(),
            target, "all raw probabilities are zero, splitting target evenly"
        );
        return Normalized {
            values: vec![share; raw.len()],
            method: Normalization::EvenSplit,
        };
    }

    Normalized {
        values: raw.iter().map(|p| round1(p * target / total)).collect(),
        method: Normalization::Proportional,
    }
}
