use serde::Serialize;

use super::team::Resolution;
use crate::simulation::MedianDistribution;

/// How raw probabilities were scaled onto the median-win target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// `raw_i * target / sum(raw)`
    Proportional,
    /// Every raw probability was zero; target split evenly
    EvenSplit,
    /// No teams to normalize
    Empty,
}

/// Simulated outlook for one team
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamResult {
    pub name: String,
    pub point_estimate: f64,
    pub uncertainty: f64,
    pub resolution: Resolution,
    /// Share of trials finishing strictly above the median, in percent
    pub raw_probability_percent: f64,
    /// Normalized and rounded to one decimal
    pub win_probability_percent: f64,
    pub above_median: bool,
}

/// Output of one simulator invocation
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    pub median_estimate: f64,
    pub trials: usize,
    pub target_percent: f64,
    pub normalization: Normalization,
    /// Sorted by descending point estimate
    pub teams: Vec<TeamResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<MedianDistribution>,
}

impl SimulationResult {
    pub fn team(&self, name: &str) -> Option<&TeamResult> {
        self.teams.iter().find(|t| t.name == name)
    }

    /// Sum of normalized probabilities
    pub fn total_percent(&self) -> f64 {
        self.teams.iter().map(|t| t.win_probability_percent).sum()
    }

    pub fn teams_above_median(&self) -> usize {
        self.teams.iter().filter(|t| t.above_median).count()
    }
}
