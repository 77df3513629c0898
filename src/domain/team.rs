use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::{MedianError, Result};

/// How settled a team's score is for the period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// Score is known, no randomness applied
    Final,
    /// Games in progress, actual points plus projected remainder
    Ongoing,
    /// Nothing played yet, entirely projected
    Projected,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Final => "Final",
            Resolution::Ongoing => "Ongoing",
            Resolution::Projected => "Projected",
        }
    }

    /// Whether samples should be drawn for this team
    pub fn is_stochastic(&self) -> bool {
        !matches!(self, Resolution::Final)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the analyzed period sits relative to the league's current period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodRelation {
    Past,
    Current,
    Future,
}

impl PeriodRelation {
    /// Classify `target` against the league's `current` period
    pub fn between(target: u32, current: u32) -> Self {
        match target.cmp(&current) {
            Ordering::Less => PeriodRelation::Past,
            Ordering::Equal => PeriodRelation::Current,
            Ordering::Greater => PeriodRelation::Future,
        }
    }
}

/// One rostered player's contribution for the period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineupEntry {
    /// Lineup slot (e.g., "QB", "FLEX", "BE", "IR")
    pub slot: String,
    /// Points scored so far
    #[serde(default)]
    pub points: Option<f64>,
    /// Projected points still to come
    #[serde(default)]
    pub projected_points: Option<f64>,
    /// Season-average projection, used when `projected_points` is missing
    #[serde(default)]
    pub projected_average_points: Option<f64>,
}

impl LineupEntry {
    pub fn new(slot: impl Into<String>, points: Option<f64>, projected_points: Option<f64>) -> Self {
        Self {
            slot: slot.into(),
            points,
            projected_points,
            projected_average_points: None,
        }
    }

    pub fn with_projected_average(mut self, average: f64) -> Self {
        self.projected_average_points = Some(average);
        self
    }
}

/// A team's scoring outlook for one period, ready to simulate.
///
/// Fields are private so the invariants hold for every value the simulator
/// sees: both numbers finite, `uncertainty >= 0`, and `Final` teams carry no
/// uncertainty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamState {
    name: String,
    point_estimate: f64,
    uncertainty: f64,
    resolution: Resolution,
}

impl TeamState {
    /// Build a team state, rejecting values that would make sampling undefined
    pub fn new(
        name: impl Into<String>,
        point_estimate: f64,
        uncertainty: f64,
        resolution: Resolution,
    ) -> Result<Self> {
        let name = name.into();

        if !point_estimate.is_finite() {
            return Err(MedianError::invalid_team(&name, "point estimate is not finite"));
        }
        if !uncertainty.is_finite() || uncertainty < 0.0 {
            return Err(MedianError::invalid_team(
                &name,
                format!("uncertainty must be finite and non-negative, got {uncertainty}"),
            ));
        }
        if resolution == Resolution::Final && uncertainty != 0.0 {
            return Err(MedianError::invalid_team(
                &name,
                format!("final score cannot carry uncertainty ({uncertainty})"),
            ));
        }

        Ok(Self {
            name,
            point_estimate,
            uncertainty,
            resolution,
        })
    }

    /// Settled score
    pub fn settled(name: impl Into<String>, score: f64) -> Result<Self> {
        Self::new(name, score, 0.0, Resolution::Final)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn point_estimate(&self) -> f64 {
        self.point_estimate
    }

    pub fn uncertainty(&self) -> f64 {
        self.uncertainty
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }
}
