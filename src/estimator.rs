//! Score estimation
//!
//! Collapses a team's lineup for one period into a single `TeamState`:
//! a point estimate, the part of it still subject to noise, and how settled
//! it is. Missing numbers count as zero.

use tracing::debug;

use crate::domain::{LineupEntry, PeriodRelation, Resolution, TeamState};
use crate::error::Result;

/// Slots that never score: bench and injured reserve
pub const DEFAULT_EXCLUDED_SLOTS: [&str; 2] = ["BE", "IR"];

/// Per-period totals over the eligible (starting) lineup
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LineupTotals {
    pub actual: f64,
    pub projected: f64,
    pub starters: usize,
}

#[derive(Debug, Clone)]
pub struct ScoreEstimator {
    excluded_slots: Vec<String>,
}

impl Default for ScoreEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_SLOTS.iter().map(|s| s.to_string()))
    }
}

impl ScoreEstimator {
    pub fn new<I, S>(excluded_slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            excluded_slots: excluded_slots
                .into_iter()
                .map(|s| s.as_ref().trim().to_ascii_uppercase())
                .collect(),
        }
    }

    /// Whether a slot contributes to the team score
    pub fn is_eligible(&self, slot: &str) -> bool {
        let slot = slot.trim().to_ascii_uppercase();
        !self.excluded_slots.iter().any(|s| *s == slot)
    }

    /// Sum actual and projected points over eligible entries.
    ///
    /// With `allow_average_fallback`, a missing projection falls back to the
    /// player's season-average projection before defaulting to zero.
    pub fn totals(&self, lineup: &[LineupEntry], allow_average_fallback: bool) -> LineupTotals {
        lineup
            .iter()
            .filter(|entry| self.is_eligible(&entry.slot))
            .fold(LineupTotals::default(), |mut acc, entry| {
                let projected = match entry.projected_points {
                    Some(p) => p,
                    None if allow_average_fallback => entry.projected_average_points.unwrap_or(0.0),
                    None => 0.0,
                };
                acc.actual += entry.points.unwrap_or(0.0);
                acc.projected += projected;
                acc.starters += 1;
                acc
            })
    }

    /// Estimate one team's score for the target period.
    ///
    /// `final_score` is only consulted for past periods; when it is absent
    /// the eligible actual points are used instead.
    pub fn estimate(
        &self,
        name: &str,
        lineup: &[LineupEntry],
        relation: PeriodRelation,
        final_score: Option<f64>,
    ) -> Result<TeamState> {
        let state = match relation {
            PeriodRelation::Past => {
                let score =
                    final_score.unwrap_or_else(|| self.totals(lineup, false).actual);
                TeamState::settled(name, score)?
            }
            PeriodRelation::Current => {
                let totals = self.totals(lineup, true);
                let remaining = totals.projected;
                let resolution = if remaining == 0.0 {
                    Resolution::Final
                } else {
                    Resolution::Ongoing
                };
                TeamState::new(name, totals.actual + remaining, remaining.abs(), resolution)?
            }
            PeriodRelation::Future => {
                let projected = self.totals(lineup, false).projected;
                TeamState::new(name, projected, projected.abs(), Resolution::Projected)?
            }
        };

        debug!(
            team = name,
            ?relation,
            estimate = state.point_estimate(),
            uncertainty = state.uncertainty(),
            resolution = %state.resolution(),
            "estimated team score"
        );

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lineup() -> Vec<LineupEntry> {
        vec![
            LineupEntry::new("QB", Some(20.0), Some(0.0)),
            LineupEntry::new("RB", Some(8.0), Some(6.0)),
            LineupEntry::new("WR", None, Some(12.5)),
            LineupEntry::new("BE", Some(30.0), Some(10.0)),
            LineupEntry::new("IR", Some(5.0), Some(5.0)),
        ]
    }

    #[test]
    fn test_bench_and_ir_excluded() {
        let estimator = ScoreEstimator::default();
        let totals = estimator.totals(&lineup(), false);
        assert_eq!(totals.starters, 3);
        assert!((totals.actual - 28.0).abs() < 1e-9);
        assert!((totals.projected - 18.5).abs() < 1e-9);
    }

    #[test]
    fn test_slot_matching_ignores_case() {
        let estimator = ScoreEstimator::default();
        assert!(!estimator.is_eligible(" be "));
        assert!(!estimator.is_eligible("ir"));
        assert!(estimator.is_eligible("FLEX"));
    }

    #[test]
    fn test_past_uses_supplied_final_score() {
        let estimator = ScoreEstimator::default();
        let team = estimator
            .estimate("A", &lineup(), PeriodRelation::Past, Some(131.2))
            .unwrap();
        assert_eq!(team.point_estimate(), 131.2);
        assert_eq!(team.uncertainty(), 0.0);
        assert_eq!(team.resolution(), Resolution::Final);
    }

    #[test]
    fn test_past_without_final_score_sums_actuals() {
        let estimator = ScoreEstimator::default();
        let team = estimator
            .estimate("A", &lineup(), PeriodRelation::Past, None)
            .unwrap();
        assert!((team.point_estimate() - 28.0).abs() < 1e-9);
        assert_eq!(team.resolution(), Resolution::Final);
    }

    #[test]
    fn test_current_period_ongoing() {
        let estimator = ScoreEstimator::default();
        let team = estimator
            .estimate("A", &lineup(), PeriodRelation::Current, None)
            .unwrap();
        assert!((team.point_estimate() - 46.5).abs() < 1e-9);
        assert!((team.uncertainty() - 18.5).abs() < 1e-9);
        assert_eq!(team.resolution(), Resolution::Ongoing);
    }

    #[test]
    fn test_current_period_all_played_is_final() {
        let estimator = ScoreEstimator::default();
        let lineup = vec![
            LineupEntry::new("QB", Some(22.0), Some(0.0)),
            LineupEntry::new("K", Some(9.0), None),
        ];
        let team = estimator
            .estimate("A", &lineup, PeriodRelation::Current, None)
            .unwrap();
        assert_eq!(team.point_estimate(), 31.0);
        assert_eq!(team.resolution(), Resolution::Final);
    }

    #[test]
    fn test_current_period_average_fallback() {
        let estimator = ScoreEstimator::default();
        let lineup = vec![LineupEntry::new("TE", Some(3.0), None).with_projected_average(9.0)];
        let team = estimator
            .estimate("A", &lineup, PeriodRelation::Current, None)
            .unwrap();
        assert_eq!(team.point_estimate(), 12.0);
        assert_eq!(team.uncertainty(), 9.0);
    }

    #[test]
    fn test_future_period_ignores_actuals_and_average() {
        let estimator = ScoreEstimator::default();
        let mut lineup = lineup();
        lineup.push(LineupEntry::new("TE", None, None).with_projected_average(9.0));
        let team = estimator
            .estimate("A", &lineup, PeriodRelation::Future, Some(200.0))
            .unwrap();
        assert!((team.point_estimate() - 18.5).abs() < 1e-9);
        assert!((team.uncertainty() - 18.5).abs() < 1e-9);
        assert_eq!(team.resolution(), Resolution::Projected);
    }

    #[test]
    fn test_negative_remaining_uses_magnitude() {
        let estimator = ScoreEstimator::default();
        let lineup = vec![LineupEntry::new("D/ST", Some(4.0), Some(-2.0))];
        let team = estimator
            .estimate("A", &lineup, PeriodRelation::Current, None)
            .unwrap();
        assert_eq!(team.point_estimate(), 2.0);
        assert_eq!(team.uncertainty(), 2.0);
        assert_eq!(team.resolution(), Resolution::Ongoing);
    }

    #[test]
    fn test_custom_excluded_slots() {
        let estimator = ScoreEstimator::new(["BE", "IR", "TAXI"]);
        let lineup = vec![
            LineupEntry::new("QB", Some(10.0), None),
            LineupEntry::new("TAXI", Some(50.0), None),
        ];
        assert_eq!(estimator.totals(&lineup, false).actual, 10.0);
    }
}
