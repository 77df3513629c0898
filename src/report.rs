//! End-to-end median report: snapshot → team states → simulation

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{info, instrument};

use crate::domain::{PeriodRelation, SimulationResult, TeamState};
use crate::error::Result;
use crate::estimator::ScoreEstimator;
use crate::simulation::{MedianSimulator, SimulationParams};
use crate::source::{LeagueSource, PeriodSnapshot};

#[derive(Debug, Clone, Serialize)]
pub struct MedianReport {
    pub league: String,
    pub period: u32,
    pub relation: PeriodRelation,
    /// Seed the run was drawn with; rerun with it to reproduce
    pub seed: u64,
    #[serde(flatten)]
    pub result: SimulationResult,
}

/// Estimate every team in a period
pub fn estimate_period(
    estimator: &ScoreEstimator,
    period: &PeriodSnapshot,
    relation: PeriodRelation,
) -> Result<Vec<TeamState>> {
    period
        .teams
        .iter()
        .map(|team| estimator.estimate(&team.name, &team.lineup, relation, team.final_score))
        .collect()
}

impl MedianReport {
    /// Pull a snapshot from `source` and simulate one period.
    ///
    /// `period` defaults to the league's current period. The median
    /// distribution is only kept for periods that are not yet settled.
    #[instrument(skip_all, fields(source = %source.describe()))]
    pub async fn generate(
        source: &dyn LeagueSource,
        estimator: &ScoreEstimator,
        params: SimulationParams,
        period: Option<u32>,
        seed: u64,
    ) -> Result<Self> {
        let snapshot = source.snapshot().await?;
        let period = period.unwrap_or(snapshot.current_period);
        let relation = snapshot.relation(period);
        let teams = estimate_period(estimator, snapshot.period(period)?, relation)?;

        let include_distribution = params.include_distribution && relation != PeriodRelation::Past;
        let simulator = MedianSimulator::new(params.with_distribution(include_distribution))?;

        info!(period, ?relation, teams = teams.len(), seed, "simulating period");
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let result = simulator.simulate(&teams, &mut rng)?;

        Ok(Self {
            league: snapshot.display_name().to_string(),
            period,
            relation,
            seed,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineupEntry, Resolution};
    use crate::error::MedianError;
    use crate::simulation::MedianTarget;
    use crate::source::{LeagueSnapshot, MockLeagueSource, TeamSnapshot};

    fn team(name: &str, final_score: Option<f64>, lineup: Vec<LineupEntry>) -> TeamSnapshot {
        TeamSnapshot {
            name: name.to_string(),
            final_score,
            lineup,
        }
    }

    fn league() -> LeagueSnapshot {
        LeagueSnapshot {
            league: Some("Test League".to_string()),
            season: Some(2025),
            current_period: 2,
            fetched_at: None,
            periods: vec![
                PeriodSnapshot {
                    period: 1,
                    teams: vec![
                        team("A", Some(120.0), vec![]),
                        team("B", Some(100.0), vec![]),
                        team("C", Some(95.0), vec![]),
                        team("D", Some(80.0), vec![]),
                    ],
                },
                PeriodSnapshot {
                    period: 2,
                    teams: vec![
                        team(
                            "A",
                            None,
                            vec![
                                LineupEntry::new("QB", Some(20.0), Some(10.0)),
                                LineupEntry::new("BE", Some(40.0), Some(0.0)),
                            ],
                        ),
                        team("B", None, vec![LineupEntry::new("QB", Some(25.0), Some(0.0))]),
                        team("C", None, vec![LineupEntry::new("RB", Some(5.0), Some(15.0))]),
                        team("D", None, vec![LineupEntry::new("WR", None, Some(18.0))]),
                    ],
                },
            ],
        }
    }

    fn source() -> MockLeagueSource {
        let mut source = MockLeagueSource::new();
        source.expect_describe().returning(|| "mock".to_string());
        source.expect_snapshot().times(1).returning(|| Ok(league()));
        source
    }

    #[tokio::test]
    async fn test_current_period_report() {
        let params = SimulationParams::default().with_distribution(true);
        let report = MedianReport::generate(&source(), &ScoreEstimator::default(), params, None, 3)
            .await
            .unwrap();

        assert_eq!(report.period, 2);
        assert_eq!(report.relation, PeriodRelation::Current);
        assert_eq!(report.league, "Test League");

        let result = &report.result;
        // Estimates 30, 25, 20, 18
        assert_eq!(result.median_estimate, 22.5);
        assert_eq!(result.team("B").unwrap().resolution, Resolution::Final);
        assert_eq!(result.team("A").unwrap().resolution, Resolution::Ongoing);
        assert_eq!(result.target_percent, 200.0);
        assert!((result.total_percent() - 200.0).abs() <= 0.4);
        assert_eq!(result.distribution.as_ref().unwrap().len(), 1000);
    }

    #[tokio::test]
    async fn test_past_period_is_settled() {
        let params = SimulationParams::default()
            .with_target(MedianTarget::Fixed(200.0))
            .with_distribution(true);
        let report =
            MedianReport::generate(&source(), &ScoreEstimator::default(), params, Some(1), 3)
                .await
                .unwrap();

        let result = &report.result;
        assert_eq!(report.relation, PeriodRelation::Past);
        assert_eq!(result.median_estimate, 97.5);
        assert_eq!(result.team("A").unwrap().win_probability_percent, 100.0);
        assert_eq!(result.team("B").unwrap().win_probability_percent, 100.0);
        assert_eq!(result.team("C").unwrap().win_probability_percent, 0.0);
        assert!(result.distribution.is_none());
    }

    #[tokio::test]
    async fn test_unknown_period() {
        let err = MedianReport::generate(
            &source(),
            &ScoreEstimator::default(),
            SimulationParams::default(),
            Some(9),
            3,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MedianError::PeriodNotFound { period: 9 }));
    }

    #[tokio::test]
    async fn test_seed_reproduces_report() {
        let estimator = ScoreEstimator::default();
        let a = MedianReport::generate(&source(), &estimator, SimulationParams::default(), None, 99)
            .await
            .unwrap();
        let b = MedianReport::generate(&source(), &estimator, SimulationParams::default(), None, 99)
            .await
            .unwrap();
        assert_eq!(a.result.teams, b.result.teams);
    }
}
