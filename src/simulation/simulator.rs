//! Monte Carlo median-win simulator
//!
//! For every team we estimate P(final score > league median):
//!
//! - Final scores compare directly against the point-estimate median.
//! - Live and projected scores are drawn from
//!   `Normal(point_estimate, noise_ratio * uncertainty)` and the share of
//!   draws strictly above the median is the raw probability.
//!
//! Raw probabilities are then rescaled so the league sums to the median-win
//! target. The same draws feed the optional distribution of per-trial
//! league medians, so each trial is one consistent league outcome.

use std::collections::HashSet;

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::distribution::MedianDistribution;
use super::normalize::{normalize, MedianTarget};
use super::stats;
use crate::domain::{Normalization, SimulationResult, TeamResult, TeamState};
use crate::error::{MedianError, Result};

/// Projection noise as a share of the still-uncertain points
pub const DEFAULT_NOISE_RATIO: f64 = 0.15;

/// Trials per team
pub const DEFAULT_TRIALS: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationParams {
    pub trials: usize,
    pub target: MedianTarget,
    pub noise_ratio: f64,
    /// Keep per-trial draws and report the simulated median distribution
    pub include_distribution: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            target: MedianTarget::PerSlot,
            noise_ratio: DEFAULT_NOISE_RATIO,
            include_distribution: false,
        }
    }
}

impl SimulationParams {
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_target(mut self, target: MedianTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_noise_ratio(mut self, noise_ratio: f64) -> Self {
        self.noise_ratio = noise_ratio;
        self
    }

    pub fn with_distribution(mut self, include: bool) -> Self {
        self.include_distribution = include;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.noise_ratio.is_finite() || self.noise_ratio < 0.0 {
            return Err(MedianError::Validation(format!(
                "noise_ratio must be finite and non-negative, got {}",
                self.noise_ratio
            )));
        }
        if let MedianTarget::Fixed(total) = self.target {
            if !total.is_finite() || total < 0.0 {
                return Err(MedianError::Validation(format!(
                    "target_percent must be finite and non-negative, got {total}"
                )));
            }
        }
        Ok(())
    }
}

/// Per-team outcome of the sampling step
struct TeamDraws {
    raw_percent: f64,
    /// Only kept when the distribution is requested
    samples: Option<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct MedianSimulator {
    params: SimulationParams,
}

impl Default for MedianSimulator {
    fn default() -> Self {
        Self {
            params: SimulationParams::default(),
        }
    }
}

impl MedianSimulator {
    pub fn new(params: SimulationParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Run one simulation over a snapshot of team states.
    ///
    /// Team names must be unique. An empty slice yields an empty result
    /// with a zero median.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        teams: &[TeamState],
        rng: &mut R,
    ) -> Result<SimulationResult> {
        let mut seen = HashSet::with_capacity(teams.len());
        for team in teams {
            if !seen.insert(team.name()) {
                return Err(MedianError::DuplicateTeam(team.name().to_string()));
            }
        }

        let trials = if self.params.trials == 0 {
            warn!("trial count of 0 requested, running a single trial");
            1
        } else {
            self.params.trials
        };
        let target_percent = self.params.target.resolve(teams.len());

        let estimates: Vec<f64> = teams.iter().map(TeamState::point_estimate).collect();
        let Some(median_estimate) = stats::median(&estimates) else {
            warn!("no teams to simulate");
            return Ok(SimulationResult {
                median_estimate: 0.0,
                trials,
                target_percent,
                normalization: Normalization::Empty,
                teams: Vec::new(),
                distribution: self
                    .params
                    .include_distribution
                    .then(|| MedianDistribution::from_samples(Vec::new())),
            });
        };

        let draws = teams
            .iter()
            .map(|team| self.draw_team(team, median_estimate, trials, &mut *rng))
            .collect::<Result<Vec<_>>>()?;

        let raw: Vec<f64> = draws.iter().map(|d| d.raw_percent).collect();
        let normalized = normalize(&raw, target_percent);

        let distribution = if self.params.include_distribution {
            Some(trial_medians(&draws, trials))
        } else {
            None
        };

        let mut results: Vec<TeamResult> = teams
            .iter()
            .zip(raw.iter().zip(normalized.values.iter()))
            .map(|(team, (&raw_percent, &win_percent))| TeamResult {
                name: team.name().to_string(),
                point_estimate: team.point_estimate(),
                uncertainty: team.uncertainty(),
                resolution: team.resolution(),
                raw_probability_percent: raw_percent,
                win_probability_percent: win_percent,
                above_median: team.point_estimate() > median_estimate,
            })
            .collect();
        results.sort_by(|a, b| {
            b.point_estimate
                .total_cmp(&a.point_estimate)
                .then_with(|| a.name.cmp(&b.name))
        });

        info!(
            teams = results.len(),
            trials,
            median = median_estimate,
            target = target_percent,
            normalization = ?normalized.method,
            "median simulation complete"
        );

        Ok(SimulationResult {
            median_estimate,
            trials,
            target_percent,
            normalization: normalized.method,
            teams: results,
            distribution,
        })
    }

    fn draw_team<R: Rng + ?Sized>(
        &self,
        team: &TeamState,
        median: f64,
        trials: usize,
        rng: &mut R,
    ) -> Result<TeamDraws> {
        let estimate = team.point_estimate();
        let sigma = self.params.noise_ratio * team.uncertainty();
        let keep = self.params.include_distribution;

        // Settled or zero-noise teams: deterministic comparison, no sampling
        if !team.resolution().is_stochastic() || sigma == 0.0 {
            let raw_percent = if estimate > median { 100.0 } else { 0.0 };
            return Ok(TeamDraws {
                raw_percent,
                samples: keep.then(|| vec![estimate; trials]),
            });
        }

        let normal = Normal::new(estimate, sigma).map_err(|e| {
            MedianError::invalid_team(team.name(), format!("bad score distribution: {e}"))
        })?;

        let mut above = 0usize;
        let mut samples = keep.then(|| Vec::with_capacity(trials));
        for _ in 0..trials {
            let draw = normal.sample(rng);
            if draw > median {
                above += 1;
            }
            if let Some(samples) = samples.as_mut() {
                samples.push(draw);
            }
        }

        let raw_percent = above as f64 / trials as f64 * 100.0;
        debug!(
            team = team.name(),
            mean = estimate,
            sigma,
            raw_percent,
            "sampled team score"
        );

        Ok(TeamDraws {
            raw_percent,
            samples,
        })
    }
}

/// League median for each trial index across all teams' draws
fn trial_medians(draws: &[TeamDraws], trials: usize) -> MedianDistribution {
    let paths: Vec<&[f64]> = draws
        .iter()
        .filter_map(|d| d.samples.as_deref())
        .collect();

    let mut scratch = vec![0.0; paths.len()];
    let medians = (0..trials)
        .filter_map(|t| {
            for (slot, path) in scratch.iter_mut().zip(&paths) {
                *slot = path[t];
            }
            stats::median_in_place(&mut scratch)
        })
        .collect();

    MedianDistribution::from_samples(medians)
}
