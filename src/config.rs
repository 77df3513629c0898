use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::estimator::{ScoreEstimator, DEFAULT_EXCLUDED_SLOTS};
use crate::simulation::{
    MedianTarget, SimulationParams, DEFAULT_HISTOGRAM_BINS, DEFAULT_NOISE_RATIO, DEFAULT_TRIALS,
};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub league: LeagueConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Monte Carlo trials per team
    #[serde(default = "default_trials")]
    pub trials: usize,
    /// Projection noise as a share of uncertain points (0.15 = 15%)
    #[serde(default = "default_noise_ratio")]
    pub noise_ratio: f64,
    /// Total the median-win percentages sum to; unset = 100 per winner slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_percent: Option<f64>,
    /// Fixed RNG seed for reproducible runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Bins in the simulated-median histogram
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

fn default_trials() -> usize {
    DEFAULT_TRIALS
}

fn default_noise_ratio() -> f64 {
    DEFAULT_NOISE_RATIO
}

fn default_histogram_bins() -> usize {
    DEFAULT_HISTOGRAM_BINS
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            noise_ratio: DEFAULT_NOISE_RATIO,
            target_percent: None,
            seed: None,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl SimulationConfig {
    pub fn params(&self, include_distribution: bool) -> SimulationParams {
        SimulationParams {
            trials: self.trials,
            target: MedianTarget::from_option(self.target_percent),
            noise_ratio: self.noise_ratio,
            include_distribution,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeagueConfig {
    /// Lineup slots that never count toward the score
    #[serde(default = "default_excluded_slots")]
    pub excluded_slots: Vec<String>,
}

fn default_excluded_slots() -> Vec<String> {
    DEFAULT_EXCLUDED_SLOTS.iter().map(|s| s.to_string()).collect()
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            excluded_slots: default_excluded_slots(),
        }
    }
}

impl LeagueConfig {
    pub fn estimator(&self) -> ScoreEstimator {
        ScoreEstimator::new(&self.excluded_slots)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            league: LeagueConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with default values
            .set_default("simulation.trials", DEFAULT_TRIALS as i64)?
            .set_default("simulation.noise_ratio", DEFAULT_NOISE_RATIO)?
            .set_default("simulation.histogram_bins", DEFAULT_HISTOGRAM_BINS as i64)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("FFMEDIAN_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (FFMEDIAN_SIMULATION__TRIALS, etc.)
            .add_source(
                Environment::with_prefix("FFMEDIAN")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.simulation.trials == 0 {
            errors.push("simulation.trials must be at least 1".to_string());
        }

        if !self.simulation.noise_ratio.is_finite() || self.simulation.noise_ratio < 0.0 {
            errors.push("simulation.noise_ratio must be a non-negative number".to_string());
        }

        if let Some(target) = self.simulation.target_percent {
            if !target.is_finite() || target <= 0.0 {
                errors.push(format!(
                    "simulation.target_percent must be positive, got {target}"
                ));
            }
        }

        if self.simulation.histogram_bins == 0 {
            errors.push("simulation.histogram_bins must be at least 1".to_string());
        }

        if self
            .league
            .excluded_slots
            .iter()
            .any(|slot| slot.trim().is_empty())
        {
            errors.push("league.excluded_slots must not contain blank entries".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.simulation.trials, 1000);
        assert_eq!(config.simulation.noise_ratio, 0.15);
        assert_eq!(config.league.excluded_slots, vec!["BE", "IR"]);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = AppConfig::default();
        config.simulation.trials = 0;
        config.simulation.noise_ratio = -1.0;
        config.simulation.target_percent = Some(0.0);
        config.league.excluded_slots.push("  ".to_string());

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            "[simulation]\ntrials = 5000\ntarget_percent = 600.0\nseed = 11\n\n[league]\nexcluded_slots = [\"BE\", \"IR\", \"TAXI\"]\n",
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.simulation.trials, 5000);
        assert_eq!(config.simulation.target_percent, Some(600.0));
        assert_eq!(config.simulation.seed, Some(11));
        assert_eq!(config.simulation.noise_ratio, 0.15);
        assert_eq!(config.league.excluded_slots.len(), 3);
    }

    #[test]
    fn test_load_from_empty_dir_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.simulation.histogram_bins, 30);
        assert_eq!(config.logging.level, "info");
        assert!(config.simulation.seed.is_none());
    }

    #[test]
    fn test_params_from_config() {
        let config = SimulationConfig {
            target_percent: Some(500.0),
            ..SimulationConfig::default()
        };
        let params = config.params(true);
        assert_eq!(params.target, MedianTarget::Fixed(500.0));
        assert!(params.include_distribution);
    }
}
