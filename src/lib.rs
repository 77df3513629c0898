pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod estimator;
pub mod output;
pub mod report;
pub mod simulation;
pub mod source;

pub use config::AppConfig;
pub use domain::{
    LineupEntry, Normalization, PeriodRelation, Resolution, SimulationResult, TeamResult,
    TeamState,
};
pub use error::{MedianError, Result};
pub use estimator::ScoreEstimator;
pub use report::MedianReport;
pub use simulation::{MedianDistribution, MedianSimulator, MedianTarget, SimulationParams};
pub use source::{LeagueSnapshot, LeagueSource, SnapshotFile};
