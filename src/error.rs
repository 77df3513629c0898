use thiserror::Error;

/// Main error type for the median simulator
#[derive(Error, Debug)]
pub enum MedianError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Snapshot errors
    #[error("Period {period} not found in snapshot")]
    PeriodNotFound { period: u32 },

    #[error("Duplicate team name: {0}")]
    DuplicateTeam(String),

    // Team state invariants
    #[error("Invalid team state for {team}: {reason}")]
    InvalidTeamState { team: String, reason: String },

    // Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for MedianError
pub type Result<T> = std::result::Result<T, MedianError>;

impl MedianError {
    pub(crate) fn invalid_team(team: &str, reason: impl Into<String>) -> Self {
        MedianError::InvalidTeamState {
            team: team.to_string(),
            reason: reason.into(),
        }
    }
}
