use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{LineupEntry, PeriodRelation};
use crate::error::{MedianError, Result};

/// League state as resolved by a data provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    #[serde(default)]
    pub league: Option<String>,
    #[serde(default)]
    pub season: Option<i32>,
    /// The period currently being played
    pub current_period: u32,
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
    pub periods: Vec<PeriodSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSnapshot {
    pub period: u32,
    pub teams: Vec<TeamSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSnapshot {
    pub name: String,
    /// Known final score, only meaningful for past periods
    #[serde(default)]
    pub final_score: Option<f64>,
    #[serde(default)]
    pub lineup: Vec<LineupEntry>,
}

impl LeagueSnapshot {
    pub fn period(&self, period: u32) -> Result<&PeriodSnapshot> {
        self.periods
            .iter()
            .find(|p| p.period == period)
            .ok_or(MedianError::PeriodNotFound { period })
    }

    pub fn relation(&self, period: u32) -> PeriodRelation {
        PeriodRelation::between(period, self.current_period)
    }

    pub fn display_name(&self) -> &str {
        self.league.as_deref().unwrap_or("League")
    }
}

/// Provider of league snapshots
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeagueSource: Send + Sync {
    /// Short label for logs
    fn describe(&self) -> String;

    async fn snapshot(&self) -> Result<LeagueSnapshot>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> LeagueSnapshot {
        LeagueSnapshot {
            league: None,
            season: Some(2025),
            current_period: 5,
            fetched_at: None,
            periods: vec![PeriodSnapshot {
                period: 4,
                teams: vec![],
            }],
        }
    }

    #[test]
    fn period_lookup() {
        let snap = snapshot();
        assert_eq!(snap.period(4).expect("period 4 should exist").period, 4);
        assert!(matches!(
            snap.period(9),
            Err(MedianError::PeriodNotFound { period: 9 })
        ));
    }

    #[test]
    fn relation_and_display_name() {
        let snap = snapshot();
        assert_eq!(snap.relation(4), PeriodRelation::Past);
        assert_eq!(snap.relation(5), PeriodRelation::Current);
        assert_eq!(snap.display_name(), "League");
    }
}
