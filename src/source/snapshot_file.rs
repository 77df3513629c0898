//! JSON snapshot file source
//!
//! Reads a `LeagueSnapshot` written by whatever tool pulled the league data.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::traits::{LeagueSnapshot, LeagueSource};
use crate::error::Result;

pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LeagueSource for SnapshotFile {
    fn describe(&self) -> String {
        format!("snapshot file {}", self.path.display())
    }

    async fn snapshot(&self) -> Result<LeagueSnapshot> {
        debug!(path = %self.path.display(), "reading league snapshot");
        let content = tokio::fs::read_to_string(&self.path).await?;
        let snapshot: LeagueSnapshot = serde_json::from_str(&content)?;

        info!(
            league = snapshot.display_name(),
            current_period = snapshot.current_period,
            periods = snapshot.periods.len(),
            "loaded league snapshot"
        );
        Ok(snapshot)
    }
}
