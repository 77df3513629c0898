pub mod snapshot_file;
pub mod traits;

pub use snapshot_file::SnapshotFile;
pub use traits::{LeagueSnapshot, LeagueSource, PeriodSnapshot, TeamSnapshot};

#[cfg(test)]
pub use traits::MockLeagueSource;
