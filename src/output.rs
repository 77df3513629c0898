//! Output formatting for median reports.
//!
//! Supports two modes: human-readable tables (default) and JSON (--json).

use serde::Serialize;
use std::fmt::Write as _;
use tabled::{Table, Tabled};

use crate::domain::{Normalization, PeriodRelation, TeamResult};
use crate::report::MedianReport;
use crate::simulation::{HistogramBin, MedianDistribution};

/// Widest histogram bar in characters
const BAR_WIDTH: usize = 40;

/// Output mode for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Table
        }
    }
}

#[derive(Debug, Tabled, Serialize)]
pub struct ResultRow {
    #[tabled(rename = "")]
    pub marker: &'static str,
    #[tabled(rename = "Team")]
    pub team: String,
    #[tabled(rename = "Score")]
    pub score: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "% Median Win")]
    pub median_win: String,
}

impl From<&TeamResult> for ResultRow {
    fn from(team: &TeamResult) -> Self {
        Self {
            marker: if team.above_median { "▲" } else { "" },
            team: team.name.clone(),
            score: format!("{:.2}", team.point_estimate),
            status: team.resolution.to_string(),
            median_win: format!("{:.1}%", team.win_probability_percent),
        }
    }
}

/// Results table, teams above the median marked with ▲
pub fn render_table(teams: &[TeamResult]) -> String {
    if teams.is_empty() {
        return "(no teams)".to_string();
    }
    let rows: Vec<ResultRow> = teams.iter().map(ResultRow::from).collect();
    Table::new(rows).to_string()
}

/// Text histogram of simulated medians with the projected median flagged
pub fn render_histogram(dist: &MedianDistribution, bins: usize, median: f64) -> String {
    let bins: Vec<HistogramBin> = dist.histogram(bins);
    let Some(peak) = bins.iter().map(|b| b.count).max().filter(|&c| c > 0) else {
        return "(no simulated medians)".to_string();
    };

    let mut out = String::new();
    for bin in &bins {
        let len = (bin.count * BAR_WIDTH).div_ceil(peak);
        let flag = if bin.contains(median) { "  <- projected median" } else { "" };
        let _ = writeln!(
            out,
            "{:>9.2} - {:>9.2} | {:<width$} {:>5}{}",
            bin.lower,
            bin.upper,
            "#".repeat(len),
            bin.count,
            flag,
            width = BAR_WIDTH
        );
    }

    if let Some(summary) = dist.summary() {
        let _ = writeln!(
            out,
            "mean {:.2}  sd {:.2}  5% {:.2}  50% {:.2}  95% {:.2}",
            summary.mean, summary.std_dev, summary.p05, summary.p50, summary.p95
        );
    }
    out
}

/// Full human-readable report
pub fn render_report(report: &MedianReport, bins: usize) -> String {
    let result = &report.result;
    let mut out = String::new();

    let _ = writeln!(out, "{} - Period {} Projected Median", report.league, report.period);
    let _ = writeln!(out);
    let _ = writeln!(out, "Projected Median Score: {:.2}", result.median_estimate);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", render_table(&result.teams));
    let _ = writeln!(
        out,
        "Status reflects live scoring. % Median Win is a simulation-based forecast normalized to {:.0}% ({} trials, seed {}).",
        result.target_percent, result.trials, report.seed
    );
    if result.normalization == Normalization::EvenSplit {
        let _ = writeln!(
            out,
            "No team finished above the median in any trial; the total is split evenly."
        );
    }

    if report.relation != PeriodRelation::Past {
        if let Some(dist) = &result.distribution {
            let _ = writeln!(out);
            let _ = writeln!(out, "Simulated Median Distribution");
            out.push_str(&render_histogram(dist, bins, result.median_estimate));
        }
    }

    out
}

/// Print a report in the chosen mode.
pub fn print_report(report: &MedianReport, bins: usize, mode: OutputMode) -> anyhow::Result<()> {
    match mode {
        OutputMode::Table => print!("{}", render_report(report, bins)),
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}
