//! Data export for comparison runs and run summaries.

use std::path::Path;

use serde::Serialize;

use crate::{Error, Result, puzzle::PuzzleState, types::Statistic};

/// One algorithm/board combination in a comparison run.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub algorithm: String,
    pub heuristic: String,
    pub board: String,
    pub solved: bool,
    pub steps: usize,
    pub open_list: usize,
    pub closed_list: usize,
    pub goal_depth: Option<u32>,
}

/// Write comparison rows as CSV with a header row.
pub fn write_comparison_csv(path: &Path, rows: &[ComparisonRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(Error::from)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|source| Error::Io {
        operation: format!("flush CSV to {}", path.display()),
        source,
    })?;
    Ok(())
}

/// JSON summary of a single solve run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub algorithm: String,
    pub heuristic: Option<String>,
    pub initial: PuzzleState,
    pub goal: PuzzleState,
    pub solved: bool,
    pub steps: usize,
    pub statistics: Vec<Statistic>,
    /// Boards along the root-to-goal path, when one was found.
    pub goal_path: Vec<PuzzleState>,
}

/// Write a solve-run summary as pretty-printed JSON.
pub fn write_run_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json).map_err(|source| Error::Io {
        operation: format!("write run summary to {}", path.display()),
        source,
    })
}
