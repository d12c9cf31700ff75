//! Episode records, aggregation across replicates, and table persistence
//!
//! The statistics pipeline deals in one record per fire episode. Replicate
//! outputs are concatenated in submission order into a single flat table
//! which can be written to and read from a plain two-column text file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Outcome of one fire episode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireEpisodeResult {
    /// Accumulated burning-cell count over the episode, ignition included.
    pub total_burned: u64,
    /// Transition steps until no cell burned.
    pub duration: u64,
}

/// Episode records gathered across all replicates of a harness run.
///
/// Order across replicates follows submission order; order within a
/// replicate is the episode execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedStatistics {
    records: Vec<FireEpisodeResult>,
}

impl AggregatedStatistics {
    /// Concatenate per-replicate record sequences, preserving their order.
    #[must_use]
    pub fn from_replicates(replicates: Vec<Vec<FireEpisodeResult>>) -> Self {
        Self {
            records: replicates.into_iter().flatten().collect(),
        }
    }

    /// All records, one per measured episode.
    #[must_use]
    pub fn records(&self) -> &[FireEpisodeResult] {
        &self.records
    }

    /// Total number of recorded episodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no episodes were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mean burned-cell count per episode; 0 for an empty table.
    #[must_use]
    pub fn mean_size(&self) -> f64 {
        self.mean(|r| r.total_burned)
    }

    /// Mean episode duration in steps; 0 for an empty table.
    #[must_use]
    pub fn mean_duration(&self) -> f64 {
        self.mean(|r| r.duration)
    }

    fn mean(&self, field: impl Fn(&FireEpisodeResult) -> u64) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.records.iter().map(field).sum();
        sum as f64 / self.records.len() as f64
    }

    /// Write the table as plain text: one `total_burned duration` row per
    /// episode, whitespace-delimited, no header, same order as in memory.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::SaveFailed`] when the file cannot be written.
    pub fn save_table<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        let table: String = self
            .records
            .iter()
            .map(|r| format!("{} {}\n", r.total_burned, r.duration))
            .collect();
        fs::write(path, table).map_err(|e| TableError::SaveFailed(e.to_string()))?;
        Ok(())
    }

    /// Read a table previously written by [`save_table`](Self::save_table).
    ///
    /// Values are parsed as (possibly fractional) numbers and truncated to
    /// integers, so tables written by tools that format counts as floats
    /// load as well. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::LoadFailed`] when the file cannot be read and
    /// [`TableError::ParseFailed`] when a row is not a pair of non-negative
    /// finite numbers.
    pub fn load_table<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let contents =
            fs::read_to_string(path).map_err(|e| TableError::LoadFailed(e.to_string()))?;

        let mut records = Vec::new();
        for (line_idx, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split_whitespace();
            let total_burned = parse_count(fields.next(), line_idx)?;
            let duration = parse_count(fields.next(), line_idx)?;
            if fields.next().is_some() {
                return Err(TableError::ParseFailed(format!(
                    "line {}: expected two columns",
                    line_idx + 1
                )));
            }
            records.push(FireEpisodeResult {
                total_burned,
                duration,
            });
        }
        Ok(Self { records })
    }
}

fn parse_count(field: Option<&str>, line_idx: usize) -> Result<u64, TableError> {
    let field = field.ok_or_else(|| {
        TableError::ParseFailed(format!("line {}: expected two columns", line_idx + 1))
    })?;
    let value: f64 = field.parse().map_err(|_| {
        TableError::ParseFailed(format!("line {}: '{field}' is not a number", line_idx + 1))
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(TableError::ParseFailed(format!(
            "line {}: '{field}' is not a non-negative count",
            line_idx + 1
        )));
    }
    Ok(value as u64)
}

/// Errors that can occur with table persistence operations.
#[derive(Debug)]
pub enum TableError {
    /// Failed to read the file.
    LoadFailed(String),
    /// Failed to parse the file contents.
    ParseFailed(String),
    /// Failed to write the file.
    SaveFailed(String),
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::LoadFailed(msg) => write!(f, "Failed to load: {msg}"),
            TableError::ParseFailed(msg) => write!(f, "Failed to parse: {msg}"),
            TableError::SaveFailed(msg) => write!(f, "Failed to save: {msg}"),
        }
    }
}

impl std::error::Error for TableError {}
