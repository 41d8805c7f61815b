//! Best-starting-heuristics CSV → in-memory index.
//!
//! Source file format (header line first, then one row per game):
//! `<game_key>,<top_heuristic>,<top_score>,<last_evaluated_ms>`
//!
//! The format is a plain comma split: no quoting, no escaping. Rows that
//! do not parse are skipped and logged, never abort the load.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Number of fields in one data row.
const FIELDS_PER_ROW: usize = 4;

/// Collected analysis data for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicsEntry {
    /// Name of the game, cleaned for filepath-friendliness. Also the index key.
    pub game_key: String,
    /// Description of the top starting heuristic found for this game.
    pub top_heuristic: String,
    /// Win percentage achieved with the top starting heuristic.
    pub top_score: f32,
    /// When this game was last analysed, in milliseconds since the Unix epoch (UTC).
    pub last_evaluated_ms: i64,
}

impl HeuristicsEntry {
    /// Last-analysed time as a UTC datetime, or `None` when the stored
    /// millisecond value is outside the representable range.
    pub fn last_evaluated_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.last_evaluated_ms).single()
    }
}

/// Runtime index for heuristic lookup by game key.
///
/// Built once by [`parse_csv_to_index`] or [`load_data`] and never mutated
/// afterwards, so shared references are safe to hand out freely. Iteration
/// order over keys is unspecified.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeuristicsIndex {
    entries: HashMap<String, HeuristicsEntry>,
}

impl HeuristicsIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add an entry under its game key, replacing any earlier entry for the
    /// same game.
    pub fn insert(&mut self, entry: HeuristicsEntry) {
        self.entries.insert(entry.game_key.clone(), entry);
    }

    /// Get the stored entry for a game, `None` when the game is unknown.
    pub fn get(&self, game_key: &str) -> Option<&HeuristicsEntry> {
        self.entries.get(game_key)
    }

    /// All game keys currently present in the index.
    pub fn game_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All stored entries.
    pub fn iter(&self) -> impl Iterator<Item = &HeuristicsEntry> {
        self.entries.values()
    }

    /// Total entry count
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// CSV parsing statistics. The header row is never counted.
#[derive(Debug, Clone)]
pub struct ParseStats {
    pub total_rows: u32,
    pub parsed: u32,
    pub failed: u32,
}

impl ParseStats {
    fn new() -> Self {
        Self {
            total_rows: 0,
            parsed: 0,
            failed: 0,
        }
    }
}

/// Parse the best-starting-heuristics CSV file into an index.
///
/// The first line is always treated as a header and never parsed. Each
/// data row must carry exactly four comma-separated fields: game key,
/// heuristic description, win percentage, epoch-millisecond timestamp.
/// Quoting is disabled, matching the producer: a comma always splits,
/// even inside double quotes.
///
/// Rows with the wrong field count, an empty key, or a non-numeric
/// score/timestamp are skipped, logged, and counted in the returned
/// [`ParseStats`]. Duplicate keys resolve to the last row in the file.
///
/// # Errors
///
/// Only opening the file can fail; a file that opens always yields an
/// index (possibly empty, when every row was skipped or none exist).
pub fn parse_csv_to_index(csv_path: &Path) -> Result<(HeuristicsIndex, ParseStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .quoting(false)
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open analysis file: {}", csv_path.display()))?;

    let mut index = HeuristicsIndex::new();
    let mut stats = ParseStats::new();

    for result in reader.records() {
        stats.total_rows += 1;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                stats.failed += 1;
                warn!("Row {}: CSV read error: {}", stats.total_rows, e);
                continue;
            }
        };

        if record.len() != FIELDS_PER_ROW {
            stats.failed += 1;
            warn!(
                "Row {} has {} fields (expected {}), skipping",
                stats.total_rows,
                record.len(),
                FIELDS_PER_ROW
            );
            continue;
        }

        let game_key = record[0].trim().trim_start_matches('\u{feff}').to_string(); // Strip BOM
        if game_key.is_empty() {
            stats.failed += 1;
            warn!("Row {} has an empty game key, skipping", stats.total_rows);
            continue;
        }

        let top_heuristic = record[1].trim().to_string();

        let top_score = match record[2].trim().parse::<f32>() {
            Ok(v) => v,
            Err(_) => {
                stats.failed += 1;
                warn!(
                    "Row {} ({}): invalid score value '{}', skipping",
                    stats.total_rows,
                    game_key,
                    record[2].trim()
                );
                continue;
            }
        };

        let last_evaluated_ms = match record[3].trim().parse::<i64>() {
            Ok(v) => v,
            Err(_) => {
                stats.failed += 1;
                warn!(
                    "Row {} ({}): invalid timestamp value '{}', skipping",
                    stats.total_rows,
                    game_key,
                    record[3].trim()
                );
                continue;
            }
        };

        index.insert(HeuristicsEntry {
            game_key,
            top_heuristic,
            top_score,
            last_evaluated_ms,
        });
        stats.parsed += 1;
    }

    Ok((index, stats))
}

/// Load the analysis file, absorbing file-access failures.
///
/// A missing or unreadable file is logged and yields an empty index, so
/// callers always get a usable table. "No entries" is therefore ambiguous
/// between an empty file and an unreadable one; use [`parse_csv_to_index`]
/// when the cause matters.
///
/// Every call re-reads the file; see [`crate::cache::get_heuristics_index`]
/// for the load-once shared instance.
pub fn load_data(csv_path: &Path) -> HeuristicsIndex {
    match parse_csv_to_index(csv_path) {
        Ok((index, stats)) => {
            if stats.failed > 0 {
                warn!(
                    "Skipped {} of {} rows in {}",
                    stats.failed,
                    stats.total_rows,
                    csv_path.display()
                );
            }
            index
        }
        Err(e) => {
            warn!("Could not load analysis file {}: {e:#}", csv_path.display());
            HeuristicsIndex::new()
        }
    }
}
