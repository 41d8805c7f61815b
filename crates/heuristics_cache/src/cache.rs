//! Process-wide shared heuristics index.
//!
//! The analysis file is read at most once per process and the resulting
//! index is shared behind a `OnceCell`. Path resolution order:
//! 1) `ANALYSIS_HEURISTICS_CSV` if set
//! 2) `../AI/resources/Analysis/BestStartingHeuristics.csv` (relative)

use crate::best_heuristics::{load_data, HeuristicsIndex};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;

/// Env var for overriding the analysis file path.
pub const HEURISTICS_CSV_ENV: &str = "ANALYSIS_HEURISTICS_CSV";

/// Default relative path used when `ANALYSIS_HEURISTICS_CSV` is not set.
pub const DEFAULT_HEURISTICS_REL_PATH: &str =
    "../AI/resources/Analysis/BestStartingHeuristics.csv";

static HEURISTICS_INDEX: OnceCell<HeuristicsIndex> = OnceCell::new();

/// Resolve the analysis file path from the environment, falling back to
/// the default relative location.
pub fn resolve_csv_path() -> PathBuf {
    if let Ok(path) = env::var(HEURISTICS_CSV_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    PathBuf::from(DEFAULT_HEURISTICS_REL_PATH)
}

/// Load (or return the already loaded) shared heuristics index.
///
/// The first call reads the file at the resolved path; later calls return
/// the same instance. A missing or unreadable file yields an empty shared
/// index, with the failure logged by [`load_data`]. Callers needing a
/// fresh read from a specific path should call [`load_data`] directly.
pub fn get_heuristics_index() -> &'static HeuristicsIndex {
    HEURISTICS_INDEX.get_or_init(|| load_data(&resolve_csv_path()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_path_prefers_env_override() {
        env::set_var(HEURISTICS_CSV_ENV, "/tmp/override.csv");
        assert_eq!(resolve_csv_path(), PathBuf::from("/tmp/override.csv"));

        // Whitespace-only values fall back to the default.
        env::set_var(HEURISTICS_CSV_ENV, "   ");
        assert_eq!(resolve_csv_path(), PathBuf::from(DEFAULT_HEURISTICS_REL_PATH));

        env::remove_var(HEURISTICS_CSV_ENV);
        assert_eq!(resolve_csv_path(), PathBuf::from(DEFAULT_HEURISTICS_REL_PATH));
    }

    #[test]
    fn shared_index_is_loaded_once() {
        let first = get_heuristics_index();
        let second = get_heuristics_index();
        assert!(std::ptr::eq(first, second));
    }
}
