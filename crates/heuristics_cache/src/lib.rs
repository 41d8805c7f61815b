//! Best-Heuristics Analysis Cache
//!
//! Loads the collected analysis results on the best starting heuristics
//! for training game-playing agents (CSV, one row per game) into an
//! in-memory index keyed by game name, and exposes read-only lookup.

pub mod best_heuristics;
pub mod cache;

// Re-export the index types and loaders
pub use best_heuristics::{
    load_data, parse_csv_to_index, HeuristicsEntry, HeuristicsIndex, ParseStats,
};

// Re-export the shared-instance accessor and path resolution
pub use cache::{
    get_heuristics_index, resolve_csv_path, DEFAULT_HEURISTICS_REL_PATH, HEURISTICS_CSV_ENV,
};
