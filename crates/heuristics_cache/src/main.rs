//! Heuristics Cache CLI
//!
//! Inspect, query, and export the best-starting-heuristics analysis file.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "heuristics_cache")]
#[command(about = "Inspect the best-starting-heuristics analysis file", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Print parse statistics for the analysis file
    Stats {
        /// Input CSV file path
        #[arg(long)]
        csv: PathBuf,
    },

    /// Look up the stored entry for one game
    Lookup {
        /// Input CSV file path
        #[arg(long)]
        csv: PathBuf,

        /// Game key to look up
        #[arg(long)]
        game: String,
    },

    /// Print all game keys in the file
    Keys {
        /// Input CSV file path
        #[arg(long)]
        csv: PathBuf,
    },

    /// Export the index as pretty JSON
    Export {
        /// Input CSV file path
        #[arg(long)]
        csv: PathBuf,

        /// Output JSON file path
        #[arg(long)]
        out: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Stats { csv } => {
            let (index, stats) = heuristics_cache::parse_csv_to_index(&csv)?;

            println!("✅ Parsed {}", csv.display());
            println!("   Rows:    {}", stats.total_rows);
            println!("   Parsed:  {}", stats.parsed);
            println!("   Failed:  {}", stats.failed);
            println!("   Entries: {}", index.len());
        }

        Commands::Lookup { csv, game } => {
            let (index, _) = heuristics_cache::parse_csv_to_index(&csv)?;

            match index.get(&game) {
                Some(entry) => {
                    println!("{}", entry.game_key);
                    println!("   Top heuristic:  {}", entry.top_heuristic);
                    println!("   Top score:      {}", entry.top_score);
                    match entry.last_evaluated_utc() {
                        Some(ts) => println!("   Last evaluated: {}", ts.to_rfc3339()),
                        None => println!("   Last evaluated: {} ms (epoch)", entry.last_evaluated_ms),
                    }
                }
                None => {
                    eprintln!("No entry for game '{}'", game);
                    std::process::exit(1);
                }
            }
        }

        Commands::Keys { csv } => {
            let (index, _) = heuristics_cache::parse_csv_to_index(&csv)?;

            let mut keys: Vec<&str> = index.game_keys().collect();
            keys.sort_unstable();
            for key in keys {
                println!("{}", key);
            }
        }

        Commands::Export { csv, out } => {
            let (index, stats) = heuristics_cache::parse_csv_to_index(&csv)?;

            let json = serde_json::to_string_pretty(&index)?;
            std::fs::write(&out, json)?;

            println!("✅ Exported {} entries to {}", index.len(), out.display());
            if stats.failed > 0 {
                println!("   ({} rows failed to parse)", stats.failed);
            }
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("heuristics_cache CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
