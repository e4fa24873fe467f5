//! Command-line interface for tabrecon

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tabrecon")]
#[command(about = "Reconcile table record counts between two report snapshots")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare two report files and classify every table
    Compare {
        /// "Before" (source) report file
        before: PathBuf,

        /// "After" (target) report file
        after: PathBuf,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,

        /// Write the full comparison to a file (.xlsx, .csv, or .json)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Only print rows that are not a MATCH
        #[arg(long)]
        diff_only: bool,
    },

    /// Parse a single report file and show the extracted inventory
    Parse {
        /// Report file to parse
        input: PathBuf,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,

        /// Limit the number of entries shown (0 = no limit)
        #[arg(long, default_value = "0")]
        limit: usize,
    },
}

impl Cli {
    /// Log filter implied by the global flags; must be applied before the
    /// logger is initialized, since env_logger's filter is fixed at init.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}

/// Parse output format string
#[derive(Debug, Clone)]
pub enum OutputFormat {
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}. Use 'pretty' or 'json'", s)),
        }
    }
}
