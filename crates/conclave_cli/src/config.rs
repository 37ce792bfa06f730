//! Command-line and environment configuration.

use clap::Parser;
use conclave_core::DEFAULT_LOG_LEVEL;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "conclave")]
#[command(version, about = "Interactive console for the conclave registry")]
pub struct Args {
    /// SQLite database file
    #[arg(long, env = "CONCLAVE_DB")]
    pub db: PathBuf,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, env = "CONCLAVE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; file logging is off without it
    #[arg(long, env = "CONCLAVE_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Load the demo dataset before showing the menu
    #[arg(long)]
    pub seed_demo: bool,

    /// Print read results as pretty JSON
    #[arg(long)]
    pub json: bool,
}

impl Args {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
