use clap::{ArgAction, Parser};
use report_uniquify::application::dto::IngestMode;
use std::path::PathBuf;

/// Load static-analysis reports into a deduplicated SQLite store
#[derive(Parser, Debug)]
#[command(name = "report-uniquify")]
#[command(version)]
#[command(
    about = "Load static-analysis reports into a deduplicated SQLite store",
    long_about = None
)]
pub struct Args {
    /// Report files (JSON holding one analysis or an array of analyses)
    #[arg(required = true, value_name = "REPORT")]
    pub reports: Vec<PathBuf>,

    /// SQLite database file (defaults to reports.db)
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// Ingestion mode: resolve (one transaction per analysis) or bulk
    #[arg(short, long)]
    pub mode: Option<IngestMode>,

    /// Config file (defaults to report-uniquify.config.yml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
