mod cli;
mod config;

use cli::Args;
use config::Settings;
use report_uniquify::prelude::*;
use std::path::Path;
use std::process;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::for_error(&e).as_i32());
    }
}

/// `RUST_LOG` wins unless `-v` was given.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("report_uniquify=warn")),
        1 => EnvFilter::new("report_uniquify=debug"),
        _ => EnvFilter::new("report_uniquify=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn run(args: Args) -> Result<()> {
    let config_file = match &args.config {
        Some(path) => Some(config::load_config_from_path(path)?),
        None => config::discover_config(Path::new("."))?,
    };
    let settings = Settings::resolve(&args, config_file);

    // Create adapters (Dependency Injection)
    let database = SqliteDatabase::open(&settings.database)?;
    let report_reader = FileSystemReader::new();
    let progress_reporter = if args.quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };

    let mut use_case = IngestReportsUseCase::new(database, report_reader, progress_reporter);
    let response = use_case.execute(IngestRequest::new(args.reports, settings.mode))?;
    let total_rows = use_case.database().total_rows()?;

    println!("{}", summary_line(&response, total_rows, &settings.database));
    Ok(())
}

fn summary_line(response: &IngestResponse, total_rows: usize, database: &Path) -> String {
    format!(
        "{} analyses ingested ({}): {} new rows, {} reused, {} rows in {}",
        response.analyses(),
        response.metadata.mode,
        response.rows_written,
        response.rows_reused(),
        total_rows,
        database.display()
    )
}
