use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rust_sqlite::config::DEFAULT_DB_PATH;
use rust_sqlite::{Config, Session, Table};
use tracing_subscriber::{EnvFilter, fmt};

/// Single-table record store with a line-oriented prompt.
#[derive(Parser, Debug)]
#[command(name = "rust-sqlite")]
#[command(version)]
struct Args {
    /// Backing database file, created if missing
    #[arg(default_value = DEFAULT_DB_PATH)]
    db_file: PathBuf,

    /// Write the touched page to disk after every insert
    #[arg(long)]
    flush_every_insert: bool,

    /// Log filter (e.g. "debug"); falls back to RUST_LOG, then "warn"
    #[arg(long)]
    log_level: Option<String>,
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    // stdout carries the command protocol; logs go to stderr.
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref());

    tracing::info!("rust-sqlite v{}", rust_sqlite::VERSION);

    let config = Config::builder()
        .db_path(args.db_file)
        .flush_every_insert(args.flush_every_insert)
        .build();

    let table = match Table::open_with_config(&config) {
        Ok(table) => table,
        Err(err) => {
            tracing::error!(path = %config.db_path.display(), "failed to open table: {err}");
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    match Session::new(stdin.lock(), io::stdout()).run(table) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
