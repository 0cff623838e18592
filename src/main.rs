use std::process::ExitCode;

use clap::Parser;
use rusqlite::Connection;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use contacts::cli::{self, Cli};
use contacts::config::Config;
use contacts::db::schema;
use contacts::error::ContactsResult;

fn main() -> ExitCode {
    let args = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Logs go to stderr so exported JSON on stdout stays clean.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(args, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli, mut config: Config) -> ContactsResult<()> {
    if let Some(path) = args.db_path {
        config.db_path = path;
    }

    if let Some(dir) = config.db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    debug!(db = %config.db_path.display(), "opening database");
    let conn = Connection::open(&config.db_path)?;
    schema::initialize(&conn)?;

    cli::run(&conn, &config, args.command)
}
