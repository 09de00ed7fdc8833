//! Interactive terminal form for logging field jobs.
//!
//! Usage:
//!   cargo run --bin job-form
//!   cargo run --bin job-form -- --jobs-file /data/jobs.json --offline

use std::env;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

use field_tools_lib::config::{Config, Environment};
use field_tools_lib::db::JobStore;
use field_tools_lib::form::FormSession;
use field_tools_lib::services::SheetSync;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let mut jobs_file: Option<PathBuf> = None;
    let mut offline = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--jobs-file" | "-f" => {
                i += 1;
                if i < args.len() {
                    jobs_file = Some(PathBuf::from(&args[i]));
                }
            }
            "--offline" => offline = true,
            "--help" | "-h" => {
                print_usage();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    // Log to stderr so prompts stay readable; quiet unless RUST_LOG says otherwise.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    // The form runs without any setup; RUST_ENV only matters when set.
    let config = match Config::from_env_or(Environment::Development) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let store = JobStore::new(jobs_file.unwrap_or(config.jobs_file));
    let sync = if offline {
        SheetSync::disabled()
    } else {
        SheetSync::from_settings(&config.sheets)
    };

    let stdin = io::stdin();
    let mut session = FormSession::new(store, sync, stdin.lock(), BufWriter::new(io::stdout()));

    if let Err(e) = session.run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        r#"
Usage: job-form [OPTIONS]

Options:
  -f, --jobs-file <PATH>  Local job file (default: FT_JOBS_FILE or jobs.json)
      --offline           Do not sync with Google Sheets
  -h, --help              Print this help message

Environment:
  RUST_ENV                 development or production (default: development)
  FT_SHEET_ID              Spreadsheet to sync with (sync disabled when unset)
  FT_SHEET_NAME            Worksheet name (default: Jobs)
  FT_SERVICE_ACCOUNT_FILE  Service-account key file
  FT_SHEETS_ACCESS_TOKEN   Static bearer token instead of a key file
"#
    );
}
