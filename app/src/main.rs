//! FILENAME: app/src/main.rs
// PURPOSE: Command-line entry point.
// CONTEXT: Reads input events as JSON lines on stdin, writes one frame per
// transition as JSON lines on stdout. Logs go to stderr or the log file.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dashboard_lib::{init_logging, log_error, log_info, run, DashboardConfig};

#[derive(Debug, Parser)]
#[command(name = "dashboard", version, about = "Cross-filtering sales dashboard")]
struct Cli {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dataset to load (overrides the configuration)
    #[arg(long)]
    data: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match cli.config.as_deref() {
        Some(path) => match DashboardConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("[CONFIG] {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => DashboardConfig::default(),
    };
    if let Some(data) = cli.data {
        config.data_path = data;
    }

    if let Err(e) = init_logging(&config.log_level, config.log_file.as_deref()) {
        eprintln!("[LOG_INIT] FAILED: {}", e);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    match run(&config, stdin.lock(), stdout.lock()) {
        Ok(summary) => {
            log_info!("SYS", "exit ok, {} frames", summary.frames);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log_error!("SYS", "{}", e);
            ExitCode::FAILURE
        }
    }
}
