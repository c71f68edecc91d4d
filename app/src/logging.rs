//! FILENAME: app/src/logging.rs
// PURPOSE: Logging setup for the dashboard.
// FORMAT: seq|level|category|message
// CONTEXT: Categories are `log` targets; the macros below take the category
// first so call sites read like `log_info!("CTRL", "...")`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use env_logger::{Builder, Target};
use log::Level;

use crate::error::AppError;

/// Global sequence counter for log lines
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Get next sequence number
pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

fn level_code(level: Level) -> &'static str {
    match level {
        Level::Error => "E",
        Level::Warn => "W",
        Level::Info => "I",
        Level::Debug => "D",
        Level::Trace => "T",
    }
}

/// Installs the global logger. `filters` uses env_logger syntax; `RUST_LOG`
/// takes precedence when set. With no `log_file`, lines go to stderr so
/// stdout stays reserved for frames.
pub fn init_logging(filters: &str, log_file: Option<&Path>) -> Result<(), AppError> {
    let mut builder = Builder::new();
    match std::env::var("RUST_LOG") {
        Ok(env_filters) => builder.parse_filters(&env_filters),
        Err(_) => builder.parse_filters(filters),
    };

    builder.format(|buf, record| {
        writeln!(
            buf,
            "{}|{}|{}|{}",
            next_seq(),
            level_code(record.level()),
            record.target(),
            record.args()
        )
    });

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        None => {
            builder.target(Target::Stderr);
        }
    }

    builder
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}

// ============================================================================
// LOGGING MACROS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        log::debug!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        log::info!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        log::warn!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        log::error!(target: $cat, $($arg)*)
    };
}
