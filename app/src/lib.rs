//! FILENAME: app/src/lib.rs
// PURPOSE: Library entry point for the dashboard application.
// CONTEXT: Wires the loader, the controller and the JSON-lines render
// boundary together. The binary is a thin wrapper around `run`.

pub mod api_types;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;

pub use api_types::{format_thousands, DashboardFrame, InputEvent, KpiDisplay, ViewClick};
pub use config::DashboardConfig;
pub use controller::{Controller, JsonLinesSink, RenderSink};
pub use error::AppError;
pub use logging::init_logging;

use std::io::{BufRead, Write};

use dataset::Dataset;

/// Counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Input lines that produced a transition.
    pub commands_applied: usize,
    /// Input lines that could not be parsed.
    pub commands_rejected: usize,
    /// Frames presented, including the initial one.
    pub frames: u64,
}

/// Loads the configured dataset and runs a session over it.
pub fn run<R: BufRead, W: Write>(
    config: &DashboardConfig,
    input: R,
    output: W,
) -> Result<SessionSummary, AppError> {
    log_info!("SYS", "loading {}", config.data_path.display());
    let report = persistence::load_dataset(&config.data_path, &config.load_options())?;
    log_info!(
        "LOAD",
        "loaded {} rows, skipped {} without a valid date",
        report.loaded_rows(),
        report.skipped_rows
    );
    if report.dataset.is_empty() {
        log_warn!("LOAD", "dataset is empty; every view will render empty");
    }

    run_session(&report.dataset, config, input, output)
}

/// Presents the initial frame, then one frame per accepted input line.
///
/// Each input line is a JSON `InputEvent`. Blank lines and lines starting
/// with `#` are ignored. Lines that are not UTF-8 or not a valid event are
/// logged, counted and skipped.
pub fn run_session<R: BufRead, W: Write>(
    dataset: &Dataset,
    config: &DashboardConfig,
    input: R,
    output: W,
) -> Result<SessionSummary, AppError> {
    let params = config.scale_params(dataset);
    let mut controller = Controller::new(dataset, params, JsonLinesSink::new(output));
    let mut summary = SessionSummary::default();

    controller.start();

    for (line_no, bytes) in input.split(b'\n').enumerate() {
        let line = match String::from_utf8(bytes?) {
            Ok(line) => line,
            Err(e) => {
                log_warn!("INPUT", "line {}: rejected: {}", line_no + 1, e);
                summary.commands_rejected += 1;
                continue;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match serde_json::from_str::<InputEvent>(trimmed) {
            Ok(event) => match event.into_command() {
                Some(command) => {
                    controller.handle(&command);
                    summary.commands_applied += 1;
                }
                None => log_debug!("INPUT", "line {}: click ignored", line_no + 1),
            },
            Err(e) => {
                log_warn!("INPUT", "line {}: rejected: {}", line_no + 1, e);
                summary.commands_rejected += 1;
            }
        }
    }

    summary.frames = controller.revision();
    controller.into_sink().finish()?;
    log_info!(
        "SYS",
        "session done: {} applied, {} rejected, {} frames",
        summary.commands_applied,
        summary.commands_rejected,
        summary.frames
    );
    Ok(summary)
}
