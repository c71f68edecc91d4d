//! FILENAME: app/src/controller.rs
//! PURPOSE: The dashboard state machine.
//! CONTEXT: The controller is the only owner of the `SelectionState`. Every
//! transition applies one command, re-derives all five views from scratch,
//! runs every adapter and presents one complete frame. Nothing is cached
//! between transitions, so views can never disagree with each other.

use std::io::{self, Write};

use crossfilter::{
    bar_view, derive_all, map_view, pie_title, pie_view, scatter_view, timeseries_view, Command,
    KpiSummary, ScaleParams, SelectionState, ViewKind,
};
use dataset::{Dataset, Dimension, Metric};

use crate::api_types::{DashboardFrame, KpiDisplay};
use crate::{log_debug, log_error};

// ============================================================================
// RENDER SINK
// ============================================================================

/// Receives every frame the controller produces.
pub trait RenderSink {
    fn present(&mut self, frame: &DashboardFrame);
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn present(&mut self, frame: &DashboardFrame) {
        (**self).present(frame)
    }
}

/// Writes each frame as one line of JSON.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    /// First write failure; later frames are dropped once set.
    error: Option<io::Error>,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        JsonLinesSink { writer, error: None }
    }

    /// Flushes and returns the writer, or the first error seen.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_frame(&mut self, frame: &DashboardFrame) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, frame)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

impl<W: Write> RenderSink for JsonLinesSink<W> {
    fn present(&mut self, frame: &DashboardFrame) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.write_frame(frame) {
            log_error!("RENDER", "failed to write frame {}: {}", frame.revision, e);
            self.error = Some(e);
        }
    }
}

// ============================================================================
// CONTROLLER
// ============================================================================

pub struct Controller<'a, S: RenderSink> {
    dataset: &'a Dataset,
    params: ScaleParams,
    selection: SelectionState,
    sink: S,
    /// Frames presented so far.
    revision: u64,
}

impl<'a, S: RenderSink> Controller<'a, S> {
    pub fn new(dataset: &'a Dataset, params: ScaleParams, sink: S) -> Self {
        Controller {
            dataset,
            params,
            selection: SelectionState::new(),
            sink,
            revision: 0,
        }
    }

    /// Presents the initial, unfiltered frame.
    pub fn start(&mut self) {
        self.refresh();
    }

    /// Applies one command and redraws everything.
    pub fn handle(&mut self, command: &Command) {
        log_debug!("CTRL", "handle {:?}", command);
        self.selection.apply(command);
        self.refresh();
    }

    /// Routes a click from `view` to its dimension. Returns false when the
    /// click means nothing (a background click outside the map).
    pub fn handle_click(&mut self, view: ViewKind, value: Option<&str>) -> bool {
        match view.click(value) {
            Some(command) => {
                self.handle(&command);
                true
            }
            None => false,
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Builds the frame for the current selection without presenting it.
    pub fn frame(&self) -> DashboardFrame {
        self.build_frame(self.revision)
    }

    fn refresh(&mut self) {
        self.revision += 1;
        let frame = self.build_frame(self.revision);
        log_debug!(
            "CTRL",
            "frame {} map_rows={} orders={}",
            frame.revision,
            frame.map.bubbles.len(),
            frame.kpis.order_count
        );
        self.sink.present(&frame);
    }

    fn build_frame(&self, revision: u64) -> DashboardFrame {
        let selection = &self.selection;
        let views = derive_all(self.dataset, selection);

        let kpis = KpiSummary::from_rows(&views.map.rows);
        let categories = &self.params.categories;

        DashboardFrame {
            revision,
            selection: selection.clone(),
            show_reset: selection.is_filtered(),
            year_options: self.dataset.years().to_vec(),
            kpi_display: KpiDisplay::from(&kpis),
            kpis,
            map: map_view(&views.map, &self.params, selection.get(Dimension::Category)),
            pie: pie_view(&views.pie, pie_title(selection)),
            bar: bar_view(&views.bar, self.params.top_products),
            scatter: scatter_view(&views.scatter),
            revenue_timeline: timeseries_view(&views.timeseries, Metric::Sales, selection.year(), categories),
            profit_timeline: timeseries_view(&views.timeseries, Metric::Profit, selection.year(), categories),
        }
    }
}
