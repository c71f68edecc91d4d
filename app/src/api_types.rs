//! FILENAME: app/src/api_types.rs
// PURPOSE: Payloads exchanged with the rendering layer.
// CONTEXT: Frames go out, input events come in. Top-level structs use
// camelCase serialization for JavaScript interoperability.

use crossfilter::{
    BarView, Command, KpiSummary, MapView, PieView, ScatterView, SelectionState, TimeseriesView,
    ViewKind,
};
use serde::{Deserialize, Serialize};

/// Everything the renderer needs after one transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardFrame {
    /// Increments by one per presented frame.
    pub revision: u64,
    pub selection: SelectionState,
    /// Whether the reset control should be visible.
    pub show_reset: bool,
    /// Options for the year selector, ascending.
    pub year_options: Vec<i32>,
    pub kpis: KpiSummary,
    pub kpi_display: KpiDisplay,
    pub map: MapView,
    pub pie: PieView,
    pub bar: BarView,
    pub scatter: ScatterView,
    pub revenue_timeline: TimeseriesView,
    pub profit_timeline: TimeseriesView,
}

/// Pre-formatted KPI strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiDisplay {
    pub revenue: String,
    pub profit: String,
    pub orders: String,
    pub margin: String,
    /// Renderers show a negative margin in red.
    pub margin_negative: bool,
}

impl From<&KpiSummary> for KpiDisplay {
    fn from(kpis: &KpiSummary) -> Self {
        KpiDisplay {
            revenue: format_thousands(kpis.total_sales),
            profit: format_thousands(kpis.total_profit),
            orders: kpis.order_count.to_string(),
            margin: format!("{:.2}%", kpis.margin_pct),
            margin_negative: kpis.margin_pct < 0.0,
        }
    }
}

/// `$12.35K` style money formatting.
pub fn format_thousands(value: f64) -> String {
    format!("${:.2}K", value / 1000.0)
}

/// A click reported by a chart. `value` is `None` for a background click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewClick {
    pub view: ViewKind,
    #[serde(default)]
    pub value: Option<String>,
}

/// One line of renderer input: either a ready-made command or a raw click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputEvent {
    Command(Command),
    Click(ViewClick),
}

impl InputEvent {
    /// Resolves the event to a command; background clicks outside the map
    /// resolve to nothing.
    pub fn into_command(self) -> Option<Command> {
        match self {
            InputEvent::Command(command) => Some(command),
            InputEvent::Click(click) => click.view.click(click.value.as_deref()),
        }
    }
}
