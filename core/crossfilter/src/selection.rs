//! FILENAME: core/crossfilter/src/selection.rs
//! PURPOSE: The cross-filter selection state and the commands that mutate it.
//! CONTEXT: A `SelectionState` is only ever changed through the named toggle
//! operations below (or `apply`, which dispatches a `Command` to them).
//! Two couplings are deliberate and one-directional:
//! - a region change clears the category
//! - a category change clears the product

use dataset::{Dimension, Row};
use serde::{Deserialize, Serialize};

use crate::definition::ViewKind;

// ============================================================================
// YEAR FILTER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum YearFilter {
    #[default]
    All,
    Year(i32),
}

impl YearFilter {
    pub fn matches(self, row: &Row) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Year(year) => row.year == year,
        }
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

/// A user action routed from a view (or the toolbar) to the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    /// Click on a member of a dimension.
    Toggle { dimension: Dimension, value: String },
    /// Click on the map background.
    ClearRegion,
    SetYear { year: YearFilter },
    Reset,
}

impl ViewKind {
    /// Translates a click on this view into the command for its own dimension.
    /// `None` is a background click, which only the map reacts to.
    pub fn click(self, value: Option<&str>) -> Option<Command> {
        match (self, value) {
            (_, Some(value)) => Some(Command::Toggle {
                dimension: self.click_dimension(),
                value: value.to_string(),
            }),
            (ViewKind::Map, None) => Some(Command::ClearRegion),
            (_, None) => None,
        }
    }
}

// ============================================================================
// SELECTION STATE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    year: YearFilter,
    region: Option<String>,
    category: Option<String>,
    segment: Option<String>,
    product: Option<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn year(&self) -> YearFilter {
        self.year
    }

    /// The selected value for a dimension, if any.
    pub fn get(&self, dimension: Dimension) -> Option<&str> {
        self.slot(dimension).as_deref()
    }

    /// True when `row` passes this dimension's selection (or it is unset).
    pub fn matches(&self, dimension: Dimension, row: &Row) -> bool {
        match self.get(dimension) {
            Some(value) => row.value(dimension) == value,
            None => true,
        }
    }

    /// Whether anything differs from the initial state.
    pub fn is_filtered(&self) -> bool {
        *self != Self::default()
    }

    pub fn toggle_region(&mut self, value: &str) {
        if toggle(&mut self.region, value) {
            self.category = None;
        }
    }

    pub fn toggle_category(&mut self, value: &str) {
        if toggle(&mut self.category, value) {
            self.product = None;
        }
    }

    pub fn toggle_segment(&mut self, value: &str) {
        toggle(&mut self.segment, value);
    }

    pub fn toggle_product(&mut self, value: &str) {
        toggle(&mut self.product, value);
    }

    /// Dispatches to the toggle for `dimension`.
    pub fn toggle(&mut self, dimension: Dimension, value: &str) {
        match dimension {
            Dimension::Region => self.toggle_region(value),
            Dimension::Category => self.toggle_category(value),
            Dimension::Segment => self.toggle_segment(value),
            Dimension::Product => self.toggle_product(value),
        }
    }

    /// Deselects the region. Leaving a region drops the category with it;
    /// with no region selected this does nothing.
    pub fn clear_region(&mut self) {
        if self.region.take().is_some() {
            self.category = None;
        }
    }

    pub fn set_year(&mut self, year: YearFilter) {
        self.year = year;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn apply(&mut self, command: &Command) {
        match command {
            Command::Toggle { dimension, value } => self.toggle(*dimension, value),
            Command::ClearRegion => self.clear_region(),
            Command::SetYear { year } => self.set_year(*year),
            Command::Reset => self.reset(),
        }
    }

    fn slot(&self, dimension: Dimension) -> &Option<String> {
        match dimension {
            Dimension::Region => &self.region,
            Dimension::Category => &self.category,
            Dimension::Segment => &self.segment,
            Dimension::Product => &self.product,
        }
    }
}

/// Click-to-deselect: the held value clears, any other value replaces.
/// Returns true when the slot now holds a new value.
fn toggle(slot: &mut Option<String>, value: &str) -> bool {
    if slot.as_deref() == Some(value) {
        *slot = None;
        false
    } else {
        *slot = Some(value.to_string());
        true
    }
}
