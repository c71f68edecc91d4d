//! FILENAME: core/crossfilter/src/engine.rs
//! Cross-filter Engine - derives the per-view row subsets.
//!
//! Algorithm:
//! 1. Cut the full dataset by year and the common dimensions (region)
//! 2. For each view, cut the common rows by the dimensions its policy names
//! 3. Attach the selection of the policy's highlight dimension as the key
//!
//! Every view goes through the same pipeline; the only per-view input is its
//! row in the policy table. Nothing here mutates the dataset or the selection.

use dataset::{Dataset, Row};
use serde::Serialize;

use crate::definition::{ViewKind, COMMON_CUTS};
use crate::selection::SelectionState;

/// Rows and highlight key for one view, valid for one refresh only.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedView<'a> {
    pub kind: ViewKind,
    pub rows: Vec<&'a Row>,
    /// Selected member of the view's own dimension, shown as emphasis.
    pub highlight: Option<String>,
}

impl<'a> DerivedView<'a> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether `key` should be drawn at full emphasis.
    pub fn is_emphasized(&self, key: &str) -> bool {
        self.highlight.as_deref().map_or(true, |h| h == key)
    }
}

/// The five derived views of one refresh.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedViews<'a> {
    /// Number of rows surviving the year and region cuts.
    pub common_count: usize,
    pub map: DerivedView<'a>,
    pub bar: DerivedView<'a>,
    pub pie: DerivedView<'a>,
    pub timeseries: DerivedView<'a>,
    pub scatter: DerivedView<'a>,
}

impl<'a> DerivedViews<'a> {
    pub fn get(&self, kind: ViewKind) -> &DerivedView<'a> {
        match kind {
            ViewKind::Map => &self.map,
            ViewKind::Bar => &self.bar,
            ViewKind::Pie => &self.pie,
            ViewKind::Timeseries => &self.timeseries,
            ViewKind::Scatter => &self.scatter,
        }
    }
}

/// Rows passing the year cut and the common dimension cuts.
pub fn common_rows<'a>(dataset: &'a Dataset, selection: &SelectionState) -> Vec<&'a Row> {
    let year = selection.year();
    dataset
        .rows()
        .iter()
        .filter(|row| year.matches(row))
        .filter(|row| COMMON_CUTS.iter().all(|&dim| selection.matches(dim, row)))
        .collect()
}

/// Applies `kind`'s policy to already-computed common rows.
pub fn derive_view<'a>(
    common: &[&'a Row],
    selection: &SelectionState,
    kind: ViewKind,
) -> DerivedView<'a> {
    let policy = kind.policy();
    let rows = common
        .iter()
        .copied()
        .filter(|row| policy.cuts.iter().all(|&dim| selection.matches(dim, row)))
        .collect();

    DerivedView {
        kind,
        rows,
        highlight: selection.get(policy.highlight).map(str::to_string),
    }
}

/// Runs the full derivation for all five views.
pub fn derive_all<'a>(dataset: &'a Dataset, selection: &SelectionState) -> DerivedViews<'a> {
    let common = common_rows(dataset, selection);

    DerivedViews {
        common_count: common.len(),
        map: derive_view(&common, selection, ViewKind::Map),
        bar: derive_view(&common, selection, ViewKind::Bar),
        pie: derive_view(&common, selection, ViewKind::Pie),
        timeseries: derive_view(&common, selection, ViewKind::Timeseries),
        scatter: derive_view(&common, selection, ViewKind::Scatter),
    }
}
