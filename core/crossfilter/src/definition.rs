//! FILENAME: core/crossfilter/src/definition.rs
//! Cross-filter Definition - which view cuts on what.
//!
//! Year and region are strict cuts shared by every view (the "common" rows).
//! On top of that each view strict-cuts on every remaining dimension EXCEPT
//! the one it displays; that one is handed over as a highlight key so the
//! non-selected members are dimmed, not removed.
//!
//! The Map is the exception: its own dimension (region) is already part of
//! the common cut, so it only highlights.

use dataset::Dimension;
use serde::{Deserialize, Serialize};

// ============================================================================
// VIEWS
// ============================================================================

/// The five derived views. The two stacked time series (sales and profit)
/// share one derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewKind {
    /// Region bubbles, plus the KPI strip which reads the same rows.
    Map,
    /// Top products by sales.
    Bar,
    /// Sales share by category.
    Pie,
    /// Stacked category series over years or months.
    Timeseries,
    /// Orders vs. average sale per customer segment.
    Scatter,
}

impl ViewKind {
    pub const ALL: [ViewKind; 5] = [
        ViewKind::Map,
        ViewKind::Bar,
        ViewKind::Pie,
        ViewKind::Timeseries,
        ViewKind::Scatter,
    ];

    /// The policy row for this view.
    pub fn policy(self) -> &'static FilterPolicy {
        match self {
            ViewKind::Map => &MAP_POLICY,
            ViewKind::Bar => &BAR_POLICY,
            ViewKind::Pie | ViewKind::Timeseries => &CATEGORY_POLICY,
            ViewKind::Scatter => &SCATTER_POLICY,
        }
    }

    /// The dimension a click on this view selects. Always the highlight
    /// dimension: a view only ever emits values of its own axis.
    pub fn click_dimension(self) -> Dimension {
        self.policy().highlight
    }
}

// ============================================================================
// POLICY TABLE
// ============================================================================

/// Strict cuts and highlight for one view, applied on top of the common rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterPolicy {
    /// Dimensions whose selection excludes non-matching rows.
    pub cuts: &'static [Dimension],
    /// Dimension whose selection is only emphasised.
    pub highlight: Dimension,
}

impl FilterPolicy {
    pub fn cuts_on(&self, dimension: Dimension) -> bool {
        self.cuts.contains(&dimension)
    }
}

/// Dimensions cut for every view before the per-view policy applies.
/// Year is also common but is not a `Dimension`.
pub const COMMON_CUTS: &[Dimension] = &[Dimension::Region];

pub const MAP_POLICY: FilterPolicy = FilterPolicy {
    cuts: &[Dimension::Segment, Dimension::Category, Dimension::Product],
    highlight: Dimension::Region,
};

pub const BAR_POLICY: FilterPolicy = FilterPolicy {
    cuts: &[Dimension::Segment, Dimension::Category],
    highlight: Dimension::Product,
};

/// Shared by the pie and both time series.
pub const CATEGORY_POLICY: FilterPolicy = FilterPolicy {
    cuts: &[Dimension::Segment, Dimension::Product],
    highlight: Dimension::Category,
};

pub const SCATTER_POLICY: FilterPolicy = FilterPolicy {
    cuts: &[Dimension::Category, Dimension::Product],
    highlight: Dimension::Segment,
};
