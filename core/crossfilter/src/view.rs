//! FILENAME: core/crossfilter/src/view.rs
//! View Adapters - render instructions for each chart.
//!
//! Each adapter is a pure function of one `DerivedView` (plus scale
//! parameters fixed at load time). It re-aggregates the rows by its own axis
//! and tags every member with an emphasis level. Rendering owns everything
//! visual beyond that.

use dataset::{Dataset, Dimension, Metric, Row};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::aggregate::{
    group_reduce, DistinctOrders, MeanOf, Reducer, SalesProfitSums, SumOf,
};
use crate::engine::DerivedView;
use crate::selection::{SelectionState, YearFilter};

pub const DEFAULT_TOP_PRODUCTS: usize = 10;
pub const DEFAULT_MAX_BUBBLE_RADIUS: f64 = 35.0;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ============================================================================
// EMPHASIS
// ============================================================================

/// How strongly a member is drawn. Non-selected members are dimmed, never hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Emphasis {
    Full,
    Reduced,
}

impl Emphasis {
    /// Full when nothing is highlighted or `key` is the highlighted member.
    pub fn for_key(highlight: Option<&str>, key: &str) -> Self {
        match highlight {
            Some(h) if h != key => Emphasis::Reduced,
            _ => Emphasis::Full,
        }
    }
}

// ============================================================================
// SCALE PARAMETERS
// ============================================================================

/// Inputs the adapters need that must not move with the selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleParams {
    /// Domain maximum of the bubble radius scale.
    pub max_region_sales: f64,
    /// Range maximum of the bubble radius scale.
    pub max_bubble_radius: f64,
    /// Number of bars in the product chart.
    pub top_products: usize,
    /// Stacking order of the time series.
    pub categories: Vec<String>,
}

impl ScaleParams {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        ScaleParams {
            max_region_sales: dataset.max_region_sales(),
            max_bubble_radius: DEFAULT_MAX_BUBBLE_RADIUS,
            top_products: DEFAULT_TOP_PRODUCTS,
            categories: dataset.categories().to_vec(),
        }
    }

    /// Square-root scale from `[0, max_region_sales]` onto `[0, max_bubble_radius]`.
    pub fn bubble_radius(&self, sales: f64) -> f64 {
        if self.max_region_sales <= 0.0 {
            return 0.0;
        }
        self.max_bubble_radius * (sales.max(0.0) / self.max_region_sales).sqrt()
    }
}

// ============================================================================
// MAP
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionBubble {
    pub region: String,
    pub sales: f64,
    pub radius: f64,
    pub emphasis: Emphasis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub selected_region: Option<String>,
    /// Category the bubbles are tinted with, when one is active.
    pub tint_category: Option<String>,
    pub bubbles: Vec<RegionBubble>,
}

pub fn map_view(view: &DerivedView<'_>, params: &ScaleParams, active_category: Option<&str>) -> MapView {
    let sales_by_region = group_reduce(
        view.rows.iter().copied(),
        |r| r.region.as_str(),
        &SumOf(Metric::Sales),
    );

    let bubbles = sales_by_region
        .iter()
        .map(|(&region, &sales)| RegionBubble {
            region: region.to_string(),
            sales,
            radius: params.bubble_radius(sales),
            emphasis: Emphasis::for_key(view.highlight.as_deref(), region),
        })
        .collect();

    MapView {
        selected_region: view.highlight.clone(),
        tint_category: active_category.map(str::to_string),
        bubbles,
    }
}

// ============================================================================
// PIE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub category: String,
    pub sales: f64,
    /// Fraction of the pie total; 0 when the total is 0.
    pub share: f64,
    pub emphasis: Emphasis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieView {
    pub title: String,
    pub total_sales: f64,
    pub slices: Vec<PieSlice>,
    /// Category names, sorted.
    pub legend: Vec<String>,
}

/// Title of the pie, naming the narrowest active context.
pub fn pie_title(selection: &SelectionState) -> String {
    if selection.get(Dimension::Product).is_some() {
        "Product Revenue".to_string()
    } else if let Some(segment) = selection.get(Dimension::Segment) {
        format!("{} Revenue", segment)
    } else if let Some(region) = selection.get(Dimension::Region) {
        format!("{} Revenue", region)
    } else {
        "Total Revenue".to_string()
    }
}

pub fn pie_view(view: &DerivedView<'_>, title: String) -> PieView {
    let sales_by_category = group_reduce(
        view.rows.iter().copied(),
        |r| r.category.as_str(),
        &SumOf(Metric::Sales),
    );
    let total_sales: f64 = sales_by_category.iter().map(|(_, &v)| v).sum();

    let slices = sales_by_category
        .iter()
        .map(|(&category, &sales)| PieSlice {
            category: category.to_string(),
            sales,
            share: if total_sales != 0.0 { sales / total_sales } else { 0.0 },
            emphasis: Emphasis::for_key(view.highlight.as_deref(), category),
        })
        .collect();

    let mut legend: Vec<String> = sales_by_category.keys().map(|k| k.to_string()).collect();
    legend.sort();

    PieView {
        title,
        total_sales,
        slices,
        legend,
    }
}

// ============================================================================
// BAR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductBar {
    pub product: String,
    pub sales: f64,
    pub profit: f64,
    pub emphasis: Emphasis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarView {
    /// At most `top_products` entries, by descending sales.
    pub products: Vec<ProductBar>,
}

pub fn bar_view(view: &DerivedView<'_>, top_products: usize) -> BarView {
    let by_product = group_reduce(
        view.rows.iter().copied(),
        |r| r.product.as_str(),
        &SalesProfitSums,
    );

    let mut ranked = by_product.into_sorted_by(|a, b| b.1.sales.total_cmp(&a.1.sales));
    ranked.truncate(top_products);

    let products = ranked
        .into_iter()
        .map(|(product, totals)| ProductBar {
            product: product.to_string(),
            sales: totals.sales,
            profit: totals.profit,
            emphasis: Emphasis::for_key(view.highlight.as_deref(), product),
        })
        .collect();

    BarView { products }
}

// ============================================================================
// SCATTER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentPoint {
    pub segment: String,
    /// Distinct orders, not line items.
    pub total_orders: usize,
    /// Mean sale per line item; `None` when there is no data.
    pub avg_sales: Option<f64>,
    pub emphasis: Emphasis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterView {
    /// Ordered by segment name.
    pub points: Vec<SegmentPoint>,
}

pub fn scatter_view(view: &DerivedView<'_>) -> ScatterView {
    let stats = group_reduce(
        view.rows.iter().copied(),
        |r| r.segment.as_str(),
        &(DistinctOrders, MeanOf(Metric::Sales)),
    );

    let points = stats
        .into_sorted_by(|a, b| a.0.cmp(b.0))
        .into_iter()
        .map(|(segment, (total_orders, avg_sales))| SegmentPoint {
            segment: segment.to_string(),
            total_orders,
            avg_sales,
            emphasis: Emphasis::for_key(view.highlight.as_deref(), segment),
        })
        .collect();

    ScatterView { points }
}

// ============================================================================
// TIME SERIES
// ============================================================================

/// Bucketing of the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeMode {
    /// One bucket per year present; used when all years are shown.
    Year,
    /// Twelve month buckets; used when a single year is selected.
    Month,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBucket {
    /// Year number or 1-based month number, depending on the mode.
    pub period: i32,
    pub label: String,
    /// One value per series, in series order.
    pub values: SmallVec<[f64; 4]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesInfo {
    pub category: String,
    pub emphasis: Emphasis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeseriesView {
    pub metric: Metric,
    pub mode: TimeMode,
    pub series: Vec<SeriesInfo>,
    pub buckets: Vec<TimeBucket>,
}

/// Per-category sums of one metric, laid out in a fixed category order.
struct CategorySums<'c> {
    categories: &'c [String],
    metric: Metric,
}

impl<'r, 'c> Reducer<'r> for CategorySums<'c> {
    type Acc = SmallVec<[f64; 4]>;
    type Output = SmallVec<[f64; 4]>;

    fn init(&self) -> Self::Acc {
        SmallVec::from_elem(0.0, self.categories.len())
    }

    fn fold(&self, acc: &mut Self::Acc, row: &'r Row) {
        if let Some(i) = self.categories.iter().position(|c| *c == row.category) {
            acc[i] += row.metric(self.metric);
        }
    }

    fn finish(&self, acc: Self::Acc) -> Self::Output {
        acc
    }
}

pub fn timeseries_view(
    view: &DerivedView<'_>,
    metric: Metric,
    year: YearFilter,
    categories: &[String],
) -> TimeseriesView {
    let reducer = CategorySums { categories, metric };

    let (mode, buckets) = match year {
        YearFilter::All => {
            let by_year = group_reduce(view.rows.iter().copied(), |r| r.year, &reducer);
            let buckets = by_year
                .into_sorted_by(|a, b| a.0.cmp(&b.0))
                .into_iter()
                .map(|(year, values)| TimeBucket {
                    period: year,
                    label: year.to_string(),
                    values,
                })
                .collect();
            (TimeMode::Year, buckets)
        }
        YearFilter::Year(_) => {
            let by_month = group_reduce(view.rows.iter().copied(), |r| r.month, &reducer);
            let buckets = (1..=12u32)
                .map(|month| TimeBucket {
                    period: month as i32,
                    label: MONTH_LABELS[(month - 1) as usize].to_string(),
                    values: by_month
                        .get(&month)
                        .cloned()
                        .unwrap_or_else(|| reducer.init()),
                })
                .collect();
            (TimeMode::Month, buckets)
        }
    };

    let series = categories
        .iter()
        .map(|c| SeriesInfo {
            category: c.clone(),
            emphasis: Emphasis::for_key(view.highlight.as_deref(), c),
        })
        .collect();

    TimeseriesView {
        metric,
        mode,
        series,
        buckets,
    }
}
