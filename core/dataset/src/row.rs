//! FILENAME: core/dataset/src/row.rs
//! PURPOSE: Defines a single transaction row of the sales dataset.
//! CONTEXT: Rows are immutable after load. The derived `year` and `month`
//! fields are computed once in the constructor so filtering never re-parses
//! dates.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::dimension::Dimension;

/// A numeric measure carried by every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Sales,
    Profit,
    Quantity,
}

/// One line item of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub date: NaiveDate,
    /// Calendar year of `date`.
    pub year: i32,
    /// Calendar month of `date`, 1-based.
    pub month: u32,
    pub region: String,
    pub category: String,
    pub segment: String,
    pub product: String,
    /// Several rows may share one order id (one per line item).
    pub order_id: String,
    pub sales: f64,
    pub profit: f64,
    pub quantity: f64,
}

impl Row {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: NaiveDate,
        region: impl Into<String>,
        category: impl Into<String>,
        segment: impl Into<String>,
        product: impl Into<String>,
        order_id: impl Into<String>,
        sales: f64,
        profit: f64,
        quantity: f64,
    ) -> Self {
        Row {
            date,
            year: date.year(),
            month: date.month(),
            region: region.into(),
            category: category.into(),
            segment: segment.into(),
            product: product.into(),
            order_id: order_id.into(),
            sales,
            profit,
            quantity,
        }
    }

    /// Returns the value this row holds for a categorical dimension.
    pub fn value(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Region => &self.region,
            Dimension::Category => &self.category,
            Dimension::Segment => &self.segment,
            Dimension::Product => &self.product,
        }
    }

    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Sales => self.sales,
            Metric::Profit => self.profit,
            Metric::Quantity => self.quantity,
        }
    }
}
