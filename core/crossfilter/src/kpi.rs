//! FILENAME: core/crossfilter/src/kpi.rs
//! PURPOSE: The four scalar KPIs shown above the charts.
//! CONTEXT: Computed from the Map view's rows, which carry every strict cut.

use dataset::Row;
use serde::{Deserialize, Serialize};

use crate::aggregate::{reduce_all, DistinctOrders, SalesProfitSums};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_sales: f64,
    pub total_profit: f64,
    /// Distinct order ids.
    pub order_count: usize,
    /// profit / sales * 100, or 0 when there are no sales.
    pub margin_pct: f64,
}

impl KpiSummary {
    pub fn from_rows(rows: &[&Row]) -> Self {
        let (totals, order_count) = reduce_all(rows.iter().copied(), &(SalesProfitSums, DistinctOrders));

        let margin_pct = if totals.sales != 0.0 {
            totals.profit / totals.sales * 100.0
        } else {
            0.0
        };

        KpiSummary {
            total_sales: totals.sales,
            total_profit: totals.profit,
            order_count,
            margin_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn line(order: &str, sales: f64, profit: f64) -> Row {
        Row::new(
            NaiveDate::from_ymd_opt(2015, 7, 1).unwrap(),
            "Ohio",
            "Furniture",
            "Consumer",
            "Desk",
            order,
            sales,
            profit,
            1.0,
        )
    }

    #[test]
    fn test_empty_selection_is_all_zero() {
        let kpis = KpiSummary::from_rows(&[]);
        assert_eq!(kpis, KpiSummary::default());
    }

    #[test]
    fn test_totals_and_margin() {
        let rows = vec![line("A", 200.0, 50.0), line("A", 100.0, -20.0), line("B", 100.0, 10.0)];
        let refs: Vec<&Row> = rows.iter().collect();
        let kpis = KpiSummary::from_rows(&refs);

        assert_eq!(kpis.total_sales, 400.0);
        assert_eq!(kpis.total_profit, 40.0);
        assert_eq!(kpis.order_count, 2);
        assert_eq!(kpis.margin_pct, 10.0);
    }

    #[test]
    fn test_zero_sales_margin_is_zero() {
        let rows = vec![line("A", 0.0, -5.0)];
        let refs: Vec<&Row> = rows.iter().collect();
        let kpis = KpiSummary::from_rows(&refs);
        assert_eq!(kpis.margin_pct, 0.0);
        assert_eq!(kpis.total_profit, -5.0);
    }
}
