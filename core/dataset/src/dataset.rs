//! FILENAME: core/dataset/src/dataset.rs
//! PURPOSE: The immutable, typed row collection every derivation reads from.
//! CONTEXT: Built once after load and then shared by reference. Catalogues
//! that must stay stable across filter changes (year options, category order,
//! the bubble radius extent) are computed here, not per refresh.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::dimension::Dimension;
use crate::row::Row;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    rows: Vec<Row>,

    /// Distinct years present, ascending.
    years: Vec<i32>,

    /// Distinct categories, ascending. Used as the stacking / colour order.
    categories: Vec<String>,

    /// Largest per-region sales sum over the whole dataset.
    max_region_sales: f64,
}

impl Dataset {
    pub fn new(rows: Vec<Row>) -> Self {
        let mut years: Vec<i32> = rows
            .iter()
            .map(|r| r.year)
            .collect::<FxHashSet<_>>()
            .into_iter()
            .collect();
        years.sort_unstable();

        let categories = sorted_distinct(&rows, Dimension::Category);

        let mut region_sales: FxHashMap<&str, f64> = FxHashMap::default();
        for row in &rows {
            *region_sales.entry(row.region.as_str()).or_insert(0.0) += row.sales;
        }
        let max_region_sales = region_sales.values().copied().fold(0.0, f64::max);

        Dataset {
            rows,
            years,
            categories,
            max_region_sales,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn max_region_sales(&self) -> f64 {
        self.max_region_sales
    }

    /// Sorted distinct values observed for a dimension.
    pub fn distinct(&self, dimension: Dimension) -> Vec<String> {
        sorted_distinct(&self.rows, dimension)
    }
}

fn sorted_distinct(rows: &[Row], dimension: Dimension) -> Vec<String> {
    let mut values: Vec<String> = rows
        .iter()
        .map(|r| r.value(dimension))
        .collect::<FxHashSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();
    values.sort();
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(y: i32, m: u32, region: &str, category: &str, sales: f64) -> Row {
        Row::new(
            NaiveDate::from_ymd_opt(y, m, 1).unwrap(),
            region,
            category,
            "Consumer",
            "Widget",
            "O-1",
            sales,
            0.0,
            1.0,
        )
    }

    #[test]
    fn test_catalogues() {
        let ds = Dataset::new(vec![
            row(2017, 3, "Texas", "Technology", 10.0),
            row(2015, 1, "Ohio", "Furniture", 5.0),
            row(2017, 8, "Texas", "Furniture", 20.0),
        ]);

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.years(), &[2015, 2017]);
        assert_eq!(ds.categories(), &["Furniture".to_string(), "Technology".to_string()]);
        assert_eq!(ds.distinct(Dimension::Region), vec!["Ohio", "Texas"]);
        assert_eq!(ds.max_region_sales(), 30.0);
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::new(Vec::new());
        assert!(ds.is_empty());
        assert!(ds.years().is_empty());
        assert_eq!(ds.max_region_sales(), 0.0);
    }
}
