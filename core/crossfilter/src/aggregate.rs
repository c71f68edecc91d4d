//! FILENAME: core/crossfilter/src/aggregate.rs
//! Aggregator - group rows by a key and reduce each group.
//!
//! Every view re-aggregates its own row subset through `group_reduce`. The
//! result keeps groups in first-encounter order, which gives top-N consumers a
//! well-defined tie order once they apply a stable sort.
//!
//! Architecture:
//! - Each distinct key is stored once and referenced by index
//! - A `Reducer` describes init/fold/finish for one group; pairs of reducers
//!   compose into a reducer producing both outputs in one pass
//! - Input rows are only ever borrowed

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::hash::Hash;

use dataset::{Metric, Row};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

// ============================================================================
// GROUPED RESULT
// ============================================================================

/// Mapping from group key to reduced value, remembering first-encounter order.
#[derive(Debug, Clone)]
pub struct Grouped<K, V> {
    /// Map from key to its position in `entries`.
    index: FxHashMap<K, usize>,

    /// Groups in the order their key was first seen.
    entries: Vec<(K, V)>,
}

impl<K: Eq + Hash + Clone, V> Grouped<K, V> {
    pub fn new() -> Self {
        Grouped {
            index: FxHashMap::default(),
            entries: Vec::new(),
        }
    }

    /// Returns the value for `key`, inserting `init()` first if the key is new.
    pub fn get_or_insert_with(&mut self, key: K, init: impl FnOnce() -> V) -> &mut V {
        let position = match self.index.get(&key) {
            Some(&position) => position,
            None => {
                let position = self.entries.len();
                self.index.insert(key.clone(), position);
                self.entries.push((key, init()));
                position
            }
        };
        &mut self.entries[position].1
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates groups in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Transforms every value, keeping keys and order.
    pub fn map_values<W>(self, mut f: impl FnMut(V) -> W) -> Grouped<K, W> {
        Grouped {
            index: self.index,
            entries: self.entries.into_iter().map(|(k, v)| (k, f(v))).collect(),
        }
    }

    /// Consumes the groups into a vector sorted with a stable sort, so groups
    /// that compare equal keep their encounter order.
    pub fn into_sorted_by(self, mut compare: impl FnMut(&(K, V), &(K, V)) -> Ordering) -> Vec<(K, V)> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| compare(a, b));
        entries
    }
}

impl<K: Eq + Hash + Clone, V> Default for Grouped<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// REDUCERS
// ============================================================================

/// Describes how one group of rows is reduced to a value.
/// The lifetime lets accumulators borrow from the rows they fold.
pub trait Reducer<'r> {
    type Acc;
    type Output;

    fn init(&self) -> Self::Acc;
    fn fold(&self, acc: &mut Self::Acc, row: &'r Row);
    fn finish(&self, acc: Self::Acc) -> Self::Output;
}

/// Number of rows in the group.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowCount;

impl<'r> Reducer<'r> for RowCount {
    type Acc = usize;
    type Output = usize;

    fn init(&self) -> usize {
        0
    }

    fn fold(&self, acc: &mut usize, _row: &'r Row) {
        *acc += 1;
    }

    fn finish(&self, acc: usize) -> usize {
        acc
    }
}

/// Number of distinct order ids. Line items of the same order collapse into one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistinctOrders;

impl<'r> Reducer<'r> for DistinctOrders {
    type Acc = FxHashSet<&'r str>;
    type Output = usize;

    fn init(&self) -> Self::Acc {
        FxHashSet::default()
    }

    fn fold(&self, acc: &mut Self::Acc, row: &'r Row) {
        acc.insert(row.order_id.as_str());
    }

    fn finish(&self, acc: Self::Acc) -> usize {
        acc.len()
    }
}

/// Sum of one metric.
#[derive(Debug, Clone, Copy)]
pub struct SumOf(pub Metric);

impl<'r> Reducer<'r> for SumOf {
    type Acc = f64;
    type Output = f64;

    fn init(&self) -> f64 {
        0.0
    }

    fn fold(&self, acc: &mut f64, row: &'r Row) {
        *acc += row.metric(self.0);
    }

    fn finish(&self, acc: f64) -> f64 {
        acc
    }
}

/// Arithmetic mean of one metric. An empty group has no mean (`None`),
/// which is distinct from a mean of zero.
#[derive(Debug, Clone, Copy)]
pub struct MeanOf(pub Metric);

impl<'r> Reducer<'r> for MeanOf {
    /// (sum, count)
    type Acc = (f64, usize);
    type Output = Option<f64>;

    fn init(&self) -> Self::Acc {
        (0.0, 0)
    }

    fn fold(&self, acc: &mut Self::Acc, row: &'r Row) {
        acc.0 += row.metric(self.0);
        acc.1 += 1;
    }

    fn finish(&self, (sum, count): Self::Acc) -> Option<f64> {
        if count > 0 {
            Some(sum / count as f64)
        } else {
            None
        }
    }
}

/// Sales and profit summed together, for paired / stacked layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesProfit {
    pub sales: f64,
    pub profit: f64,
}

/// Reducer producing a `SalesProfit` per group.
#[derive(Debug, Clone, Copy, Default)]
pub struct SalesProfitSums;

impl<'r> Reducer<'r> for SalesProfitSums {
    type Acc = SalesProfit;
    type Output = SalesProfit;

    fn init(&self) -> SalesProfit {
        SalesProfit::default()
    }

    fn fold(&self, acc: &mut SalesProfit, row: &'r Row) {
        acc.sales += row.sales;
        acc.profit += row.profit;
    }

    fn finish(&self, acc: SalesProfit) -> SalesProfit {
        acc
    }
}

impl<'r, A, B> Reducer<'r> for (A, B)
where
    A: Reducer<'r>,
    B: Reducer<'r>,
{
    type Acc = (A::Acc, B::Acc);
    type Output = (A::Output, B::Output);

    fn init(&self) -> Self::Acc {
        (self.0.init(), self.1.init())
    }

    fn fold(&self, acc: &mut Self::Acc, row: &'r Row) {
        self.0.fold(&mut acc.0, row);
        self.1.fold(&mut acc.1, row);
    }

    fn finish(&self, acc: Self::Acc) -> Self::Output {
        (self.0.finish(acc.0), self.1.finish(acc.1))
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Groups `rows` by `key_fn` and reduces each group with `reducer`.
/// Empty input yields an empty result.
pub fn group_reduce<'r, I, K, F, R>(rows: I, mut key_fn: F, reducer: &R) -> Grouped<K, R::Output>
where
    I: IntoIterator<Item = &'r Row>,
    K: Eq + Hash + Clone,
    F: FnMut(&'r Row) -> K,
    R: Reducer<'r>,
{
    let mut groups: Grouped<K, R::Acc> = Grouped::new();
    for row in rows {
        let acc = groups.get_or_insert_with(key_fn(row), || reducer.init());
        reducer.fold(acc, row);
    }
    groups.map_values(|acc| reducer.finish(acc))
}

/// Reduces all of `rows` as a single group.
pub fn reduce_all<'r, I, R>(rows: I, reducer: &R) -> R::Output
where
    I: IntoIterator<Item = &'r Row>,
    R: Reducer<'r>,
{
    let mut acc = reducer.init();
    for row in rows {
        reducer.fold(&mut acc, row);
    }
    reducer.finish(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn line(order: &str, segment: &str, product: &str, sales: f64, profit: f64) -> Row {
        Row::new(
            NaiveDate::from_ymd_opt(2017, 5, 2).unwrap(),
            "Texas",
            "Technology",
            segment,
            product,
            order,
            sales,
            profit,
            1.0,
        )
    }

    #[test]
    fn test_orders_collapse_but_mean_counts_rows() {
        let rows = vec![
            line("A", "Consumer", "P1", 100.0, 0.0),
            line("A", "Consumer", "P2", 50.0, 0.0),
            line("B", "Consumer", "P3", 30.0, 0.0),
        ];

        let stats = group_reduce(
            &rows,
            |r| r.segment.as_str(),
            &(DistinctOrders, MeanOf(Metric::Sales)),
        );

        let &(total_orders, avg_sales) = stats.get("Consumer").unwrap();
        assert_eq!(total_orders, 2);
        assert_eq!(avg_sales, Some(60.0));
    }

    #[test]
    fn test_empty_input_is_empty_result() {
        let rows: Vec<Row> = Vec::new();
        let grouped = group_reduce(&rows, |r| r.product.clone(), &SumOf(Metric::Sales));
        assert!(grouped.is_empty());
        assert_eq!(reduce_all(&rows, &MeanOf(Metric::Sales)), None);
        assert_eq!(reduce_all(&rows, &SumOf(Metric::Profit)), 0.0);
    }

    #[test]
    fn test_distinct_orders_never_exceed_rows() {
        let rows = vec![
            line("A", "Consumer", "P1", 1.0, 0.0),
            line("A", "Corporate", "P1", 1.0, 0.0),
            line("B", "Corporate", "P2", 1.0, 0.0),
            line("C", "Home Office", "P2", 1.0, 0.0),
            line("C", "Home Office", "P3", 1.0, 0.0),
        ];
        let grouped = group_reduce(&rows, |r| r.segment.as_str(), &(DistinctOrders, RowCount));
        for (_, &(orders, count)) in grouped.iter() {
            assert!(orders <= count);
        }
        assert_eq!(reduce_all(&rows, &DistinctOrders), 3);
    }

    #[test]
    fn test_negative_values_are_summed_as_is() {
        let rows = vec![
            line("A", "Consumer", "P1", 10.0, -25.0),
            line("B", "Consumer", "P1", 5.0, 3.0),
        ];
        let totals = reduce_all(&rows, &SalesProfitSums);
        assert_eq!(totals, SalesProfit { sales: 15.0, profit: -22.0 });
    }

    #[test]
    fn test_encounter_order_and_stable_sort() {
        let rows = vec![
            line("A", "Consumer", "Beta", 10.0, 0.0),
            line("B", "Consumer", "Alpha", 20.0, 0.0),
            line("C", "Consumer", "Gamma", 10.0, 0.0),
        ];
        let grouped = group_reduce(&rows, |r| r.product.as_str(), &SumOf(Metric::Sales));
        let keys: Vec<_> = grouped.keys().copied().collect();
        assert_eq!(keys, vec!["Beta", "Alpha", "Gamma"]);

        let sorted = grouped.into_sorted_by(|a, b| b.1.total_cmp(&a.1));
        let keys: Vec<_> = sorted.iter().map(|(k, _)| *k).collect();
        // Beta and Gamma tie; Beta was seen first.
        assert_eq!(keys, vec!["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn test_input_rows_untouched() {
        let rows = vec![line("A", "Consumer", "P1", 10.0, 2.0)];
        let before = rows.clone();
        let _ = group_reduce(&rows, |r| r.order_id.clone(), &SalesProfitSums);
        assert_eq!(rows, before);
    }
}
