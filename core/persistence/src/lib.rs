//! FILENAME: core/persistence/src/lib.rs
//! Sales Data Loader
//!
//! Reads transaction tables from CSV or XLSX into a `Dataset`. This is the
//! only place raw text is interpreted: strings are trimmed, numbers coerced
//! (unparseable → 0) and dates parsed. Rows whose date does not parse are
//! dropped and counted; they never reach the cross-filter core.

mod csv_reader;
mod error;
mod xlsx_reader;

pub use csv_reader::{load_csv, load_csv_from_reader};
pub use error::PersistenceError;
pub use xlsx_reader::load_xlsx;

use std::borrow::Cow;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use dataset::{Dataset, Row};
use serde::{Deserialize, Serialize};

// ============================================================================
// COLUMN NAMES
// ============================================================================

pub const COL_ORDER_ID: &str = "Order ID";
pub const COL_ORDER_DATE: &str = "Order Date";
pub const COL_SALES: &str = "Sales";
pub const COL_PROFIT: &str = "Profit";
pub const COL_QUANTITY: &str = "Quantity";
pub const COL_CATEGORY: &str = "Category";
pub const COL_SEGMENT: &str = "Segment";
pub const COL_PRODUCT: &str = "Product Name";
pub const DEFAULT_REGION_COLUMN: &str = "State";
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y";

// ============================================================================
// OPTIONS / REPORT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Header of the column used as the geographic dimension.
    pub region_column: String,
    /// chrono format string for the order date column.
    pub date_format: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            region_column: DEFAULT_REGION_COLUMN.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Result of a load: the dataset plus how many source rows were dropped.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub dataset: Dataset,
    pub skipped_rows: usize,
}

impl LoadReport {
    pub fn loaded_rows(&self) -> usize {
        self.dataset.len()
    }
}

/// Loads a dataset, picking the reader from the file extension
/// (`.xlsx` / `.xlsm` → XLSX, anything else → CSV).
pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<LoadReport, PersistenceError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("xlsx") | Some("xlsm") => load_xlsx(path, options),
        _ => load_csv(path, options),
    }
}

// ============================================================================
// RAW FIELDS
// ============================================================================

/// A source cell before coercion.
#[derive(Debug, Clone)]
pub(crate) enum Field<'a> {
    Empty,
    Text(Cow<'a, str>),
    Number(f64),
    /// Spreadsheet date serial (days since 1899-12-30).
    DateSerial(f64),
}

impl Field<'_> {
    fn text(&self) -> String {
        match self {
            Field::Empty => String::new(),
            Field::Text(s) => s.trim().to_string(),
            Field::Number(n) | Field::DateSerial(n) => n.to_string(),
        }
    }

    fn number(&self) -> f64 {
        let value = match self {
            Field::Empty => 0.0,
            Field::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            Field::Number(n) | Field::DateSerial(n) => *n,
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }

    fn date(&self, format: &str) -> Option<NaiveDate> {
        match self {
            Field::Empty => None,
            Field::Text(s) => NaiveDate::parse_from_str(s.trim(), format).ok(),
            Field::Number(serial) | Field::DateSerial(serial) => date_from_serial(*serial),
        }
    }
}

/// Converts a spreadsheet day serial to a calendar date.
pub(crate) fn date_from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

// ============================================================================
// ROW BUILDER
// ============================================================================

/// Column positions resolved from a header row.
#[derive(Debug, Clone)]
pub(crate) struct ColumnMap {
    order_id: usize,
    order_date: usize,
    sales: usize,
    profit: usize,
    quantity: usize,
    category: usize,
    segment: usize,
    product: usize,
    region: usize,
}

impl ColumnMap {
    pub(crate) fn resolve<S: AsRef<str>>(headers: &[S], options: &LoadOptions) -> Result<Self, PersistenceError> {
        let find = |name: &str| -> Result<usize, PersistenceError> {
            headers
                .iter()
                .position(|h| h.as_ref().trim() == name)
                .ok_or_else(|| PersistenceError::MissingColumn(name.to_string()))
        };

        Ok(ColumnMap {
            order_id: find(COL_ORDER_ID)?,
            order_date: find(COL_ORDER_DATE)?,
            sales: find(COL_SALES)?,
            profit: find(COL_PROFIT)?,
            quantity: find(COL_QUANTITY)?,
            category: find(COL_CATEGORY)?,
            segment: find(COL_SEGMENT)?,
            product: find(COL_PRODUCT)?,
            region: find(&options.region_column)?,
        })
    }

    /// Builds a row, or `None` when the order date does not parse.
    pub(crate) fn build_row<'a>(&self, field: impl Fn(usize) -> Field<'a>, date_format: &str) -> Option<Row> {
        let date = field(self.order_date).date(date_format)?;

        Some(Row::new(
            date,
            field(self.region).text(),
            field(self.category).text(),
            field(self.segment).text(),
            field(self.product).text(),
            field(self.order_id).text(),
            field(self.sales).number(),
            field(self.profit).number(),
            field(self.quantity).number(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_coercion() {
        assert_eq!(Field::Text(" 12.5 ".into()).number(), 12.5);
        assert_eq!(Field::Text("n/a".into()).number(), 0.0);
        assert_eq!(Field::Text("NaN".into()).number(), 0.0);
        assert_eq!(Field::Empty.number(), 0.0);
        assert_eq!(Field::Number(-3.0).number(), -3.0);
    }

    #[test]
    fn test_date_parsing() {
        let fmt = DEFAULT_DATE_FORMAT;
        assert_eq!(Field::Text("11/08/2016".into()).date(fmt), NaiveDate::from_ymd_opt(2016, 11, 8));
        assert_eq!(Field::Text("1/5/2017".into()).date(fmt), NaiveDate::from_ymd_opt(2017, 1, 5));
        assert_eq!(Field::Text("2016-11-08".into()).date(fmt), None);
        assert_eq!(Field::Empty.date(fmt), None);
    }

    #[test]
    fn test_serial_dates() {
        assert_eq!(date_from_serial(42682.0), NaiveDate::from_ymd_opt(2016, 11, 8));
        assert_eq!(date_from_serial(0.0), None);
        assert_eq!(date_from_serial(f64::NAN), None);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let headers = ["Order ID", "Order Date", "Sales"];
        let err = ColumnMap::resolve(&headers, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, PersistenceError::MissingColumn(ref c) if c == "Profit"));
    }

    #[test]
    fn test_load_dataset_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        std::fs::write(
            &path,
            "Order ID,Order Date,Sales,Profit,Quantity,Category,Segment,Product Name,State\n\
             A,01/02/2016,10,1,1,Furniture,Consumer,Desk,Ohio\n",
        )
        .unwrap();

        let report = load_dataset(&path, &LoadOptions::default()).unwrap();
        assert_eq!(report.loaded_rows(), 1);
    }
}
