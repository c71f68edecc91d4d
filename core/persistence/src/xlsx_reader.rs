// FILENAME: core/persistence/src/xlsx_reader.rs

use crate::{ColumnMap, Field, LoadOptions, LoadReport, PersistenceError};
use calamine::{open_workbook, Data, Reader, Xlsx};
use dataset::Dataset;
use std::borrow::Cow;
use std::path::Path;

/// Loads the first worksheet. Row 0 is the header row.
pub fn load_xlsx(path: &Path, options: &LoadOptions) -> Result<LoadReport, PersistenceError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| PersistenceError::InvalidFormat("Workbook contains no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| PersistenceError::InvalidFormat(e.to_string()))?;

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = sheet_rows
        .next()
        .ok_or_else(|| PersistenceError::InvalidFormat(format!("Sheet '{}' is empty", sheet_name)))?
        .iter()
        .map(|cell| cell.to_string())
        .collect();
    let columns = ColumnMap::resolve(&headers, options)?;

    let mut rows = Vec::new();
    let mut skipped_rows = 0;

    for cells in sheet_rows {
        let field = |idx: usize| cells.get(idx).map_or(Field::Empty, to_field);
        match columns.build_row(field, &options.date_format) {
            Some(row) => rows.push(row),
            None => skipped_rows += 1,
        }
    }

    Ok(LoadReport {
        dataset: Dataset::new(rows),
        skipped_rows,
    })
}

fn to_field(cell: &Data) -> Field<'_> {
    match cell {
        Data::Empty => Field::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Field::Text(Cow::Borrowed(s.as_str())),
        Data::Float(f) => Field::Number(*f),
        Data::Int(i) => Field::Number(*i as f64),
        Data::Bool(b) => Field::Text(Cow::Owned(b.to_string())),
        Data::DateTime(dt) => Field::DateSerial(dt.as_f64()),
        Data::Error(_) => Field::Empty,
    }
}
