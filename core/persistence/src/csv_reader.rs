// FILENAME: core/persistence/src/csv_reader.rs

use crate::{ColumnMap, Field, LoadOptions, LoadReport, PersistenceError};
use dataset::Dataset;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub fn load_csv(path: &Path, options: &LoadOptions) -> Result<LoadReport, PersistenceError> {
    let file = File::open(path)?;
    load_csv_from_reader(file, options)
}

pub fn load_csv_from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<LoadReport, PersistenceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    // Decoded lossily: invalid UTF-8 becomes U+FFFD instead of failing the load.
    let headers: Vec<String> = rdr
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();
    let columns = ColumnMap::resolve(&headers, options)?;

    let mut rows = Vec::new();
    let mut skipped_rows = 0;

    for record in rdr.byte_records() {
        let record = record?;
        let field = |idx: usize| match record.get(idx).map(String::from_utf8_lossy) {
            Some(s) if !s.trim().is_empty() => Field::Text(s),
            _ => Field::Empty,
        };

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
