//! FILENAME: app/src/config.rs
// PURPOSE: Dashboard configuration, read from an optional JSON file.
// CONTEXT: Every field has a default so a partial (or absent) file works.

use std::fs;
use std::path::{Path, PathBuf};

use crossfilter::ScaleParams;
use dataset::Dataset;
use persistence::{LoadOptions, DEFAULT_DATE_FORMAT, DEFAULT_REGION_COLUMN};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Source table (CSV or XLSX).
    pub data_path: PathBuf,
    pub region_column: String,
    pub date_format: String,
    /// Bars shown in the product chart.
    pub top_products: usize,
    pub max_bubble_radius: f64,
    /// Log destination; stderr when unset.
    pub log_file: Option<PathBuf>,
    /// env_logger filter string, e.g. "info" or "CTRL=debug".
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_path: PathBuf::from("sale_data.csv"),
            region_column: DEFAULT_REGION_COLUMN.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            top_products: crossfilter::DEFAULT_TOP_PRODUCTS,
            max_bubble_radius: crossfilter::DEFAULT_MAX_BUBBLE_RADIUS,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            region_column: self.region_column.clone(),
            date_format: self.date_format.clone(),
        }
    }

    /// Scale parameters for `dataset`, with the configured overrides applied.
    pub fn scale_params(&self, dataset: &Dataset) -> ScaleParams {
        ScaleParams {
            max_bubble_radius: self.max_bubble_radius,
            top_products: self.top_products,
            ..ScaleParams::from_dataset(dataset)
        }
    }
}
