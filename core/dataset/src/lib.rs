//! FILENAME: core/dataset/src/lib.rs
//! PURPOSE: Main library entry point for the sales dataset model.
//! CONTEXT: Re-exports public types for use by the cross-filter core,
//! the loader and the dashboard application.

pub mod dataset;
pub mod dimension;
pub mod row;

pub use dataset::Dataset;
pub use dimension::Dimension;
pub use row::{Metric, Row};
