//! FILENAME: core/crossfilter/src/lib.rs
//! Cross-filter subsystem for the sales dashboard.
//!
//! This crate owns the selection state machine and everything that is a pure
//! function of (Dataset, SelectionState). It depends on `dataset` only for the
//! row model.
//!
//! Layers:
//! - `definition`: The views and the fixed cut/highlight policy table
//! - `selection`: Selection state, commands and toggle rules
//! - `aggregate`: Group-and-reduce primitives
//! - `engine`: Derivation of the per-view row subsets
//! - `view`: Adapters turning a derived subset into render instructions
//! - `kpi`: Scalar summary of the strict-cut selection

pub mod aggregate;
pub mod definition;
pub mod engine;
pub mod kpi;
pub mod selection;
pub mod view;

pub use aggregate::*;
pub use definition::*;
pub use engine::{derive_all, derive_view, DerivedView, DerivedViews};
pub use kpi::KpiSummary;
pub use selection::*;
pub use view::*;
