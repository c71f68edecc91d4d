//! FILENAME: core/dataset/src/dimension.rs
//! PURPOSE: The categorical dimensions a user can select on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A categorical column of the dataset that can be selected on.
/// Year is not a dimension here: it is a range-like filter handled separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    /// Geographic unit (the "State" column in the stock dataset).
    Region,
    Category,
    Segment,
    Product,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Region,
        Dimension::Category,
        Dimension::Segment,
        Dimension::Product,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Dimension::Region => "region",
            Dimension::Category => "category",
            Dimension::Segment => "segment",
            Dimension::Product => "product",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
