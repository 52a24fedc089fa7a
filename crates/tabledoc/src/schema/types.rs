//! User-facing type labels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inferred, human-readable data type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    /// Free text.
    Text,
    /// Integers or floating-point numbers.
    Numeric,
    /// True/false values.
    Boolean,
    /// Dates, recognized from the column name.
    Date,
    /// Text with few distinct values.
    Categorical,
}

impl ColumnType {
    /// Label shown in documentation pages.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::Text => "Text",
            ColumnType::Numeric => "Numeric",
            ColumnType::Boolean => "Boolean",
            ColumnType::Date => "Date",
            ColumnType::Categorical => "Categorical",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
