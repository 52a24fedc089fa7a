//! Per-column value profile feeding type and completeness inference.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::native::NativeType;

/// Counts and native type of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Detected native storage type.
    pub native_type: NativeType,
    /// Number of distinct non-missing values.
    pub distinct_count: usize,
    /// Number of missing values.
    pub missing_count: usize,
    /// Total number of values, missing included.
    pub total_count: usize,
}

impl ColumnProfile {
    /// Profile a column from its values.
    pub fn from_values<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        let values: Vec<Option<&str>> = values.into_iter().collect();
        let distinct: HashSet<&str> = values.iter().flatten().copied().collect();
        let missing_count = values.iter().filter(|v| v.is_none()).count();

        Self {
            native_type: NativeType::detect(values.iter().copied()),
            distinct_count: distinct.len(),
            missing_count,
            total_count: values.len(),
        }
    }

    /// Number of non-missing values.
    pub fn present_count(&self) -> usize {
        self.total_count - self.missing_count
    }
}
