//! Column records.

use serde::{Deserialize, Serialize};

use super::types::ColumnType;
use crate::category::Resolution;
use crate::error::InferenceError;
use crate::inference::{ColumnProfile, NativeType, TypeInferencer, percent_complete};

/// Documentation record for a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, unique within its dataset.
    pub name: String,
    /// Zero-based position in the schema.
    pub position: usize,
    /// User-facing type.
    pub inferred_type: ColumnType,
    /// Native storage type the user-facing type was derived from.
    pub native_type: NativeType,
    /// Rounded percentage of non-missing values (0-100).
    pub percent_complete: u8,
    /// Number of distinct non-missing values.
    pub distinct_count: usize,
    /// Number of missing values.
    pub missing_count: usize,
    /// Description from user metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category the column is bucketed under; `None` when excluded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Column {
    /// Build a column record from its profile and category resolution.
    ///
    /// Completeness is computed before the type, so an empty column reports
    /// [`InferenceError::EmptyColumn`] whatever its native type.
    ///
    /// # Errors
    ///
    /// Fails if the column is empty or its native type is unsupported.
    pub fn describe(
        name: &str,
        position: usize,
        profile: &ColumnProfile,
        inferencer: &TypeInferencer,
        resolution: Resolution<'_>,
    ) -> Result<Self, InferenceError> {
        let percent_complete = percent_complete(profile.missing_count, profile.total_count)?;
        let inferred_type = inferencer.infer(name, profile)?;

        Ok(Self {
            name: name.to_string(),
            position,
            inferred_type,
            native_type: profile.native_type,
            percent_complete,
            distinct_count: profile.distinct_count,
            missing_count: profile.missing_count,
            description: resolution.description().map(str::to_string),
            category: resolution.category().map(str::to_string),
        })
    }

    /// Returns true if the column has no missing values.
    pub fn is_complete(&self) -> bool {
        self.missing_count == 0
    }
}
