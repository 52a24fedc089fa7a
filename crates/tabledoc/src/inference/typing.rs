//! Mapping from native storage types to user-facing type labels.

use crate::error::InferenceError;
use crate::schema::ColumnType;

use super::native::NativeType;
use super::profile::ColumnProfile;

/// Text columns with fewer distinct values than this are categorical.
pub const DEFAULT_CATEGORICAL_THRESHOLD: usize = 20;

/// Derives a [`ColumnType`] from a column's name and value profile.
///
/// Rules are applied in order and the first match wins:
///
/// 1. a name containing `date` (any case) is a [`ColumnType::Date`];
/// 2. integer and float columns are [`ColumnType::Numeric`];
/// 3. boolean columns are [`ColumnType::Boolean`];
/// 4. text columns are [`ColumnType::Categorical`] below the threshold,
///    [`ColumnType::Text`] otherwise.
///
/// Any other native type is unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInferencer {
    categorical_threshold: usize,
}

impl TypeInferencer {
    /// Create an inferencer with the default categorical threshold.
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_CATEGORICAL_THRESHOLD)
    }

    /// Create an inferencer with a custom categorical threshold.
    pub fn with_threshold(categorical_threshold: usize) -> Self {
        Self {
            categorical_threshold,
        }
    }

    /// The distinct-value count at which text stops being categorical.
    pub fn categorical_threshold(&self) -> usize {
        self.categorical_threshold
    }

    /// Infer the type of a column.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::UnsupportedType`] for native types with no
    /// mapping, unless the name rule applies first.
    pub fn infer(
        &self,
        column_name: &str,
        profile: &ColumnProfile,
    ) -> Result<ColumnType, InferenceError> {
        if column_name.to_lowercase().contains("date") {
            return Ok(ColumnType::Date);
        }

        match profile.native_type {
            NativeType::Integer | NativeType::Float => Ok(ColumnType::Numeric),
            NativeType::Boolean => Ok(ColumnType::Boolean),
            NativeType::Text if profile.distinct_count < self.categorical_threshold => {
                Ok(ColumnType::Categorical)
            }
            NativeType::Text => Ok(ColumnType::Text),
            other => Err(InferenceError::UnsupportedType(other)),
        }
    }
}

impl Default for TypeInferencer {
    fn default() -> Self {
        Self::new()
    }
}
