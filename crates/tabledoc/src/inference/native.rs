//! Native storage types detected from raw column values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a column's values would be stored by a dataframe loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeType {
    Text,
    Integer,
    Float,
    Boolean,
    Temporal,
}

const TRUE_VALUES: &[&str] = &["True", "TRUE", "true"];
const FALSE_VALUES: &[&str] = &["False", "FALSE", "false"];

impl NativeType {
    /// Detect the native type of a column from its values.
    ///
    /// Only non-missing values take part, except for booleans: a boolean
    /// column with gaps is stored as text. An all-missing column is stored as
    /// floats. Dates are never parsed, so [`NativeType::Temporal`] is never
    /// returned.
    pub fn detect<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        let mut any_missing = false;
        let mut present = 0usize;
        let mut all_integer = true;
        let mut all_float = true;
        let mut all_boolean = true;

        for value in values {
            let Some(value) = value else {
                any_missing = true;
                continue;
            };
            present += 1;

            let trimmed = value.trim();
            if all_integer && trimmed.parse::<i64>().is_err() {
                all_integer = false;
            }
            if all_float && !all_integer && trimmed.parse::<f64>().is_err() {
                all_float = false;
            }
            if all_boolean && !is_boolean(trimmed) {
                all_boolean = false;
            }

            if !all_integer && !all_float && !all_boolean {
                return NativeType::Text;
            }
        }

        if present == 0 {
            NativeType::Float
        } else if all_integer {
            NativeType::Integer
        } else if all_float {
            NativeType::Float
        } else if all_boolean && !any_missing {
            NativeType::Boolean
        } else {
            NativeType::Text
        }
    }

    /// Returns true if values of this type are numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, NativeType::Integer | NativeType::Float)
    }
}

fn is_boolean(value: &str) -> bool {
    TRUE_VALUES.contains(&value) || FALSE_VALUES.contains(&value)
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeType::Text => write!(f, "text"),
            NativeType::Integer => write!(f, "integer"),
            NativeType::Float => write!(f, "float"),
            NativeType::Boolean => write!(f, "boolean"),
            NativeType::Temporal => write!(f, "temporal"),
        }
    }
}
