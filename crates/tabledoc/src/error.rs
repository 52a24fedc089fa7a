//! Error types for the tabledoc library.

use std::path::PathBuf;
use thiserror::Error;

use crate::inference::NativeType;

/// Main error type for tabledoc operations.
#[derive(Debug, Error)]
pub enum TabledocError {
    /// The source file is missing, unreadable, or malformed.
    #[error("Cannot read dataset '{dataset}' ({}): {message}", path.display())]
    SourceRead {
        dataset: String,
        path: PathBuf,
        message: String,
    },

    /// A column's native storage type has no user-facing mapping.
    #[error("Unsupported type '{native_type}' for column '{column}' in dataset '{dataset}'")]
    UnsupportedType {
        dataset: String,
        column: String,
        native_type: NativeType,
    },

    /// A column has no values, so completeness is undefined.
    #[error("Column '{column}' in dataset '{dataset}' has no rows")]
    EmptyColumn { dataset: String, column: String },

    /// Two columns share the same header.
    #[error("Duplicate column '{column}' in dataset '{dataset}'")]
    DuplicateColumn { dataset: String, column: String },

    /// Metadata declares datasets or folders that were not found among the sources.
    #[error("Metadata declares {kind} not found among the sources: {}", names.join(", "))]
    EmptyConfiguration { kind: String, names: Vec<String> },

    /// A category rule names a column the dataset does not have.
    #[error("Category '{category}' lists column '{column}' which is not in dataset '{dataset}'")]
    UnknownColumn {
        dataset: String,
        category: String,
        column: String,
    },

    /// Two datasets, or a dataset and an index page, render to the same page.
    #[error("Page '{page}' is claimed by both '{first}' and '{second}'")]
    PageCollision {
        page: String,
        first: String,
        second: String,
    },

    /// The metadata file could not be parsed or has the wrong shape.
    #[error("Invalid metadata in '{}': {message}", path.display())]
    Metadata { path: PathBuf, message: String },

    /// The data directory mixes root-level sources with source folders.
    #[error("Layout error in '{}': {message}", path.display())]
    Layout { path: PathBuf, message: String },

    /// Error reading or accessing a file or directory.
    #[error("IO error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TabledocError {
    /// Returns true for author mistakes in metadata or layout.
    ///
    /// Configuration errors always abort a build, even when failed sources
    /// are being skipped.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            TabledocError::EmptyConfiguration { .. }
                | TabledocError::UnknownColumn { .. }
                | TabledocError::PageCollision { .. }
                | TabledocError::Metadata { .. }
                | TabledocError::Layout { .. }
                | TabledocError::Io { .. }
        )
    }

    /// Name of the dataset the error belongs to, if any.
    pub fn dataset(&self) -> Option<&str> {
        match self {
            TabledocError::SourceRead { dataset, .. }
            | TabledocError::UnsupportedType { dataset, .. }
            | TabledocError::EmptyColumn { dataset, .. }
            | TabledocError::DuplicateColumn { dataset, .. }
            | TabledocError::UnknownColumn { dataset, .. } => Some(dataset),
            _ => None,
        }
    }
}

/// Failure of a single-column inference step, before dataset context is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InferenceError {
    /// The native type has no user-facing mapping.
    #[error("unsupported native type '{0}'")]
    UnsupportedType(NativeType),
    /// The column has no values.
    #[error("column has no rows")]
    EmptyColumn,
}

impl InferenceError {
    /// Attach the dataset and column the failure belongs to.
    pub fn in_column(self, dataset: &str, column: &str) -> TabledocError {
        match self {
            InferenceError::UnsupportedType(native_type) => TabledocError::UnsupportedType {
                dataset: dataset.to_string(),
                column: column.to_string(),
                native_type,
            },
            InferenceError::EmptyColumn => TabledocError::EmptyColumn {
                dataset: dataset.to_string(),
                column: column.to_string(),
            },
        }
    }
}

/// Result type alias for tabledoc operations.
pub type Result<T> = std::result::Result<T, TabledocError>;
