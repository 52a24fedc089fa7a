//! Documentation model for datasets and their columns.

mod column;
mod dataset;
mod types;

pub use column::Column;
pub use dataset::{Dataset, DisplayOptions, output_file_name};
pub use types::ColumnType;
