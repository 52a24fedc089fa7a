//! Inference of column types and completeness.

mod completeness;
mod native;
mod profile;
mod typing;

pub use completeness::{completeness, percent_complete};
pub use native::NativeType;
pub use profile::ColumnProfile;
pub use typing::{DEFAULT_CATEGORICAL_THRESHOLD, TypeInferencer};
