//! Tabledoc: schema inference and documentation models for CSV datasets.
//!
//! Tabledoc reads a directory of comma-separated files, infers a user-facing
//! type and completeness for every column, groups columns into the
//! categories declared in a metadata file, and assembles the result into a
//! [`Site`] ready for rendering.
//!
//! # Example
//!
//! ```no_run
//! use tabledoc::Tabledoc;
//!
//! let tabledoc = Tabledoc::new();
//! let output = tabledoc.build_dir("data", None).unwrap();
//!
//! for (_, dataset) in output.site.datasets() {
//!     println!("{}: {} columns", dataset.display_title(), dataset.column_count);
//! }
//! ```

pub mod assembly;
pub mod category;
pub mod config;
pub mod error;
pub mod inference;
pub mod input;
pub mod schema;
pub mod site;

mod tabledoc;

pub use crate::tabledoc::{BuildOutput, FailureMode, SkippedSource, Tabledoc, TabledocConfig};
pub use assembly::{DatasetAssembler, DatasetOptions};
pub use category::{CategoryResolver, Resolution, UNCATEGORIZED};
pub use config::{CategoryRule, Metadata};
pub use error::{Result, TabledocError};
pub use input::{DataTable, Encoding, Layout, SourceTree};
pub use schema::{Column, ColumnType, Dataset};
pub use site::{Folder, Site, SiteContents};
