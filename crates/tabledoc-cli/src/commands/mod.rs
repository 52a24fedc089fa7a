//! CLI command implementations.

pub mod build;
pub mod inspect;

use tabledoc::input::ParserConfig;
use tabledoc::{FailureMode, TabledocConfig};

use crate::cli::ReadArgs;

/// Library configuration from the shared read options.
fn config_from(read: &ReadArgs, failure_mode: FailureMode) -> TabledocConfig {
    TabledocConfig {
        parser: ParserConfig {
            encoding: read.encoding,
            index_column: read.index_column,
        },
        categorical_threshold: read.categorical_threshold,
        failure_mode,
    }
}
