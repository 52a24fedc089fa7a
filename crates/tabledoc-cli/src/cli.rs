//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tabledoc::Encoding;

/// Tabledoc: documentation sites for collections of CSV datasets
#[derive(Parser)]
#[command(name = "tabledoc")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the documentation site for a data directory
    Build(BuildArgs),

    /// Show the inferred schema of a single CSV file
    Inspect {
        /// Path to the CSV file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        read: ReadArgs,
    },
}

#[derive(Args)]
pub struct BuildArgs {
    /// Directory holding CSV files, or one subdirectory of CSV files per folder
    #[arg(value_name = "DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Output directory for the generated site
    #[arg(short, long, default_value = "docs")]
    pub output: PathBuf,

    /// Metadata file with titles, descriptions, and categories (optional if absent)
    #[arg(short, long, default_value = "metadata.yaml")]
    pub metadata: PathBuf,

    /// Directory copied over the built-in static assets
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Skip sources that fail to build instead of aborting
    #[arg(long)]
    pub skip_failed: bool,

    /// Remove the output directory before writing
    #[arg(long)]
    pub clean: bool,

    #[command(flatten)]
    pub read: ReadArgs,
}

/// Options controlling how source files are read and typed.
#[derive(Args)]
pub struct ReadArgs {
    /// Treat the first column as a row index and leave it out
    #[arg(long)]
    pub index_column: bool,

    /// Source file encoding (latin1 or utf8)
    #[arg(long, default_value = "latin1")]
    pub encoding: Encoding,

    /// Text columns with fewer distinct values are categorical
    #[arg(long, default_value_t = tabledoc::inference::DEFAULT_CATEGORICAL_THRESHOLD)]
    pub categorical_threshold: usize,
}
