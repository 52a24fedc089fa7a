//! Inspect command - show the inferred schema of one file.

use std::path::PathBuf;

use colored::Colorize;
use tabledoc::{FailureMode, Tabledoc};

use super::config_from;
use crate::cli::ReadArgs;

pub fn run(file: PathBuf, json_output: bool, read: ReadArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let tabledoc = Tabledoc::with_config(config_from(&read, FailureMode::FailFast));
    let dataset = tabledoc.describe(&file)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&dataset)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows, {} columns)",
        "Schema for".cyan().bold(),
        dataset.name.white(),
        dataset.row_count,
        dataset.column_count
    );
    println!();
    println!(
        "  {:<30} {:<12} {:>9} {:>9}",
        "Column".bold(),
        "Type".bold(),
        "Complete".bold(),
        "Distinct".bold()
    );

    for column in &dataset.columns {
        let complete = format!("{}%", column.percent_complete);
        let complete = if column.percent_complete == 100 {
            complete.green()
        } else if column.percent_complete >= 50 {
            complete.yellow()
        } else {
            complete.red()
        };
        println!(
            "  {:<30} {:<12} {:>9} {:>9}",
            column.name,
            column.inferred_type.label(),
            complete,
            column.distinct_count
        );
    }

    Ok(())
}
