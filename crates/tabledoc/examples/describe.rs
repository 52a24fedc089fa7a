//! Example: Describe the columns of a CSV file with Tabledoc.
//!
//! Usage:
//!   cargo run --example describe -- <file_path>

use std::env;
use std::path::Path;

use tabledoc::Tabledoc;

fn main() -> tabledoc::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example describe -- <file_path>");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let dataset = Tabledoc::new().describe(path)?;

    let separator = "=".repeat(60);
    println!("{}", separator);
    println!("{} ({} rows)", dataset.display_title(), dataset.row_count);
    println!("{}", separator);

    for (category, columns) in dataset.buckets() {
        println!();
        println!("## {}", category);
        for column in columns {
            println!(
                "  {:<30} {:<12} {:>3}% complete",
                column.name,
                column.inferred_type.to_string(),
                column.percent_complete
            );
        }
    }

    Ok(())
}
