//! Build command - document a data directory as a static site.

use colored::Colorize;
use tabledoc::{FailureMode, Metadata, SourceTree, Tabledoc};

use super::config_from;
use crate::cli::BuildArgs;
use crate::render::{HtmlRenderer, Renderer};

pub fn run(args: BuildArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.data_dir.is_dir() {
        return Err(format!("Data directory not found: {}", args.data_dir.display()).into());
    }

    println!(
        "{} {}",
        "Building".cyan().bold(),
        args.data_dir.display().to_string().white()
    );

    let tree = SourceTree::discover(&args.data_dir)?;
    if tree.is_empty() {
        return Err(format!("No CSV files found in {}", args.data_dir.display()).into());
    }

    let metadata = Metadata::load_optional(&args.metadata, tree.layout())?;
    if metadata.is_none() {
        println!(
            "{} {}",
            "No metadata at".yellow(),
            args.metadata.display().to_string().white()
        );
    }

    let failure_mode = if args.skip_failed {
        FailureMode::SkipFailed
    } else {
        FailureMode::FailFast
    };
    let tabledoc = Tabledoc::with_config(config_from(&args.read, failure_mode));
    let output = tabledoc.build(&tree, metadata.as_ref())?;

    for skipped in &output.skipped {
        println!(
            "{} {}: {}",
            "Skipped".red().bold(),
            skipped.path.display(),
            skipped.reason
        );
    }

    let mut renderer = HtmlRenderer::new(&args.output).with_clean(args.clean);
    if let Some(static_dir) = &args.static_dir {
        renderer = renderer.with_static_dir(static_dir);
    }
    let summary = renderer.render(&output.site)?;

    println!();
    println!(
        "Documented {} of {} datasets",
        output.site.dataset_count().to_string().white().bold(),
        tree.source_count()
    );
    println!(
        "{} {} pages to {}",
        "Wrote".green().bold(),
        summary.pages_written,
        summary.output_dir.display().to_string().white()
    );

    Ok(())
}
