//! Tabledoc CLI - documentation sites for CSV datasets.

mod cli;
mod commands;
mod render;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Build(args) => commands::build::run(args),
        Commands::Inspect { file, json, read } => commands::inspect::run(file, json, read),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` or the verbosity flag.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "tabledoc=debug,tabledoc_cli=debug"
    } else {
        "tabledoc=info,tabledoc_cli=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
