//! wm - query and display waymark annotations
//!
//! wm provides:
//! - A query language for waymarks (`todo @agent #perf !fix owner:@alice`)
//! - Column-aligned, terminal-width-aware rendering of matched waymarks
//! - Unified output formats (text/jsonl/json/md)

use anyhow::Result;
use clap::Parser;

mod cli;
mod core;
mod display;
mod query;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    cli::run(cli)
}
