// src/bin/cli.rs
use clap::Parser;
use color_eyre::eyre::Result;

use aip_scrape::cli::{self, Args};

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    aip_scrape::log::init(args.verbose, args.log_file.as_deref())?;

    let summary = cli::run(&args)?;
    println!(
        "{} tables, {} entities, {} junctions ({} foreign keys)",
        summary.tables,
        summary.entities,
        summary.junctions,
        summary.report.foreign_keys.len()
    );
    for path in &summary.files_written {
        println!("{}", path.display());
    }
    Ok(())
}
