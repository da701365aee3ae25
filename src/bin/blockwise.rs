//! Blockwise CLI - write-sparing file copy.

use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use blockwise::{discard, CopierBuilder, CopyStats, DEFAULT_PAGE_SIZE};

/// Blockwise - copy a file while rewriting only the pages that differ
#[derive(Parser)]
#[command(name = "blockwise")]
#[command(version)]
#[command(about = "Write-sparing file copy for copy-on-write storage")]
#[command(long_about = None)]
struct Cli {
    /// Source file
    #[arg(required = true)]
    source: PathBuf,

    /// Destination file (created if absent)
    #[arg(required = true)]
    dest: PathBuf,

    /// Page size in bytes (512-65536, power of 2)
    #[arg(short = 'b', long, default_value_t = DEFAULT_PAGE_SIZE)]
    block_size: usize,

    /// Trace every page decision to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Print stats as JSON instead of a summary line
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    validate_block_size(cli.block_size)?;

    let copier = CopierBuilder::new().page_size(cli.block_size).build();

    let stats = if cli.verbose {
        eprintln!(
            "Copying {} -> {}",
            cli.source.display(),
            cli.dest.display()
        );
        eprintln!("Page size: {}", cli.block_size);
        let mut sink = |args: fmt::Arguments<'_>| eprintln!("{args}");
        copier.copy(&mut sink, &cli.source, &cli.dest)?
    } else {
        copier.copy(&mut discard, &cli.source, &cli.dest)?
    };

    report(cli, &stats)?;
    Ok(())
}

fn report(cli: &Cli, stats: &CopyStats) -> Result<(), Box<dyn std::error::Error>> {
    if cli.json {
        println!("{}", serde_json::to_string(stats)?);
    } else {
        println!(
            "Copied {} ({} pages rewritten, {} pages untouched)",
            cli.dest.display(),
            stats.pages_written,
            stats.pages_unmodified
        );
    }
    Ok(())
}

fn validate_block_size(size: usize) -> Result<(), String> {
    if size.is_power_of_two() && (512..=65536).contains(&size) {
        Ok(())
    } else {
        Err(format!(
            "invalid page size {size}: must be a power of 2 between 512 and 65536"
        ))
    }
}
