use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use covratio::cli;

/// covratio — Normalized coverage ratio from JaCoCo XML reports.
#[derive(Parser)]
#[command(name = "covratio", version, about)]
struct Cli {
    /// JaCoCo XML report files to process.
    #[arg(required = true)]
    reports: Vec<PathBuf>,

    /// Counter kind for the per-file ratio: instruction, complexity,
    /// method, class, or line. Unrecognized values fall back to
    /// instruction. Ignored with --sonar.
    #[arg(long)]
    counter: Option<String>,

    /// Accumulate all reports into one Sonar-aligned branch+line ratio.
    #[arg(long)]
    sonar: bool,

    /// Emit results as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = cli::cmd_coverage(
        &cli.reports,
        cli.counter.as_deref(),
        cli.sonar,
        cli.json,
        Box::new(std::io::stderr()),
    )?;
    print!("{}", output);

    Ok(())
}
