use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use iconbadge::badge::BadgeParams;
use iconbadge::batch::{self, BatchJob, TaskOutcome};
use iconbadge::cli::{self, Cli, ParseOutcome, USAGE};

fn main() -> Result<ExitCode> {
    let cli = match cli::parse_from(std::env::args_os()) {
        Ok(ParseOutcome::Run(cli)) => cli,
        Ok(ParseOutcome::Usage) => {
            println!("{USAGE}");
            return Ok(ExitCode::from(1));
        }
        Err(err) => err.exit(),
    };

    run(cli)?;
    Ok(ExitCode::SUCCESS)
}

fn run(cli: Cli) -> Result<()> {
    let quiet = cli.quiet;
    if !quiet && !cli.source_dir.is_dir() {
        println!(
            "{} Source directory not found: {}",
            "!".yellow(),
            cli.source_dir.display()
        );
    }

    std::fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("Failed to create {}", cli.output_dir.display()))?;

    let job = BatchJob {
        source_dir: cli.source_dir,
        output_dir: cli.output_dir,
        params: BadgeParams {
            build_version: cli.build_version,
            build_number: cli.build_number,
            build_type: cli.build_type,
        },
        scale: cli.scale,
    };

    let report = batch::run(&job, |outcome| {
        if quiet {
            return;
        }
        match outcome {
            TaskOutcome::Written { destination, .. } => {
                println!("{} {}", "✓".green(), destination.display());
            }
            TaskOutcome::Skipped { source, error } => {
                println!("{} Skipped {}: {}", "!".yellow(), source.display(), error);
            }
        }
    });

    if !quiet {
        println!(
            "\n{} badged, {} skipped.",
            report.written.len(),
            report.skipped.len()
        );
    }

    Ok(())
}
