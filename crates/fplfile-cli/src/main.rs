//! Flight-plan filing front-end.
//!
//! Reads a JSON [`FlightPlanSubmission`], runs it through the codec and
//! prints the ATS message line on success, or the `code: message` error
//! list on rejection (exit code 1). The filing instant can be pinned
//! with `--now` for reproducible runs.

use std::fs;
use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::info;

use fplfile_models::{file_submission, FilingCategory, FilingContext, FlightPlanSubmission};

#[derive(Parser, Debug)]
#[command(name = "fplfile-cli")]
#[command(about = "File an ICAO flight plan and print the ATS message")]
#[command(author, version, long_about = None)]
struct Cli {
    /// Submission category (determines the departure lead time)
    #[arg(long, default_value = "full")]
    category: FilingCategory,

    /// Filing instant as RFC 3339 UTC (defaults to the current time)
    #[arg(long)]
    now: Option<DateTime<Utc>>,

    /// Path to the JSON submission, or "-" for stdin
    submission: String,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let raw = if cli.submission == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read submission from stdin")?;
        buffer
    } else {
        fs::read_to_string(&cli.submission)
            .with_context(|| format!("failed to read {}", cli.submission))?
    };

    let submission: FlightPlanSubmission =
        serde_json::from_str(&raw).context("submission is not valid JSON")?;

    let ctx = FilingContext {
        now: cli.now.unwrap_or_else(Utc::now),
        category: cli.category,
    };
    info!(category = %ctx.category, now = %ctx.now, "filing submission");

    let outcome = file_submission(submission, &ctx);
    if let Some(message) = outcome.message() {
        println!("{message}");
        Ok(ExitCode::SUCCESS)
    } else {
        for error in outcome.errors() {
            eprintln!("{error}");
        }
        Ok(ExitCode::FAILURE)
    }
}
