//! rate-quote — replay a zone/rate event log and quote a request batch.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use rate_runtime::app::App;
use rate_runtime::config::{RuntimeConfig, DEFAULT_FIXTURE_PATH};
use rate_runtime::logging::init_logging;
use rate_runtime::store::FsStore;

#[derive(Parser)]
#[command(
    name = "rate-quote",
    version,
    about = "Quote shipping rates from an event-sourced zone/rate table",
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    config: RuntimeConfig,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Quote the request batch and write the result batch (default)
    Quote,

    /// Check an {Input, Output} fixture against a fresh replay
    Verify {
        #[arg(long, env = "RATE_QUOTE_FIXTURE", default_value = DEFAULT_FIXTURE_PATH)]
        fixture: PathBuf,
    },

    /// Print zone/rate counts, the state hash and postcode conflicts
    Inspect,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli.config.logging()).context("failed to initialise logging")?;

    let app = App::new(FsStore, cli.config);

    match cli.command.unwrap_or(Command::Quote) {
        Command::Quote => {
            let outcome = app.run_quote().context("quote run failed")?;
            println!("Events replayed (state {})", outcome.state_hash);
            println!(
                "Quoted {} requests: {} matched, {} unmatched, {} prices",
                outcome.summary.requests,
                outcome.summary.matched,
                outcome.summary.unmatched,
                outcome.summary.quotes
            );
            println!("Results written to {}", app.config().output.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify { fixture } => {
            let report = app
                .run_verify(&fixture)
                .with_context(|| format!("verification of {} failed", fixture.display()))?;
            for mismatch in &report.mismatches {
                println!("[FAIL] #{} {:?}", mismatch.index, mismatch.input);
                println!("  expected: {:?}", mismatch.expected);
                println!("  actual:   {:?}", mismatch.actual);
            }
            println!("Results: {}/{} passed", report.passed, report.total);
            if report.is_ok() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Inspect => {
            let inspection = app.run_inspect().context("inspect failed")?;
            println!("events:     {}", inspection.events);
            println!("log digest: {}", inspection.log_digest);
            println!("zones:      {}", inspection.zones);
            println!("rates:      {}", inspection.rates);
            println!("state hash: {}", inspection.state_hash);
            for conflict in &inspection.conflicts {
                println!(
                    "[WARN] postcode {} in zones {:?}, owned by {}",
                    conflict.postcode,
                    conflict.zones,
                    conflict.winner().unwrap_or("-")
                );
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
