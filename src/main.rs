//! Ledger XIRR CLI
//!
//! Reads a CSV (`date,amount[,investment]`) or JSON ledger and prints the
//! annualized XIRR overall and, optionally, per investment.
//! Solver settings come from flags, then XIRR_GUESS / XIRR_TOLERANCE /
//! XIRR_MAX_ITERATIONS, then built-in defaults.

use anyhow::{Context, Result};
use clap::Parser;
use ledger_xirr::cashflow::load_ledger;
use ledger_xirr::{format_rate, PortfolioRunner, RateSummary, SolverConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ledger-xirr", version, about = "Annualized XIRR for a cash flow ledger")]
struct Args {
    /// Ledger file (.csv or .json)
    input: PathBuf,

    /// Initial rate guess as a decimal (0.10 = 10%)
    #[arg(long)]
    guess: Option<f64>,

    /// Convergence tolerance on successive rates
    #[arg(long)]
    tolerance: Option<f64>,

    /// Newton-Raphson iteration cap
    #[arg(long)]
    max_iterations: Option<u32>,

    /// Also report one rate per investment
    #[arg(long)]
    by_investment: bool,

    /// Anchor on the earliest date instead of the first row
    #[arg(long)]
    sort: bool,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,
}

/// Layer CLI flags over `base` (normally the env-derived config)
fn apply_flags(args: &Args, base: SolverConfig) -> SolverConfig {
    let mut config = base;
    if let Some(guess) = args.guess {
        config = config.with_guess(guess);
    }
    if let Some(tolerance) = args.tolerance {
        config = config.with_tolerance(tolerance);
    }
    if let Some(max_iterations) = args.max_iterations {
        config = config.with_max_iterations(max_iterations);
    }
    config
}

fn print_row(summary: &RateSummary) {
    println!(
        "{:<24} {:>6} {:>14.2} {:>14.2} {:>14.2} {:>10}",
        summary.label,
        summary.flow_count,
        summary.total_invested,
        summary.total_returned,
        summary.net,
        format_rate(summary.rate),
    );
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = apply_flags(&args, SolverConfig::from_env());
    config.validate().context("Invalid solver settings")?;
    log::debug!("Solver config: {:?}", config);

    let entries = load_ledger(&args.input)
        .with_context(|| format!("Failed to load ledger from {}", args.input.display()))?;

    let runner = PortfolioRunner::new(config).with_chronological_anchor(args.sort);
    let report = runner
        .run(&entries)
        .with_context(|| format!("Cannot compute XIRR for {}", args.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !args.by_investment {
        println!("XIRR: {}", format_rate(report.overall.rate));
        return Ok(());
    }

    println!(
        "{:<24} {:>6} {:>14} {:>14} {:>14} {:>10}",
        "Investment", "Flows", "Invested", "Returned", "Net", "XIRR"
    );
    println!("{}", "-".repeat(87));
    for summary in &report.investments {
        print_row(summary);
    }
    println!("{}", "-".repeat(87));
    print_row(&report.overall);

    Ok(())
}
