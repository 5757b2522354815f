mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::mortgage::MortgagePaymentArgs;
use commands::strategies::StrategyArgs;
use commands::tax::StampDutyArgs;

/// Property investment return calculations
#[derive(Parser)]
#[command(
    name = "propcalc",
    version,
    about = "Property investment return calculations",
    long_about = "A CLI for UK property deal analysis with decimal precision. \
                  Supports stamp duty, mortgage payments, and buy-to-let, \
                  BRR, HMO and flip return models."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log intermediate figures (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Stamp duty with per-band breakdown
    StampDuty(StampDutyArgs),
    /// Monthly repayment mortgage payment
    MortgagePayment(MortgagePaymentArgs),
    /// Buy-to-let cash flow, yield and ROI
    Btl(StrategyArgs),
    /// Buy, refurbish, refinance
    Brr(StrategyArgs),
    /// House in multiple occupation
    Hmo(StrategyArgs),
    /// Refurbish and sell
    Flip(StrategyArgs),
    /// Any strategy, chosen by the input's "strategy" field
    Analyse(StrategyArgs),
    /// Re-evaluate a saved scenario
    Scenario(StrategyArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => {
            builder.parse_filters(&filters);
        }
        Err(_) if verbose => {
            builder.filter_level(log::LevelFilter::Debug);
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Warn);
        }
    }
    builder.init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::StampDuty(args) => commands::tax::run_stamp_duty(args),
        Commands::MortgagePayment(args) => commands::mortgage::run_mortgage_payment(args),
        Commands::Btl(args) => commands::strategies::run_btl(args),
        Commands::Brr(args) => commands::strategies::run_brr(args),
        Commands::Hmo(args) => commands::strategies::run_hmo(args),
        Commands::Flip(args) => commands::strategies::run_flip(args),
        Commands::Analyse(args) => commands::strategies::run_analyse(args),
        Commands::Scenario(args) => commands::strategies::run_scenario(args),
        Commands::Version => {
            println!("propcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
