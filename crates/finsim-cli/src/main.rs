mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::LevelFilter;
use std::process;

use commands::loans::{AmortizationArgs, GracePeriodArgs, PrepaymentArgs};
use commands::markets::{ConvertArgs, EquityReturnArgs};
use commands::retirement::{AnnuityArgs, CountdownArgs, RetirementArgs};
use commands::savings::{InvestmentArgs, SavingsGoalArgs};

/// Personal-finance calculators with decimal precision
#[derive(Parser)]
#[command(
    name = "finsim",
    version,
    about = "Personal-finance calculators with decimal precision",
    long_about = "A CLI for loan amortization, grace periods, early repayment, savings \
                  goals, investment growth, annuities and retirement planning. Inputs \
                  come from flags, a JSON/YAML file (--input) or JSON on stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Round decimal figures to this many places for display
    #[arg(long, global = true)]
    precision: Option<u32>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Fixed-installment loan schedule
    Amortization(AmortizationArgs),
    /// Loan with leading interest-only months
    GracePeriod(GracePeriodArgs),
    /// Compare reduced-installment and reduced-term early repayment
    Prepayment(PrepaymentArgs),
    /// Monthly deposit needed to reach a savings target
    SavingsGoal(SavingsGoalArgs),
    /// Compound growth of an investment with contributions
    Investment(InvestmentArgs),
    /// Level monthly payout from a capital sum
    Annuity(AnnuityArgs),
    /// Project current savings to retirement age
    Retirement(RetirementArgs),
    /// Time left until retirement age
    RetirementCountdown(CountdownArgs),
    /// Convert an amount at a given exchange rate
    Convert(ConvertArgs),
    /// Gain or loss on a stock position
    EquityReturn(EquityReturnArgs),
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

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: commands::CommandResult = match cli.command {
        Commands::Amortization(args) => commands::loans::run_amortization(args),
        Commands::GracePeriod(args) => commands::loans::run_grace_period(args),
        Commands::Prepayment(args) => commands::loans::run_prepayment(args),
        Commands::SavingsGoal(args) => commands::savings::run_savings_goal(args),
        Commands::Investment(args) => commands::savings::run_investment(args),
        Commands::Annuity(args) => commands::retirement::run_annuity(args),
        Commands::Retirement(args) => commands::retirement::run_retirement(args),
        Commands::RetirementCountdown(args) => commands::retirement::run_countdown(args),
        Commands::Convert(args) => commands::markets::run_convert(args),
        Commands::EquityReturn(args) => commands::markets::run_equity_return(args),
        Commands::Version => {
            println!("finsim {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value, cli.precision);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_amortization_flags() {
        let cli = Cli::try_parse_from([
            "finsim",
            "amortization",
            "--principal",
            "10000",
            "--rate",
            "0.05",
            "--term-months",
            "12",
            "--output",
            "minimal",
            "--precision",
            "2",
        ])
        .unwrap();
        assert_eq!(cli.precision, Some(2));
        assert!(matches!(cli.output, OutputFormat::Minimal));
        match cli.command {
            Commands::Amortization(args) => {
                assert_eq!(args.loan.term_months, Some(12));
                assert!(args.input.is_none());
            }
            _ => panic!("expected amortization"),
        }
    }

    #[test]
    fn test_countdown_parses_dates() {
        let cli = Cli::try_parse_from([
            "finsim",
            "retirement-countdown",
            "--birth-date",
            "1970-03-15",
            "--retirement-age-years",
            "67",
        ])
        .unwrap();
        match cli.command {
            Commands::RetirementCountdown(args) => {
                assert_eq!(args.birth_date, chrono::NaiveDate::from_ymd_opt(1970, 3, 15));
                assert_eq!(args.retirement_age_months, 0);
                assert!(args.as_of.is_none());
            }
            _ => panic!("expected retirement-countdown"),
        }
    }

    #[test]
    fn test_rejects_unknown_rate_basis() {
        let parsed = Cli::try_parse_from([
            "finsim",
            "amortization",
            "--rate-basis",
            "weekly",
        ]);
        assert!(parsed.is_err());
    }
}
