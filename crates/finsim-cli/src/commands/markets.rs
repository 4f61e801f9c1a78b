use clap::Args;
use rust_decimal::Decimal;

use finsim_core::markets::currency::{self, CurrencyConversionInput};
use finsim_core::markets::equity::{self, EquityReturnInput};

use super::{emit, resolve, CommandResult};

#[derive(Args)]
pub struct ConvertArgs {
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// ISO 4217 code of the amount (e.g. EUR)
    #[arg(long)]
    pub from: Option<String>,

    /// ISO 4217 code to convert into
    #[arg(long)]
    pub to: Option<String>,

    /// Units of --to per unit of --from
    #[arg(long, alias = "fx")]
    pub exchange_rate: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Args)]
pub struct EquityReturnArgs {
    /// Ticker symbol
    #[arg(long)]
    pub symbol: Option<String>,

    /// Number of shares held
    #[arg(long, alias = "shares")]
    pub quantity: Option<u32>,

    /// Price paid per share
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Latest quoted price per share
    #[arg(long)]
    pub current_price: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_convert(args: ConvertArgs) -> CommandResult {
    let fx_input: CurrencyConversionInput = resolve(args.input.as_deref(), || {
        Ok(CurrencyConversionInput {
            amount: args.amount.ok_or("--amount is required (or provide --input)")?,
            from: args.from.clone().ok_or("--from is required (or provide --input)")?,
            to: args.to.clone().ok_or("--to is required (or provide --input)")?,
            exchange_rate: args
                .exchange_rate
                .ok_or("--exchange-rate is required (or provide --input)")?,
        })
    })?;
    emit(currency::convert_currency(&fx_input))
}

pub fn run_equity_return(args: EquityReturnArgs) -> CommandResult {
    let eq_input: EquityReturnInput = resolve(args.input.as_deref(), || {
        Ok(EquityReturnInput {
            symbol: args
                .symbol
                .clone()
                .ok_or("--symbol is required (or provide --input)")?,
            quantity: args
                .quantity
                .ok_or("--quantity is required (or provide --input)")?,
            purchase_price: args
                .purchase_price
                .ok_or("--purchase-price is required (or provide --input)")?,
            current_price: args
                .current_price
                .ok_or("--current-price is required (or provide --input)")?,
        })
    })?;
    emit(equity::compute_equity_return(&eq_input))
}
