pub mod loans;
pub mod markets;
pub mod retirement;
pub mod savings;

use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use finsim_core::{Compounding, ComputationOutput, FinsimResult, HorizonUnit, RateBasis};

use crate::input;

pub type CommandResult = Result<Value, Box<dyn std::error::Error>>;

/// Resolve a command input: `--input` file, then stdin, then the flags.
pub(crate) fn resolve<T, F>(path: Option<&str>, from_flags: F) -> Result<T, Box<dyn std::error::Error>>
where
    T: DeserializeOwned,
    F: FnOnce() -> Result<T, Box<dyn std::error::Error>>,
{
    match input::read_input(path)? {
        Some(value) => Ok(value),
        None => from_flags(),
    }
}

/// Serialise an engine result for the output layer.
pub(crate) fn emit<T: Serialize>(result: FinsimResult<ComputationOutput<T>>) -> CommandResult {
    Ok(serde_json::to_value(result?)?)
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RateBasisArg {
    Annual,
    Monthly,
}

impl From<RateBasisArg> for RateBasis {
    fn from(arg: RateBasisArg) -> Self {
        match arg {
            RateBasisArg::Annual => RateBasis::Annual,
            RateBasisArg::Monthly => RateBasis::Monthly,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompoundingArg {
    Annual,
    Monthly,
}

impl From<CompoundingArg> for Compounding {
    fn from(arg: CompoundingArg) -> Self {
        match arg {
            CompoundingArg::Annual => Compounding::Annual,
            CompoundingArg::Monthly => Compounding::Monthly,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HorizonUnitArg {
    Years,
    Months,
}

impl From<HorizonUnitArg> for HorizonUnit {
    fn from(arg: HorizonUnitArg) -> Self {
        match arg {
            HorizonUnitArg::Years => HorizonUnit::Years,
            HorizonUnitArg::Months => HorizonUnit::Months,
        }
    }
}
