//! CLI command implementations.

pub mod config;
pub mod payment;
pub mod predict;
pub mod schedule;

pub use config::ConfigArgs;
pub use payment::PaymentArgs;
pub use predict::PredictArgs;
pub use schedule::ScheduleArgs;

use clap::Args;

use loancast_loans::selection::SampleSelection;
use loancast_loans::terms::LoanTerms;

use crate::cli::{Currency, OutputFormat};
use crate::config::CalculatorConfig;
use crate::error::{CliError, CliResult};

/// Settings shared by the calculation commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format.
    pub format: OutputFormat,
    /// Effective configuration.
    pub config: CalculatorConfig,
    /// Display currency.
    pub currency: Currency,
    /// Suppress non-essential output.
    pub quiet: bool,
}

/// Loan terms shared by the calculation commands.
#[derive(Args, Debug, Clone)]
pub struct LoanArgs {
    /// Loan amount
    #[arg(short, long)]
    pub principal: f64,

    /// Annual interest rate (as percentage, e.g., 5.5 for 5.5%)
    #[arg(short, long)]
    pub rate: f64,

    /// Loan term in years
    #[arg(short, long)]
    pub years: u32,
}

impl LoanArgs {
    /// Validates the terms against the configured bounds.
    pub fn terms(&self, config: &CalculatorConfig) -> CliResult<LoanTerms> {
        Ok(LoanTerms::with_bounds(
            self.principal,
            self.rate,
            self.years,
            &config.bounds,
        )?)
    }
}

/// Parses a comma-separated list of months (`12,24,36`).
pub fn parse_months(s: &str) -> CliResult<SampleSelection> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u32>()
                .map_err(|_| CliError::InvalidMonths(s.to_string()))
        })
        .collect()
}
