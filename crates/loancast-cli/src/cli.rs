//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::commands::{ConfigArgs, PaymentArgs, PredictArgs, ScheduleArgs};

/// Loancast - Loan amortization and balance forecasting CLI
#[derive(Parser)]
#[command(name = "loancast")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, env = "LOANCAST_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Currency used for display, overriding the configuration
    #[arg(long, value_enum, global = true)]
    pub currency: Option<Currency>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Calculate the monthly payment and loan totals
    Payment(PaymentArgs),

    /// Generate the amortization schedule
    Schedule(ScheduleArgs),

    /// Predict the remaining balance by Newton interpolation
    Predict(PredictArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}

/// Display currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    /// US dollar
    #[default]
    Usd,
    /// Philippine peso
    Php,
}

impl Currency {
    /// Symbol printed in front of amounts.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Php => "₱",
        }
    }

    /// ISO 4217 code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Php => "PHP",
        }
    }
}
