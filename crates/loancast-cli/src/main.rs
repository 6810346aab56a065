//! Loancast CLI - Loan amortization and balance forecasting.
//!
//! # Usage
//!
//! ```bash
//! # Monthly payment and totals
//! loancast payment --principal 250000 --rate 5.5 --years 30
//!
//! # Amortization schedule as CSV
//! loancast --format csv schedule -p 250000 -r 5.5 -y 30 > schedule.csv
//!
//! # Predict the balance at month 186 from yearly samples
//! loancast predict -p 250000 -r 5.5 -y 30 --target 186
//!
//! # Predict from hand-picked months
//! loancast predict -p 250000 -r 5.5 -y 30 --target 186 --months 60,120,180,240
//!
//! # Write a default configuration file
//! loancast config init
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::config::ConfigContext;
use commands::Context;
use config::CalculatorConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let Cli {
        format,
        config: config_path,
        currency,
        quiet,
        command,
        ..
    } = cli;

    // Only the calculation commands read the configuration
    let load_context = || -> Result<Context> {
        let config = CalculatorConfig::resolve(config_path.as_deref())?;
        Ok(Context {
            format,
            currency: currency.unwrap_or(config.output.currency),
            config,
            quiet,
        })
    };

    match command {
        Commands::Payment(args) => commands::payment::execute(args, &load_context()?)?,
        Commands::Schedule(args) => commands::schedule::execute(args, &load_context()?)?,
        Commands::Predict(args) => commands::predict::execute(args, &load_context()?)?,
        Commands::Config(args) => {
            let ctx = ConfigContext {
                format,
                explicit: config_path.as_deref(),
                quiet,
            };
            commands::config::execute(args, &ctx)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so they never mix with command output.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
