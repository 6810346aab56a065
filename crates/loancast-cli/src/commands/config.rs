//! Config command implementation.
//!
//! Shows, locates and initializes the calculator configuration file.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::config::{default_config_path, CalculatorConfig};
use crate::error::CliError;
use crate::output::{print_header, print_info, print_json_value, print_success};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Show configuration file location
    Path,

    /// Write a configuration file with default values
    Init(InitArgs),
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Settings for the config subcommands.
///
/// These run without loading the configuration up front, so they work when
/// the file is missing or malformed.
#[derive(Debug, Clone, Copy)]
pub struct ConfigContext<'a> {
    /// Output format.
    pub format: OutputFormat,
    /// Explicit config path from the command line.
    pub explicit: Option<&'a Path>,
    /// Suppress non-essential output.
    pub quiet: bool,
}

impl ConfigContext<'_> {
    /// Target file: `--config` if given, else the default location.
    fn target_path(&self) -> Result<PathBuf> {
        self.explicit
            .map(Path::to_path_buf)
            .or_else(default_config_path)
            .ok_or_else(|| CliError::NoConfigDir.into())
    }
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &ConfigContext<'_>) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(ctx),
        ConfigCommand::Path => execute_path(ctx),
        ConfigCommand::Init(init_args) => execute_init(&init_args, ctx),
    }
}

/// Show the configuration in effect for the target file.
fn execute_show(ctx: &ConfigContext<'_>) -> Result<()> {
    let path = ctx.target_path()?;
    let (config, found) = CalculatorConfig::load_or_default(&path)?;

    match ctx.format {
        OutputFormat::Json => print_json_value(&config)?,
        OutputFormat::Table => {
            if !ctx.quiet {
                let source = if found {
                    path.display().to_string()
                } else {
                    "built-in defaults".to_string()
                };
                print_header(&format!("Current Configuration ({})", source));
            }
            print!("{}", config.to_toml_string()?);
        }
        OutputFormat::Csv | OutputFormat::Minimal => {
            print!("{}", config.to_toml_string()?);
        }
    }
    Ok(())
}

/// Show configuration file path.
fn execute_path(ctx: &ConfigContext<'_>) -> Result<()> {
    let path = ctx.target_path()?;

    if ctx.format == OutputFormat::Minimal {
        println!("{}", path.display());
        return Ok(());
    }

    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}

/// Write a default configuration file.
fn execute_init(args: &InitArgs, ctx: &ConfigContext<'_>) -> Result<()> {
    let path = ctx.target_path()?;
    if path.exists() && !args.force {
        return Err(CliError::ConfigExists(path).into());
    }

    CalculatorConfig::default().save(&path)?;
    tracing::debug!(path = %path.display(), "wrote default configuration");

    if !ctx.quiet {
        print_success(&format!("Wrote default configuration to {}", path.display()));
    }
    Ok(())
}
