//! Schedule command implementation.
//!
//! Prints the month-by-month amortization schedule.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use loancast_loans::schedule::AmortizationEntry;

use crate::cli::OutputFormat;
use crate::commands::{Context, LoanArgs};
use crate::output::{
    format_amount, format_money, print_csv, print_header, print_info, print_json_value, print_table,
};

/// Arguments for the schedule command.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Rows to show in table format (0 = all). Defaults to the configured preview size.
    #[arg(long)]
    pub rows: Option<usize>,
}

/// One schedule row, amounts rounded to cents.
#[derive(Debug, Serialize, Tabled)]
pub struct ScheduleRow {
    #[serde(rename = "Month")]
    #[tabled(rename = "Month")]
    pub month: u32,
    #[serde(rename = "Payment")]
    #[tabled(rename = "Payment")]
    pub payment: String,
    #[serde(rename = "Interest")]
    #[tabled(rename = "Interest")]
    pub interest: String,
    #[serde(rename = "Principal")]
    #[tabled(rename = "Principal")]
    pub principal: String,
    #[serde(rename = "Balance")]
    #[tabled(rename = "Balance")]
    pub balance: String,
}

impl From<&AmortizationEntry> for ScheduleRow {
    fn from(entry: &AmortizationEntry) -> Self {
        Self {
            month: entry.period,
            payment: format_amount(entry.payment),
            interest: format_amount(entry.interest_portion),
            principal: format_amount(entry.principal_portion),
            balance: format_amount(entry.remaining_balance),
        }
    }
}

/// Execute the schedule command.
pub fn execute(args: ScheduleArgs, ctx: &Context) -> Result<()> {
    let terms = args.loan.terms(&ctx.config)?;
    let schedule = terms.schedule();

    match ctx.format {
        OutputFormat::Table => {
            let limit = match args.rows.unwrap_or(ctx.config.output.schedule_preview_rows) {
                0 => schedule.len(),
                n => n.min(schedule.len()),
            };
            let rows: Vec<ScheduleRow> =
                schedule.iter().take(limit).map(ScheduleRow::from).collect();

            if !ctx.quiet {
                print_header(&format!(
                    "Amortization Schedule ({} payments of {})",
                    schedule.len(),
                    format_money(schedule.payment(), ctx.currency)
                ));
            }
            print_table(&rows)?;
            if limit < schedule.len() && !ctx.quiet {
                print_info(&format!("{} more rows not shown", schedule.len() - limit));
            }
        }
        OutputFormat::Csv => {
            let rows: Vec<ScheduleRow> = schedule.iter().map(ScheduleRow::from).collect();
            print_csv(&rows)?;
        }
        OutputFormat::Json => {
            print_json_value(&schedule)?;
        }
        OutputFormat::Minimal => {
            for entry in &schedule {
                println!("{}", format_amount(entry.remaining_balance));
            }
        }
    }

    Ok(())
}
