//! Payment command implementation.
//!
//! Calculates the fixed monthly payment and lifetime totals.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use loancast_loans::engine::LoanTotals;
use loancast_loans::terms::LoanTerms;

use crate::cli::OutputFormat;
use crate::commands::{Context, LoanArgs};
use crate::output::{
    format_amount, print_csv, print_header, print_json_value, print_table, KeyValue,
};

/// Arguments for the payment command.
#[derive(Args, Debug)]
pub struct PaymentArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

/// Loan summary as serialized to JSON.
#[derive(Debug, Serialize)]
struct PaymentSummary {
    terms: LoanTerms,
    currency: &'static str,
    #[serde(flatten)]
    totals: LoanTotals,
}

/// Execute the payment command.
pub fn execute(args: PaymentArgs, ctx: &Context) -> Result<()> {
    let terms = args.loan.terms(&ctx.config)?;
    let totals = terms.totals();
    let currency = ctx.currency;

    match ctx.format {
        OutputFormat::Table | OutputFormat::Csv => {
            let results = vec![
                KeyValue::from_money("Loan Amount", terms.principal(), currency),
                KeyValue::new("Annual Rate", format!("{}%", terms.annual_rate_percent())),
                KeyValue::new("Term", format!("{} years", terms.term_years())),
                KeyValue::new("Number of Payments", totals.number_of_payments.to_string()),
                KeyValue::from_money("Monthly Payment", totals.monthly_payment, currency),
                KeyValue::from_money("Total Paid", totals.total_paid, currency),
                KeyValue::from_money("Total Interest", totals.total_interest, currency),
            ];
            if ctx.format == OutputFormat::Csv {
                print_csv(&results)?;
            } else {
                if !ctx.quiet {
                    print_header("Loan Summary");
                }
                print_table(&results)?;
            }
        }
        OutputFormat::Json => {
            print_json_value(&PaymentSummary {
                terms,
                currency: currency.code(),
                totals,
            })?;
        }
        OutputFormat::Minimal => {
            println!("{}", format_amount(totals.monthly_payment));
        }
    }

    Ok(())
}
