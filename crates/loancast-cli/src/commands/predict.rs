//! Predict command implementation.
//!
//! Samples balances from the schedule, fits a Newton divided-difference
//! polynomial through them and evaluates it at the target month.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::{builder::Builder, settings::Style, Tabled};

use loancast_loans::forecast::{BalanceForecaster, BalancePrediction, BalanceSamples};
use loancast_loans::schedule::AmortizationSchedule;
use loancast_loans::selection::SampleSelection;
use loancast_math::interpolation::{DividedDifferenceTable, NewtonFormat};

use crate::cli::{Currency, OutputFormat};
use crate::commands::{parse_months, Context, LoanArgs};
use crate::error::CliError;
use crate::output::{
    format_amount, format_money, ordinal, print_csv, print_divider, print_header,
    print_json_value, print_success, print_table, print_warning, KeyValue,
};

/// Difference columns shown in the divided-difference preview.
const PREVIEW_DIFFERENCES: usize = 4;

/// Arguments for the predict command.
#[derive(Args, Debug)]
pub struct PredictArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Month to predict the remaining balance for
    #[arg(short, long)]
    pub target: f64,

    /// Sample months, comma-separated (e.g., 12,24,36,48). Month 0 is always included.
    #[arg(short, long, conflicts_with = "step")]
    pub months: Option<String>,

    /// Auto-select every N months. Defaults to the configured step.
    #[arg(short, long)]
    pub step: Option<u32>,
}

/// A sample point for display.
#[derive(Debug, Tabled)]
struct PointRow {
    #[tabled(rename = "Point")]
    point: usize,
    #[tabled(rename = "Month")]
    month: f64,
    #[tabled(rename = "Balance")]
    balance: String,
}

/// Prediction report as serialized to JSON.
#[derive(Debug, Serialize)]
struct PredictionReport {
    target_month: f64,
    predicted_balance: f64,
    balance_change_per_month: f64,
    extrapolated: bool,
    scheduled_balance: Option<f64>,
    degree: usize,
    currency: &'static str,
    samples: Vec<SamplePoint>,
    coefficients: Vec<f64>,
    polynomial: String,
}

#[derive(Debug, Serialize)]
struct SamplePoint {
    month: f64,
    balance: f64,
}

/// Execute the predict command.
pub fn execute(args: PredictArgs, ctx: &Context) -> Result<()> {
    if !args.target.is_finite() {
        return Err(CliError::InvalidTarget(args.target).into());
    }

    let terms = args.loan.terms(&ctx.config)?;
    let schedule = terms.schedule();

    let selection = match &args.months {
        Some(months) => parse_months(months)?,
        None => SampleSelection::every(
            args.step.unwrap_or(ctx.config.forecast.sample_step_months),
            schedule.last_period(),
        ),
    };
    let samples = BalanceSamples::from_selection(&schedule, &selection)?;

    let forecaster = BalanceForecaster::new().with_min_samples(ctx.config.forecast.min_samples);
    let prediction = forecaster.predict(&samples, args.target)?;

    let polynomial = NewtonFormat::new()
        .with_max_terms(ctx.config.forecast.display_terms)
        .render(prediction.table());
    let scheduled = scheduled_balance(&schedule, args.target);
    let summary = summary_rows(&prediction, &samples, scheduled, ctx.currency);

    match ctx.format {
        OutputFormat::Table => {
            print_report(&samples, &prediction, &polynomial, ctx);
            print_table(&summary)?;
            if !ctx.quiet {
                println!();
                print_success(&format!(
                    "Polynomial passes through all {} data points",
                    samples.len()
                ));
            }
        }
        OutputFormat::Csv => {
            print_csv(&summary)?;
        }
        OutputFormat::Json => {
            print_json_value(&PredictionReport {
                target_month: prediction.target_period,
                predicted_balance: prediction.balance,
                balance_change_per_month: prediction.balance_change_per_month,
                extrapolated: prediction.is_extrapolation(),
                scheduled_balance: scheduled,
                degree: prediction.degree(),
                currency: ctx.currency.code(),
                samples: samples
                    .iter()
                    .map(|(month, balance)| SamplePoint { month, balance })
                    .collect(),
                coefficients: prediction.table().coefficients(),
                polynomial,
            })?;
        }
        OutputFormat::Minimal => {
            println!("{}", format_amount(prediction.balance));
        }
    }

    Ok(())
}

/// Balance from the schedule when the target is a whole month inside it.
#[allow(clippy::float_cmp)]
fn scheduled_balance(schedule: &AmortizationSchedule, target: f64) -> Option<f64> {
    if target < 0.0 || target.fract() != 0.0 || target > f64::from(schedule.last_period()) {
        return None;
    }
    schedule.balance_at(target as u32)
}

fn print_report(
    samples: &BalanceSamples,
    prediction: &BalancePrediction,
    polynomial: &str,
    ctx: &Context,
) {
    if ctx.quiet {
        return;
    }

    let points: Vec<PointRow> = samples
        .iter()
        .enumerate()
        .map(|(i, (month, balance))| PointRow {
            point: i + 1,
            month,
            balance: format_money(balance, ctx.currency),
        })
        .collect();
    print_header(&format!("Data Points ({} points)", samples.len()));
    println!("{}", tabled::Table::new(&points).with(Style::rounded()));

    print_header("Divided Difference Table");
    println!("{}", difference_preview(prediction.table()));

    print_header("Polynomial Equation (Newton Form)");
    println!("{}", polynomial);
    print_divider();

    if prediction.is_extrapolation() {
        let (first, last) = prediction.sampled_range();
        print_warning(&format!(
            "Month {} is outside the sampled range [{}, {}]; the prediction is an extrapolation",
            prediction.target_period, first, last
        ));
    }
    print_header("Prediction Result");
}

/// Renders the first difference columns of the table.
fn difference_preview(table: &DividedDifferenceTable) -> String {
    let n = table.len();
    let columns = PREVIEW_DIFFERENCES.min(n.saturating_sub(1));

    let mut builder = Builder::default();
    let mut header = vec!["Point".to_string(), "Month".to_string(), "f(x)".to_string()];
    header.extend((1..=columns).map(|j| format!("{} Diff", ordinal(j))));
    builder.push_record(header);

    for (i, x) in table.abscissas().iter().enumerate() {
        let mut record = vec![i.to_string(), format!("{:.0}", x)];
        record.push(table.get(i, 0).map_or_else(String::new, format_amount));
        for j in 1..=columns {
            record.push(table.get(i, j).map_or_else(String::new, |v| format!("{:.4}", v)));
        }
        builder.push_record(record);
    }

    builder.build().with(Style::rounded()).to_string()
}

fn summary_rows(
    prediction: &BalancePrediction,
    samples: &BalanceSamples,
    scheduled: Option<f64>,
    currency: Currency,
) -> Vec<KeyValue> {
    let mut rows = vec![
        KeyValue::new("Target Month", format!("{}", prediction.target_period)),
        KeyValue::from_money("Predicted Balance", prediction.balance, currency),
        KeyValue::from_money(
            "Balance Change per Month",
            prediction.balance_change_per_month,
            currency,
        ),
    ];
    if let Some(actual) = scheduled {
        rows.push(KeyValue::from_money("Scheduled Balance", actual, currency));
        rows.push(KeyValue::from_money(
            "Difference",
            prediction.balance - actual,
            currency,
        ));
    }
    rows.push(KeyValue::new(
        "Polynomial Degree",
        format!("{} degree", ordinal(prediction.degree())),
    ));
    rows.push(KeyValue::new("Data Points", samples.len().to_string()));
    rows.push(KeyValue::new("Method", "Newton's Divided Difference"));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use loancast_loans::engine::generate_schedule;

    #[test]
    fn test_scheduled_balance_lookup() {
        let schedule = generate_schedule(120_000.0, 0.0, 10);
        assert_eq!(scheduled_balance(&schedule, 0.0), Some(120_000.0));
        assert_eq!(scheduled_balance(&schedule, 60.0), Some(60_000.0));
        assert_eq!(scheduled_balance(&schedule, 60.5), None);
        assert_eq!(scheduled_balance(&schedule, 121.0), None);
        assert_eq!(scheduled_balance(&schedule, -1.0), None);
    }

    #[test]
    fn test_summary_rows_include_balance_change() {
        let schedule = generate_schedule(120_000.0, 0.0, 10);
        let selection = SampleSelection::from_periods([30, 60, 90]);
        let samples = BalanceSamples::from_selection(&schedule, &selection).unwrap();
        let prediction = BalanceForecaster::new().predict(&samples, 45.0).unwrap();

        let rows = summary_rows(&prediction, &samples, Some(75_000.0), Currency::Usd);
        let change = rows
            .iter()
            .find(|row| row.key == "Balance Change per Month")
            .unwrap();
        assert_eq!(change.value, "-$1,000.00");
    }

    #[test]
    fn test_difference_preview_columns() {
        let table = DividedDifferenceTable::new(
            vec![0.0, 12.0, 24.0, 36.0, 48.0, 60.0],
            vec![600.0, 480.0, 360.0, 240.0, 120.0, 0.0],
        )
        .unwrap();
        let text = difference_preview(&table);

        assert!(text.contains("4th Diff"));
        assert!(!text.contains("5th Diff"));
        assert!(text.contains("-10.0000"));
    }

    #[test]
    fn test_difference_preview_small_table() {
        let table = DividedDifferenceTable::new(vec![0.0, 1.0], vec![2.0, 4.0]).unwrap();
        let text = difference_preview(&table);
        assert!(text.contains("1st Diff"));
        assert!(!text.contains("2nd Diff"));
    }
}
