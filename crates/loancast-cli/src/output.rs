//! Output formatting utilities.

use colored::Colorize;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::Currency;

/// Prints a single serializable value as pretty JSON.
pub fn print_json_value<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints rows as a formatted table.
pub fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints rows as CSV with a header record.
pub fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Rounds an amount to cents.
///
/// Rounds the binary value of `value`, with exact ties going to the even
/// cent: `0.125` becomes `0.12` and `0.375` becomes `0.38`. This is the same
/// result as `printf`-style `%.2f` formatting.
///
/// Returns `None` for NaN and infinities.
pub fn to_cents(value: f64) -> Option<Decimal> {
    let mut cents = Decimal::from_f64_retain(value)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    cents.rescale(2);
    Some(cents)
}

/// Formats an amount with two decimals and no grouping (`1419.47`).
pub fn format_amount(value: f64) -> String {
    match to_cents(value) {
        Some(cents) => cents.to_string(),
        None => format!("{:.2}", value),
    }
}

/// Formats an amount with currency symbol and thousands separators
/// (`$1,419.47`, `-₱12.00`).
pub fn format_money(value: f64, currency: Currency) -> String {
    let Some(cents) = to_cents(value) else {
        return format!("{}{}", currency.symbol(), value);
    };

    let text = cents.abs().to_string();
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if cents.is_sign_negative() && !cents.is_zero() { "-" } else { "" };

    format!("{}{}{}.{}", sign, currency.symbol(), group_thousands(whole), frac)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// English ordinal of a number (`1st`, `2nd`, `11th`, `23rd`).
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair formatted as money.
    pub fn from_money(key: impl Into<String>, value: f64, currency: Currency) -> Self {
        Self::new(key, format_money(value, currency))
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Prints a divider line.
pub fn print_divider() {
    println!("{}", "─".repeat(60).dimmed());
}
