//! # Loancast Loans
//!
//! Fixed-rate loan amortization and balance forecasting.
//!
//! This crate provides:
//!
//! - **Engine**: payment, schedule and totals for a fixed-rate loan
//!   ([`engine`])
//! - **Terms**: validated loan terms with configurable bounds ([`terms`])
//! - **Selection**: caller-owned choice of schedule periods ([`selection`])
//! - **Forecast**: balance prediction from selected periods via Newton
//!   interpolation ([`forecast`])
//!
//! The engine functions are pure and trust their inputs. Validation lives in
//! [`LoanTerms::new`](terms::LoanTerms::new), so callers that already hold
//! valid terms can use the engine directly.
//!
//! ## Example
//!
//! ```rust
//! use loancast_loans::prelude::*;
//!
//! let terms = LoanTerms::new(250_000.0, 5.5, 30).unwrap();
//! let schedule = terms.schedule();
//!
//! let selection = SampleSelection::every(12, schedule.len() as u32);
//! let samples = BalanceSamples::from_selection(&schedule, &selection).unwrap();
//! let prediction = BalanceForecaster::default().predict(&samples, 186.0).unwrap();
//!
//! let actual = schedule.balance_at(186).unwrap();
//! assert!((prediction.balance - actual).abs() < 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::uninlined_format_args)]

pub mod engine;
pub mod error;
pub mod forecast;
pub mod schedule;
pub mod selection;
pub mod terms;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::{
        compute_monthly_payment, compute_totals, generate_schedule, LoanTotals,
    };
    pub use crate::error::{LoanError, LoanResult};
    pub use crate::forecast::{BalanceForecaster, BalancePrediction, BalanceSamples};
    pub use crate::schedule::{AmortizationEntry, AmortizationSchedule};
    pub use crate::selection::SampleSelection;
    pub use crate::terms::{LoanBounds, LoanTerms};
}

pub use error::{LoanError, LoanResult};
