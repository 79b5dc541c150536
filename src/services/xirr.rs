use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// A cash flow with a date and amount
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub date: NaiveDate,
    pub amount: f64, // positive = inflow, negative = outflow
}

/// Why no annualized rate could be computed.
///
/// Kept on the undetermined variant for logs and tests; callers only ever
/// branch on determined vs. undetermined.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndeterminedReason {
    #[error("fewer than two cash flows")]
    InsufficientData,
    #[error("iteration budget exhausted without convergence")]
    NonConvergence,
    #[error("iteration left the numeric domain")]
    NumericDomain,
}

/// Outcome of an annualized-return calculation.
///
/// `Percent` carries the rate as a percentage, so `Percent(10.0)` means
/// 10% per year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnualizedReturn {
    Percent(f64),
    Undetermined(UndeterminedReason),
}

impl AnnualizedReturn {
    pub fn percent(&self) -> Option<f64> {
        match self {
            Self::Percent(value) => Some(*value),
            Self::Undetermined(_) => None,
        }
    }

    pub fn is_undetermined(&self) -> bool {
        matches!(self, Self::Undetermined(_))
    }

    /// The value as the summary card renders it: a two-decimal percentage,
    /// or "Calculating..." while no rate is available. Never "0%".
    pub fn display(&self) -> String {
        match self {
            Self::Percent(value) => format!("{:.2}%", value),
            Self::Undetermined(_) => "Calculating...".to_string(),
        }
    }
}

const INITIAL_GUESS: f64 = 0.1;
const MAX_ITERATIONS: u32 = 100;
const TOLERANCE: f64 = 1e-4;
const DAYS_PER_YEAR: f64 = 365.0;

/// Calculate XIRR (Extended Internal Rate of Return) using Newton-Raphson iteration.
///
/// Finds the discount rate that makes the net present value of all cash flows
/// equal to zero, counting elapsed time in whole days over 365. Cash flows
/// should include:
/// - Negative amounts for purchases
/// - Positive amounts for proceeds, including the current value of holdings
///
/// Returns `Undetermined` if:
/// - There are fewer than two cash flows
/// - The iteration budget runs out before the rate settles
/// - An iteration leaves the numeric domain (rate at or below -100%, or a
///   non-finite Newton step)
///
/// Same-sign sequences are not screened out up front; they are expected to
/// run into one of the failure cases above.
pub fn calculate_xirr(cash_flows: &[CashFlow]) -> AnnualizedReturn {
    if cash_flows.len() < 2 {
        return AnnualizedReturn::Undetermined(UndeterminedReason::InsufficientData);
    }

    // The earliest date is the day-count epoch, so unsorted input cannot
    // produce negative day counts.
    let Some(epoch) = cash_flows.iter().map(|cf| cf.date).min() else {
        return AnnualizedReturn::Undetermined(UndeterminedReason::InsufficientData);
    };

    let mut rate = INITIAL_GUESS;

    for _ in 0..MAX_ITERATIONS {
        // powf on a base <= 0 is only real-valued for whole exponents
        if 1.0 + rate <= 0.0 {
            debug!(rate, "Rate fell to -100% or below");
            return AnnualizedReturn::Undetermined(UndeterminedReason::NumericDomain);
        }

        let (npv, derivative) = npv_and_derivative(cash_flows, epoch, rate);
        let next = rate - npv / derivative;

        if !next.is_finite() {
            debug!(rate, npv, derivative, "Non-finite Newton step");
            return AnnualizedReturn::Undetermined(UndeterminedReason::NumericDomain);
        }

        if (next - rate).abs() < TOLERANCE {
            return AnnualizedReturn::Percent(next * 100.0);
        }

        rate = next;
    }

    debug!("No convergence within the iteration budget");
    AnnualizedReturn::Undetermined(UndeterminedReason::NonConvergence)
}

/// Calculate NPV and its derivative with respect to rate
fn npv_and_derivative(cash_flows: &[CashFlow], epoch: NaiveDate, rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut derivative = 0.0;

    for cf in cash_flows {
        let years = (cf.date - epoch).num_days() as f64 / DAYS_PER_YEAR;

        npv += cf.amount * (1.0 + rate).powf(-years);

        // d/dr [amount * (1+r)^(-t)] = -t * amount * (1+r)^(-t-1)
        derivative -= years * cf.amount * (1.0 + rate).powf(-years - 1.0);
    }

    (npv, derivative)
}
