use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::models::Holding;
use crate::services::xirr::{calculate_xirr, AnnualizedReturn, CashFlow};

/// Cash flows implied by liquidating the whole portfolio at `as_of`: for
/// each priced holding, the purchase as an outflow on its purchase date and
/// the current valuation as an inflow on `as_of`. Every inflow lands on the
/// same `as_of` date. Holdings without a stored quote contribute nothing.
///
/// `as_of` is an explicit parameter rather than a clock read, so the same
/// snapshot always produces the same series.
pub fn liquidation_cash_flows(holdings: &[Holding], as_of: NaiveDate) -> Vec<CashFlow> {
    let mut flows = Vec::with_capacity(holdings.len() * 2);

    for holding in holdings {
        let Some(valuation) = holding.current_valuation() else {
            debug!(symbol = %holding.symbol, "No stored quote, holding skipped");
            continue;
        };

        flows.push(CashFlow {
            date: holding.purchase_date,
            amount: -holding.cost_basis(),
        });
        flows.push(CashFlow {
            date: as_of,
            amount: valuation,
        });
    }

    flows
}

/// Portfolio-level totals, aggregated over priced holdings only.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub total_invested: f64,
    pub current_value: f64,
    pub total_returns: f64,
    pub annualized_return: AnnualizedReturn,
}

impl PortfolioSummary {
    pub fn from_holdings(holdings: &[Holding], as_of: NaiveDate) -> Self {
        let mut total_invested = 0.0;
        let mut current_value = 0.0;

        for holding in holdings {
            if let Some(valuation) = holding.current_valuation() {
                total_invested += holding.cost_basis();
                current_value += valuation;
            }
        }

        let annualized_return = calculate_xirr(&liquidation_cash_flows(holdings, as_of));

        Self {
            total_invested,
            current_value,
            total_returns: current_value - total_invested,
            annualized_return,
        }
    }

    /// Total return as a share of invested capital, or 0 while nothing
    /// priced has been invested.
    pub fn returns_percentage(&self) -> f64 {
        if self.total_invested > 0.0 {
            (self.total_returns / self.total_invested) * 100.0
        } else {
            0.0
        }
    }
}
