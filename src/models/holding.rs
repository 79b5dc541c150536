use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A recorded position: a quantity of an asset bought at a unit price,
/// tracked against its latest known market quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub quantity: f64,
    pub buying_price: f64,
    pub purchase_date: NaiveDate,
    /// Latest known unit price; `None` until a quote has been stored.
    pub current_price: Option<f64>,
}

impl Holding {
    /// Capital committed to this position.
    pub fn cost_basis(&self) -> f64 {
        self.buying_price * self.quantity
    }

    /// Market value at the latest known quote.
    pub fn current_valuation(&self) -> Option<f64> {
        self.current_price.map(|price| price * self.quantity)
    }

    /// Absolute and percentage return against cost. `None` while the
    /// position has no stored quote, so an unknown valuation is never
    /// reported as a 0% return.
    pub fn returns(&self) -> Option<HoldingReturns> {
        let current = self.current_valuation()?;
        let invested = self.cost_basis();
        let absolute = current - invested;

        Some(HoldingReturns {
            absolute,
            percentage: (absolute / invested) * 100.0,
        })
    }
}

/// Return figures for a single holding.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HoldingReturns {
    pub absolute: f64,
    pub percentage: f64,
}
