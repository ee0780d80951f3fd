use serde::{Deserialize, Serialize};

use crate::allocator;
use crate::error::AllocationError;

/// A candidate asset supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub symbol: String,
    pub market_cap: f64,
    pub price: f64,
}

impl Asset {
    #[must_use]
    pub fn new(symbol: impl Into<String>, market_cap: f64, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            market_cap,
            price,
        }
    }
}

/// A single allocation request, in the shape the HTTP body uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// Fraction of total capital eligible for investment, in (0, 1].
    pub asset_cap: f64,
    pub total_capital: f64,
    #[serde(rename = "coins", alias = "assets")]
    pub assets: Vec<Asset>,
}

impl AllocationRequest {
    /// Runs the allocator over this request.
    ///
    /// # Errors
    /// Returns `AllocationError` if the parameters or any asset are invalid.
    pub fn compute(&self) -> Result<Vec<AllocationRecord>, AllocationError> {
        allocator::compute(self.asset_cap, self.total_capital, &self.assets)
    }
}

/// One row of the allocation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub symbol: String,
    /// Units purchasable, rounded to 6 decimal places.
    pub amount: f64,
    pub price: f64,
    /// Share of investable capital, 0 to 100.
    pub allocation_percentage: f64,
}
