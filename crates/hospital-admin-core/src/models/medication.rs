//! Pharmacy inventory models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stock level label derived from a medication's quantity on hand.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    /// More than the low-stock threshold on hand
    InStock,
    /// At or below the threshold, but not empty
    LowStock,
    /// Nothing on hand
    OutOfStock,
}

impl StockStatus {
    /// Default low-stock threshold. A count equal to it is still low stock.
    pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 50;

    /// Classify a stock count.
    ///
    /// Takes a signed count so that a negative entry classifies as out of
    /// stock instead of wrapping.
    pub fn from_stock(stock: i64, low_stock_threshold: u32) -> Self {
        if stock <= 0 {
            StockStatus::OutOfStock
        } else if stock <= i64::from(low_stock_threshold) {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    /// Display label, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in-stock",
            StockStatus::LowStock => "low-stock",
            StockStatus::OutOfStock => "out-of-stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finalized pharmacy inventory record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    /// Medication name (e.g., "Amoxicillin 500mg")
    pub name: String,
    /// Therapeutic category (e.g., "Antibiotics")
    pub category: String,
    /// Units on hand, never negative
    pub stock: u32,
    /// Unit price, always prefixed with the currency symbol
    pub price: String,
    /// Supplier name
    pub supplier: String,
    /// Derived from `stock` when the record was finalized
    pub status: StockStatus,
}

impl Medication {
    /// Whether the pharmacy should reorder this item.
    pub fn needs_reorder(&self) -> bool {
        self.status != StockStatus::InStock
    }
}
