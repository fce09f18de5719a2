//! Line item model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One billable row of the invoice. The amount is derived from quantity and
/// rate on every read, so it can never go stale when either input changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub rate: Decimal,
}

impl LineItem {
    /// Derived amount: `rate × quantity`.
    pub fn amount(&self) -> Decimal {
        self.rate * Decimal::from(self.quantity)
    }
}

/// Input for adding a line item.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewLineItem {
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1))]
    pub quantity: u32,
    pub rate: Decimal,
}

fn default_quantity() -> u32 {
    1
}
