//! Invoice header, discount, and totals models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Discount entry mode. Exclusive choice: the form holds either a percentage
/// or a fixed amount; the other representation is derived for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountMode {
    Percent,
    Fixed,
}

impl DiscountMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountMode::Percent => "percent",
            DiscountMode::Fixed => "fixed",
        }
    }
}

/// Discount as entered by the user, in its current mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "value")]
pub enum Discount {
    /// Percentage of the subtotal, in `[0, 100]`.
    Percent(Decimal),
    /// Fixed amount, clamped to `[0, subtotal]` when applied.
    Fixed(Decimal),
}

impl Discount {
    pub fn mode(&self) -> DiscountMode {
        match self {
            Discount::Percent(_) => DiscountMode::Percent,
            Discount::Fixed(_) => DiscountMode::Fixed,
        }
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount::Percent(Decimal::ZERO)
    }
}

/// Invoice number, date, and free-text notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceHeader {
    pub number: String,
    pub date: NaiveDate,
    pub notes: String,
}

impl InvoiceHeader {
    /// Header defaults for a fresh session: `INV-<YYYYMMDD>-001`, dated today.
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            number: format!("INV-{}-001", date.format("%Y%m%d")),
            date,
            notes: "Thank you for your business!".to_string(),
        }
    }
}

/// Computed invoice totals. Derived on every read and never cached across
/// edits; no rounding is applied here, 2-decimal output is presentation-only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub discount_percent: Decimal,
    pub discount_amount: Decimal,
    pub tax_percent: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}
