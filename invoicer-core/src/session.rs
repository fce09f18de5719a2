//! Form session state.
//!
//! All entered data lives here for the duration of the interactive session;
//! nothing is persisted. The state is mutated only through the command
//! handlers in [`crate::commands`] and read by the calculator and the
//! document assembler.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::models::{Discount, DiscountMode, InvoiceHeader, InvoiceTotals, LineItem, PartyInfo};
use crate::services::calculator;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub company: PartyInfo,
    pub client: PartyInfo,
    pub header: InvoiceHeader,
    pub items: Vec<LineItem>,
    pub discount: Discount,
    pub tax_percent: Decimal,
}

impl SessionState {
    /// Fresh session: empty item list and client block, header defaults for
    /// today, no discount or tax.
    pub fn new(company: PartyInfo) -> Self {
        Self {
            company,
            client: PartyInfo::default(),
            header: InvoiceHeader::for_date(Utc::now().date_naive()),
            items: Vec::new(),
            discount: Discount::default(),
            tax_percent: Decimal::ZERO,
        }
    }

    /// Reset to a fresh session, keeping the company block the user set up.
    pub fn reset(&mut self) {
        *self = SessionState::new(self.company.clone());
    }

    /// Recompute totals from the current state. Called after every mutation;
    /// the result is never cached.
    pub fn totals(&self) -> InvoiceTotals {
        calculator::compute_totals(&self.items, self.discount, self.tax_percent)
    }

    /// Switch the discount entry mode, deriving the equivalent value in the
    /// target mode so the effective discount charged stays the same.
    pub fn set_discount_mode(&mut self, mode: DiscountMode) {
        if self.discount.mode() == mode {
            return;
        }
        let subtotal = self.totals().subtotal;
        self.discount = match self.discount {
            Discount::Percent(p) => {
                Discount::Fixed(calculator::percent_to_amount(subtotal, p))
            }
            Discount::Fixed(a) => {
                Discount::Percent(calculator::amount_to_percent(subtotal, a))
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn state_with_items() -> SessionState {
        let mut state = SessionState::new(PartyInfo::default());
        state.items.push(LineItem {
            description: "Widget".to_string(),
            quantity: 2,
            rate: dec!(500.00),
        });
        state
    }

    #[test]
    fn new_session_is_empty() {
        let state = SessionState::new(PartyInfo::default());
        assert!(state.items.is_empty());
        assert!(state.header.number.starts_with("INV-"));
        assert!(state.header.number.ends_with("-001"));
        assert_eq!(state.totals().total, Decimal::ZERO);
    }

    #[test]
    fn reset_keeps_company_and_clears_the_rest() {
        let mut state = state_with_items();
        state.company.name = "Acme".to_string();
        state.client.name = "Client".to_string();
        state.tax_percent = dec!(5);

        state.reset();

        assert_eq!(state.company.name, "Acme");
        assert!(state.client.name.is_empty());
        assert!(state.items.is_empty());
        assert_eq!(state.tax_percent, Decimal::ZERO);
    }

    #[test]
    fn mode_switch_preserves_effective_discount() {
        let mut state = state_with_items();
        state.discount = Discount::Percent(dec!(10));

        state.set_discount_mode(DiscountMode::Fixed);
        assert_eq!(state.discount, Discount::Fixed(dec!(100.00)));
        assert_eq!(state.totals().discount_amount, dec!(100.00));

        state.set_discount_mode(DiscountMode::Percent);
        assert_eq!(state.totals().discount_amount.round_dp(2), dec!(100.00));
    }

    #[test]
    fn mode_switch_with_zero_subtotal_yields_zero_percent() {
        let mut state = SessionState::new(PartyInfo::default());
        state.discount = Discount::Fixed(dec!(25.00));

        state.set_discount_mode(DiscountMode::Percent);
        assert_eq!(state.discount, Discount::Percent(Decimal::ZERO));
    }

    #[test]
    fn switching_to_current_mode_is_a_no_op() {
        let mut state = state_with_items();
        state.discount = Discount::Percent(dec!(10));
        state.set_discount_mode(DiscountMode::Percent);
        assert_eq!(state.discount, Discount::Percent(dec!(10)));
    }
}
