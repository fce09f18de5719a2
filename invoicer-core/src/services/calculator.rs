//! Invoice totals calculation.
//!
//! Pure functions from line items plus discount/tax configuration to
//! [`InvoiceTotals`]. Out-of-range inputs are clamped here rather than
//! rejected, so the calculator is correct regardless of caller-side input
//! widgets. Tax always applies to the post-discount subtotal.

use rust_decimal::Decimal;

use crate::models::{Discount, InvoiceTotals, LineItem};

pub fn compute_totals(
    items: &[LineItem],
    discount: Discount,
    tax_percent: Decimal,
) -> InvoiceTotals {
    let subtotal: Decimal = items.iter().map(LineItem::amount).sum();

    let (discount_amount, discount_percent) = match discount {
        Discount::Percent(p) => {
            let p = clamp_percent(p);
            (percent_to_amount(subtotal, p), p)
        }
        Discount::Fixed(a) => {
            let a = a.clamp(Decimal::ZERO, subtotal);
            (a, amount_to_percent(subtotal, a))
        }
    };

    let tax_percent = clamp_percent(tax_percent);
    let tax_amount = (subtotal - discount_amount) * tax_percent / Decimal::ONE_HUNDRED;

    InvoiceTotals {
        subtotal,
        discount_percent,
        discount_amount,
        tax_percent,
        tax_amount,
        total: subtotal - discount_amount + tax_amount,
    }
}

/// Discount amount equivalent to `percent` of `subtotal`.
pub fn percent_to_amount(subtotal: Decimal, percent: Decimal) -> Decimal {
    subtotal * clamp_percent(percent) / Decimal::ONE_HUNDRED
}

/// Discount percentage equivalent to a fixed `amount`, defined as 0 when the
/// subtotal is 0.
pub fn amount_to_percent(subtotal: Decimal, amount: Decimal) -> Decimal {
    if subtotal.is_zero() {
        Decimal::ZERO
    } else {
        amount.clamp(Decimal::ZERO, subtotal) / subtotal * Decimal::ONE_HUNDRED
    }
}

fn clamp_percent(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(description: &str, quantity: u32, rate: Decimal) -> LineItem {
        LineItem {
            description: description.to_string(),
            quantity,
            rate,
        }
    }

    #[test]
    fn amount_is_quantity_times_rate() {
        assert_eq!(item("a", 3, dec!(19.99)).amount(), dec!(59.97));
        assert_eq!(item("b", 1, Decimal::ZERO).amount(), Decimal::ZERO);
        assert_eq!(item("c", 250, dec!(0.01)).amount(), dec!(2.50));
    }

    #[test]
    fn subtotal_is_order_independent() {
        let a = item("a", 2, dec!(10.50));
        let b = item("b", 1, dec!(99.99));
        let c = item("c", 4, dec!(0.25));

        let forward = compute_totals(
            &[a.clone(), b.clone(), c.clone()],
            Discount::default(),
            Decimal::ZERO,
        );
        let reversed = compute_totals(&[c, b, a], Discount::default(), Decimal::ZERO);

        assert_eq!(forward.subtotal, dec!(121.99));
        assert_eq!(forward.subtotal, reversed.subtotal);
    }

    #[test]
    fn percentage_discount_and_tax() {
        // Scenario: one widget at 2 x 500.00, 10% discount, 5% tax.
        let totals = compute_totals(
            &[item("Widget", 2, dec!(500.00))],
            Discount::Percent(dec!(10)),
            dec!(5),
        );

        assert_eq!(totals.subtotal, dec!(1000.00));
        assert_eq!(totals.discount_amount, dec!(100.00));
        assert_eq!(totals.tax_amount, dec!(45.00));
        assert_eq!(totals.total, dec!(945.00));
    }

    #[test]
    fn fixed_discount_without_tax() {
        let totals = compute_totals(
            &[item("A", 1, dec!(100.0)), item("B", 3, dec!(50.0))],
            Discount::Fixed(dec!(25.00)),
            Decimal::ZERO,
        );

        assert_eq!(totals.subtotal, dec!(250.00));
        assert_eq!(totals.discount_amount, dec!(25.00));
        assert_eq!(totals.discount_percent, dec!(10));
        assert_eq!(totals.tax_amount, Decimal::ZERO);
        assert_eq!(totals.total, dec!(225.00));
    }

    #[test]
    fn tax_applies_to_post_discount_subtotal() {
        let totals = compute_totals(
            &[item("a", 1, dec!(200.00))],
            Discount::Fixed(dec!(50.00)),
            dec!(10),
        );
        // 10% of 150.00, never 10% of 200.00.
        assert_eq!(totals.tax_amount, dec!(15.00));
        assert_eq!(totals.total, dec!(165.00));
    }

    #[test]
    fn discount_equal_to_subtotal_leaves_only_tax_on_zero() {
        let totals = compute_totals(
            &[item("a", 1, dec!(80.00))],
            Discount::Fixed(dec!(80.00)),
            dec!(17),
        );
        assert_eq!(totals.discount_amount, dec!(80.00));
        assert_eq!(totals.tax_amount, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn fixed_discount_is_clamped_to_subtotal() {
        let totals = compute_totals(
            &[item("a", 1, dec!(60.00))],
            Discount::Fixed(dec!(500.00)),
            Decimal::ZERO,
        );
        assert_eq!(totals.discount_amount, dec!(60.00));
        assert_eq!(totals.discount_percent, dec!(100));
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn percentages_are_clamped_to_valid_range() {
        let items = [item("a", 1, dec!(100.00))];

        let over = compute_totals(&items, Discount::Percent(dec!(150)), dec!(120));
        assert_eq!(over.discount_amount, dec!(100.00));
        assert_eq!(over.tax_amount, Decimal::ZERO);

        let under = compute_totals(&items, Discount::Percent(dec!(-5)), dec!(-1));
        assert_eq!(under.discount_amount, Decimal::ZERO);
        assert_eq!(under.total, dec!(100.00));
    }

    #[test]
    fn empty_item_list_produces_all_zeroes() {
        let totals = compute_totals(&[], Discount::Fixed(dec!(25.00)), dec!(5));
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.discount_amount, Decimal::ZERO);
        assert_eq!(totals.discount_percent, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn amount_percent_round_trip_within_display_precision() {
        let subtotal = dec!(300.00);
        let amount = dec!(100.00);

        let percent = amount_to_percent(subtotal, amount);
        let back = percent_to_amount(subtotal, percent);

        assert_eq!(back.round_dp(2), amount);
    }
}
