//! Order summary
//!
//! Pure pricing of a set of line items: subtotal at original prices, payable
//! at charged prices, the discount between them, shipping and grand total.

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;

use crate::{
    items::LineItem,
    pricing::{format_amount, round_for_display},
};

/// Decides the shipping charge for an order.
pub trait ShippingPolicy: fmt::Debug {
    /// Shipping for the given items, whose payable total is `payable`.
    fn shipping(&self, items: &[&LineItem], payable: Decimal) -> Decimal;
}

/// Shipping is always free.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeShipping;

impl ShippingPolicy for FreeShipping {
    fn shipping(&self, _items: &[&LineItem], _payable: Decimal) -> Decimal {
        Decimal::ZERO
    }
}

/// A flat shipping fee, waived for empty orders and above an optional threshold.
#[derive(Debug, Clone, Copy)]
pub struct FlatRateShipping {
    fee: Decimal,
    free_from: Option<Decimal>,
}

impl FlatRateShipping {
    /// Charge `fee` on every non-empty order.
    pub fn new(fee: Decimal) -> Self {
        Self {
            fee: fee.max(Decimal::ZERO),
            free_from: None,
        }
    }

    /// Waive the fee once the payable total reaches `threshold`.
    #[must_use]
    pub fn free_from(mut self, threshold: Decimal) -> Self {
        self.free_from = Some(threshold);
        self
    }
}

impl ShippingPolicy for FlatRateShipping {
    fn shipping(&self, items: &[&LineItem], payable: Decimal) -> Decimal {
        if items.is_empty() || self.free_from.is_some_and(|threshold| payable >= threshold) {
            Decimal::ZERO
        } else {
            self.fee
        }
    }
}

/// Derived totals for a set of line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderSummary {
    /// Sum of original prices times quantities
    pub subtotal: Decimal,

    /// Sum of charged prices times quantities
    pub payable: Decimal,

    /// `subtotal - payable`
    pub discount: Decimal,

    /// Shipping charge
    pub shipping: Decimal,

    /// `payable + shipping`
    pub grand_total: Decimal,

    /// Total number of units summarised
    pub item_count: u64,
}

impl OrderSummary {
    /// Whether nothing was summarised.
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    /// The discount as a fraction of the subtotal.
    pub fn savings_percent(&self) -> Percentage {
        if self.subtotal.is_zero() {
            return Percentage::from(Decimal::ZERO);
        }

        Percentage::from(self.discount / self.subtotal)
    }

    /// Savings as whole percent points, rounded to two decimals.
    pub fn savings_percent_points(&self) -> Decimal {
        round_for_display((self.savings_percent() * Decimal::ONE) * Decimal::ONE_HUNDRED)
    }

    /// Format every amount for display.
    pub fn display(&self, currency: &'static Currency) -> SummaryDisplay {
        SummaryDisplay {
            subtotal: format_amount(self.subtotal, currency),
            discount: format_amount(self.discount, currency),
            shipping: format_amount(self.shipping, currency),
            grand_total: format_amount(self.grand_total, currency),
        }
    }
}

/// Display strings for an [`OrderSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryDisplay {
    /// Formatted subtotal
    pub subtotal: String,

    /// Formatted discount
    pub discount: String,

    /// Formatted shipping
    pub shipping: String,

    /// Formatted grand total
    pub grand_total: String,
}

/// Computes order summaries under a shipping policy.
#[derive(Debug, Clone, Default)]
pub struct OrderCalculator<P: ShippingPolicy = FreeShipping> {
    shipping: P,
}

impl OrderCalculator<FreeShipping> {
    /// Calculator with free shipping.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: ShippingPolicy> OrderCalculator<P> {
    /// Calculator with the given shipping policy.
    pub fn with_shipping(shipping: P) -> Self {
        Self { shipping }
    }

    /// Summarise every item.
    pub fn summarize(&self, items: &[LineItem]) -> OrderSummary {
        self.summarize_selected(items, |_| true)
    }

    /// Summarise only the items for which `selected` returns true.
    pub fn summarize_selected<F>(&self, items: &[LineItem], mut selected: F) -> OrderSummary
    where
        F: FnMut(&LineItem) -> bool,
    {
        let included: Vec<&LineItem> = items.iter().filter(|&item| selected(item)).collect();

        let (subtotal, payable, item_count) = included.iter().fold(
            (Decimal::ZERO, Decimal::ZERO, 0_u64),
            |(subtotal, payable, count), item| {
                (
                    subtotal.saturating_add(item.original_line_total()),
                    payable.saturating_add(item.line_total()),
                    count.saturating_add(u64::from(item.quantity())),
                )
            },
        );

        let shipping = self.shipping.shipping(&included, payable);

        OrderSummary {
            subtotal,
            payable,
            discount: subtotal.saturating_sub(payable).max(Decimal::ZERO),
            shipping,
            grand_total: payable.saturating_add(shipping),
            item_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    fn item(id: &str, unit: i64, original: i64, quantity: u32) -> TestResult<LineItem> {
        Ok(LineItem::new(
            id,
            id,
            Decimal::from(unit),
            Some(Decimal::from(original)),
            quantity,
        )
        .ok_or("invalid line item")?)
    }

    #[test]
    fn empty_input_is_all_zero() {
        let summary = OrderCalculator::new().summarize(&[]);

        assert_eq!(summary, OrderSummary::default());
        assert!(summary.is_empty());
        assert_eq!(summary.savings_percent_points(), Decimal::ZERO);
    }

    #[test]
    fn discounted_item_totals() -> TestResult {
        let items = [item("p1", 80, 100, 2)?];

        let summary = OrderCalculator::new().summarize(&items);

        assert_eq!(summary.subtotal, Decimal::from(200));
        assert_eq!(summary.payable, Decimal::from(160));
        assert_eq!(summary.discount, Decimal::from(40));
        assert_eq!(summary.shipping, Decimal::ZERO);
        assert_eq!(summary.grand_total, Decimal::from(160));
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.savings_percent_points(), Decimal::from(20));

        Ok(())
    }

    #[test]
    fn selected_subset_only() -> TestResult {
        let items = [item("p1", 50, 50, 1)?, item("p2", 20, 30, 4)?];

        let summary = OrderCalculator::new().summarize_selected(&items, |item| item.id == "p2");

        assert_eq!(summary.subtotal, Decimal::from(120));
        assert_eq!(summary.payable, Decimal::from(80));
        assert_eq!(summary.discount, Decimal::from(40));
        assert_eq!(summary.item_count, 4);

        Ok(())
    }

    #[test]
    fn flat_rate_shipping_is_added_to_grand_total() -> TestResult {
        let items = [item("p1", 20, 20, 1)?];
        let calculator = OrderCalculator::with_shipping(FlatRateShipping::new(Decimal::from(5)));

        let summary = calculator.summarize(&items);

        assert_eq!(summary.shipping, Decimal::from(5));
        assert_eq!(summary.grand_total, Decimal::from(25));

        Ok(())
    }

    #[test]
    fn flat_rate_shipping_waived_for_empty_and_large_orders() -> TestResult {
        let calculator = OrderCalculator::with_shipping(
            FlatRateShipping::new(Decimal::from(5)).free_from(Decimal::from(100)),
        );

        let empty = calculator.summarize(&[]);
        let large = calculator.summarize(&[item("p1", 50, 50, 2)?]);

        assert_eq!(empty.shipping, Decimal::ZERO);
        assert_eq!(large.shipping, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn display_rounds_only_at_the_end() -> TestResult {
        let items = [
            LineItem::new("a", "a", Decimal::new(335, 3), None, 3).ok_or("invalid line item")?,
        ];

        let display = OrderCalculator::new().summarize(&items).display(iso::USD);

        assert_eq!(display.grand_total, "$1.01");
        assert_eq!(display.discount, "$0.00");

        Ok(())
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() -> TestResult {
        let items = [
            LineItem::new("a", "a", Decimal::MAX, None, u32::MAX).ok_or("invalid line item")?,
            LineItem::new("b", "b", Decimal::MAX, None, u32::MAX).ok_or("invalid line item")?,
        ];

        let summary = OrderCalculator::with_shipping(FlatRateShipping::new(Decimal::from(5)))
            .summarize(&items);

        assert_eq!(summary.subtotal, Decimal::MAX);
        assert_eq!(summary.payable, Decimal::MAX);
        assert_eq!(summary.discount, Decimal::ZERO);
        assert_eq!(summary.grand_total, Decimal::MAX);
        assert_eq!(summary.item_count, 2 * u64::from(u32::MAX));

        Ok(())
    }
}
