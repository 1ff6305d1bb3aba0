//! Checkout page
//!
//! Read-only summary of the whole cart and the order completion step.

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::info;

use crate::{
    cart::{CartError, CartStore, badge::total_quantity},
    items::LineItem,
    pricing::format_amount,
    products::ProductImage,
    storage::DocumentStorage,
    summary::{FreeShipping, OrderCalculator, OrderSummary, ShippingPolicy, SummaryDisplay},
};

/// Shown in place of the order items when the cart is empty.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty. Please add items to cart first.";

/// Checkout errors
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to order
    #[error("{EMPTY_CART_MESSAGE}")]
    EmptyCart,

    /// Clearing the cart failed
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Preview of the order shown beside the payment form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPreview {
    /// Title of the first line
    pub title: String,

    /// Category of the first line
    pub category: String,

    /// Image of the first line
    pub image: ProductImage,

    /// Number of distinct lines in the order
    pub line_count: usize,

    /// Formatted amount payable for the whole order
    pub total: String,
}

/// Everything the checkout page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutView {
    /// First-line preview, `None` for an empty cart
    pub preview: Option<OrderPreview>,

    /// Units across the whole cart
    pub total_quantity: u64,

    /// Totals over the whole cart
    pub summary: OrderSummary,

    /// Formatted totals
    pub display: SummaryDisplay,
}

impl CheckoutView {
    /// Whether the empty-cart message should be shown.
    pub fn is_empty(&self) -> bool {
        self.preview.is_none()
    }
}

/// The checkout page.
#[derive(Debug)]
pub struct CheckoutPage<S: DocumentStorage, P: ShippingPolicy = FreeShipping> {
    store: CartStore<S>,
    calculator: OrderCalculator<P>,
    currency: &'static Currency,
}

impl<S: DocumentStorage> CheckoutPage<S> {
    /// Checkout with free shipping.
    pub fn new(store: CartStore<S>, currency: &'static Currency) -> Self {
        Self::with_calculator(store, OrderCalculator::new(), currency)
    }
}

impl<S: DocumentStorage, P: ShippingPolicy> CheckoutPage<S, P> {
    /// Checkout with a custom calculator.
    pub fn with_calculator(
        store: CartStore<S>,
        calculator: OrderCalculator<P>,
        currency: &'static Currency,
    ) -> Self {
        Self {
            store,
            calculator,
            currency,
        }
    }

    /// The backing store.
    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// Build the page from the current cart.
    pub fn view(&self) -> CheckoutView {
        let items = self.store.get_items();
        let summary = self.calculator.summarize(&items);

        CheckoutView {
            preview: items
                .first()
                .map(|first| self.preview(first, items.len(), &summary)),
            total_quantity: total_quantity(&items),
            summary,
            display: summary.display(self.currency),
        }
    }

    /// Place the order: the cart is emptied and the final totals returned.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] when there is nothing to order,
    /// or a [`CheckoutError::Cart`] if the cart cannot be cleared.
    pub fn complete_order(&mut self) -> Result<OrderSummary, CheckoutError> {
        let items = self.store.get_items();

        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let summary = self.calculator.summarize(&items);

        self.store.clear()?;

        info!(
            lines = items.len(),
            units = summary.item_count,
            grand_total = %summary.grand_total,
            "order completed"
        );

        Ok(summary)
    }

    fn preview(&self, first: &LineItem, line_count: usize, summary: &OrderSummary) -> OrderPreview {
        OrderPreview {
            title: first.title.clone(),
            category: first.category(),
            image: first.display_image(),
            line_count,
            total: format_amount(summary.payable, self.currency),
        }
    }
}
