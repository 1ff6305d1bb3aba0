//! Cart page
//!
//! Keeps a [`CartSurface`] in step with the cart store. Quantity changes
//! update the affected line and the summary in place; removals and the first
//! render redraw every line.

use rusty_money::iso::Currency;
use tracing::debug;

use crate::{
    cart::{CartError, CartStore},
    items::LineItem,
    pricing::format_amount,
    products::ProductImage,
    storage::DocumentStorage,
    summary::{FreeShipping, OrderCalculator, OrderSummary, ShippingPolicy, SummaryDisplay},
    views::{
        confirm::{Confirm, REMOVE_ITEM_PROMPT},
        selection::{SelectAllState, Selection},
    },
};

/// Render model for one cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineView {
    /// Product id
    pub id: String,

    /// Product title
    pub title: String,

    /// Short category label
    pub category: String,

    /// Image with alt text
    pub image: ProductImage,

    /// Units in the cart
    pub quantity: u32,

    /// Formatted unit price
    pub unit_price: String,

    /// Formatted line total at the charged price
    pub line_total: String,

    /// Formatted line total at the original price, when discounted
    pub original_line_total: Option<String>,

    /// Whether the line is included in the order
    pub selected: bool,
}

impl LineView {
    /// Build the render model for `item`.
    pub fn new(item: &LineItem, selected: bool, currency: &'static Currency) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            category: item.category(),
            image: item.display_image(),
            quantity: item.quantity(),
            unit_price: format_amount(item.unit_price(), currency),
            line_total: format_amount(item.line_total(), currency),
            original_line_total: item
                .is_discounted()
                .then(|| format_amount(item.original_line_total(), currency)),
            selected,
        }
    }
}

/// Somewhere the cart page is drawn.
pub trait CartSurface {
    /// Show the empty-cart state in place of the lines.
    fn show_empty(&mut self);

    /// Replace every line.
    fn render_lines(&mut self, lines: &[LineView]);

    /// Redraw one line in place.
    fn update_line(&mut self, line: &LineView);

    /// Redraw the summary panel.
    fn update_summary(&mut self, summary: &OrderSummary, display: &SummaryDisplay);

    /// Redraw the select-all control.
    fn update_select_all(&mut self, state: SelectAllState);
}

/// Lifecycle of a cart page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// Nothing drawn yet
    Uninitialized,

    /// Surface reflects the store
    Rendered,
}

/// Result of a removal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The line was removed
    Removed,

    /// The user declined; nothing changed
    Cancelled,

    /// No line with that id
    NotFound,
}

/// The cart page.
#[derive(Debug)]
pub struct CartPage<S, V, P = FreeShipping>
where
    S: DocumentStorage,
    V: CartSurface,
    P: ShippingPolicy,
{
    store: CartStore<S>,
    surface: V,
    calculator: OrderCalculator<P>,
    currency: &'static Currency,
    selection: Selection,
    state: PageState,
}

impl<S: DocumentStorage, V: CartSurface> CartPage<S, V> {
    /// Cart page with free shipping.
    pub fn new(store: CartStore<S>, surface: V, currency: &'static Currency) -> Self {
        Self::with_calculator(store, surface, OrderCalculator::new(), currency)
    }
}

impl<S, V, P> CartPage<S, V, P>
where
    S: DocumentStorage,
    V: CartSurface,
    P: ShippingPolicy,
{
    /// Cart page with a custom calculator.
    pub fn with_calculator(
        store: CartStore<S>,
        surface: V,
        calculator: OrderCalculator<P>,
        currency: &'static Currency,
    ) -> Self {
        Self {
            store,
            surface,
            calculator,
            currency,
            selection: Selection::new(),
            state: PageState::Uninitialized,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PageState {
        self.state
    }

    /// The surface being drawn.
    pub fn surface(&self) -> &V {
        &self.surface
    }

    /// Mutable access to the surface being drawn.
    pub fn surface_mut(&mut self) -> &mut V {
        &mut self.surface
    }

    /// The backing store.
    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// Whether the line for `id` is included in the order.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    /// Lines currently included in the order.
    pub fn selected_items(&self) -> Vec<LineItem> {
        self.store
            .get_items()
            .into_iter()
            .filter(|item| self.selection.is_selected(&item.id))
            .collect()
    }

    /// Summary over the included lines.
    pub fn summary(&self) -> OrderSummary {
        let items = self.store.get_items();

        self.summarize(&items)
    }

    /// Redraw everything from the store.
    pub fn render(&mut self) {
        let items = self.store.get_items();

        self.selection.retain(&items);
        self.state = PageState::Rendered;

        if items.is_empty() {
            debug!("cart page is empty");
            self.surface.show_empty();
            return;
        }

        let lines: Vec<LineView> = items.iter().map(|item| self.line_view(item)).collect();

        self.surface.render_lines(&lines);
        self.refresh_summary(&items);
        self.surface.update_select_all(self.selection.state(&items));
    }

    /// Add one unit to the line for `id`.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the cart cannot be persisted.
    pub fn increase(&mut self, id: &str) -> Result<(), CartError> {
        let Some(item) = self.store.find(id) else {
            return Ok(());
        };

        self.store
            .set_quantity(id, i64::from(item.quantity()).saturating_add(1))?;

        self.sync_line(id);

        Ok(())
    }

    /// Take one unit from the line for `id`. Lines never drop below one unit
    /// here; use [`CartPage::request_remove`] to drop them.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the cart cannot be persisted.
    pub fn decrease(&mut self, id: &str) -> Result<(), CartError> {
        let Some(item) = self.store.find(id).filter(|item| item.quantity() > 1) else {
            return Ok(());
        };

        self.store.set_quantity(id, i64::from(item.quantity()) - 1)?;

        self.sync_line(id);

        Ok(())
    }

    /// Set the quantity of the line for `id`. Zero or less removes it.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the cart cannot be persisted.
    pub fn set_quantity(&mut self, id: &str, quantity: i64) -> Result<(), CartError> {
        if self.store.find(id).is_none() {
            return Ok(());
        }

        self.store.set_quantity(id, quantity)?;

        if self.store.find(id).is_some() {
            self.sync_line(id);
        } else {
            self.render();
        }

        Ok(())
    }

    /// Remove the line for `id` once `confirm` agrees, then redraw.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the cart cannot be persisted.
    pub fn request_remove(
        &mut self,
        id: &str,
        confirm: &mut impl Confirm,
    ) -> Result<RemovalOutcome, CartError> {
        if self.store.find(id).is_none() {
            return Ok(RemovalOutcome::NotFound);
        }

        if !confirm.confirm(REMOVE_ITEM_PROMPT) {
            debug!(id, "removal cancelled");
            return Ok(RemovalOutcome::Cancelled);
        }

        self.store.remove_item(id)?;
        self.render();

        Ok(RemovalOutcome::Removed)
    }

    /// Flip whether the line for `id` is included in the order.
    ///
    /// Returns the new state, or `None` if there is no such line.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let items = self.store.get_items();
        let item = items.iter().find(|item| item.id == id)?;

        let selected = self.selection.toggle(id);

        if self.state == PageState::Uninitialized {
            self.render();
            return Some(selected);
        }

        let line = self.line_view(item);

        self.surface.update_line(&line);
        self.surface.update_select_all(self.selection.state(&items));
        self.refresh_summary(&items);

        Some(selected)
    }

    /// Include or exclude every line.
    pub fn set_all_selected(&mut self, selected: bool) {
        let items = self.store.get_items();

        self.selection.set_all(&items, selected);

        if self.state == PageState::Uninitialized {
            self.render();
            return;
        }

        for item in &items {
            let line = self.line_view(item);
            self.surface.update_line(&line);
        }

        self.surface.update_select_all(self.selection.state(&items));
        self.refresh_summary(&items);
    }

    /// Master control state.
    pub fn select_all_state(&self) -> SelectAllState {
        self.selection.state(&self.store.get_items())
    }

    fn sync_line(&mut self, id: &str) {
        if self.state == PageState::Uninitialized {
            self.render();
            return;
        }

        let items = self.store.get_items();

        if let Some(item) = items.iter().find(|item| item.id == id) {
            let line = self.line_view(item);
            self.surface.update_line(&line);
        }

        self.refresh_summary(&items);
    }

    fn refresh_summary(&mut self, items: &[LineItem]) {
        let summary = self.summarize(items);
        let display = summary.display(self.currency);

        self.surface.update_summary(&summary, &display);
    }

    fn summarize(&self, items: &[LineItem]) -> OrderSummary {
        self.calculator
            .summarize_selected(items, |item| self.selection.is_selected(&item.id))
    }

    fn line_view(&self, item: &LineItem) -> LineView {
        LineView::new(item, self.selection.is_selected(&item.id), self.currency)
    }
}
