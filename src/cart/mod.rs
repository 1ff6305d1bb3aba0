//! Cart
//!
//! The persistent cart store. It exclusively owns the list of line items kept
//! under the `cart` document; views only ever see copies.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    items::{LineItem, StoredLineItem},
    products::Product,
    storage::{DocumentStorage, StorageError},
};

pub mod badge;

pub use badge::{BadgeSink, BadgeState, CartBadge, SharedBadge};

/// Storage key of the cart document.
pub const CART_KEY: &str = "cart";

/// Callback invoked with the persisted items after every change.
pub type CartObserver = Box<dyn FnMut(&[LineItem])>;

/// Errors persisting the cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// The storage backend failed.
    #[error("cart storage error: {0}")]
    Storage(#[from] StorageError),

    /// The cart could not be encoded.
    #[error("failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persistent cart store.
pub struct CartStore<S: DocumentStorage> {
    storage: S,
    observers: Vec<CartObserver>,
}

impl<S: DocumentStorage + fmt::Debug> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("storage", &self.storage)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<S: DocumentStorage> CartStore<S> {
    /// Open the cart kept in `storage`.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            observers: Vec::new(),
        }
    }

    /// The underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Register an observer called with the items after every change.
    pub fn subscribe(&mut self, observer: impl FnMut(&[LineItem]) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Push the current items to every observer without changing anything.
    pub fn notify(&mut self) {
        let items = self.get_items();

        self.notify_with(&items);
    }

    /// Current line items in insertion order.
    ///
    /// Never fails: unreadable storage or a malformed document reads as an
    /// empty cart.
    pub fn get_items(&self) -> Vec<LineItem> {
        self.load().unwrap_or_else(|error| {
            warn!(%error, "failed to read cart, treating it as empty");
            Vec::new()
        })
    }

    /// The line item for `id`, if present.
    pub fn find(&self, id: &str) -> Option<LineItem> {
        self.get_items().into_iter().find(|item| item.id == id)
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> u64 {
        badge::total_quantity(&self.get_items())
    }

    /// Sum of `unit_price * quantity` over all items.
    pub fn total_value(&self) -> Decimal {
        self.get_items().iter().map(LineItem::line_total).sum()
    }

    /// Add `quantity` units of `product`.
    ///
    /// An existing line for the product has its quantity increased; otherwise
    /// a new line is appended. A zero quantity changes nothing.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the cart cannot be persisted.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        let Some(new_item) = LineItem::from_product(product, quantity) else {
            debug!(id = %product.id, "ignoring add of zero quantity");
            return Ok(());
        };

        self.transaction(|items| {
            if let Some(existing) = items.iter_mut().find(|item| item.id == new_item.id) {
                existing.add_quantity(quantity);
            } else {
                items.push(new_item);
            }
        })?;

        debug!(id = %product.id, quantity, "added to cart");

        Ok(())
    }

    /// Remove the line for `id`. Missing ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the cart cannot be persisted.
    pub fn remove_item(&mut self, id: &str) -> Result<(), CartError> {
        let removed = self.transaction(|items| {
            let before = items.len();
            items.retain(|item| item.id != id);
            before != items.len()
        })?;

        debug!(id, removed, "removed from cart");

        Ok(())
    }

    /// Set the quantity of the line for `id`.
    ///
    /// A quantity of zero or less removes the line. Quantities above
    /// `u32::MAX` are clamped.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the cart cannot be persisted.
    pub fn set_quantity(&mut self, id: &str, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        self.transaction(|items| {
            if let Some(item) = items.iter_mut().find(|item| item.id == id) {
                item.set_quantity(quantity);
            }
        })?;

        debug!(id, quantity, "cart quantity updated");

        Ok(())
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the cart cannot be persisted.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.storage.remove(CART_KEY)?;

        debug!("cart cleared");

        self.notify_with(&[]);

        Ok(())
    }

    /// Load, mutate and save the cart as one unit, then notify observers.
    ///
    /// The latest document is read immediately before `mutate` runs and the
    /// whole list is written back afterwards.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the cart cannot be read or persisted.
    pub fn transaction<T>(
        &mut self,
        mutate: impl FnOnce(&mut Vec<LineItem>) -> T,
    ) -> Result<T, CartError> {
        let mut items = self.load()?;

        let output = mutate(&mut items);

        self.save(&items)?;
        self.notify_with(&items);

        Ok(output)
    }

    fn load(&self) -> Result<Vec<LineItem>, StorageError> {
        Ok(self
            .storage
            .get(CART_KEY)?
            .map(|document| decode_items(&document))
            .unwrap_or_default())
    }

    fn save(&self, items: &[LineItem]) -> Result<(), CartError> {
        let document = serde_json::to_string(items)?;

        self.storage.set(CART_KEY, &document)?;

        Ok(())
    }

    fn notify_with(&mut self, items: &[LineItem]) {
        for observer in &mut self.observers {
            observer(items);
        }
    }
}

/// Decode a cart document, dropping malformed records and merging
/// duplicate ids so every product appears at most once.
pub(crate) fn decode_items(document: &str) -> Vec<LineItem> {
    let records: Vec<serde_json::Value> = match serde_json::from_str(document) {
        Ok(records) => records,
        Err(error) => {
            warn!(%error, "cart document is not a list, treating it as empty");
            return Vec::new();
        }
    };

    let mut items: Vec<LineItem> = Vec::with_capacity(records.len());
    let mut dropped = 0_usize;

    for record in records {
        let Some(item) = serde_json::from_value::<StoredLineItem>(record)
            .ok()
            .and_then(StoredLineItem::normalise)
        else {
            dropped += 1;
            continue;
        };

        if let Some(existing) = items.iter_mut().find(|existing| existing.id == item.id) {
            existing.add_quantity(item.quantity());
        } else {
            items.push(item);
        }
    }

    if dropped > 0 {
        warn!(dropped, "ignored malformed cart records");
    }

    items
}
