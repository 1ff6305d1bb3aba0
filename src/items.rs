//! Items
//!
//! Cart line items and their persisted record shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::{Product, ProductImage};

/// One product's entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product identifier, unique within the cart
    pub id: String,

    /// Display name
    pub title: String,

    /// Price charged per unit
    #[serde(rename = "price", with = "rust_decimal::serde::float")]
    unit_price: Decimal,

    /// Pre-discount reference price per unit
    #[serde(rename = "originalPrice", with = "rust_decimal::serde::float")]
    original_unit_price: Decimal,

    /// Product image
    pub image: Option<ProductImage>,

    /// Number of units, always at least one
    quantity: u32,
}

impl LineItem {
    /// Snapshot a product into a new line item.
    ///
    /// Returns `None` for a zero quantity.
    pub fn from_product(product: &Product, quantity: u32) -> Option<Self> {
        (quantity > 0).then(|| Self {
            id: product.id.clone(),
            title: product.title.clone(),
            unit_price: product.effective_price(),
            original_unit_price: product.price.max(Decimal::ZERO),
            image: product.image.clone(),
            quantity,
        })
    }

    /// Build a line item from raw parts, normalising prices so that the
    /// original price is never below the unit price.
    ///
    /// Returns `None` for a zero quantity.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        unit_price: Decimal,
        original_unit_price: Option<Decimal>,
        quantity: u32,
    ) -> Option<Self> {
        let unit_price = unit_price.max(Decimal::ZERO);
        let original_unit_price = original_unit_price
            .map_or(unit_price, |original| original.max(unit_price));

        (quantity > 0).then(|| Self {
            id: id.into(),
            title: title.into(),
            unit_price,
            original_unit_price,
            image: None,
            quantity,
        })
    }

    /// Attach an image reference.
    #[must_use]
    pub fn with_image(mut self, image: ProductImage) -> Self {
        self.image = Some(image);
        self
    }

    /// Price charged per unit.
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Pre-discount reference price per unit.
    pub fn original_unit_price(&self) -> Decimal {
        self.original_unit_price
    }

    /// Number of units.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Whether the unit price is below the reference price.
    pub fn is_discounted(&self) -> bool {
        self.unit_price < self.original_unit_price
    }

    /// `unit_price * quantity`, saturating at [`Decimal::MAX`].
    pub fn line_total(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }

    /// `original_unit_price * quantity`, saturating at [`Decimal::MAX`].
    pub fn original_line_total(&self) -> Decimal {
        self.original_unit_price
            .saturating_mul(Decimal::from(self.quantity))
    }

    /// Image with the title standing in for missing alt text.
    pub fn display_image(&self) -> ProductImage {
        let image = self.image.clone().unwrap_or_default();

        ProductImage {
            alt: if image.alt.is_empty() {
                self.title.clone()
            } else {
                image.alt
            },
            url: image.url,
        }
    }

    /// Short category label derived from the first word of the title.
    pub fn category(&self) -> String {
        self.title
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }

    pub(crate) fn add_quantity(&mut self, quantity: u32) {
        self.quantity = self.quantity.saturating_add(quantity);
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        debug_assert!(quantity > 0, "line item quantity must stay positive");
        self.quantity = quantity.max(1);
    }
}

/// Line item as it may appear in a persisted document.
///
/// Every field is optional so older or hand-edited documents still load;
/// [`StoredLineItem::normalise`] turns a record into a valid [`LineItem`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredLineItem {
    #[serde(default)]
    id: Option<String>,

    #[serde(default)]
    title: Option<String>,

    #[serde(
        default,
        alias = "unitPrice",
        with = "rust_decimal::serde::float_option"
    )]
    price: Option<Decimal>,

    #[serde(
        default,
        alias = "originalUnitPrice",
        with = "rust_decimal::serde::float_option"
    )]
    original_price: Option<Decimal>,

    #[serde(default)]
    image: Option<ProductImage>,

    #[serde(default)]
    quantity: Option<i64>,
}

impl StoredLineItem {
    /// Validate a persisted record.
    ///
    /// Records without an id or with a non-positive quantity are rejected.
    pub(crate) fn normalise(self) -> Option<LineItem> {
        let id = self.id.filter(|id| !id.is_empty())?;
        let quantity = u32::try_from(self.quantity.unwrap_or(1)).ok()?;

        let item = LineItem::new(
            id,
            self.title.unwrap_or_default(),
            self.price.unwrap_or_default(),
            self.original_price,
            quantity,
        )?;

        Some(match self.image {
            Some(image) => item.with_image(image),
            None => item,
        })
    }
}
