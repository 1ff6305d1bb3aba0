//! Products
//!
//! Catalog payload shapes as returned by the remote shop API. Decoding is
//! tolerant: missing optional fields fall back to empty strings, zero prices
//! or empty collections instead of failing the whole page.

use num_traits::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Highest rating a review can carry.
pub const MAX_RATING: u8 = 5;

/// Product image reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Image URL
    #[serde(default)]
    pub url: String,

    /// Alternative text
    #[serde(default)]
    pub alt: String,
}

/// Product review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Reviewer name
    #[serde(default)]
    pub username: String,

    /// Rating between 0 and 5
    #[serde(default, with = "rust_decimal::serde::float")]
    pub rating: Decimal,

    /// Review body
    #[serde(default)]
    pub description: String,
}

impl Review {
    /// Rating clamped to the `0..=5` range.
    pub fn clamped_rating(&self) -> Decimal {
        self.rating.clamp(Decimal::ZERO, Decimal::from(MAX_RATING))
    }

    /// Reviewer name, or `Anonymous` when the API omitted it.
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            "Anonymous"
        } else {
            &self.username
        }
    }
}

/// Product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier
    #[serde(default)]
    pub id: String,

    /// Product title
    #[serde(default)]
    pub title: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// List price
    #[serde(default, with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Sale price, when the product is discounted
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub discounted_price: Option<Decimal>,

    /// Product image
    #[serde(default)]
    pub image: Option<ProductImage>,

    /// Product tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Product reviews
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Product {
    /// Whether the product has a sale price below its list price.
    pub fn has_discount(&self) -> bool {
        self.discounted_price
            .is_some_and(|discounted| discounted < self.price)
    }

    /// The price a customer pays per unit.
    ///
    /// Sale prices that are not lower than the list price are ignored so the
    /// charged price never exceeds the reference price.
    pub fn effective_price(&self) -> Decimal {
        match self.discounted_price {
            Some(discounted) if discounted < self.price => discounted.max(Decimal::ZERO),
            _ => self.price.max(Decimal::ZERO),
        }
    }

    /// The list price, only when it differs from the charged price.
    pub fn struck_price(&self) -> Option<Decimal> {
        self.has_discount().then_some(self.price)
    }

    /// First tag, used as the product badge.
    pub fn first_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
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

    /// Mean review rating, rounded to one decimal place. Zero without reviews.
    pub fn average_rating(&self) -> Decimal {
        let Some(count) = Decimal::from_usize(self.reviews.len()).filter(|n| !n.is_zero()) else {
            return Decimal::ZERO;
        };

        let sum: Decimal = self.reviews.iter().map(Review::clamped_rating).sum();

        (sum / count).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Five-character star string for the average rating.
    pub fn rating_stars(&self) -> String {
        stars(self.average_rating())
    }
}

/// Renders a rating as filled and empty stars, one per whole point.
pub fn stars(rating: Decimal) -> String {
    let full = rating
        .clamp(Decimal::ZERO, Decimal::from(MAX_RATING))
        .floor();

    (0..MAX_RATING)
        .map(|idx| if Decimal::from(idx) < full { '★' } else { '☆' })
        .collect()
}

/// Pagination metadata returned alongside a product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Page that was returned
    #[serde(default = "first_page")]
    pub current_page: u32,

    /// Total number of pages
    #[serde(default = "first_page")]
    pub page_count: u32,

    /// Whether this is the first page
    #[serde(default)]
    pub is_first_page: bool,

    /// Whether this is the last page
    #[serde(default)]
    pub is_last_page: bool,

    /// Previous page number, if any
    #[serde(default)]
    pub previous_page: Option<u32>,

    /// Next page number, if any
    #[serde(default)]
    pub next_page: Option<u32>,

    /// Total number of products across all pages
    #[serde(default)]
    pub total_count: u32,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_count: 1,
            is_first_page: true,
            is_last_page: true,
            previous_page: None,
            next_page: None,
            total_count: 0,
        }
    }
}

fn first_page() -> u32 {
    1
}

/// A page of products.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    /// Products on this page
    #[serde(default)]
    pub data: Vec<Product>,

    /// Pagination metadata
    #[serde(default)]
    pub meta: PageMeta,
}

/// Single product response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEnvelope {
    /// The product
    pub data: Product,
}
