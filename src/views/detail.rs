//! Product detail page

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::{CartError, CartStore},
    catalog::{CatalogClient, CatalogError},
    pricing::format_amount,
    products::{Product, ProductImage, Review},
    storage::DocumentStorage,
};

/// Shown when the page is opened without a product id.
pub const MISSING_ID_MESSAGE: &str = "Product ID is required.";

/// Shown when the product cannot be fetched.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load product. Please try again later.";

/// Detail page errors
#[derive(Debug, Error)]
pub enum DetailError {
    /// No product id given
    #[error("{MISSING_ID_MESSAGE}")]
    MissingId,

    /// Fetching the product failed
    #[error("{LOAD_FAILED_MESSAGE}")]
    Fetch(#[source] CatalogError),

    /// Add to cart before the product loaded
    #[error("Product not loaded yet. Please wait.")]
    NotLoaded,

    /// Adding to the cart failed
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Lifecycle of the detail page.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    /// Nothing requested yet
    Idle,

    /// The product is shown
    Loaded(Box<Product>),

    /// Loading failed
    Failed {
        /// Message for the user
        message: String,
    },
}

/// Everything the detail page shows for a loaded product.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    /// Upper-cased title
    pub title: String,

    /// Description
    pub description: String,

    /// Image with alt text
    pub image: ProductImage,

    /// Badge from the first tag
    pub tag: Option<String>,

    /// Formatted charged price
    pub price: String,

    /// Formatted list price, only when discounted
    pub original_price: Option<String>,

    /// Mean rating, one decimal place
    pub average_rating: Decimal,

    /// Star string for the mean rating
    pub stars: String,

    /// Product reviews
    pub reviews: Vec<Review>,
}

/// The product detail page.
#[derive(Debug)]
pub struct DetailPage<C: CatalogClient> {
    catalog: C,
    state: DetailState,
    quantity: u32,
}

impl<C: CatalogClient> DetailPage<C> {
    /// Detail page reading from `catalog`.
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            state: DetailState::Idle,
            quantity: 1,
        }
    }

    /// Current state.
    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// The loaded product, if any.
    pub fn product(&self) -> Option<&Product> {
        match &self.state {
            DetailState::Loaded(product) => Some(product.as_ref()),
            DetailState::Idle | DetailState::Failed { .. } => None,
        }
    }

    /// Load the product `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DetailError::MissingId`] for a missing or blank id and
    /// [`DetailError::Fetch`] if the catalog request fails. Either way the
    /// page is left in [`DetailState::Failed`].
    pub async fn load(&mut self, id: Option<&str>) -> Result<&Product, DetailError> {
        let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) else {
            self.fail(MISSING_ID_MESSAGE);
            return Err(DetailError::MissingId);
        };

        match self.catalog.get_product(id).await {
            Ok(product) => {
                debug!(id, "product loaded");
                self.state = DetailState::Loaded(Box::new(product));
            }
            Err(error) => {
                warn!(id, %error, "failed to load product");
                self.fail(LOAD_FAILED_MESSAGE);
                return Err(DetailError::Fetch(error));
            }
        }

        self.product().ok_or(DetailError::NotLoaded)
    }

    /// Display fields for the loaded product.
    pub fn view(&self, currency: &'static Currency) -> Option<DetailView> {
        let product = self.product()?;

        Some(DetailView {
            title: product.title.to_uppercase(),
            description: product.description.clone(),
            image: product.display_image(),
            tag: product.first_tag().map(str::to_string),
            price: format_amount(product.effective_price(), currency),
            original_price: product
                .struck_price()
                .map(|price| format_amount(price, currency)),
            average_rating: product.average_rating(),
            stars: product.rating_stars(),
            reviews: product.reviews.clone(),
        })
    }

    /// Quantity to add.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Set the quantity to add, clamped to at least one.
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = u32::try_from(quantity.max(1)).unwrap_or(u32::MAX);
    }

    /// Add one to the quantity.
    pub fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Take one from the quantity, never below one.
    pub fn decrement(&mut self) {
        if self.quantity > 1 {
            self.quantity -= 1;
        }
    }

    /// Add the selected quantity of the loaded product to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`DetailError::NotLoaded`] before a product is loaded, or a
    /// [`DetailError::Cart`] if the cart cannot be persisted.
    pub fn add_to_cart<S: DocumentStorage>(&self, store: &mut CartStore<S>) -> Result<(), DetailError> {
        let product = self.product().ok_or(DetailError::NotLoaded)?;

        store.add_item(product, self.quantity)?;

        Ok(())
    }

    fn fail(&mut self, message: &str) {
        self.state = DetailState::Failed {
            message: message.to_string(),
        };
    }
}
