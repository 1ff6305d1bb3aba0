//! Product listing
//!
//! Paginated product grid with the reviews of the products on the current
//! page. Every load is tagged with a ticket and only the most recent ticket
//! may change the page, so a slow earlier response never overwrites a later
//! one.

use rusty_money::iso::Currency;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::{CartError, CartStore},
    catalog::{CatalogClient, CatalogError, DEFAULT_PAGE_SIZE},
    pricing::format_amount,
    products::{PageMeta, Product, ProductImage, ProductPage, Review, stars},
    storage::DocumentStorage,
};

/// Reviews shown per review page.
pub const REVIEWS_PER_PAGE: usize = 3;

/// Shown when a page fails to load.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load products. Please try again later.";

/// Shown when a page loads with no products.
pub const NO_PRODUCTS_MESSAGE: &str = "No products available.";

/// Shown when no product on the page has reviews.
pub const NO_REVIEWS_MESSAGE: &str = "No reviews yet.";

/// Listing errors
#[derive(Debug, Error)]
pub enum ListingError {
    /// The product is not on the loaded page
    #[error("Product {0} is not on this page")]
    UnknownProduct(String),

    /// Adding to the cart failed
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Identifies one page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    id: u64,
    page: u32,
}

impl LoadTicket {
    /// Page this load was for.
    pub fn page(self) -> u32 {
        self.page
    }
}

/// Lifecycle of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingState {
    /// Nothing requested yet
    Idle,

    /// Waiting for a page
    Loading {
        /// Requested page
        page: u32,
    },

    /// A page is shown
    Loaded,

    /// The last load failed
    Failed {
        /// Requested page
        page: u32,

        /// Message for the user
        message: String,
    },
}

/// A review together with the product it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewEntry {
    /// The review
    pub review: Review,

    /// Title of the reviewed product
    pub product_title: String,
}

impl ReviewEntry {
    /// Star string for this review's rating.
    pub fn stars(&self) -> String {
        stars(self.review.clamped_rating())
    }

    /// Rating shown as `n/5`.
    pub fn rating_label(&self) -> String {
        format!("{}/5", self.review.clamped_rating().normalize())
    }
}

/// Render model for one product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    /// Product id
    pub id: String,

    /// Product title
    pub title: String,

    /// Formatted charged price
    pub price: String,

    /// Formatted list price, only when discounted
    pub original_price: Option<String>,

    /// Image with alt text
    pub image: ProductImage,
}

/// One pagination dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    /// Page number, 1-based
    pub page: u32,

    /// Whether this is the page shown
    pub active: bool,
}

/// Pagination links.
pub type Pagination = SmallVec<[PageLink; 8]>;

fn page_links(page_count: u32, current: u32) -> Option<Pagination> {
    (page_count > 1).then(|| {
        (1..=page_count)
            .map(|page| PageLink {
                page,
                active: page == current,
            })
            .collect()
    })
}

/// The product listing page.
#[derive(Debug)]
pub struct ListingPage<C: CatalogClient> {
    catalog: C,
    page_size: u32,
    state: ListingState,
    latest: u64,
    products: Vec<Product>,
    meta: PageMeta,
    reviews: Vec<ReviewEntry>,
    review_page: usize,
}

impl<C: CatalogClient> ListingPage<C> {
    /// Listing with the default page size.
    pub fn new(catalog: C) -> Self {
        Self::with_page_size(catalog, DEFAULT_PAGE_SIZE)
    }

    /// Listing with `page_size` products per page.
    pub fn with_page_size(catalog: C, page_size: u32) -> Self {
        Self {
            catalog,
            page_size: page_size.max(1),
            state: ListingState::Idle,
            latest: 0,
            products: Vec::new(),
            meta: PageMeta::default(),
            reviews: Vec::new(),
            review_page: 1,
        }
    }

    /// Current state.
    pub fn state(&self) -> &ListingState {
        &self.state
    }

    /// Products on the shown page.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Pagination metadata of the shown page.
    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Products per page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetch `page` and show it.
    pub async fn load_page(&mut self, page: u32) -> &ListingState {
        let ticket = self.begin_load(page);

        let result = self.catalog.list_products(page, self.page_size).await;

        self.apply(ticket, result);

        &self.state
    }

    /// Start loading `page`. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self, page: u32) -> LoadTicket {
        self.latest += 1;
        self.state = ListingState::Loading { page };

        LoadTicket {
            id: self.latest,
            page,
        }
    }

    /// Apply the result of a load.
    ///
    /// Returns `false` and changes nothing if `ticket` is stale.
    pub fn apply(&mut self, ticket: LoadTicket, result: Result<ProductPage, CatalogError>) -> bool {
        if ticket.id != self.latest {
            debug!(page = ticket.page, "discarding stale product page");
            return false;
        }

        match result {
            Ok(page) => {
                debug!(page = page.meta.current_page, count = page.data.len(), "product page loaded");

                self.reviews = collect_reviews(&page.data);
                self.review_page = 1;
                self.products = page.data;
                self.meta = page.meta;
                self.state = ListingState::Loaded;
            }
            Err(error) => {
                warn!(page = ticket.page, %error, "failed to load products");

                self.products.clear();
                self.reviews.clear();
                self.review_page = 1;
                self.state = ListingState::Failed {
                    page: ticket.page,
                    message: LOAD_FAILED_MESSAGE.to_string(),
                };
            }
        }

        true
    }

    /// Message to show instead of the grid, if any.
    pub fn notice(&self) -> Option<&str> {
        match &self.state {
            ListingState::Failed { message, .. } => Some(message),
            ListingState::Loaded if self.products.is_empty() => Some(NO_PRODUCTS_MESSAGE),
            _ => None,
        }
    }

    /// Cards for the products on the shown page.
    pub fn cards(&self, currency: &'static Currency) -> Vec<ProductCard> {
        self.products
            .iter()
            .map(|product| ProductCard {
                id: product.id.clone(),
                title: product.title.clone(),
                price: format_amount(product.effective_price(), currency),
                original_price: product
                    .struck_price()
                    .map(|price| format_amount(price, currency)),
                image: product.display_image(),
            })
            .collect()
    }

    /// Product pagination, only when there is more than one page.
    pub fn pagination(&self) -> Option<Pagination> {
        if self.state != ListingState::Loaded {
            return None;
        }

        page_links(self.meta.page_count, self.meta.current_page)
    }

    /// Add one unit of the product `id` from the shown page.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::UnknownProduct`] if `id` is not on the page,
    /// or a [`ListingError::Cart`] if the cart cannot be persisted.
    pub fn add_to_cart<S: DocumentStorage>(
        &self,
        store: &mut CartStore<S>,
        id: &str,
    ) -> Result<(), ListingError> {
        let product = self
            .products
            .iter()
            .find(|product| product.id == id)
            .ok_or_else(|| ListingError::UnknownProduct(id.to_string()))?;

        store.add_item(product, 1)?;

        Ok(())
    }

    /// Every review on the shown page.
    pub fn reviews(&self) -> &[ReviewEntry] {
        &self.reviews
    }

    /// Shown review page, 1-based.
    pub fn review_page(&self) -> usize {
        self.review_page
    }

    /// Number of review pages.
    pub fn review_page_count(&self) -> usize {
        self.reviews.len().div_ceil(REVIEWS_PER_PAGE)
    }

    /// Reviews on the shown review page.
    pub fn visible_reviews(&self) -> &[ReviewEntry] {
        let start = (self.review_page - 1) * REVIEWS_PER_PAGE;

        self.reviews
            .get(start..)
            .map(|rest| rest.get(..REVIEWS_PER_PAGE).unwrap_or(rest))
            .unwrap_or_default()
    }

    /// Show review page `page`. Out-of-range pages are ignored.
    pub fn show_review_page(&mut self, page: usize) -> bool {
        if page == 0 || page > self.review_page_count() {
            return false;
        }

        self.review_page = page;

        true
    }

    /// Review pagination, only when there is more than one review page.
    pub fn review_pagination(&self) -> Option<Pagination> {
        let count = u32::try_from(self.review_page_count()).ok()?;
        let current = u32::try_from(self.review_page).ok()?;

        page_links(count, current)
    }
}

fn collect_reviews(products: &[Product]) -> Vec<ReviewEntry> {
    products
        .iter()
        .flat_map(|product| {
            product.reviews.iter().map(|review| ReviewEntry {
                review: review.clone(),
                product_title: product.title.clone(),
            })
        })
        .collect()
}
