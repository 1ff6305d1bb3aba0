//! Fixture catalog
//!
//! A catalog loaded from YAML, paginated locally. Used for offline demos and
//! tests in place of the remote API.

use std::{
    fs,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{CatalogClient, CatalogError},
    products::{PageMeta, Product, ProductPage},
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Product listed without an id
    #[error("Product at position {0} has no id")]
    MissingId(usize),

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// Negative list or sale price
    #[error("Invalid price for product {0}")]
    InvalidPrice(String),
}

#[derive(Debug, Deserialize)]
struct CatalogFixture {
    #[serde(default)]
    products: Vec<Product>,
}

/// Catalog served from fixture data.
#[derive(Debug, Clone, Default)]
pub struct FixtureCatalog {
    products: Vec<Product>,
}

impl FixtureCatalog {
    /// Catalog over already-built products.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if ids are missing or repeated, or a price is negative.
    pub fn new(products: Vec<Product>) -> Result<Self, FixtureError> {
        let mut seen = FxHashSet::default();

        for (position, product) in products.iter().enumerate() {
            if product.id.is_empty() {
                return Err(FixtureError::MissingId(position));
            }

            if !seen.insert(product.id.as_str()) {
                return Err(FixtureError::DuplicateProduct(product.id.clone()));
            }

            let negative_sale = product
                .discounted_price
                .is_some_and(|price| price < Decimal::ZERO);

            if product.price < Decimal::ZERO || negative_sale {
                return Err(FixtureError::InvalidPrice(product.id.clone()));
            }
        }

        Ok(Self { products })
    }

    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the YAML is malformed or fails validation.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        let fixture: CatalogFixture = serde_norway::from_str(contents)?;

        Self::new(fixture.products)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Load `<base_path>/catalog/<name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the file cannot be read or parsed.
    pub fn load_named(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let file_path = base_path.into().join("catalog").join(format!("{name}.yml"));

        Self::load(file_path)
    }

    /// Every product in fixture order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Slice out one page. Pages are 1-based; a zero limit is treated as one.
    pub fn page(&self, page: u32, limit: u32) -> ProductPage {
        let limit = limit.max(1);
        let page = page.max(1);

        let total = u32::try_from(self.products.len()).unwrap_or(u32::MAX);
        let page_count = total.div_ceil(limit).max(1);

        let skip = usize::try_from((page - 1).saturating_mul(limit)).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);

        let data = self.products.iter().skip(skip).take(take).cloned().collect();

        ProductPage {
            data,
            meta: PageMeta {
                current_page: page,
                page_count,
                is_first_page: page == 1,
                is_last_page: page >= page_count,
                previous_page: (page > 1).then(|| page - 1),
                next_page: (page < page_count).then(|| page + 1),
                total_count: total,
            },
        }
    }
}

#[async_trait]
impl CatalogClient for FixtureCatalog {
    async fn list_products(&self, page: u32, limit: u32) -> Result<ProductPage, CatalogError> {
        Ok(self.page(page, limit))
    }

    async fn get_product(&self, id: &str) -> Result<Product, CatalogError> {
        self.products
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn catalog(count: usize) -> TestResult<FixtureCatalog> {
        let products = (1..=count)
            .map(|n| Product {
                id: format!("p{n}"),
                title: format!("Product {n}"),
                price: Decimal::from(n),
                ..Product::default()
            })
            .collect();

        Ok(FixtureCatalog::new(products)?)
    }

    #[test]
    fn pages_are_sliced_in_order() -> TestResult {
        let catalog = catalog(25)?;

        let second = catalog.page(2, 12);
        let last = catalog.page(3, 12);

        assert_eq!(second.data.first().map(|p| p.id.as_str()), Some("p13"));
        assert_eq!(second.meta.page_count, 3);
        assert_eq!(second.meta.previous_page, Some(1));
        assert_eq!(second.meta.next_page, Some(3));
        assert_eq!(last.data.len(), 1);
        assert!(last.meta.is_last_page);

        Ok(())
    }

    #[test]
    fn empty_catalog_has_one_empty_page() -> TestResult {
        let page = catalog(0)?.page(1, 12);

        assert!(page.data.is_empty());
        assert_eq!(page.meta.page_count, 1);
        assert!(page.meta.is_first_page);

        Ok(())
    }

    #[test]
    fn page_past_the_end_is_empty() -> TestResult {
        let page = catalog(5)?.page(4, 12);

        assert!(page.data.is_empty());
        assert_eq!(page.meta.next_page, None);

        Ok(())
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let product = Product {
            id: "p1".to_string(),
            ..Product::default()
        };

        let result = FixtureCatalog::new(vec![product.clone(), product]);

        assert!(matches!(result, Err(FixtureError::DuplicateProduct(id)) if id == "p1"));
    }

    #[test]
    fn parses_yaml_catalog() -> TestResult {
        let catalog = FixtureCatalog::from_yaml(
            "products:\n  - id: p1\n    title: Mug\n    price: 10.0\n    discountedPrice: 8.5\n    tags: [kitchen]\n",
        )?;

        let product = catalog.products().first().ok_or("product missing")?;

        assert_eq!(product.effective_price(), Decimal::new(85, 1));
        assert_eq!(product.first_tag(), Some("kitchen"));

        Ok(())
    }

    #[test]
    fn loads_bundled_demo_catalog() -> TestResult {
        let catalog = FixtureCatalog::load_named("./fixtures", "demo")?;

        assert!(catalog.products().len() > 12);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_reports_missing_ids() -> TestResult {
        let result = catalog(2)?.get_product("p9").await;

        assert!(matches!(result, Err(CatalogError::NotFound(id)) if id == "p9"));

        Ok(())
    }
}
