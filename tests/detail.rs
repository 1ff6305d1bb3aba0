//! Integration tests for the product detail page.

use rust_decimal::Decimal;
use rusty_money::iso;
use testresult::TestResult;

use storefront::{
    cart::CartStore,
    catalog::{CatalogError, MockCatalogClient},
    products::{Product, Review},
    storage::MemoryStorage,
    views::{
        DetailError, DetailPage, DetailState,
        detail::{LOAD_FAILED_MESSAGE, MISSING_ID_MESSAGE},
    },
};

fn boots() -> Product {
    Product {
        id: "p1".to_string(),
        title: "Leather Boots".to_string(),
        description: "Waterproof".to_string(),
        price: Decimal::from(100),
        discounted_price: Some(Decimal::from(80)),
        tags: vec!["shoes".to_string(), "winter".to_string()],
        reviews: [5, 4, 4]
            .into_iter()
            .map(|rating| Review {
                username: "ola".to_string(),
                rating: Decimal::from(rating),
                description: "Warm".to_string(),
            })
            .collect(),
        ..Product::default()
    }
}

fn catalog_with_boots() -> MockCatalogClient {
    let mut catalog = MockCatalogClient::new();

    catalog
        .expect_get_product()
        .once()
        .withf(|id| id == "p1")
        .return_once(|_| Ok(boots()));

    catalog
}

#[tokio::test]
async fn missing_id_fails_without_fetching() {
    let mut page = DetailPage::new(MockCatalogClient::new());

    let result = page.load(Some("  ")).await;

    assert!(matches!(result, Err(DetailError::MissingId)));
    assert_eq!(
        page.state(),
        &DetailState::Failed {
            message: MISSING_ID_MESSAGE.to_string()
        }
    );
}

#[tokio::test]
async fn fetch_failure_shows_load_message() {
    let mut catalog = MockCatalogClient::new();

    catalog
        .expect_get_product()
        .once()
        .return_once(|_| Err(CatalogError::NotFound("gone".to_string())));

    let mut page = DetailPage::new(catalog);

    let result = page.load(Some("gone")).await;

    assert!(matches!(
        result,
        Err(DetailError::Fetch(CatalogError::NotFound(_)))
    ));
    assert_eq!(
        page.state(),
        &DetailState::Failed {
            message: LOAD_FAILED_MESSAGE.to_string()
        }
    );
}

#[tokio::test]
async fn view_exposes_prices_tag_and_rating() -> TestResult {
    let mut page = DetailPage::new(catalog_with_boots());

    page.load(Some("p1")).await?;

    let view = page.view(iso::USD).ok_or("expected a view")?;

    assert_eq!(view.title, "LEATHER BOOTS");
    assert_eq!(view.price, "$80.00");
    assert_eq!(view.original_price.as_deref(), Some("$100.00"));
    assert_eq!(view.tag.as_deref(), Some("shoes"));
    assert_eq!(view.average_rating, Decimal::new(43, 1));
    assert_eq!(view.stars, "★★★★☆");
    assert_eq!(view.reviews.len(), 3);

    Ok(())
}

#[test]
fn quantity_never_drops_below_one() {
    let mut page = DetailPage::new(MockCatalogClient::new());

    page.decrement();
    assert_eq!(page.quantity(), 1);

    page.set_quantity(-4);
    assert_eq!(page.quantity(), 1);

    page.set_quantity(3);
    page.increment();
    page.decrement();
    page.decrement();
    assert_eq!(page.quantity(), 2);
}

#[test]
fn add_before_load_is_rejected() {
    let page = DetailPage::new(MockCatalogClient::new());
    let mut store = CartStore::new(MemoryStorage::new());

    assert!(matches!(
        page.add_to_cart(&mut store),
        Err(DetailError::NotLoaded)
    ));
    assert!(store.get_items().is_empty());
}

#[tokio::test]
async fn add_uses_selected_quantity() -> TestResult {
    let mut page = DetailPage::new(catalog_with_boots());
    let mut store = CartStore::new(MemoryStorage::new());

    page.load(Some("p1")).await?;
    page.set_quantity(3);
    page.add_to_cart(&mut store)?;

    let item = store.find("p1").ok_or("expected the boots in the cart")?;

    assert_eq!(item.quantity(), 3);
    assert_eq!(item.unit_price(), Decimal::from(80));

    Ok(())
}
