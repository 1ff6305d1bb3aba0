//! Integration tests for the persistent cart store and order summary.
//!
//! Every test opens the store over shared storage, the same way separate
//! pages of the shop each reopen the one `cart` document.

use rust_decimal::Decimal;
use testresult::TestResult;

use storefront::{
    cart::{CART_KEY, CartBadge, CartStore, SharedBadge},
    products::Product,
    storage::{DocumentStorage, FileStorage, MemoryStorage},
    summary::OrderCalculator,
};

fn product(id: &str, price: i64, discounted: Option<i64>) -> Product {
    Product {
        id: id.to_string(),
        title: format!("Product {id}"),
        price: Decimal::from(price),
        discounted_price: discounted.map(Decimal::from),
        ..Product::default()
    }
}

#[test]
fn discounted_product_added_twice_prices_the_order() -> TestResult {
    let mut store = CartStore::new(MemoryStorage::new());

    store.add_item(&product("p1", 100, Some(80)), 2)?;

    let items = store.get_items();

    assert_eq!(items.len(), 1);

    let item = items.first().ok_or("expected one line")?;

    assert_eq!(item.unit_price(), Decimal::from(80));
    assert_eq!(item.original_unit_price(), Decimal::from(100));
    assert_eq!(item.quantity(), 2);

    let summary = OrderCalculator::new().summarize(&items);

    assert_eq!(summary.subtotal, Decimal::from(200));
    assert_eq!(summary.payable, Decimal::from(160));
    assert_eq!(summary.discount, Decimal::from(40));
    assert_eq!(summary.grand_total, Decimal::from(160));

    Ok(())
}

#[test]
fn repeated_adds_merge_into_one_line() -> TestResult {
    let mut store = CartStore::new(MemoryStorage::new());
    let p1 = product("p1", 10, None);

    store.add_item(&p1, 1)?;
    store.add_item(&p1, 2)?;

    let items = store.get_items();

    assert_eq!(items.len(), 1);
    assert_eq!(store.find("p1").map(|item| item.quantity()), Some(3));

    Ok(())
}

#[test]
fn summary_over_selected_lines_only() -> TestResult {
    let mut store = CartStore::new(MemoryStorage::new());

    store.add_item(&product("p1", 50, None), 1)?;
    store.add_item(&product("p2", 30, Some(20)), 4)?;

    let summary =
        OrderCalculator::new().summarize_selected(&store.get_items(), |item| item.id == "p2");

    assert_eq!(summary.subtotal, Decimal::from(120));
    assert_eq!(summary.payable, Decimal::from(80));
    assert_eq!(summary.discount, Decimal::from(40));

    Ok(())
}

#[test]
fn zero_or_negative_quantity_removes_the_line() -> TestResult {
    let mut store = CartStore::new(MemoryStorage::new());

    store.add_item(&product("p1", 10, None), 2)?;
    store.add_item(&product("p2", 10, None), 2)?;

    store.set_quantity("p1", 0)?;
    store.set_quantity("p2", -3)?;

    assert!(store.get_items().is_empty());

    Ok(())
}

#[test]
fn oversized_quantity_is_clamped_not_removed() -> TestResult {
    let mut store = CartStore::new(MemoryStorage::new());

    store.add_item(&product("p1", 10, None), 1)?;
    store.set_quantity("p1", 5_000_000_000)?;

    assert_eq!(store.find("p1").map(|item| item.quantity()), Some(u32::MAX));
    assert_eq!(store.total_quantity(), u64::from(u32::MAX));

    Ok(())
}

#[test]
fn ids_stay_unique_across_mixed_mutations() -> TestResult {
    let mut store = CartStore::new(MemoryStorage::new());
    let p1 = product("p1", 10, None);
    let p2 = product("p2", 5, None);

    store.add_item(&p1, 1)?;
    store.add_item(&p2, 1)?;
    store.add_item(&p1, 4)?;
    store.set_quantity("p2", 7)?;
    store.remove_item("missing")?;
    store.add_item(&p2, 1)?;

    let ids: Vec<String> = store.get_items().into_iter().map(|item| item.id).collect();

    assert_eq!(ids, vec!["p1".to_string(), "p2".to_string()]);
    assert_eq!(store.total_quantity(), 13);
    assert_eq!(store.total_value(), Decimal::from(90));

    Ok(())
}

#[test]
fn discount_is_never_negative() -> TestResult {
    let mut store = CartStore::new(MemoryStorage::new());

    store.add_item(&product("cheap", 10, Some(15)), 1)?;
    store.add_item(&product("sale", 40, Some(25)), 2)?;
    store.add_item(&product("plain", 3, None), 5)?;

    let summary = OrderCalculator::new().summarize(&store.get_items());

    assert!(summary.discount >= Decimal::ZERO);
    assert_eq!(summary.discount, Decimal::from(30));

    Ok(())
}

#[test]
fn badge_tracks_every_mutation() -> TestResult {
    let mut store = CartStore::new(MemoryStorage::new());
    let badge = SharedBadge::new();

    store.subscribe(CartBadge::new().with_sink(badge.clone()).into_observer());

    store.add_item(&product("p1", 10, None), 2)?;
    assert_eq!(badge.state().count(), store.total_quantity());

    store.add_item(&product("p2", 10, None), 3)?;
    assert_eq!(badge.state().count(), 5);

    store.set_quantity("p1", 1)?;
    assert_eq!(badge.state().count(), 4);

    store.remove_item("p2")?;
    assert_eq!(badge.state().count(), 1);

    store.clear()?;
    assert!(!badge.state().is_visible());

    Ok(())
}

#[test]
fn clearing_twice_is_the_same_as_once() -> TestResult {
    let storage = MemoryStorage::new();
    let mut store = CartStore::new(storage.clone());

    store.add_item(&product("p1", 10, None), 1)?;

    store.clear()?;
    let once = storage.get(CART_KEY)?;

    store.clear()?;
    let twice = storage.get(CART_KEY)?;

    assert_eq!(once, twice);
    assert!(store.get_items().is_empty());

    Ok(())
}

#[test]
fn stores_over_shared_storage_see_each_others_changes() -> TestResult {
    let storage = MemoryStorage::new();
    let mut listing = CartStore::new(storage.clone());
    let mut cart = CartStore::new(storage.clone());

    listing.add_item(&product("p1", 10, None), 1)?;
    cart.set_quantity("p1", 4)?;
    listing.add_item(&product("p1", 10, None), 1)?;

    assert_eq!(cart.find("p1").map(|item| item.quantity()), Some(5));

    Ok(())
}

#[test]
fn cart_survives_reopening_file_storage() -> TestResult {
    let dir = tempfile::tempdir()?;

    {
        let mut store = CartStore::new(FileStorage::open(dir.path())?);

        store.add_item(&product("p1", 100, Some(80)), 2)?;
    }

    let reopened = CartStore::new(FileStorage::open(dir.path())?);
    let item = reopened.find("p1").ok_or("expected persisted line")?;

    assert_eq!(item.quantity(), 2);
    assert_eq!(item.unit_price(), Decimal::from(80));

    Ok(())
}

#[test]
fn hand_edited_document_is_repaired_on_next_write() -> TestResult {
    let storage = MemoryStorage::new();

    storage.set(
        CART_KEY,
        r#"[
            {"id": "p1", "title": "Mug", "price": 12, "quantity": 1},
            {"title": "no id", "price": 3},
            {"id": "p1", "title": "Mug", "price": 12, "quantity": 2}
        ]"#,
    )?;

    let mut store = CartStore::new(storage.clone());

    store.add_item(&product("p2", 5, None), 1)?;

    let document = storage.get(CART_KEY)?.ok_or("expected cart document")?;
    let records: Vec<serde_json::Value> = serde_json::from_str(&document)?;

    assert_eq!(records.len(), 2);
    assert_eq!(store.find("p1").map(|item| item.quantity()), Some(3));

    Ok(())
}
