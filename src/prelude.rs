//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{BadgeSink, BadgeState, CartBadge, CartError, CartStore, SharedBadge},
    catalog::{
        CatalogClient, CatalogError, FixtureCatalog, FixtureError, HttpCatalog, HttpCatalogConfig,
        auth::{ApiKey, LoginRequest, Registration, ValidationError},
    },
    items::LineItem,
    pricing::{PricingError, currency_from_code, format_amount},
    products::{PageMeta, Product, ProductImage, ProductPage, Review},
    session::{Credentials, Secret, SessionError, SessionStore, UserData},
    storage::{DocumentStorage, FileStorage, MemoryStorage, StorageError},
    summary::{FlatRateShipping, FreeShipping, OrderCalculator, OrderSummary, ShippingPolicy},
    views::{
        AlwaysConfirm, CartPage, CartSurface, CheckoutError, CheckoutPage, Confirm, Decline,
        DetailError, DetailPage, ListingPage, ListingState, SelectAllState, TerminalSurface,
    },
};
