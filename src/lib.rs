//! Storefront
//!
//! Shopping cart, catalog and checkout logic for a small online shop. The
//! cart lives in a document store shared by every page; pages re-read it
//! before each change and push render models to their surface.

pub mod cart;
pub mod catalog;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod session;
pub mod storage;
pub mod summary;
pub mod views;
