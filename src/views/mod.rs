//! Views
//!
//! Page controllers for the storefront. Each page reads the shared cart
//! store and pushes render models to whatever surface draws it.

pub mod cart;
pub mod checkout;
pub mod confirm;
pub mod detail;
pub mod listing;
pub mod selection;
pub mod terminal;

pub use cart::{CartPage, CartSurface, LineView, PageState, RemovalOutcome};
pub use checkout::{CheckoutError, CheckoutPage, CheckoutView, OrderPreview};
pub use confirm::{AlwaysConfirm, Confirm, Decline};
pub use detail::{DetailError, DetailPage, DetailState, DetailView};
pub use listing::{ListingError, ListingPage, ListingState, LoadTicket, ProductCard, ReviewEntry};
pub use selection::{SelectAllState, Selection};
pub use terminal::TerminalSurface;
