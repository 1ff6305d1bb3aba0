//! Shared command context

use std::io::{self, BufRead, Write};

use rusty_money::iso::Currency;
use storefront::{
    cart::{CartBadge, CartStore, SharedBadge},
    catalog::{CatalogClient, FixtureCatalog, HttpCatalog, HttpCatalogConfig},
    pricing::currency_from_code,
    session::{Secret, SessionStore},
    storage::FileStorage,
    views::Confirm,
};
use tracing::debug;

use crate::config::ShopConfig;

/// Everything a command needs, resolved from configuration.
#[derive(Debug)]
pub(crate) struct Context {
    config: ShopConfig,
    storage: FileStorage,
    currency: &'static Currency,
}

impl Context {
    pub(crate) fn open(config: ShopConfig) -> Result<Self, String> {
        let storage = FileStorage::open(&config.data_dir)
            .map_err(|error| format!("failed to open data directory: {error}"))?;

        let currency = currency_from_code(&config.currency)
            .map_err(|error| format!("failed to configure currency: {error}"))?;

        debug!(data_dir = %config.data_dir.display(), currency = currency.iso_alpha_code, "context ready");

        Ok(Self {
            config,
            storage,
            currency,
        })
    }

    pub(crate) fn currency(&self) -> &'static Currency {
        self.currency
    }

    pub(crate) fn page_size(&self) -> u32 {
        self.config.page_size
    }

    pub(crate) fn session(&self) -> SessionStore<FileStorage> {
        SessionStore::new(self.storage.clone())
    }

    /// Cart store with a badge observer attached.
    pub(crate) fn cart(&self) -> (CartStore<FileStorage>, SharedBadge) {
        let badge = SharedBadge::new();
        let mut store = CartStore::new(self.storage.clone());

        store.subscribe(CartBadge::new().with_sink(badge.clone()).into_observer());
        store.notify();

        (store, badge)
    }

    /// HTTP client carrying the configured or stored credentials.
    pub(crate) fn http(&self) -> HttpCatalog {
        let api_key = self.config.api_key.as_deref().map(Secret::new);
        let mut credentials = self.session().credentials(api_key);

        if let Some(token) = self.config.access_token.as_deref() {
            credentials = credentials.with_access_token(Secret::new(token));
        }

        HttpCatalog::new(HttpCatalogConfig {
            base_url: self.config.api_url.clone(),
            credentials,
        })
    }

    /// Catalog to browse: the named fixture when configured, else the API.
    pub(crate) fn catalog(&self) -> Result<Box<dyn CatalogClient>, String> {
        let Some(name) = self.config.fixture.as_deref() else {
            return Ok(Box::new(self.http()));
        };

        let catalog = FixtureCatalog::load_named(&self.config.fixtures_dir, name)
            .map_err(|error| format!("failed to load catalog fixture {name}: {error}"))?;

        debug!(name, products = catalog.products().len(), "serving fixture catalog");

        Ok(Box::new(catalog))
    }
}

/// Asks on stderr and reads the answer from stdin, unless pre-approved.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PromptConfirm {
    assume_yes: bool,
}

impl PromptConfirm {
    pub(crate) fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirm for PromptConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        let mut stderr = io::stderr().lock();

        if write!(stderr, "{prompt} [y/N] ").and_then(|()| stderr.flush()).is_err() {
            return false;
        }

        let mut answer = String::new();

        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }

        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// Map an output error to the command error type.
pub(crate) fn output_error(error: &io::Error) -> String {
    format!("failed to write output: {error}")
}
