//! Shop Config

use std::path::PathBuf;

use clap::Args;
use storefront::catalog::{DEFAULT_PAGE_SIZE, http::DEFAULT_BASE_URL};

/// Catalog, session and cart settings.
#[derive(Debug, Args)]
pub struct ShopConfig {
    /// Shop API root
    #[arg(long, env = "STOREFRONT_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub api_url: String,

    /// API key sent as `X-Noroff-API-Key`
    #[arg(long, env = "STOREFRONT_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Access token, overrides the one stored at login
    #[arg(long, env = "STOREFRONT_ACCESS_TOKEN", hide_env_values = true, global = true)]
    pub access_token: Option<String>,

    /// Directory holding the cart and session documents
    #[arg(long, env = "STOREFRONT_DATA_DIR", default_value = ".storefront", global = true)]
    pub data_dir: PathBuf,

    /// ISO currency code used for display
    #[arg(long, env = "STOREFRONT_CURRENCY", default_value = "USD", global = true)]
    pub currency: String,

    /// Products per listing page
    #[arg(long, env = "STOREFRONT_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE, global = true)]
    pub page_size: u32,

    /// Serve the catalog from `<fixtures-dir>/catalog/<name>.yml` instead of the API
    #[arg(long, env = "STOREFRONT_FIXTURE", global = true)]
    pub fixture: Option<String>,

    /// Directory holding catalog fixtures
    #[arg(long, env = "STOREFRONT_FIXTURES_DIR", default_value = "./fixtures", global = true)]
    pub fixtures_dir: PathBuf,
}
