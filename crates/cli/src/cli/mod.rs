use clap::{Parser, Subcommand};

use crate::{
    config::{LoggingConfig, ShopConfig},
    context::Context,
};

mod auth;
mod cart;
mod checkout;
mod products;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    /// Logging output settings.
    #[command(flatten)]
    logging: LoggingConfig,

    /// Catalog, session and cart settings.
    #[command(flatten)]
    shop: ShopConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the catalog
    Products(products::ProductsCommand),

    /// Inspect and change the cart
    Cart(cart::CartCommand),

    /// Review and place the order
    Checkout(checkout::CheckoutArgs),

    /// Sign in, register and manage API keys
    Auth(auth::AuthCommand),
}

impl Cli {
    pub(crate) fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        let context = Context::open(self.shop)?;

        match self.command {
            Commands::Products(command) => products::run(command, &context).await,
            Commands::Cart(command) => cart::run(command, &context).await,
            Commands::Checkout(args) => checkout::run(&args, &context),
            Commands::Auth(command) => auth::run(command, &context).await,
        }
    }
}
