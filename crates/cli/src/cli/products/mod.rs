use clap::{Args, Subcommand};

use crate::context::Context;

mod list;
mod show;

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List one page of products
    List(list::ListProductsArgs),

    /// Show a single product with its reviews
    Show(show::ShowProductArgs),
}

pub(crate) async fn run(command: ProductsCommand, context: &Context) -> Result<(), String> {
    match command.command {
        ProductsSubcommand::List(args) => list::run(&args, context).await,
        ProductsSubcommand::Show(args) => show::run(&args, context).await,
    }
}
