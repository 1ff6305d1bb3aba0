use std::io::{self, Write};

use clap::Args;
use storefront::views::DetailPage;

use crate::context::{Context, output_error};

use super::print_badge;

#[derive(Debug, Args)]
pub(crate) struct AddToCartArgs {
    /// Product id
    id: String,

    /// Units to add
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    quantity: i64,
}

pub(crate) async fn run(args: &AddToCartArgs, context: &Context) -> Result<(), String> {
    let mut page = DetailPage::new(context.catalog()?);

    let title = page
        .load(Some(&args.id))
        .await
        .map_err(|error| error.to_string())?
        .title
        .clone();

    page.set_quantity(args.quantity);

    let (mut store, badge) = context.cart();

    page.add_to_cart(&mut store)
        .map_err(|error| format!("failed to add to cart: {error}"))?;

    let mut out = io::stdout().lock();

    writeln!(out, "Added {} x {title} to cart.", page.quantity())
        .and_then(|()| print_badge(&mut out, &badge))
        .map_err(|error| output_error(&error))
}
