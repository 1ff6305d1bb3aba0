use std::io::{self, Write};

use clap::Args;
use storefront::{
    pricing::format_amount,
    views::{CheckoutPage, terminal::write_checkout},
};

use crate::context::{Context, output_error};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Place the order and empty the cart
    #[arg(long)]
    complete: bool,
}

pub(crate) fn run(args: &CheckoutArgs, context: &Context) -> Result<(), String> {
    let (store, _badge) = context.cart();
    let mut checkout = CheckoutPage::new(store, context.currency());

    let mut out = io::stdout().lock();

    write_checkout(&mut out, &checkout.view()).map_err(|error| output_error(&error))?;

    if !args.complete {
        return Ok(());
    }

    let summary = checkout
        .complete_order()
        .map_err(|error| format!("failed to complete order: {error}"))?;

    writeln!(
        out,
        "Order placed: {} item(s), {} charged.",
        summary.item_count,
        format_amount(summary.grand_total, context.currency())
    )
    .map_err(|error| output_error(&error))
}
