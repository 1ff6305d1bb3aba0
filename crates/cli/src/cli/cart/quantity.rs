use clap::Args;

use crate::context::Context;

use super::{open_page, print_page};

#[derive(Debug, Args)]
pub(crate) struct SetQuantityArgs {
    /// Product id
    id: String,

    /// New quantity
    #[arg(allow_negative_numbers = true)]
    quantity: i64,
}

#[derive(Debug, Args)]
pub(crate) struct StepArgs {
    /// Product id
    id: String,
}

pub(crate) fn set(args: &SetQuantityArgs, context: &Context) -> Result<(), String> {
    let (mut page, badge) = open_page(context);

    if page.store().find(&args.id).is_none() {
        return Err(format!("product {} is not in the cart", args.id));
    }

    page.set_quantity(&args.id, args.quantity)
        .map_err(|error| format!("failed to update quantity: {error}"))?;

    print_page(&page, &badge)
}

pub(crate) fn increase(args: &StepArgs, context: &Context) -> Result<(), String> {
    let (mut page, badge) = open_page(context);

    if page.store().find(&args.id).is_none() {
        return Err(format!("product {} is not in the cart", args.id));
    }

    page.increase(&args.id)
        .map_err(|error| format!("failed to update quantity: {error}"))?;

    print_page(&page, &badge)
}

pub(crate) fn decrease(args: &StepArgs, context: &Context) -> Result<(), String> {
    let (mut page, badge) = open_page(context);

    if page.store().find(&args.id).is_none() {
        return Err(format!("product {} is not in the cart", args.id));
    }

    page.decrease(&args.id)
        .map_err(|error| format!("failed to update quantity: {error}"))?;

    print_page(&page, &badge)
}
