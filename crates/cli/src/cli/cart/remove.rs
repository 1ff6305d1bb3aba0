use std::io::{self, Write};

use clap::Args;
use storefront::views::RemovalOutcome;

use crate::context::{Context, PromptConfirm, output_error};

use super::{open_page, print_page};

#[derive(Debug, Args)]
pub(crate) struct RemoveFromCartArgs {
    /// Product id
    id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub(crate) fn run(args: &RemoveFromCartArgs, context: &Context) -> Result<(), String> {
    let (mut page, badge) = open_page(context);

    let outcome = page
        .request_remove(&args.id, &mut PromptConfirm::new(args.yes))
        .map_err(|error| format!("failed to remove from cart: {error}"))?;

    match outcome {
        RemovalOutcome::Removed => print_page(&page, &badge),
        RemovalOutcome::Cancelled => writeln!(io::stdout().lock(), "Nothing removed.")
            .map_err(|error| output_error(&error)),
        RemovalOutcome::NotFound => Err(format!("product {} is not in the cart", args.id)),
    }
}
