use std::io::{self, Write};

use clap::Args;
use storefront::views::Confirm;

use crate::context::{Context, PromptConfirm, output_error};

use super::print_badge;

const CLEAR_CART_PROMPT: &str = "Are you sure you want to empty your cart?";

#[derive(Debug, Args)]
pub(crate) struct ClearCartArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub(crate) fn run(args: &ClearCartArgs, context: &Context) -> Result<(), String> {
    if !PromptConfirm::new(args.yes).confirm(CLEAR_CART_PROMPT) {
        return writeln!(io::stdout().lock(), "Cart left unchanged.")
            .map_err(|error| output_error(&error));
    }

    let (mut store, badge) = context.cart();

    store
        .clear()
        .map_err(|error| format!("failed to clear cart: {error}"))?;

    print_badge(&mut io::stdout().lock(), &badge).map_err(|error| output_error(&error))
}
