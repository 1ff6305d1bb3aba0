use std::io::{self, Write};

use clap::{Args, Subcommand};
use storefront::{
    cart::SharedBadge,
    storage::FileStorage,
    views::{CartPage, TerminalSurface},
};

use crate::context::{Context, output_error};

mod add;
mod clear;
mod quantity;
mod remove;
mod show;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart with its order summary
    Show(show::ShowCartArgs),

    /// Add a product to the cart
    Add(add::AddToCartArgs),

    /// Remove a line after confirmation
    Remove(remove::RemoveFromCartArgs),

    /// Set the quantity of a line; zero or less removes it
    Set(quantity::SetQuantityArgs),

    /// Add one unit to a line
    Inc(quantity::StepArgs),

    /// Take one unit from a line, never below one
    Dec(quantity::StepArgs),

    /// Empty the cart after confirmation
    Clear(clear::ClearCartArgs),
}

pub(crate) async fn run(command: CartCommand, context: &Context) -> Result<(), String> {
    match command.command {
        CartSubcommand::Show(args) => show::run(&args, context),
        CartSubcommand::Add(args) => add::run(&args, context).await,
        CartSubcommand::Remove(args) => remove::run(&args, context),
        CartSubcommand::Set(args) => quantity::set(&args, context),
        CartSubcommand::Inc(args) => quantity::increase(&args, context),
        CartSubcommand::Dec(args) => quantity::decrease(&args, context),
        CartSubcommand::Clear(args) => clear::run(&args, context),
    }
}

type TerminalCartPage = CartPage<FileStorage, TerminalSurface>;

/// Cart page drawn to a terminal surface, already rendered once.
fn open_page(context: &Context) -> (TerminalCartPage, SharedBadge) {
    let (store, badge) = context.cart();

    let mut page = CartPage::new(store, TerminalSurface::new(), context.currency());
    page.render();

    (page, badge)
}

/// Print the cart table followed by the badge count.
fn print_page(page: &TerminalCartPage, badge: &SharedBadge) -> Result<(), String> {
    let mut out = io::stdout().lock();

    page.surface()
        .write_to(&mut out)
        .and_then(|()| print_badge(&mut out, badge))
        .map_err(|error| output_error(&error))
}

fn print_badge(out: &mut impl Write, badge: &SharedBadge) -> io::Result<()> {
    let state = badge.state();

    if state.is_visible() {
        writeln!(out, "Cart: {state} item(s)")
    } else {
        writeln!(out, "Cart: empty")
    }
}
