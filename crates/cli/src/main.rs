//! Storefront CLI

use std::process;

use clap::Parser;

use crate::cli::Cli;

mod cli;
mod config;
mod context;
mod observability;

#[tokio::main]
pub async fn main() {
    _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = observability::init(cli.logging()) {
        report(&error.to_string());
        process::exit(1);
    }

    if let Err(error) = cli.run().await {
        report(&error);
        process::exit(1);
    }
}

#[expect(
    clippy::print_stderr,
    reason = "command errors are reported to the user on stderr"
)]
fn report(message: &str) {
    eprintln!("{message}");
}
