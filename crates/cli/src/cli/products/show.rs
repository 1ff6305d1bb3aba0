use std::io;

use clap::Args;
use storefront::views::{DetailPage, terminal::write_detail};

use crate::context::{Context, output_error};

#[derive(Debug, Args)]
pub(crate) struct ShowProductArgs {
    /// Product id
    id: String,
}

pub(crate) async fn run(args: &ShowProductArgs, context: &Context) -> Result<(), String> {
    let mut page = DetailPage::new(context.catalog()?);

    page.load(Some(&args.id))
        .await
        .map_err(|error| error.to_string())?;

    let view = page
        .view(context.currency())
        .ok_or_else(|| format!("product {} is not loaded", args.id))?;

    write_detail(io::stdout().lock(), &view).map_err(|error| output_error(&error))
}
