use std::io;

use clap::Args;
use storefront::views::{
    ListingPage,
    listing::NO_REVIEWS_MESSAGE,
    terminal::{write_products, write_reviews},
};

use crate::context::{Context, output_error};

#[derive(Debug, Args)]
pub(crate) struct ListProductsArgs {
    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Also show the reviews of the listed products
    #[arg(long)]
    reviews: bool,

    /// Review page to show, three reviews per page
    #[arg(long, default_value_t = 1, requires = "reviews")]
    review_page: usize,
}

pub(crate) async fn run(args: &ListProductsArgs, context: &Context) -> Result<(), String> {
    let mut listing = ListingPage::with_page_size(context.catalog()?, context.page_size());

    listing.load_page(args.page.max(1)).await;

    let mut out = io::stdout().lock();

    write_products(
        &mut out,
        &listing.cards(context.currency()),
        listing.pagination().as_ref(),
        listing.notice(),
    )
    .map_err(|error| output_error(&error))?;

    if !args.reviews || listing.notice().is_some() {
        return Ok(());
    }

    if !listing.show_review_page(args.review_page) && args.review_page != 1 {
        return Err(format!(
            "review page {} is out of range (1-{})",
            args.review_page,
            listing.review_page_count().max(1)
        ));
    }

    write_reviews(
        &mut out,
        listing.visible_reviews(),
        listing.review_pagination().as_ref(),
        NO_REVIEWS_MESSAGE,
    )
    .map_err(|error| output_error(&error))
}
