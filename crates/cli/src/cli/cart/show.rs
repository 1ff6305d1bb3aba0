use clap::Args;

use crate::context::Context;

use super::{open_page, print_page};

#[derive(Debug, Args)]
pub(crate) struct ShowCartArgs {
    /// Leave a line out of the order summary (repeatable)
    #[arg(long = "exclude", value_name = "ID")]
    excluded: Vec<String>,
}

pub(crate) fn run(args: &ShowCartArgs, context: &Context) -> Result<(), String> {
    let (mut page, badge) = open_page(context);

    for id in &args.excluded {
        if page.is_selected(id) && page.toggle(id).is_none() {
            return Err(format!("product {id} is not in the cart"));
        }
    }

    print_page(&page, &badge)
}
