//! Free-text search.

use anyhow::Result;

use super::{print_listings, SearchArgs};
use crate::context::Context;

/// Run the search command.
pub fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let query = args.query.join(" ");

    let listings = match args.shop.as_deref() {
        Some(slug) => catalog.search_shop(slug, &query)?,
        None => catalog.search(&query),
    };

    if ctx.output.is_json() {
        ctx.output.json(&ctx.limited(listings));
        return Ok(());
    }

    ctx.output.header(&format!("Search: {}", query));

    if listings.is_empty() {
        ctx.output.info("Nothing found.");
        return Ok(());
    }

    print_listings(ctx, &listings);
    Ok(())
}
