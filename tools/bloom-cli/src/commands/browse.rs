//! Filtered browsing.

use anyhow::Result;
use bloom_catalog::prelude::{active_tags, CatalogSource, FilterSpec, Listing, RawParams};
use bloom_catalog::query::FilterTag;
use serde::Serialize;

use super::{print_listings, BrowseArgs};
use crate::context::Context;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrowseOutput<'a> {
    filter: &'a FilterSpec,
    tags: Vec<FilterTag>,
    total: usize,
    listings: Vec<Listing<'a>>,
}

/// Run the browse command.
pub fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let params = RawParams::from_pairs(args.params);

    let result = match args.shop.as_deref() {
        Some(slug) => {
            if params.get("shopSlug").is_some() {
                ctx.output.warn("shopSlug parameter is ignored when --shop is given");
            }
            catalog.browse_shop(slug, &params)?
        }
        None => catalog.browse(&params),
    };

    let tags = active_tags(&result.filter, catalog.shops());
    let pairs: Vec<String> = result
        .filter
        .to_query_pairs()
        .into_iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();
    ctx.output.debug(&format!("normalized query: {}", pairs.join("&")));

    if ctx.output.is_json() {
        ctx.output.json(&BrowseOutput {
            filter: &result.filter,
            tags,
            total: result.listings.len(),
            listings: ctx.limited(result.listings.clone()),
        });
        return Ok(());
    }

    match args.shop.as_deref().and_then(|slug| catalog.source().find_shop_by_slug(slug)) {
        Some(shop) => {
            ctx.output.header(&format!("{}: {}", shop.name, result.filter.sort.display_name()))
        }
        None => ctx.output.header(&format!("Catalog: {}", result.filter.sort.display_name())),
    }

    if !tags.is_empty() {
        let labels: Vec<&str> = tags.iter().map(|t| t.label.as_str()).collect();
        ctx.output.kv("Filters", &labels.join(", "));
    }

    if result.listings.is_empty() {
        ctx.output.info("No products match these filters.");
        return Ok(());
    }

    print_listings(ctx, &result.listings);
    Ok(())
}
