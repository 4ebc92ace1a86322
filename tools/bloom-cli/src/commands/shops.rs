//! Shop listing.

use anyhow::Result;
use bloom_catalog::prelude::{CatalogSource, Shop};
use serde::Serialize;

use super::ShopsArgs;
use crate::context::Context;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShopSummary<'a> {
    #[serde(flatten)]
    shop: &'a Shop,
    product_count: usize,
}

/// Run the shops command.
pub fn run(args: ShopsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let source = catalog.source();

    let shops: Vec<ShopSummary<'_>> = source
        .list_all_shops()
        .iter()
        .filter(|shop| match args.city.as_deref() {
            Some(city) => shop.city.to_lowercase() == city.to_lowercase(),
            None => true,
        })
        .map(|shop| ShopSummary {
            shop,
            product_count: source.list_products_by_shop_id(&shop.id).len(),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&shops);
        return Ok(());
    }

    ctx.output.header("Shops");

    if shops.is_empty() {
        ctx.output.info("No shops found.");
        return Ok(());
    }

    let widths = [20, 24, 16, 9];
    ctx.output.table_row(&["SLUG", "NAME", "CITY", "PRODUCTS"], &widths);
    ctx.output.info(&"-".repeat(75));
    for summary in &shops {
        let count = summary.product_count.to_string();
        ctx.output.table_row(
            &[&summary.shop.slug, &summary.shop.name, &summary.shop.city, &count],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.info(&format!("Total: {} shop(s)", shops.len()));

    Ok(())
}
