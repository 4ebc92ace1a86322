//! Product details with related products.

use anyhow::Result;
use bloom_catalog::prelude::{Product, ProductPage};

use super::ProductArgs;
use crate::context::Context;
use crate::output::{availability_badge, format_rating};

/// Run the product command.
pub fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let page = catalog.product_page(&args.shop, &args.product, args.related)?;

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    show_product(&page, ctx);

    let related = &page.related;
    let sections: [(&str, &[&Product]); 5] = [
        ("Similar price", &related.by_price_band),
        ("More from this shop", &related.same_shop),
        ("Other sizes", &related.by_flowers_count),
        ("Same flowers", &related.by_flower_types),
        ("You may also like", &related.similar),
    ];
    for (title, products) in sections {
        if products.is_empty() {
            continue;
        }
        ctx.output.header(title);
        for product in products {
            let line = format!(
                "{} · {} ({})",
                product.title,
                ctx.price(product.price),
                product.slug
            );
            ctx.output.list_item(&line);
        }
    }

    Ok(())
}

fn show_product(page: &ProductPage<'_>, ctx: &Context) {
    let product = page.listing.product;
    let shop = page.listing.shop;

    ctx.output.header(&product.title);
    ctx.output.kv("Shop", &format!("{} ({})", shop.name, shop.slug));
    ctx.output.kv("Price", &ctx.price(product.price));
    if let (Some(old), Some(percent)) = (product.old_price, product.discount_percent()) {
        let discount = format!("-{}%, was {}", percent, ctx.price(old));
        ctx.output.kv("Discount", &discount);
    }
    ctx.output.kv("Flowers", &product.flowers_count.to_string());
    if !product.colors.is_empty() {
        ctx.output.kv("Colors", &product.colors.join(", "));
    }
    if !product.stem_heights.is_empty() {
        let heights: Vec<String> = product
            .stem_heights
            .iter()
            .map(|h| format!("{} см", h))
            .collect();
        ctx.output.kv("Stem heights", &heights.join(", "));
    }
    let rating = format_rating(product.rating.map(|r| (r.value, r.count)));
    ctx.output.kv("Rating", &rating);
    ctx.output.kv("Availability", &availability_badge(product.is_available));
    if !product.description.is_empty() {
        ctx.output.kv("Description", &product.description);
    }

    if !product.composition.is_empty() {
        ctx.output.header("Composition");
        for item in &product.composition {
            ctx.output.list_item(&format!("{} × {}", item.flower_type, item.quantity));
        }
    }
    if let Some(gifts) = product.gifts.as_ref().filter(|g| !g.is_empty()) {
        ctx.output.header("Gifts");
        for gift in gifts {
            ctx.output.list_item(&format!("{} ({})", gift.title, gift.gift_type.as_str()));
        }
    }
}
