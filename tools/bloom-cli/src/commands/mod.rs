//! CLI command implementations.

pub mod browse;
pub mod config;
pub mod product;
pub mod search;
pub mod shops;

use bloom_catalog::prelude::Listing;
use bloom_catalog::related::DEFAULT_LIMIT;
use clap::{Args, Subcommand};

use crate::context::Context;
use crate::output::format_rating;

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Only products of this shop (slug).
    #[arg(short, long)]
    pub shop: Option<String>,

    /// Query parameter, e.g. `colors=red,white` or `sort=priceDesc`.
    /// Repeat a key to pass a list.
    #[arg(short, long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Search terms; every term must match.
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Only products of this shop (slug).
    #[arg(short, long)]
    pub shop: Option<String>,
}

/// Arguments for the shops command.
#[derive(Args)]
pub struct ShopsArgs {
    /// Only shops in this city.
    #[arg(long)]
    pub city: Option<String>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Shop slug.
    pub shop: String,

    /// Product slug.
    pub product: String,

    /// Items per related section.
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    pub related: usize,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Catalog file the config points at.
        #[arg(long, default_value = "catalog.json")]
        catalog: String,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// Split a `key=value` argument. The value may be empty.
fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got `{}`", raw)),
    }
}

const LISTING_WIDTHS: [usize; 6] = [24, 36, 14, 16, 7, 10];

/// Print listings as a table, honoring the configured row limit.
pub(crate) fn print_listings(ctx: &Context, listings: &[Listing<'_>]) {
    let shown = ctx.limited(listings.to_vec());

    ctx.output.table_row(
        &["PRODUCT", "TITLE", "SHOP", "PRICE", "FLOWERS", "RATING"],
        &LISTING_WIDTHS,
    );
    ctx.output.info(&"-".repeat(LISTING_WIDTHS.iter().sum::<usize>() + 10));

    for listing in &shown {
        let product = listing.product;
        let mut price = ctx.price(product.price);
        if let Some(percent) = product.discount_percent() {
            price = format!("{} -{}%", price, percent);
        }
        let rating = format_rating(product.rating.map(|r| (r.value, r.count)));
        let flowers = product.flowers_count.to_string();

        ctx.output.table_row(
            &[&product.slug, &product.title, &listing.shop.name, &price, &flowers, &rating],
            &LISTING_WIDTHS,
        );
    }

    ctx.output.info("");
    if shown.len() < listings.len() {
        ctx.output.info(&format!("Showing {} of {} product(s)", shown.len(), listings.len()));
    } else {
        ctx.output.info(&format!("Total: {} product(s)", listings.len()));
    }
}
