//! Bloom CLI - Browse and search the flower marketplace catalog.
//!
//! Commands:
//! - `bloom browse` - Filter and sort products
//! - `bloom search` - Free-text product search
//! - `bloom shops` - List shops
//! - `bloom product` - Show a product with related products
//! - `bloom config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BrowseArgs, ConfigArgs, ProductArgs, SearchArgs, ShopsArgs};

/// Bloom CLI - Query the flower marketplace catalog
#[derive(Parser)]
#[command(name = "bloom")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Catalog JSON file (overrides the config)
    #[arg(long, global = true)]
    catalog: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter and sort products
    Browse(BrowseArgs),

    /// Search products by text
    Search(SearchArgs),

    /// List shops
    Shops(ShopsArgs),

    /// Show a product and its related products
    Product(ProductArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = context::Context::load(cli.config.as_deref(), cli.catalog, output)?;

    let result = match cli.command {
        Commands::Browse(args) => commands::browse::run(args, &ctx),
        Commands::Search(args) => commands::search::run(args, &ctx),
        Commands::Shops(args) => commands::shops::run(args, &ctx),
        Commands::Product(args) => commands::product::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
