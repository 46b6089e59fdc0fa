//! Coastal Surf CLI - Catalog inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Dump every product as YAML
//! cs-cli catalog products
//!
//! # Dump categories as JSON
//! cs-cli catalog categories --format json
//!
//! # Show one category together with its products
//! cs-cli catalog category surfboards
//!
//! # Show the home page's featured products
//! cs-cli catalog featured --count 4
//!
//! # Verify the bucket and read key
//! cs-cli check
//! ```
//!
//! # Commands
//!
//! - `catalog` - Read products, categories, and testimonials from Cosmic
//! - `check` - Query the content store and report its status

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use coastal_surf_core::FEATURED_PRODUCTS_COUNT;

mod commands;

use commands::catalog::Format;

#[derive(Parser)]
#[command(name = "cs-cli")]
#[command(author, version, about = "Coastal Surf Co. CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read catalog content from Cosmic
    Catalog {
        #[command(subcommand)]
        query: CatalogQuery,
    },
    /// Check that the content store is reachable with the configured key
    Check,
}

#[derive(Subcommand)]
enum CatalogQuery {
    /// List all products
    Products {
        #[arg(short, long, value_enum, default_value_t)]
        format: Format,
    },
    /// List all categories
    Categories {
        #[arg(short, long, value_enum, default_value_t)]
        format: Format,
    },
    /// List all testimonials
    Testimonials {
        #[arg(short, long, value_enum, default_value_t)]
        format: Format,
    },
    /// Show one product
    Product {
        /// Product slug
        slug: String,

        #[arg(short, long, value_enum, default_value_t)]
        format: Format,
    },
    /// Show one category and its products
    Category {
        /// Category slug
        slug: String,

        #[arg(short, long, value_enum, default_value_t)]
        format: Format,
    },
    /// Show the featured products (most expensive first)
    Featured {
        /// Number of products
        #[arg(short, long, default_value_t = FEATURED_PRODUCTS_COUNT)]
        count: usize,

        #[arg(short, long, value_enum, default_value_t)]
        format: Format,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so catalog output can be piped
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { query } => {
            let catalog = commands::catalog::connect()?;
            match query {
                CatalogQuery::Products { format } => {
                    commands::catalog::products(&catalog, format).await?;
                }
                CatalogQuery::Categories { format } => {
                    commands::catalog::categories(&catalog, format).await?;
                }
                CatalogQuery::Testimonials { format } => {
                    commands::catalog::testimonials(&catalog, format).await?;
                }
                CatalogQuery::Product { slug, format } => {
                    commands::catalog::product(&catalog, &slug, format).await?;
                }
                CatalogQuery::Category { slug, format } => {
                    commands::catalog::category(&catalog, &slug, format).await?;
                }
                CatalogQuery::Featured { count, format } => {
                    commands::catalog::featured(&catalog, count, format).await?;
                }
            }
        }
        Commands::Check => commands::check::run().await?,
    }
    Ok(())
}
