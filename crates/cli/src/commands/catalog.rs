//! Catalog inspection commands.
//!
//! These go through the same repository as the storefront, so a store
//! failure shows up here exactly as a visitor would see it: as an empty
//! result. Use `cs-cli check` to surface the underlying error.

use std::io::Write;

use clap::ValueEnum;
use coastal_surf_core::{Category, Product, featured_products};
use coastal_surf_storefront::catalog::CatalogRepository;
use coastal_surf_storefront::config::CosmicConfig;
use coastal_surf_storefront::cosmic::CosmicClient;
use serde::Serialize;
use tracing::info;

/// Output format for catalog dumps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

/// A category together with the products filed under it.
#[derive(Debug, Serialize)]
struct CategoryListing {
    #[serde(flatten)]
    category: Category,
    products: Vec<Product>,
}

/// Build a repository from the environment.
///
/// # Errors
///
/// Returns an error if the Cosmic configuration is missing or invalid.
pub fn connect() -> Result<CatalogRepository, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = CosmicConfig::from_env()?;
    info!(bucket = %config.bucket_slug, api = %config.base_url(), "Using Cosmic bucket");

    Ok(CatalogRepository::new(CosmicClient::new(&config)?))
}

/// Print all products.
///
/// # Errors
///
/// Returns an error if the output cannot be serialized or written.
pub async fn products(
    catalog: &CatalogRepository,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    emit(&catalog.list_products().await, format)
}

/// Print all categories.
///
/// # Errors
///
/// Returns an error if the output cannot be serialized or written.
pub async fn categories(
    catalog: &CatalogRepository,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    emit(&catalog.list_categories().await, format)
}

/// Print all testimonials.
///
/// # Errors
///
/// Returns an error if the output cannot be serialized or written.
pub async fn testimonials(
    catalog: &CatalogRepository,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    emit(&catalog.list_testimonials().await, format)
}

/// Print one product.
///
/// # Errors
///
/// Returns an error if no product has this slug.
pub async fn product(
    catalog: &CatalogRepository,
    slug: &str,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let product = catalog
        .find_product_by_slug(slug)
        .await
        .ok_or_else(|| format!("Product not found: {slug}"))?;
    emit(&product, format)
}

/// Print one category with its products.
///
/// # Errors
///
/// Returns an error if no category has this slug.
pub async fn category(
    catalog: &CatalogRepository,
    slug: &str,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let (category, products) = tokio::join!(
        catalog.find_category_by_slug(slug),
        catalog.list_products_by_category_slug(slug)
    );
    let category = category.ok_or_else(|| format!("Category not found: {slug}"))?;
    emit(&CategoryListing { category, products }, format)
}

/// Print the `count` most expensive products.
///
/// # Errors
///
/// Returns an error if the output cannot be serialized or written.
pub async fn featured(
    catalog: &CatalogRepository,
    count: usize,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let products = catalog.list_products().await;
    emit(&featured_products(&products, count), format)
}

fn emit<T: Serialize + ?Sized>(value: &T, format: Format) -> Result<(), Box<dyn std::error::Error>> {
    let rendered = render(value, format)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    Ok(())
}

fn render<T: Serialize + ?Sized>(value: &T, format: Format) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match format {
        Format::Yaml => serde_yaml::to_string(value)?,
        Format::Json => serde_json::to_string_pretty(value)?,
    })
}
