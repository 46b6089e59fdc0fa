//! Product route handlers.
//!
//! Also defines the card and link views shared by the home and category
//! pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use coastal_surf_core::{
    Category, CategoryRef, Product, RELATED_PRODUCTS_CAP, category_slug, products_in_category,
    related_products, resolve_category_for_product, resolve_image_url,
};
use serde::Deserialize;
use tracing::instrument;

use super::{page_title, product_meta_description, render_markdown};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::state::AppState;

/// Product card image size.
const CARD_IMAGE_SIZE: u32 = 800;

/// Product detail image size.
const DETAIL_IMAGE_SIZE: u32 = 1200;

/// Meta description of the product listing.
const INDEX_META_DESCRIPTION: &str =
    "Browse our complete collection of surfboards, wetsuits, and accessories.";

// =============================================================================
// Views
// =============================================================================

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub slug: String,
    pub title: String,
    pub price: String,
    pub image_url: String,
    pub category_name: Option<String>,
}

impl ProductCardView {
    /// Build a card, naming the product's category from `categories`.
    #[must_use]
    pub fn new(product: &Product, categories: &[Category]) -> Self {
        Self {
            slug: product.slug.clone(),
            title: product.title.clone(),
            price: product.price.display(),
            image_url: resolve_image_url(
                product.image.as_ref(),
                CARD_IMAGE_SIZE,
                CARD_IMAGE_SIZE,
                category_slug(product),
            ),
            category_name: product_category(product, categories)
                .map(|c| c.display_name().to_string()),
        }
    }
}

/// A category link in a filter bar or breadcrumb.
#[derive(Clone)]
pub struct CategoryLinkView {
    pub slug: String,
    pub name: String,
    pub active: bool,
}

impl CategoryLinkView {
    /// Links for every category, marking `active_slug`.
    #[must_use]
    pub fn list(categories: &[Category], active_slug: Option<&str>) -> Vec<Self> {
        categories
            .iter()
            .map(|category| Self {
                slug: category.slug.clone(),
                name: category.display_name().to_string(),
                active: active_slug == Some(category.slug.as_str()),
            })
            .collect()
    }
}

impl From<&Category> for CategoryLinkView {
    fn from(category: &Category) -> Self {
        Self {
            slug: category.slug.clone(),
            name: category.display_name().to_string(),
            active: false,
        }
    }
}

/// Product detail display data for templates.
#[derive(Clone)]
pub struct ProductDetailView {
    pub slug: String,
    pub title: String,
    pub price: String,
    pub currency: &'static str,
    pub description_html: Option<String>,
    pub image_url: String,
    pub category: Option<CategoryLinkView>,
}

/// The product's category: the matching list entry, else the embedded one.
fn product_category<'a>(product: &'a Product, categories: &'a [Category]) -> Option<&'a Category> {
    resolve_category_for_product(product, categories)
        .or_else(|| product.category.as_ref().and_then(CategoryRef::embedded))
}

// =============================================================================
// Templates
// =============================================================================

/// Listing filter query parameters.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub category: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub title: String,
    pub meta_description: String,
    pub products: Vec<ProductCardView>,
    pub categories: Vec<CategoryLinkView>,
    pub filtered: bool,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub title: String,
    pub meta_description: String,
    pub product: ProductDetailView,
    pub related_products: Vec<ProductCardView>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display product listing page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> impl IntoResponse {
    let catalog = state.catalog();
    let (products, categories) = tokio::join!(catalog.list_products(), catalog.list_categories());

    let active = query.category.filter(|slug| !slug.trim().is_empty());
    let visible = active.as_deref().map_or_else(
        || products.iter().collect(),
        |slug| products_in_category(&products, slug),
    );

    ProductsIndexTemplate {
        title: page_title("All Products"),
        meta_description: INDEX_META_DESCRIPTION.to_string(),
        products: visible
            .into_iter()
            .map(|p| ProductCardView::new(p, &categories))
            .collect(),
        categories: CategoryLinkView::list(&categories, active.as_deref()),
        filtered: active.is_some(),
    }
}

/// Display product detail page.
#[instrument(skip(state), fields(slug = %slug))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let catalog = state.catalog();
    let (product, products, categories) = tokio::join!(
        catalog.find_product_by_slug(&slug),
        catalog.list_products(),
        catalog.list_categories()
    );

    let product = product.ok_or_else(|| AppError::NotFound("product".to_string()))?;

    add_breadcrumb(
        "navigation",
        "Viewed product page",
        Some(&[("slug", product.slug.as_str())]),
    );

    let related_products = related_products(&product, &products, RELATED_PRODUCTS_CAP)
        .into_iter()
        .map(|p| ProductCardView::new(p, &categories))
        .collect();

    let detail = ProductDetailView {
        slug: product.slug.clone(),
        title: product.title.clone(),
        price: product.price.display(),
        currency: product.price.currency_code.as_str(),
        description_html: product.description.as_deref().map(render_markdown),
        image_url: resolve_image_url(
            product.image.as_ref(),
            DETAIL_IMAGE_SIZE,
            DETAIL_IMAGE_SIZE,
            category_slug(&product),
        ),
        category: product_category(&product, &categories).map(CategoryLinkView::from),
    };

    Ok(ProductShowTemplate {
        title: page_title(&product.title),
        meta_description: product_meta_description(
            &product.title,
            product.description.as_deref(),
        ),
        product: detail,
        related_products,
    })
}
