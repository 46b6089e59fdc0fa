//! Category route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use coastal_surf_core::resolve_image_url;
use tracing::instrument;

use super::products::{CategoryLinkView, ProductCardView};
use super::{category_meta_description, page_title};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::state::AppState;

/// Category header image size.
const HEADER_IMAGE_WIDTH: u32 = 2000;
const HEADER_IMAGE_HEIGHT: u32 = 600;

/// Category header display data.
#[derive(Clone)]
pub struct CategoryHeaderView {
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: String,
}

/// Category detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/show.html")]
pub struct CategoryShowTemplate {
    pub title: String,
    pub meta_description: String,
    pub category: CategoryHeaderView,
    pub categories: Vec<CategoryLinkView>,
    pub products: Vec<ProductCardView>,
}

/// Display category detail page.
#[instrument(skip(state), fields(slug = %slug))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let catalog = state.catalog();
    let (category, products, categories) = tokio::join!(
        catalog.find_category_by_slug(&slug),
        catalog.list_products_by_category_slug(&slug),
        catalog.list_categories()
    );

    let category = category.ok_or_else(|| AppError::NotFound("category".to_string()))?;

    add_breadcrumb(
        "navigation",
        "Viewed category page",
        Some(&[("slug", category.slug.as_str())]),
    );

    let name = category.display_name().to_string();
    let header = CategoryHeaderView {
        slug: category.slug.clone(),
        name: name.clone(),
        description: category.description.clone(),
        image_url: resolve_image_url(
            category.image.as_ref(),
            HEADER_IMAGE_WIDTH,
            HEADER_IMAGE_HEIGHT,
            Some(&slug),
        ),
    };

    Ok(CategoryShowTemplate {
        title: page_title(&name),
        meta_description: category_meta_description(
            &category.title,
            category.description.as_deref(),
        ),
        category: header,
        categories: CategoryLinkView::list(&categories, Some(&slug)),
        products: products
            .iter()
            .map(|p| ProductCardView::new(p, &categories))
            .collect(),
    })
}
