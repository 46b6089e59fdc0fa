//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (hero, featured, categories, testimonials)
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (content store reachable)
//!
//! # Catalog
//! GET  /products               - Product listing (optional ?category= filter)
//! GET  /products/{slug}        - Product detail
//! GET  /categories/{slug}      - Category detail
//!
//! # Assets
//! GET  /static/*               - Static files
//! ```
//!
//! Page routes sit behind the page revalidation cache; health checks and
//! static files do not.

pub mod categories;
pub mod health;
pub mod home;
pub mod products;

use axum::{
    Router,
    extract::Request,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};
use comrak::{Options, markdown_to_html};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::error::AppError;
use crate::middleware::{page_cache_middleware, request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Store name used in page titles and meta descriptions.
pub const SITE_NAME: &str = "Coastal Surf Co.";

/// Longest meta description taken from a product description.
pub const META_DESCRIPTION_LEN: usize = 160;

/// Static files directory, relative to the workspace root.
pub const STATIC_DIR: &str = "crates/storefront/static";

/// Create the catalog page routes.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/products", get(products::index))
        .route("/products/{slug}", get(products::show))
        .route("/categories/{slug}", get(categories::show))
}

/// Create the full storefront application.
///
/// Sentry layers are added by the binary, outermost.
pub fn router(state: AppState) -> Router {
    let pages = page_routes().route_layer(from_fn_with_state(
        state.page_cache().clone(),
        page_cache_middleware,
    ));

    Router::new()
        .merge(pages)
        .merge(health::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .fallback(not_found)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
}

/// Fallback for unknown paths.
async fn not_found() -> AppError {
    AppError::NotFound("page".to_string())
}

/// `"{name} | Coastal Surf Co."`
#[must_use]
pub fn page_title(name: &str) -> String {
    format!("{name} | {SITE_NAME}")
}

/// Meta description for a product page.
///
/// The first [`META_DESCRIPTION_LEN`] characters of the description, or a
/// generated line when there is none.
#[must_use]
pub fn product_meta_description(title: &str, description: Option<&str>) -> String {
    description.map_or_else(
        || format!("Shop the {title} at {SITE_NAME}"),
        |d| d.chars().take(META_DESCRIPTION_LEN).collect(),
    )
}

/// Meta description for a category page.
#[must_use]
pub fn category_meta_description(title: &str, description: Option<&str>) -> String {
    description.map_or_else(|| format!("Shop {title} at {SITE_NAME}"), str::to_string)
}

/// Render a markdown description to HTML.
///
/// Raw HTML in the source is escaped, not passed through.
#[must_use]
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.render.r#unsafe = false;

    markdown_to_html(source, &options)
}
