//! Integration tests for the Coastal Surf Co. storefront.
//!
//! Every test stands up a `wiremock` server in place of the Cosmic API, so
//! no real network traffic is made.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p coastal-surf-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_repository` - Repository queries and degrade-to-empty behavior
//! - `storefront_pages` - Full router requests against a mocked bucket

use std::time::Duration;

use coastal_surf_storefront::config::{CosmicConfig, StorefrontConfig};
use serde_json::{Value, json};
use wiremock::{Match, MockServer, Request};

/// Bucket slug used by every fixture.
pub const BUCKET: &str = "coastal-surf-test";

/// Read key used by every fixture.
pub const READ_KEY: &str = "Qm7vK2pX9sLrT4wZ8bNc3hJ6dF1gYeUa5iOo0";

/// Path of the objects endpoint for [`BUCKET`].
#[must_use]
pub fn objects_path() -> String {
    format!("/v3/buckets/{BUCKET}/objects")
}

/// Cosmic settings pointing at a mock server.
#[must_use]
pub fn cosmic_config(server: &MockServer) -> CosmicConfig {
    cosmic_config_at(&server.uri())
}

/// Cosmic settings pointing at an arbitrary base URL.
#[must_use]
pub fn cosmic_config_at(api_url: &str) -> CosmicConfig {
    let mut config = CosmicConfig::new(BUCKET, READ_KEY).with_api_url(api_url);
    config.timeout = Duration::from_secs(5);
    config
}

/// Storefront settings with the page cache disabled.
#[must_use]
pub fn storefront_config(server: &MockServer) -> StorefrontConfig {
    StorefrontConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        revalidate: Duration::ZERO,
        cosmic: cosmic_config(server),
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Matches requests whose `query` parameter decodes to the given JSON.
///
/// Compares parsed values, so key order in the encoded filter is irrelevant.
pub struct QueryJson(pub Value);

impl Match for QueryJson {
    fn matches(&self, request: &Request) -> bool {
        request
            .url
            .query_pairs()
            .find(|(key, _)| key == "query")
            .and_then(|(_, value)| serde_json::from_str::<Value>(&value).ok())
            .is_some_and(|query| query == self.0)
    }
}

/// Value of a query-string parameter on a recorded request.
#[must_use]
pub fn query_value(request: &Request, name: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// `{"objects": [...], "total": n}` response body.
#[must_use]
pub fn objects_body(objects: &[Value]) -> Value {
    json!({ "objects": objects, "total": objects.len() })
}

/// A Cosmic image metafield.
#[must_use]
pub fn image_json(name: &str) -> Value {
    json!({
        "url": format!("https://cdn.cosmicjs.com/{name}"),
        "imgix_url": format!("https://imgix.cosmicjs.com/{name}")
    })
}

/// A category object.
#[must_use]
pub fn category_json(id: &str, slug: &str, title: &str) -> Value {
    json!({
        "id": id,
        "slug": slug,
        "title": title,
        "metadata": { "name": title, "description": format!("All our {title}") }
    })
}

/// A product object; `category` is the raw metafield value.
#[must_use]
pub fn product_json(id: &str, slug: &str, title: &str, price: Value, category: Value) -> Value {
    json!({
        "id": id,
        "slug": slug,
        "title": title,
        "metadata": {
            "description": format!("The **{title}**."),
            "price": price,
            "image": image_json(&format!("{slug}.jpg")),
            "category": category
        }
    })
}

/// A testimonial object in the current schema.
#[must_use]
pub fn testimonial_json(id: &str, name: &str, quote: &str, rating: Value) -> Value {
    json!({
        "id": id,
        "slug": name.to_lowercase().replace(' ', "-"),
        "title": name,
        "metadata": {
            "quote": quote,
            "customer_name": name,
            "rating": rating
        }
    })
}
