//! Integration tests for `CatalogRepository` over a real `CosmicClient`.
//!
//! Each test mounts a `wiremock` server in place of the Cosmic API. The
//! repository must turn every failure mode into an empty result.

#![allow(clippy::indexing_slicing)]

use coastal_surf_core::{CategoryRef, Rating};
use coastal_surf_integration_tests::{
    QueryJson, READ_KEY, category_json, cosmic_config, cosmic_config_at, objects_body,
    objects_path, product_json, query_value, testimonial_json,
};
use coastal_surf_storefront::catalog::CatalogRepository;
use coastal_surf_storefront::cosmic::CosmicClient;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn repository(server: &MockServer) -> CatalogRepository {
    CatalogRepository::new(
        CosmicClient::new(&cosmic_config(server)).expect("failed to build test CosmicClient"),
    )
}

// ---------------------------------------------------------------------------
// Happy paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_products_normalizes_store_objects() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(objects_path()))
        .and(QueryJson(json!({"type": "products"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(objects_body(&[
            product_json("p1", "retro-fish", "Retro Fish", json!(649.5), json!("surfboards")),
            product_json("p2", "wax", "Wax", json!("4.99"), json!(null)),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let products = repository(&server).list_products().await;

    assert_eq!(products.len(), 2, "expected both products");
    assert_eq!(products[0].slug, "retro-fish");
    assert_eq!(products[0].price.display(), "$649.50");
    assert_eq!(
        products[0].category,
        Some(CategoryRef::Slug("surfboards".to_string()))
    );
    assert_eq!(products[1].price.display(), "$4.99");
    assert!(products[1].category.is_none());
}

#[tokio::test]
async fn test_requests_carry_read_key_projection_and_depth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(objects_path()))
        .and(query_param("read_key", READ_KEY))
        .and(query_param("props", "id,title,slug,metadata"))
        .and(query_param("depth", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(objects_body(&[])))
        .mount(&server)
        .await;

    let categories = repository(&server).list_categories().await;
    assert!(categories.is_empty());

    let requests = server
        .received_requests()
        .await
        .expect("request recording is enabled");
    assert_eq!(requests.len(), 1);
    assert_eq!(query_value(&requests[0], "limit"), None);
}

#[tokio::test]
async fn test_find_product_by_slug_limits_to_one() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(objects_path()))
        .and(QueryJson(json!({"type": "products", "slug": "retro-fish"})))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(objects_body(&[
            product_json(
                "p1",
                "retro-fish",
                "Retro Fish",
                json!(649),
                category_json("c1", "surfboards", "Surfboards"),
            ),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let product = repository(&server)
        .find_product_by_slug("retro-fish")
        .await
        .expect("expected product");

    assert_eq!(product.title, "Retro Fish");
    let category = product.category.expect("expected category reference");
    assert_eq!(category.slug(), "surfboards");
    assert!(category.embedded().is_some(), "depth 1 embeds the category");
}

#[tokio::test]
async fn test_list_products_by_category_slug_filters_on_metadata() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(objects_path()))
        .and(QueryJson(
            json!({"type": "products", "metadata.category": "wetsuits"}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(objects_body(&[
            product_json("p3", "fullsuit", "Fullsuit", json!(320), json!("wetsuits")),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let products = repository(&server)
        .list_products_by_category_slug("wetsuits")
        .await;

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].slug, "fullsuit");
}

#[tokio::test]
async fn test_list_testimonials_accepts_both_schemas() {
    let server = MockServer::start().await;

    let legacy = json!({
        "id": "t2",
        "slug": "jo",
        "title": "Jo",
        "metadata": {
            "content": "Best shop on the coast.",
            "author_name": "Jo",
            "rating": {"key": "4", "value": "4 Stars"}
        }
    });

    Mock::given(method("GET"))
        .and(path(objects_path()))
        .and(QueryJson(json!({"type": "testimonials"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(objects_body(&[
            testimonial_json("t1", "Kai Nakamura", "Stoked on my board.", json!(9)),
            legacy,
        ])))
        .mount(&server)
        .await;

    let testimonials = repository(&server).list_testimonials().await;

    assert_eq!(testimonials.len(), 2);
    assert_eq!(testimonials[0].customer_name, "Kai Nakamura");
    assert_eq!(testimonials[0].rating, Rating::default(), "out of range rating is replaced");
    assert_eq!(testimonials[1].quote, "Best shop on the coast.");
    assert_eq!(testimonials[1].rating.get(), 4);
}

#[tokio::test]
async fn test_malformed_records_are_skipped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(objects_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(objects_body(&[
            json!({"id": "c0", "title": "No slug"}),
            category_json("c1", "surfboards", "Surfboards"),
        ])))
        .mount(&server)
        .await;

    let categories = repository(&server).list_categories().await;

    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].slug, "surfboards");
}

// ---------------------------------------------------------------------------
// Degrade-to-empty
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_not_found_yields_empty_list_and_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(objects_path()))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "No objects found"})),
        )
        .mount(&server)
        .await;

    let repository = repository(&server);
    assert!(repository.list_products().await.is_empty());
    assert!(repository.find_product_by_slug("missing").await.is_none());
    assert!(repository.find_category_by_slug("missing").await.is_none());
}

#[tokio::test]
async fn test_server_error_yields_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(objects_path()))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let repository = repository(&server);
    assert!(repository.list_categories().await.is_empty());
    assert!(repository.list_testimonials().await.is_empty());
    assert!(
        repository
            .list_products_by_category_slug("surfboards")
            .await
            .is_empty()
    );
}

#[tokio::test]
async fn test_unparseable_body_yields_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(objects_path()))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let repository = repository(&server);
    assert!(repository.list_products().await.is_empty());
    assert!(repository.find_product_by_slug("retro-fish").await.is_none());
}

#[tokio::test]
async fn test_empty_single_object_response_yields_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(objects_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(objects_body(&[])))
        .mount(&server)
        .await;

    assert!(
        repository(&server)
            .find_category_by_slug("surfboards")
            .await
            .is_none()
    );
}

#[tokio::test]
async fn test_unreachable_store_yields_empty_list() {
    // Nothing listens on port 1; the connection is refused immediately.
    let client = CosmicClient::new(&cosmic_config_at("http://127.0.0.1:1"))
        .expect("failed to build test CosmicClient");
    let repository = CatalogRepository::new(client);

    assert!(repository.list_products().await.is_empty());
    assert!(repository.find_category_by_slug("surfboards").await.is_none());
    assert!(repository.store().ping().await.is_err());
}

#[tokio::test]
async fn test_ping_treats_empty_bucket_as_reachable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(objects_path()))
        .and(query_param("limit", "1"))
        .and(query_param("depth", "0"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = CosmicClient::new(&cosmic_config(&server)).expect("failed to build test CosmicClient");
    assert!(client.ping().await.is_ok());
}
