//! Page revalidation cache.
//!
//! Successful `GET` page responses are kept in memory for the configured
//! revalidation window, keyed by path and query. Within the window every
//! visitor gets the same rendered HTML; after it expires the next request
//! renders against fresh catalog content. Only the hosting layer caches; the
//! catalog repository always goes to the content store.

use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use moka::future::Cache;
use tracing::{debug, error};

/// Response header reporting whether the page came from the cache.
pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// Upper bound on a buffered page body.
const MAX_PAGE_BYTES: usize = 8 * 1024 * 1024;

/// Maximum number of distinct pages held at once.
const MAX_PAGES: u64 = 1000;

/// A rendered page held for the revalidation window.
#[derive(Clone)]
pub struct CachedPage {
    content_type: Option<HeaderValue>,
    body: Bytes,
}

/// In-memory page cache; a zero window disables it.
#[derive(Clone)]
pub struct PageCache {
    pages: Option<Cache<String, CachedPage>>,
}

impl PageCache {
    /// Create a cache holding pages for `revalidate`.
    #[must_use]
    pub fn new(revalidate: Duration) -> Self {
        let pages = (!revalidate.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(MAX_PAGES)
                .time_to_live(revalidate)
                .build()
        });
        Self { pages }
    }

    /// Whether pages are being cached.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.pages.is_some()
    }
}

/// Serve cached pages and store fresh successful ones.
pub async fn page_cache_middleware(
    State(cache): State<PageCache>,
    request: Request,
    next: Next,
) -> Response {
    let Some(pages) = cache.pages.as_ref() else {
        return next.run(request).await;
    };
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let key = cache_key(&request);

    if let Some(page) = pages.get(&key).await {
        debug!(key = %key, "Page cache hit");
        return cached_response(page);
    }

    let response = next.run(request).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    let (parts, body) = response.into_parts();
    let body = match axum::body::to_bytes(body, MAX_PAGE_BYTES).await {
        Ok(body) => body,
        Err(e) => {
            error!(key = %key, error = %e, "Failed to buffer page body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    pages
        .insert(
            key,
            CachedPage {
                content_type: parts.headers.get(CONTENT_TYPE).cloned(),
                body: body.clone(),
            },
        )
        .await;

    let mut response = Response::from_parts(parts, Body::from(body));
    response
        .headers_mut()
        .insert(CACHE_STATUS_HEADER, HeaderValue::from_static("MISS"));
    response
}

fn cache_key(request: &Request) -> String {
    request
        .uri()
        .path_and_query()
        .map_or_else(|| request.uri().path().to_string(), ToString::to_string)
}

fn cached_response(page: CachedPage) -> Response {
    let mut response = page.body.into_response();
    let headers = response.headers_mut();
    if let Some(content_type) = page.content_type {
        headers.insert(CONTENT_TYPE, content_type);
    }
    headers.insert(CACHE_STATUS_HEADER, HeaderValue::from_static("HIT"));
    response
}
