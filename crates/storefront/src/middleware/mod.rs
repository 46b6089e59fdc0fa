//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (CSP, frame and referrer policy)
//! 5. Page cache (page routes only; serves the revalidation window)

pub mod page_cache;
pub mod request_id;
pub mod security_headers;

pub use page_cache::{PageCache, page_cache_middleware};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
