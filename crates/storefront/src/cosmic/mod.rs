//! Cosmic headless CMS client.
//!
//! # Architecture
//!
//! - Plain REST over `reqwest`; one HTTP request per query
//! - Cosmic is the source of truth - NO local sync, NO caching at this level
//! - [`ContentStore`] is the narrow read-only seam the catalog repository
//!   depends on; [`CosmicClient`] is the production implementation
//! - [`normalize`] maps raw JSON objects onto `coastal_surf_core` entities
//!
//! # Example
//!
//! ```rust,ignore
//! use coastal_surf_storefront::cosmic::{CosmicClient, ContentStore, ObjectQuery, ObjectType};
//!
//! let client = CosmicClient::new(&config.cosmic)?;
//! let objects = client
//!     .find(&ObjectQuery::new(ObjectType::Products).with_filter("metadata.category", "surfboards"))
//!     .await?;
//! ```

mod client;
pub mod normalize;
pub mod types;

use std::future::Future;

use serde_json::{Map, Value};
use thiserror::Error;

pub use client::CosmicClient;
pub use types::{FindResponse, ObjectType};

/// Errors that can occur when talking to the Cosmic API.
#[derive(Debug, Error)]
pub enum CosmicError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The query matched nothing (Cosmic answers 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-success status other than 404.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A returned object lacks fields the storefront cannot default.
    #[error("Malformed {object_type} object: {reason}")]
    Malformed {
        /// Object type of the record.
        object_type: ObjectType,
        /// What was wrong with it.
        reason: String,
    },

    /// The configured API URL is invalid.
    #[error("Invalid API URL: {0}")]
    Url(#[from] url::ParseError),
}

impl CosmicError {
    /// Whether this is the benign "nothing matched" case.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Props requested for every catalog query.
pub const DEFAULT_PROPS: &[&str] = &["id", "title", "slug", "metadata"];

/// Relationship expansion depth for every catalog query.
///
/// Depth 1 returns a product's category as an embedded object.
pub const DEFAULT_DEPTH: u8 = 1;

/// A read query against one object type.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectQuery {
    object_type: ObjectType,
    filters: Map<String, Value>,
    props: Vec<&'static str>,
    depth: u8,
}

impl ObjectQuery {
    /// Query all objects of a type with the default projection and depth.
    #[must_use]
    pub fn new(object_type: ObjectType) -> Self {
        Self {
            object_type,
            filters: Map::new(),
            props: DEFAULT_PROPS.to_vec(),
            depth: DEFAULT_DEPTH,
        }
    }

    /// Restrict to the object with this slug.
    #[must_use]
    pub fn with_slug(self, slug: &str) -> Self {
        self.with_filter("slug", slug)
    }

    /// Add an equality filter (e.g. `metadata.category`).
    #[must_use]
    pub fn with_filter(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.filters.insert(key.to_string(), value.into());
        self
    }

    /// Replace the projected props.
    #[must_use]
    pub fn with_props(mut self, props: &[&'static str]) -> Self {
        self.props = props.to_vec();
        self
    }

    /// Set the relationship expansion depth.
    #[must_use]
    pub const fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub const fn object_type(&self) -> ObjectType {
        self.object_type
    }

    #[must_use]
    pub fn props(&self) -> &[&'static str] {
        &self.props
    }

    #[must_use]
    pub const fn depth(&self) -> u8 {
        self.depth
    }

    /// The `query` parameter: type plus filters as a JSON object.
    #[must_use]
    pub fn to_query_json(&self) -> String {
        let mut query = Map::new();
        query.insert(
            "type".to_string(),
            Value::String(self.object_type.as_str().to_string()),
        );
        query.extend(self.filters.clone());
        Value::Object(query).to_string()
    }
}

/// Read-only access to a content store.
///
/// Both methods signal "nothing matched" with [`CosmicError::NotFound`].
pub trait ContentStore: Send + Sync {
    /// All objects matching `query`.
    fn find(
        &self,
        query: &ObjectQuery,
    ) -> impl Future<Output = Result<Vec<Value>, CosmicError>> + Send;

    /// The first object matching `query`.
    fn find_one(&self, query: &ObjectQuery)
    -> impl Future<Output = Result<Value, CosmicError>> + Send;
}
