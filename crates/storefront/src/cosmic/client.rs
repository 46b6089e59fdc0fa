//! Cosmic REST API client implementation.
//!
//! Uses `reqwest` for HTTP. Every call is a single `GET` against the bucket's
//! objects endpoint; nothing is cached or retried here.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CosmicConfig;

use super::types::FindResponse;
use super::{ContentStore, CosmicError, ObjectQuery, ObjectType};

/// Maximum number of body characters kept in error messages.
const ERROR_BODY_LIMIT: usize = 200;

/// Client for the Cosmic REST API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CosmicClient {
    inner: Arc<CosmicClientInner>,
}

struct CosmicClientInner {
    client: reqwest::Client,
    objects_url: Url,
    read_key: SecretString,
}

impl CosmicClient {
    /// Create a new Cosmic API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(config: &CosmicConfig) -> Result<Self, CosmicError> {
        let objects_url = Url::parse(&format!(
            "{}/v3/buckets/{}/objects",
            config.base_url(),
            config.bucket_slug
        ))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("coastal-surf-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(CosmicClientInner {
                client,
                objects_url,
                read_key: config.read_key.clone(),
            }),
        })
    }

    /// Check that the bucket answers queries with the configured key.
    ///
    /// An empty bucket counts as reachable.
    ///
    /// # Errors
    ///
    /// Returns the underlying error for anything other than "no objects".
    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<(), CosmicError> {
        let query = ObjectQuery::new(ObjectType::Categories)
            .with_props(&["id"])
            .with_depth(0);
        match self.request(&query, Some(1)).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Build the request URL for a query.
    ///
    /// The read key is part of the query string, so this URL must never be
    /// logged.
    fn url_for(&self, query: &ObjectQuery, limit: Option<u32>) -> Url {
        let mut url = self.inner.objects_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("query", &query.to_query_json())
                .append_pair("props", &query.props().join(","))
                .append_pair("depth", &query.depth().to_string())
                .append_pair("read_key", self.inner.read_key.expose_secret());
            if let Some(limit) = limit {
                pairs.append_pair("limit", &limit.to_string());
            }
        }
        url
    }

    /// Execute an objects query.
    async fn request(
        &self,
        query: &ObjectQuery,
        limit: Option<u32>,
    ) -> Result<FindResponse, CosmicError> {
        let response = self
            .inner
            .client
            .get(self.url_for(query, limit))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        // Cosmic reports an empty result set as 404
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CosmicError::NotFound(format!(
                "{} matching {}",
                query.object_type(),
                query.to_query_json()
            )));
        }

        let body = response.text().await?;

        if !status.is_success() {
            debug!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Cosmic API returned non-success status"
            );
            return Err(CosmicError::Status {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            debug!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse Cosmic response"
            );
            CosmicError::Parse(e)
        })
    }
}

impl ContentStore for CosmicClient {
    #[instrument(skip(self, query), fields(object_type = %query.object_type()))]
    async fn find(&self, query: &ObjectQuery) -> Result<Vec<Value>, CosmicError> {
        let response = self.request(query, None).await?;
        debug!(
            count = response.objects.len(),
            total = ?response.total,
            "Fetched objects"
        );
        Ok(response.objects)
    }

    #[instrument(skip(self, query), fields(object_type = %query.object_type()))]
    async fn find_one(&self, query: &ObjectQuery) -> Result<Value, CosmicError> {
        let response = self.request(query, Some(1)).await?;
        response.objects.into_iter().next().ok_or_else(|| {
            CosmicError::NotFound(format!(
                "{} matching {}",
                query.object_type(),
                query.to_query_json()
            ))
        })
    }
}
