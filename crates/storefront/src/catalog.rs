//! Catalog repository over the content store.
//!
//! Every public operation issues exactly one store query and never fails:
//! a 404 from the store, a transport error, or an unreadable response all
//! come back as an empty list or `None`. Each operation is an inner query
//! returning `Result` followed by [`or_empty`], so the degrade step is
//! visible at the call site and logged with the operation name.

use std::collections::HashSet;

use coastal_surf_core::{Category, Product, Testimonial};
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use crate::cosmic::normalize::{normalize_category, normalize_product, normalize_testimonial};
use crate::cosmic::{ContentStore, CosmicClient, CosmicError, ObjectQuery, ObjectType};

/// Metadata key products use to reference their category.
const CATEGORY_FILTER: &str = "metadata.category";

/// Read access to products, categories, and testimonials.
#[derive(Clone)]
pub struct CatalogRepository<S = CosmicClient> {
    store: S,
}

impl<S: ContentStore> CatalogRepository<S> {
    /// Create a repository over a content store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying content store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// All products, in store order.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Vec<Product> {
        let query = ObjectQuery::new(ObjectType::Products);
        or_empty(
            "list_products",
            None,
            self.query_list(&query, normalize_product).await,
        )
    }

    /// The product with `slug`, if any.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn find_product_by_slug(&self, slug: &str) -> Option<Product> {
        let query = ObjectQuery::new(ObjectType::Products).with_slug(slug);
        or_empty(
            "find_product_by_slug",
            Some(slug),
            self.query_one(&query, normalize_product).await,
        )
    }

    /// Products whose `metadata.category` matches `slug`.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn list_products_by_category_slug(&self, slug: &str) -> Vec<Product> {
        let query = ObjectQuery::new(ObjectType::Products).with_filter(CATEGORY_FILTER, slug);
        or_empty(
            "list_products_by_category_slug",
            Some(slug),
            self.query_list(&query, normalize_product).await,
        )
    }

    /// All categories, in store order.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Vec<Category> {
        let query = ObjectQuery::new(ObjectType::Categories);
        let categories = or_empty(
            "list_categories",
            None,
            self.query_list(&query, normalize_category).await,
        );
        warn_duplicate_slugs(&categories);
        categories
    }

    /// The category with `slug`, if any.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn find_category_by_slug(&self, slug: &str) -> Option<Category> {
        let query = ObjectQuery::new(ObjectType::Categories).with_slug(slug);
        or_empty(
            "find_category_by_slug",
            Some(slug),
            self.query_one(&query, normalize_category).await,
        )
    }

    /// All testimonials, in store order.
    #[instrument(skip(self))]
    pub async fn list_testimonials(&self) -> Vec<Testimonial> {
        let query = ObjectQuery::new(ObjectType::Testimonials);
        or_empty(
            "list_testimonials",
            None,
            self.query_list(&query, normalize_testimonial).await,
        )
    }

    /// Run a list query, skipping records that fail to normalize.
    async fn query_list<T>(
        &self,
        query: &ObjectQuery,
        normalize: fn(Value) -> Result<T, CosmicError>,
    ) -> Result<Vec<T>, CosmicError> {
        let objects = self.store.find(query).await?;
        Ok(objects
            .into_iter()
            .filter_map(|raw| match normalize(raw) {
                Ok(entity) => Some(entity),
                Err(e) => {
                    warn!(error = %e, "Skipping malformed record");
                    None
                }
            })
            .collect())
    }

    /// Run a single-object query.
    async fn query_one<T>(
        &self,
        query: &ObjectQuery,
        normalize: fn(Value) -> Result<T, CosmicError>,
    ) -> Result<Option<T>, CosmicError> {
        let raw = self.store.find_one(query).await?;
        normalize(raw).map(Some)
    }
}

/// Degrade a failed query to the empty value, logging why.
fn or_empty<T: Default>(
    operation: &'static str,
    key: Option<&str>,
    result: Result<T, CosmicError>,
) -> T {
    match result {
        Ok(value) => value,
        Err(e) if e.is_not_found() => {
            debug!(operation, key, "No matching objects");
            T::default()
        }
        Err(e @ CosmicError::Malformed { .. }) => {
            warn!(operation, key, error = %e, "Discarding malformed object");
            T::default()
        }
        Err(e) => {
            error!(operation, key, error = %e, "Content store query failed");
            T::default()
        }
    }
}

fn warn_duplicate_slugs(categories: &[Category]) {
    let mut seen = HashSet::new();
    for category in categories {
        if !seen.insert(category.slug.as_str()) {
            warn!(
                slug = %category.slug,
                "Duplicate category slug; the first one wins"
            );
        }
    }
}
