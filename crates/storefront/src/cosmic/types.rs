//! Raw Cosmic API shapes.
//!
//! These mirror what the REST API returns before normalization. Metadata is
//! kept as loose JSON because the bucket's object types have changed over
//! time and older objects still carry legacy field names.

use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::CosmicError;

/// Object types in the catalog bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Products,
    Categories,
    Testimonials,
}

impl ObjectType {
    /// Type slug as used in Cosmic queries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Categories => "categories",
            Self::Testimonials => "testimonials",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `GET /v3/buckets/{bucket}/objects`.
#[derive(Debug, Deserialize)]
pub struct FindResponse {
    #[serde(default)]
    pub objects: Vec<Value>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// The common envelope of every Cosmic object.
#[derive(Debug, Deserialize)]
pub struct RawObject {
    pub id: String,
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "metadata_or_empty")]
    pub metadata: Map<String, Value>,
}

impl RawObject {
    /// Parse the envelope of an object of the given type.
    ///
    /// # Errors
    ///
    /// Returns [`CosmicError::Malformed`] if `id` or `slug` is missing,
    /// not a string, or blank.
    pub fn parse(object_type: ObjectType, raw: Value) -> Result<Self, CosmicError> {
        let object: Self = serde_json::from_value(raw).map_err(|e| CosmicError::Malformed {
            object_type,
            reason: e.to_string(),
        })?;

        if object.id.trim().is_empty() {
            return Err(CosmicError::Malformed {
                object_type,
                reason: "empty id".to_string(),
            });
        }
        if object.slug.trim().is_empty() {
            return Err(CosmicError::Malformed {
                object_type,
                reason: format!("object {} has an empty slug", object.id),
            });
        }

        Ok(object)
    }
}

/// Cosmic sends `null` metadata for objects that never had any saved.
fn metadata_or_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}
