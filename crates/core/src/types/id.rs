//! Newtype IDs for type-safe entity references.
//!
//! Cosmic object IDs are opaque hex strings. Use the `define_id!` macro to
//! create wrappers that prevent mixing IDs from different object types.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use coastal_surf_core::define_id;
/// define_id!(PostId);
/// define_id!(AuthorId);
///
/// let post_id = PostId::new("65a1f0c2");
/// let author_id = AuthorId::new("65a1f0c2");
///
/// // These are different types, so this won't compile:
/// // let _: PostId = author_id;
/// assert_eq!(post_id.as_str(), author_id.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Cosmic object types served by the storefront
define_id!(ProductId);
define_id!(CategoryId);
define_id!(TestimonialId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_is_raw_value() {
        let id = ProductId::new("65b2c3d4e5f6");
        assert_eq!(id.to_string(), "65b2c3d4e5f6");
    }

    #[test]
    fn test_id_serde_is_transparent() {
        let id = CategoryId::from("abc123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc123\"");

        let parsed: CategoryId = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(parsed, id);
    }
}
