//! Remote image references.

use serde::{Deserialize, Serialize};

/// An image hosted by the content store.
///
/// Only `imgix_url` is used for rendering, so a reference without one is
/// never constructed; the storefront treats it as "no image" instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    /// Canonical (original) file URL, if the store supplied one.
    pub url: Option<String>,
    /// Transform-capable base URL used to build sized variants.
    pub imgix_url: String,
}

impl ImageReference {
    /// Build a reference from the raw store fields.
    ///
    /// Returns `None` when `imgix_url` is missing or blank.
    #[must_use]
    pub fn from_parts(url: Option<String>, imgix_url: Option<String>) -> Option<Self> {
        let imgix_url = imgix_url.filter(|u| !u.trim().is_empty())?;
        Some(Self {
            url: url.filter(|u| !u.trim().is_empty()),
            imgix_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_imgix_url() {
        assert!(ImageReference::from_parts(Some("https://cdn/x.jpg".into()), None).is_none());
        assert!(ImageReference::from_parts(None, Some("  ".into())).is_none());
    }

    #[test]
    fn test_blank_canonical_url_is_dropped() {
        let image = ImageReference::from_parts(
            Some(String::new()),
            Some("https://imgix.cosmicjs.com/a.jpg".into()),
        );
        assert_eq!(
            image,
            Some(ImageReference {
                url: None,
                imgix_url: "https://imgix.cosmicjs.com/a.jpg".into(),
            })
        );
    }
}
