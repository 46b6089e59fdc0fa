//! Image URL resolution.
//!
//! Catalog images are served through imgix, which sizes and re-encodes an
//! image based on query parameters. [`resolve_image_url`] always produces a
//! usable `src`: the entity's own image when it has one, otherwise a curated
//! placeholder chosen by category.

use crate::types::ImageReference;

/// Hint that selects the generic placeholder.
pub const DEFAULT_FALLBACK_KEY: &str = "default";

/// Last-resort placeholder, used if the table has no `default` entry.
pub const DEFAULT_FALLBACK_IMAGE: &str =
    "https://images.unsplash.com/photo-1507525428034-b723cf961d3e";

/// Curated placeholders keyed by category slug.
const FALLBACK_IMAGES: &[(&str, &str)] = &[
    (
        "surfboards",
        "https://images.unsplash.com/photo-1531722569936-825d3dd91b15",
    ),
    (
        "wetsuits",
        "https://images.unsplash.com/photo-1544551763-46a013bb70d5",
    ),
    (
        "accessories",
        "https://images.unsplash.com/photo-1455264745730-cb3b76250ae8",
    ),
    (DEFAULT_FALLBACK_KEY, DEFAULT_FALLBACK_IMAGE),
];

/// Resolve the URL to render for an optional image at the given size.
///
/// Any query string already on the image URL is discarded before the
/// transform parameters are appended, so sizing never compounds.
///
/// ```
/// use coastal_surf_core::resolve_image_url;
///
/// let url = resolve_image_url(None, 800, 600, Some("wetsuits"));
/// assert!(url.starts_with("https://images.unsplash.com/photo-1544551763"));
/// assert!(url.ends_with("?w=800&h=600&fit=crop&auto=format,compress"));
/// ```
#[must_use]
pub fn resolve_image_url(
    image: Option<&ImageReference>,
    width: u32,
    height: u32,
    category_hint: Option<&str>,
) -> String {
    let base = image.map_or_else(|| fallback_image(category_hint), |i| i.imgix_url.as_str());
    with_transform(base, width, height)
}

/// Placeholder base URL for a category hint.
///
/// Lookup chain: category-specific entry, then the `default` entry, then
/// [`DEFAULT_FALLBACK_IMAGE`].
#[must_use]
pub fn fallback_image(category_hint: Option<&str>) -> &'static str {
    category_hint
        .and_then(lookup)
        .or_else(|| lookup(DEFAULT_FALLBACK_KEY))
        .unwrap_or(DEFAULT_FALLBACK_IMAGE)
}

fn lookup(key: &str) -> Option<&'static str> {
    FALLBACK_IMAGES
        .iter()
        .find(|(slug, _)| *slug == key)
        .map(|(_, url)| *url)
}

fn with_transform(url: &str, width: u32, height: u32) -> String {
    let clean = url.split_once('?').map_or(url, |(base, _)| base);
    format!("{clean}?w={width}&h={height}&fit=crop&auto=format,compress")
}
