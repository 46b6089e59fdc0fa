//! Cross-entity relationships derived from fetched lists.
//!
//! The content store links a product to its category by slug. There is no
//! foreign-key guarantee: a dangling slug simply resolves to no category.

use crate::types::{Category, Product};

/// Maximum number of related products shown on a product page.
pub const RELATED_PRODUCTS_CAP: usize = 3;

/// The slug of a product's category, if it has one.
#[must_use]
pub fn category_slug(product: &Product) -> Option<&str> {
    product.category.as_ref().map(crate::types::CategoryRef::slug)
}

/// Find the category a product belongs to.
///
/// Slugs are expected to be unique; if they are not, the first match in
/// `categories` wins.
#[must_use]
pub fn resolve_category_for_product<'a>(
    product: &Product,
    categories: &'a [Category],
) -> Option<&'a Category> {
    let slug = category_slug(product)?;
    categories.iter().find(|category| category.slug == slug)
}

/// Products sharing `product`'s category, excluding `product` itself.
///
/// Keeps the order of `all` and returns at most `cap` entries.
/// Uncategorized products are related to each other.
#[must_use]
pub fn related_products<'a>(product: &Product, all: &'a [Product], cap: usize) -> Vec<&'a Product> {
    let slug = category_slug(product);

    all.iter()
        .filter(|candidate| candidate.slug != product.slug)
        .filter(|candidate| category_slug(candidate) == slug)
        .take(cap)
        .collect()
}
