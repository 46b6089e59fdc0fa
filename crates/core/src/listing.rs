//! Page-level aggregations over already-fetched products.

use crate::relations::category_slug;
use crate::types::Product;

/// Number of products in the home page's featured section.
pub const FEATURED_PRODUCTS_COUNT: usize = 4;

/// The `n` most expensive products, most expensive first.
///
/// Sorting is stable, so equally priced products keep their relative order.
/// The input slice is left untouched.
#[must_use]
pub fn featured_products(all: &[Product], n: usize) -> Vec<Product> {
    let mut sorted = all.to_vec();
    sorted.sort_by(|a, b| b.price.amount.cmp(&a.price.amount));
    sorted.truncate(n);
    sorted
}

/// Products whose category slug equals `slug`, in their original order.
#[must_use]
pub fn products_in_category<'a>(all: &'a [Product], slug: &str) -> Vec<&'a Product> {
    all.iter()
        .filter(|product| category_slug(product) == Some(slug))
        .collect()
}
