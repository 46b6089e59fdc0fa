//! Canonical catalog entities.
//!
//! These are the only shapes page handlers see. Raw content-store records
//! are mapped onto them once, at ingestion, by the storefront's normalizer.

use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId, TestimonialId};
use super::image::ImageReference;
use super::price::Price;
use super::rating::Rating;

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub slug: String,
    pub title: String,
    /// Optional display override for `title`.
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<ImageReference>,
}

impl Category {
    /// Name shown to shoppers: `name` when present and non-blank, else `title`.
    ///
    /// Every render site goes through this method.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.title)
    }
}

/// A product's link to its category.
///
/// Depending on the relationship expansion depth of the query, the store
/// returns either the category's slug or the whole category object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CategoryRef {
    Slug(String),
    Embedded(Box<Category>),
}

impl CategoryRef {
    /// The referenced category's slug, whichever shape it arrived in.
    #[must_use]
    pub fn slug(&self) -> &str {
        match self {
            Self::Slug(slug) => slug,
            Self::Embedded(category) => &category.slug,
        }
    }

    /// The embedded category, if the reference was expanded.
    #[must_use]
    pub fn embedded(&self) -> Option<&Category> {
        match self {
            Self::Slug(_) => None,
            Self::Embedded(category) => Some(category),
        }
    }
}

/// A sellable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub slug: String,
    pub title: String,
    /// Markdown description.
    pub description: Option<String>,
    pub price: Price,
    pub image: Option<ImageReference>,
    pub category: Option<CategoryRef>,
}

/// A customer testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: TestimonialId,
    pub slug: String,
    pub customer_name: String,
    pub quote: String,
    pub rating: Rating,
    pub photo: Option<ImageReference>,
}

impl Testimonial {
    /// Fallback customer name when the store has none.
    pub const DEFAULT_CUSTOMER_NAME: &'static str = "Customer";

    /// First character of the customer name, used for avatar placeholders.
    #[must_use]
    pub fn initial(&self) -> String {
        self.customer_name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: Option<&str>) -> Category {
        Category {
            id: CategoryId::new("cat-1"),
            slug: "surfboards".to_string(),
            title: "Surfboards".to_string(),
            name: name.map(str::to_string),
            description: None,
            image: None,
        }
    }

    #[test]
    fn test_display_name_prefers_name() {
        assert_eq!(category(Some("Boards")).display_name(), "Boards");
    }

    #[test]
    fn test_display_name_falls_back_to_title() {
        assert_eq!(category(None).display_name(), "Surfboards");
        assert_eq!(category(Some("")).display_name(), "Surfboards");
        assert_eq!(category(Some("   ")).display_name(), "Surfboards");
    }

    #[test]
    fn test_category_ref_slug_for_both_shapes() {
        let bare = CategoryRef::Slug("wetsuits".to_string());
        assert_eq!(bare.slug(), "wetsuits");
        assert!(bare.embedded().is_none());

        let embedded = CategoryRef::Embedded(Box::new(category(None)));
        assert_eq!(embedded.slug(), "surfboards");
        assert!(embedded.embedded().is_some());
    }

    #[test]
    fn test_testimonial_initial() {
        let testimonial = Testimonial {
            id: TestimonialId::new("t-1"),
            slug: "kai".to_string(),
            customer_name: "kai".to_string(),
            quote: String::new(),
            rating: Rating::default(),
            photo: None,
        };
        assert_eq!(testimonial.initial(), "K");
    }
}
