//! Normalization from raw Cosmic objects to catalog entities.
//!
//! Content in the bucket has drifted over time: products carry their image
//! under `image` or `featured_image`, testimonials come in two schemas,
//! ratings arrive as numbers, strings, or select-dropdown objects. All of
//! that is reconciled here, once, so page handlers only ever see the
//! canonical shapes from `coastal_surf_core`.

use std::str::FromStr;

use coastal_surf_core::{
    Category, CategoryId, CategoryRef, ImageReference, Price, Product, ProductId, Rating,
    Testimonial, TestimonialId,
};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::CosmicError;
use super::types::{ObjectType, RawObject};

/// Product metadata keys that may hold the product image, in priority order.
const PRODUCT_IMAGE_FIELDS: &[&str] = &["image", "featured_image"];

/// Where one testimonial schema keeps each canonical field.
#[derive(Debug)]
struct TestimonialSchema {
    quote: &'static str,
    customer_name: &'static str,
    photo: &'static str,
}

/// Known testimonial schemas, preferred first.
const TESTIMONIAL_SCHEMAS: &[TestimonialSchema] = &[
    // current
    TestimonialSchema {
        quote: "quote",
        customer_name: "customer_name",
        photo: "photo",
    },
    // legacy
    TestimonialSchema {
        quote: "content",
        customer_name: "author_name",
        photo: "author_image",
    },
];

/// Convert a raw `products` object.
///
/// # Errors
///
/// Returns [`CosmicError::Malformed`] if the object has no usable id or slug.
pub fn normalize_product(raw: Value) -> Result<Product, CosmicError> {
    let object = RawObject::parse(ObjectType::Products, raw)?;
    let meta = &object.metadata;

    Ok(Product {
        id: ProductId::new(object.id),
        slug: object.slug,
        title: object.title,
        description: text(meta, "description"),
        price: normalize_price(meta.get("price")),
        image: PRODUCT_IMAGE_FIELDS.iter().find_map(|key| image(meta, key)),
        category: meta.get("category").and_then(normalize_category_ref),
    })
}

/// Convert a raw `categories` object.
///
/// # Errors
///
/// Returns [`CosmicError::Malformed`] if the object has no usable id or slug.
pub fn normalize_category(raw: Value) -> Result<Category, CosmicError> {
    let object = RawObject::parse(ObjectType::Categories, raw)?;
    let meta = &object.metadata;

    Ok(Category {
        id: CategoryId::new(object.id),
        slug: object.slug,
        title: object.title,
        name: text(meta, "name"),
        description: text(meta, "description"),
        image: image(meta, "image"),
    })
}

/// Convert a raw `testimonials` object, reconciling both schemas.
///
/// # Errors
///
/// Returns [`CosmicError::Malformed`] if the object has no usable id or slug.
pub fn normalize_testimonial(raw: Value) -> Result<Testimonial, CosmicError> {
    let object = RawObject::parse(ObjectType::Testimonials, raw)?;
    let meta = &object.metadata;

    let quote = TESTIMONIAL_SCHEMAS
        .iter()
        .find_map(|schema| text(meta, schema.quote))
        .unwrap_or_default();
    let customer_name = TESTIMONIAL_SCHEMAS
        .iter()
        .find_map(|schema| text(meta, schema.customer_name))
        .unwrap_or_else(|| Testimonial::DEFAULT_CUSTOMER_NAME.to_string());
    let photo = TESTIMONIAL_SCHEMAS
        .iter()
        .find_map(|schema| image(meta, schema.photo));

    Ok(Testimonial {
        id: TestimonialId::new(object.id),
        slug: object.slug,
        customer_name,
        quote,
        rating: normalize_rating(meta.get("rating")),
        photo,
    })
}

/// Interpret a product's `category` field.
///
/// A string is a bare slug; an object is an expanded category. Blank
/// strings, `null`, and unrecognizable shapes mean "no category".
#[must_use]
pub fn normalize_category_ref(value: &Value) -> Option<CategoryRef> {
    match value {
        Value::String(slug) if !slug.trim().is_empty() => Some(CategoryRef::Slug(slug.clone())),
        Value::Object(fields) => normalize_category(value.clone()).map_or_else(
            // Partially expanded object: fall back to its slug
            |_| {
                fields
                    .get("slug")
                    .and_then(Value::as_str)
                    .filter(|slug| !slug.trim().is_empty())
                    .map(|slug| CategoryRef::Slug(slug.to_string()))
            },
            |category| Some(CategoryRef::Embedded(Box::new(category))),
        ),
        _ => None,
    }
}

/// Interpret a price field; anything unusable becomes `$0.00`.
#[must_use]
pub fn normalize_price(value: Option<&Value>) -> Price {
    value
        .and_then(decimal)
        .map_or_else(Price::zero, Price::usd)
}

/// Interpret a rating field.
///
/// Only whole numbers from 1 to 5 are kept. Anything else, including
/// out-of-range numbers, is replaced by the default of 5 rather than
/// clamped.
#[must_use]
pub fn normalize_rating(value: Option<&Value>) -> Rating {
    value
        .and_then(whole_number)
        .and_then(|n| Rating::try_from(n).ok())
        .unwrap_or_default()
}

fn decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .ok()
            .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok())),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

fn whole_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        // Select-dropdown metafields send {"key": "5", "value": "5 Stars"}
        Value::Object(fields) => fields.get("key").and_then(whole_number),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)] // Out-of-range values saturate and are rejected later
fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0).then_some(f as i64)
}

/// A non-blank string field.
fn text(meta: &Map<String, Value>, key: &str) -> Option<String> {
    meta.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// An image object field with a usable `imgix_url`.
fn image(meta: &Map<String, Value>, key: &str) -> Option<ImageReference> {
    let fields = meta.get(key)?.as_object()?;
    ImageReference::from_parts(
        text(fields, "url"),
        text(fields, "imgix_url"),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn image_json(name: &str) -> Value {
        json!({
            "url": format!("https://cdn.cosmicjs.com/{name}"),
            "imgix_url": format!("https://imgix.cosmicjs.com/{name}")
        })
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    #[test]
    fn test_product_with_embedded_category() {
        let product = normalize_product(json!({
            "id": "p1",
            "slug": "retro-fish",
            "title": "Retro Fish",
            "metadata": {
                "description": "A **twin** fin.",
                "price": 649.5,
                "image": image_json("fish.jpg"),
                "category": {
                    "id": "c1",
                    "slug": "surfboards",
                    "title": "Surfboards",
                    "metadata": {"name": "Boards"}
                }
            }
        }))
        .unwrap();

        assert_eq!(product.slug, "retro-fish");
        assert_eq!(product.price.display(), "$649.50");
        assert_eq!(product.description.as_deref(), Some("A **twin** fin."));
        assert_eq!(
            product.image.unwrap().imgix_url,
            "https://imgix.cosmicjs.com/fish.jpg"
        );

        let category = product.category.unwrap();
        assert_eq!(category.slug(), "surfboards");
        assert_eq!(category.embedded().unwrap().display_name(), "Boards");
    }

    #[test]
    fn test_product_defaults() {
        let product = normalize_product(json!({
            "id": "p2",
            "slug": "wax",
            "title": "Wax",
            "metadata": {}
        }))
        .unwrap();

        assert_eq!(product.price, Price::zero());
        assert_eq!(product.price.display(), "$0.00");
        assert!(product.image.is_none());
        assert!(product.category.is_none());
        assert!(product.description.is_none());
    }

    #[test]
    fn test_product_featured_image_alias() {
        let product = normalize_product(json!({
            "id": "p3",
            "slug": "leash",
            "title": "Leash",
            "metadata": {"featured_image": image_json("leash.jpg")}
        }))
        .unwrap();
        assert_eq!(
            product.image.unwrap().imgix_url,
            "https://imgix.cosmicjs.com/leash.jpg"
        );
    }

    #[test]
    fn test_product_category_as_bare_slug() {
        let product = normalize_product(json!({
            "id": "p4",
            "slug": "fullsuit",
            "title": "Fullsuit",
            "metadata": {"category": "wetsuits"}
        }))
        .unwrap();
        assert_eq!(
            product.category,
            Some(CategoryRef::Slug("wetsuits".to_string()))
        );
    }

    #[test]
    fn test_product_without_slug_is_malformed() {
        let result = normalize_product(json!({"id": "p5", "title": "Mystery"}));
        assert!(matches!(result, Err(CosmicError::Malformed { .. })));
    }

    // -------------------------------------------------------------------------
    // Prices
    // -------------------------------------------------------------------------

    #[test]
    fn test_price_variants() {
        assert_eq!(normalize_price(Some(&json!(12))).display(), "$12.00");
        assert_eq!(normalize_price(Some(&json!("89.99"))).display(), "$89.99");
        assert_eq!(normalize_price(Some(&json!(" 5 "))).display(), "$5.00");
        assert_eq!(normalize_price(None), Price::zero());
        assert_eq!(normalize_price(Some(&Value::Null)), Price::zero());
        assert_eq!(normalize_price(Some(&json!("free"))), Price::zero());
        assert_eq!(normalize_price(Some(&json!(-20))), Price::zero());
    }

    // -------------------------------------------------------------------------
    // Categories
    // -------------------------------------------------------------------------

    #[test]
    fn test_category_name_fallback() {
        let named = normalize_category(json!({
            "id": "c1", "slug": "accessories", "title": "Accessories",
            "metadata": {"name": "Gear", "description": "Fins, wax, leashes"}
        }))
        .unwrap();
        assert_eq!(named.display_name(), "Gear");
        assert_eq!(named.description.as_deref(), Some("Fins, wax, leashes"));

        let unnamed = normalize_category(json!({
            "id": "c2", "slug": "wetsuits", "title": "Wetsuits",
            "metadata": {"name": ""}
        }))
        .unwrap();
        assert_eq!(unnamed.name, None);
        assert_eq!(unnamed.display_name(), "Wetsuits");
    }

    #[test]
    fn test_category_image_without_imgix_url_is_absent() {
        let category = normalize_category(json!({
            "id": "c3", "slug": "surfboards", "title": "Surfboards",
            "metadata": {"image": {"url": "https://cdn.cosmicjs.com/boards.jpg"}}
        }))
        .unwrap();
        assert!(category.image.is_none());
    }

    #[test]
    fn test_partially_expanded_category_falls_back_to_slug() {
        let category = normalize_category_ref(&json!({"slug": "wetsuits"}));
        assert_eq!(category, Some(CategoryRef::Slug("wetsuits".to_string())));

        assert_eq!(normalize_category_ref(&json!("")), None);
        assert_eq!(normalize_category_ref(&Value::Null), None);
        assert_eq!(normalize_category_ref(&json!(42)), None);
    }

    // -------------------------------------------------------------------------
    // Testimonials
    // -------------------------------------------------------------------------

    #[test]
    fn test_testimonial_current_schema() {
        let testimonial = normalize_testimonial(json!({
            "id": "t1", "slug": "kai", "title": "Kai",
            "metadata": {
                "quote": "Best board I've owned.",
                "customer_name": "Kai",
                "rating": "4",
                "photo": image_json("kai.jpg")
            }
        }))
        .unwrap();

        assert_eq!(testimonial.quote, "Best board I've owned.");
        assert_eq!(testimonial.customer_name, "Kai");
        assert_eq!(testimonial.rating.get(), 4);
        assert!(testimonial.photo.is_some());
    }

    #[test]
    fn test_testimonial_legacy_schema() {
        let testimonial = normalize_testimonial(json!({
            "id": "t2", "slug": "leilani", "title": "Leilani",
            "metadata": {
                "content": "Warm all winter.",
                "author_name": "Leilani",
                "author_image": image_json("leilani.jpg")
            }
        }))
        .unwrap();

        assert_eq!(testimonial.quote, "Warm all winter.");
        assert_eq!(testimonial.customer_name, "Leilani");
        assert_eq!(
            testimonial.photo.unwrap().imgix_url,
            "https://imgix.cosmicjs.com/leilani.jpg"
        );
        assert_eq!(testimonial.rating.get(), 5);
    }

    #[test]
    fn test_testimonial_prefers_current_schema_fields() {
        let testimonial = normalize_testimonial(json!({
            "id": "t3", "slug": "mixed", "title": "Mixed",
            "metadata": {
                "quote": "new",
                "content": "old",
                "customer_name": "",
                "author_name": "Legacy Name"
            }
        }))
        .unwrap();

        assert_eq!(testimonial.quote, "new");
        assert_eq!(testimonial.customer_name, "Legacy Name");
    }

    #[test]
    fn test_testimonial_defaults() {
        let testimonial = normalize_testimonial(json!({
            "id": "t4", "slug": "anon", "title": "Anon", "metadata": {}
        }))
        .unwrap();

        assert_eq!(testimonial.quote, "");
        assert_eq!(testimonial.customer_name, "Customer");
        assert_eq!(testimonial.rating, Rating::default());
        assert!(testimonial.photo.is_none());
    }

    // -------------------------------------------------------------------------
    // Ratings
    // -------------------------------------------------------------------------

    #[test]
    fn test_rating_accepts_numbers_strings_and_dropdowns() {
        assert_eq!(normalize_rating(Some(&json!(3))).get(), 3);
        assert_eq!(normalize_rating(Some(&json!("2"))).get(), 2);
        assert_eq!(normalize_rating(Some(&json!(1.0))).get(), 1);
        assert_eq!(
            normalize_rating(Some(&json!({"key": "4", "value": "4 Stars"}))).get(),
            4
        );
    }

    #[test]
    fn test_rating_out_of_range_is_replaced_not_clamped() {
        // 7 becomes the default of 5; it is not clamped to the upper bound.
        // 0 likewise becomes 5, not 1, which shows the difference.
        assert_eq!(normalize_rating(Some(&json!(7))).get(), 5);
        assert_eq!(normalize_rating(Some(&json!(0))).get(), 5);
        assert_eq!(normalize_rating(Some(&json!(-1))).get(), 5);
    }

    #[test]
    fn test_rating_malformed_uses_default() {
        assert_eq!(normalize_rating(None).get(), 5);
        assert_eq!(normalize_rating(Some(&json!("great"))).get(), 5);
        assert_eq!(normalize_rating(Some(&json!(3.5))).get(), 5);
        assert_eq!(normalize_rating(Some(&Value::Null)).get(), 5);
        assert_eq!(normalize_rating(Some(&json!([4]))).get(), 5);
    }
}
