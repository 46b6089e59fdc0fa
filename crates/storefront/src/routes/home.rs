//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use coastal_surf_core::{
    Category, FEATURED_PRODUCTS_COUNT, Testimonial, featured_products, resolve_image_url,
};
use tracing::instrument;

use super::SITE_NAME;
use super::products::ProductCardView;
use crate::filters;
use crate::state::AppState;

// =============================================================================
// Hero Configuration (static content)
// =============================================================================

/// Hero banner content.
#[derive(Clone)]
pub struct HeroView {
    pub eyebrow: &'static str,
    pub title: &'static str,
    pub title_accent: &'static str,
    pub subtitle: &'static str,
    pub image_url: &'static str,
    pub image_alt: &'static str,
    pub primary_cta: CtaView,
    pub secondary_cta: CtaView,
}

/// A call-to-action link.
#[derive(Clone)]
pub struct CtaView {
    pub label: &'static str,
    pub url: &'static str,
}

impl Default for HeroView {
    fn default() -> Self {
        Self {
            eyebrow: "New Season Collection",
            title: "Ride Your",
            title_accent: "Perfect Wave",
            subtitle: "Premium surfboards, wetsuits, and gear crafted for surfers who demand \
                       the best. From beginner boards to pro-level equipment.",
            image_url: "https://images.unsplash.com/photo-1502680390469-be75c86b636f?w=2400&h=1600&fit=crop&auto=format,compress",
            image_alt: "Surfing lifestyle",
            primary_cta: CtaView {
                label: "Shop Now",
                url: "/products",
            },
            secondary_cta: CtaView {
                label: "Explore Boards",
                url: "/categories/surfboards",
            },
        }
    }
}

// =============================================================================
// Views
// =============================================================================

/// Category showcase tile.
#[derive(Clone)]
pub struct CategoryCardView {
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: String,
}

impl From<&Category> for CategoryCardView {
    fn from(category: &Category) -> Self {
        Self {
            slug: category.slug.clone(),
            name: category.display_name().to_string(),
            description: category.description.clone(),
            image_url: resolve_image_url(category.image.as_ref(), 800, 600, Some(&category.slug)),
        }
    }
}

/// A testimonial with its stars precomputed.
#[derive(Clone)]
pub struct TestimonialView {
    pub customer_name: String,
    pub initial: String,
    pub quote: String,
    pub photo_url: Option<String>,
    /// One CSS class per star, filled stars first.
    pub stars: Vec<&'static str>,
    pub rating: u8,
}

impl From<&Testimonial> for TestimonialView {
    fn from(testimonial: &Testimonial) -> Self {
        Self {
            customer_name: testimonial.customer_name.clone(),
            initial: testimonial.initial(),
            quote: testimonial.quote.clone(),
            photo_url: testimonial
                .photo
                .as_ref()
                .map(|photo| resolve_image_url(Some(photo), 96, 96, None)),
            stars: testimonial
                .rating
                .stars()
                .into_iter()
                .map(|filled| if filled { "star star--filled" } else { "star" })
                .collect(),
            rating: testimonial.rating.get(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub title: String,
    pub meta_description: String,
    pub hero: HeroView,
    pub featured_products: Vec<ProductCardView>,
    pub categories: Vec<CategoryCardView>,
    pub testimonials: Vec<TestimonialView>,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog();
    let (products, categories, testimonials) = tokio::join!(
        catalog.list_products(),
        catalog.list_categories(),
        catalog.list_testimonials()
    );

    HomeTemplate {
        title: format!("{SITE_NAME} | Premium Surf Gear"),
        meta_description: "Premium surfboards, wetsuits, and accessories for surfers of every level."
            .to_string(),
        hero: HeroView::default(),
        featured_products: featured_products(&products, FEATURED_PRODUCTS_COUNT)
            .iter()
            .map(|p| ProductCardView::new(p, &categories))
            .collect(),
        categories: categories.iter().map(CategoryCardView::from).collect(),
        testimonials: testimonials.iter().map(TestimonialView::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use coastal_surf_core::{ImageReference, Rating, TestimonialId};

    use super::*;

    fn testimonial(rating: i64, photo: Option<&str>) -> Testimonial {
        Testimonial {
            id: TestimonialId::new("t1"),
            slug: "kai".to_string(),
            customer_name: "kai".to_string(),
            quote: "Stoked".to_string(),
            rating: Rating::try_from(rating).unwrap_or_default(),
            photo: photo.and_then(|url| ImageReference::from_parts(None, Some(url.to_string()))),
        }
    }

    #[test]
    fn test_testimonial_stars_are_precomputed() {
        let view = TestimonialView::from(&testimonial(3, None));
        assert_eq!(
            view.stars,
            ["star star--filled", "star star--filled", "star star--filled", "star", "star"]
        );
        assert_eq!(view.initial, "K");
        assert!(view.photo_url.is_none());
    }

    #[test]
    fn test_testimonial_photo_is_sized() {
        let view = TestimonialView::from(&testimonial(5, Some("https://imgix.cosmicjs.com/kai.jpg")));
        assert_eq!(
            view.photo_url.as_deref(),
            Some("https://imgix.cosmicjs.com/kai.jpg?w=96&h=96&fit=crop&auto=format,compress")
        );
    }

    #[test]
    fn test_category_card_uses_slug_fallback() {
        let category = Category {
            id: coastal_surf_core::CategoryId::new("c1"),
            slug: "accessories".to_string(),
            title: "Accessories".to_string(),
            name: Some(String::new()),
            description: None,
            image: None,
        };
        let card = CategoryCardView::from(&category);
        assert_eq!(card.name, "Accessories");
        assert_eq!(
            card.image_url,
            "https://images.unsplash.com/photo-1455264745730-cb3b76250ae8?w=800&h=600&fit=crop&auto=format,compress"
        );
    }
}
