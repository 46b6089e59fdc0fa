//! Coastal Surf Core - Catalog types and content-resolution helpers.
//!
//! This crate provides the catalog model shared by every Coastal Surf component:
//! - `storefront` - Server-rendered public site backed by the Cosmic content store
//! - `cli` - Command-line tools for inspecting catalog content
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Everything here operates on already-fetched entities, which keeps
//! it trivially testable and usable from any page handler.
//!
//! # Modules
//!
//! - [`types`] - Canonical entities (`Product`, `Category`, `Testimonial`) and newtypes
//! - [`image`] - Image URL resolution with category-aware placeholders
//! - [`relations`] - Product to category resolution and related products
//! - [`listing`] - Page-level aggregations such as featured products

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod image;
pub mod listing;
pub mod relations;
pub mod types;

pub use image::resolve_image_url;
pub use listing::{FEATURED_PRODUCTS_COUNT, featured_products, products_in_category};
pub use relations::{
    RELATED_PRODUCTS_CAP, category_slug, related_products, resolve_category_for_product,
};
pub use types::*;
