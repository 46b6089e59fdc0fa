//! Core types for the Coastal Surf catalog.
//!
//! This module provides the canonical entity shapes and type-safe wrappers
//! for the values those entities carry.

pub mod catalog;
pub mod id;
pub mod image;
pub mod price;
pub mod rating;

pub use catalog::{Category, CategoryRef, Product, Testimonial};
pub use id::*;
pub use image::ImageReference;
pub use price::{CurrencyCode, Price};
pub use rating::{Rating, RatingError};
