//! Testimonial star rating.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// The value is outside the 1-5 star range.
    #[error("rating must be between {min} and {max} (got {value})")]
    OutOfRange {
        /// The rejected value.
        value: i64,
        /// Smallest accepted value.
        min: u8,
        /// Largest accepted value.
        max: u8,
    },
}

/// A 1-5 star rating.
///
/// The default is the maximum of five stars, which is also what invalid
/// input is replaced with during normalization.
///
/// ```
/// use coastal_surf_core::Rating;
///
/// assert_eq!(Rating::try_from(4).map(Rating::get), Ok(4));
/// assert!(Rating::try_from(7).is_err());
/// assert_eq!(Rating::default().get(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest possible rating.
    pub const MIN: u8 = 1;
    /// Highest possible rating.
    pub const MAX: u8 = 5;

    /// Number of stars.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Filled/empty flags for each of the five star slots, in display order.
    #[must_use]
    pub fn stars(self) -> Vec<bool> {
        (1..=Self::MAX).map(|slot| slot <= self.0).collect()
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(RatingError::OutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
