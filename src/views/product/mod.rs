//! External product representation.
//!
//! Rating, reviews, features and tags have no backing data yet; they are
//! served as the fixed values below until those features exist.

mod detail;
mod page;
mod summary;

pub use detail::Detail;
pub use page::{Page, Pagination};
pub use summary::Summary;

pub const PLACEHOLDER_RATING: f64 = 4.5;
pub const PLACEHOLDER_REVIEWS: u32 = 0;
pub const PLACEHOLDER_FEATURES: [&str; 0] = [];
pub const PLACEHOLDER_TAGS: [&str; 0] = [];

/// Shown as `createdBy` when the creator is unknown or gone.
pub const UNKNOWN_CREATOR: &str = "Unknown";
