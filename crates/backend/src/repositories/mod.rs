//! Typed queries over the [`DataStore`](crate::store::DataStore) seam.

mod caption_repo;
mod image_repo;
mod vote_repo;

pub use caption_repo::CaptionRepo;
pub use image_repo::ImageRepo;
pub use vote_repo::VoteRepo;

/// Ordering column shared by both galleries (newest first).
pub(crate) const CREATED_COLUMN: &str = "created_datetime_utc";
