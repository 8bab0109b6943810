//! Rows of the `captions` table joined with their image.

use capvote_core::types::RowId;
use serde::{Deserialize, Serialize};

/// A caption row with the `images(url)` join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    pub id: RowId,
    pub content: Option<String>,
    pub created_datetime_utc: Option<String>,
    /// The joined image; `null` when the caption has no image.
    #[serde(default)]
    pub images: Option<CaptionImage>,
}

/// The slice of the joined image a caption card needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionImage {
    pub url: Option<String>,
}

impl Caption {
    /// URL of the joined image, if there is one.
    pub fn image_url(&self) -> Option<&str> {
        self.images.as_ref()?.url.as_deref()
    }
}
