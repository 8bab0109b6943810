//! Rows of the `images` table.

use capvote_core::types::RowId;
use serde::{Deserialize, Serialize};

/// A row from the `images` table.
///
/// Every column is nullable on the backend, so every field is optional.
/// Timestamps are kept as the backend's text so rows with or without a UTC
/// offset both decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: Option<RowId>,
    pub url: Option<String>,
    pub is_public: Option<bool>,
    pub is_common_use: Option<bool>,
    pub profile_id: Option<RowId>,
    pub additional_context: Option<String>,
    pub image_description: Option<String>,
    pub celebrity_recognition: Option<String>,
    pub created_datetime_utc: Option<String>,
    pub modified_datetime_utc: Option<String>,
}
